use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::client::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// A fully described REST call, independent of the HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, bearer: None }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Carries an [`ApiRequest`] to the server and hands back the decoded JSON body.
///
/// Implementations map non-2xx answers to [`ClientError::HttpError`] and
/// connection problems to [`ClientError::NetworkFailure`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value>;
}

pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        // a trailing slash makes Url::join append instead of replacing the last segment
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("threads-client")
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn url_for(&self, request: &ApiRequest) -> ClientResult<Url> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| ClientError::NetworkFailure(format!("invalid request url: {}", e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let url = self.url_for(&request)?;
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Post => self.client.post(url.clone()),
            HttpMethod::Put => self.client.put(url.clone()),
        };
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        log::debug!("[API] {:?} {}", request.method, url.path());
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::NetworkFailure("request timed out".to_string())
            } else {
                ClientError::NetworkFailure(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkFailure(e.to_string()))?;

        if !status.is_success() {
            log::debug!("[API] {} answered {}", url.path(), status.as_u16());
            return Err(ClientError::from_status(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Records every request and answers from canned replies: per-path ones
    /// first, then a shared queue, then `null`.
    #[derive(Default)]
    pub struct FakeTransport {
        pub requests: Mutex<Vec<ApiRequest>>,
        replies: Mutex<VecDeque<ClientResult<Value>>>,
        by_path: Mutex<HashMap<String, VecDeque<ClientResult<Value>>>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(&self, reply: ClientResult<Value>) -> &Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub fn reply_to(&self, path: &str, reply: ClientResult<Value>) -> &Self {
            self.by_path
                .lock()
                .unwrap()
                .entry(path.to_string())
                .or_default()
                .push_back(reply);
            self
        }

        pub fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
            let routed = self
                .by_path
                .lock()
                .unwrap()
                .get_mut(&request.path)
                .and_then(|q| q.pop_front());
            self.requests.lock().unwrap().push(request);
            routed
                .or_else(|| self.replies.lock().unwrap().pop_front())
                .unwrap_or(Ok(Value::Null))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_and_query_onto_base() {
        let transport = HttpTransport::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        let req = ApiRequest::get("/api/search/users").query("q", "john doe");
        let url = transport.url_for(&req).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/search/users?q=john+doe");
    }

    #[test]
    fn keeps_base_path_prefix() {
        let transport = HttpTransport::new("https://example.com/threads", Duration::from_secs(1)).unwrap();
        let url = transport.url_for(&ApiRequest::get("/api/posts")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/threads/api/posts");
    }
}
