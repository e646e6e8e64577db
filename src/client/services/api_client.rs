//! Typed wrapper over the Threads REST surface.
//!
//! Authenticated operations take the bearer token as `Option<&str>` and fail
//! locally with [`ClientError::AuthRequired`] before touching the transport
//! when it is missing. Blank post / reply content is rejected the same way
//! with [`ClientError::ValidationError`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::client::config::ClientConfig;
use crate::client::error::{ClientError, ClientResult};
use crate::client::models::domain::{AuthResponse, Notification, Post, Reply, User};
use crate::client::models::feed::FeedTab;
use crate::client::services::transport::{ApiRequest, HttpTransport, Transport};

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: String,
    pub avatar_url: String,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn from_config(cfg: &ClientConfig) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(&cfg.api_base_url, cfg.request_timeout)?;
        Ok(Self::new(Arc::new(transport)))
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let value = self.transport.send(request).await?;
        serde_json::from_value(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn ack(&self, request: ApiRequest) -> ClientResult<()> {
        self.transport.send(request).await.map(|_| ())
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        let req = ApiRequest::post("/api/auth/login")
            .json(json!({ "username": username, "password": password }));
        self.call(req).await
    }

    pub async fn register(&self, form: &RegisterRequest) -> ClientResult<AuthResponse> {
        let body = serde_json::to_value(form).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        self.call(ApiRequest::post("/api/auth/register").json(body)).await
    }

    pub async fn list_posts(&self, feed: FeedTab) -> ClientResult<Vec<Post>> {
        let mut req = ApiRequest::get("/api/posts");
        if let Some(value) = feed.query_value() {
            req = req.query("feed", value);
        }
        self.call(req).await
    }

    pub async fn search_users(&self, query: &str) -> ClientResult<Vec<User>> {
        self.call(ApiRequest::get("/api/search/users").query("q", query)).await
    }

    pub async fn search_posts(&self, query: &str) -> ClientResult<Vec<Post>> {
        self.call(ApiRequest::get("/api/search/posts").query("q", query)).await
    }

    pub async fn create_post(&self, token: Option<&str>, content: &str) -> ClientResult<Post> {
        let content = require_content(content, "Post")?;
        let token = require_token(token)?;
        let req = ApiRequest::post("/api/posts")
            .bearer(token)
            .json(json!({ "content": content }));
        self.call(req).await
    }

    pub async fn like_post(&self, token: Option<&str>, post_id: i64) -> ClientResult<()> {
        let token = require_token(token)?;
        self.ack(ApiRequest::post(format!("/api/posts/{}/like", post_id)).bearer(token)).await
    }

    pub async fn unlike_post(&self, token: Option<&str>, post_id: i64) -> ClientResult<()> {
        let token = require_token(token)?;
        self.ack(ApiRequest::post(format!("/api/posts/{}/unlike", post_id)).bearer(token)).await
    }

    pub async fn create_reply(&self, token: Option<&str>, post_id: i64, content: &str) -> ClientResult<()> {
        let content = require_content(content, "Reply")?;
        let token = require_token(token)?;
        let req = ApiRequest::post(format!("/api/posts/{}/replies", post_id))
            .bearer(token)
            .json(json!({ "content": content }));
        self.ack(req).await
    }

    pub async fn list_replies(&self, post_id: i64) -> ClientResult<Vec<Reply>> {
        self.call(ApiRequest::get(format!("/api/posts/{}/replies", post_id))).await
    }

    pub async fn follow_user(&self, token: Option<&str>, user_id: i64) -> ClientResult<()> {
        let token = require_token(token)?;
        self.ack(ApiRequest::post(format!("/api/users/{}/follow", user_id)).bearer(token)).await
    }

    pub async fn unfollow_user(&self, token: Option<&str>, user_id: i64) -> ClientResult<()> {
        let token = require_token(token)?;
        self.ack(ApiRequest::post(format!("/api/users/{}/unfollow", user_id)).bearer(token)).await
    }

    pub async fn notifications(&self, token: Option<&str>) -> ClientResult<Vec<Notification>> {
        let token = require_token(token)?;
        self.call(ApiRequest::get("/api/notifications").bearer(token)).await
    }

    pub async fn mark_notification_read(&self, token: Option<&str>, notification_id: i64) -> ClientResult<()> {
        let token = require_token(token)?;
        self.ack(ApiRequest::post(format!("/api/notifications/{}/read", notification_id)).bearer(token))
            .await
    }

    pub async fn profile(&self, token: Option<&str>) -> ClientResult<User> {
        let token = require_token(token)?;
        self.call(ApiRequest::get("/api/users/profile").bearer(token)).await
    }

    pub async fn update_profile(&self, token: Option<&str>, update: &ProfileUpdate) -> ClientResult<User> {
        let token = require_token(token)?;
        let body = serde_json::to_value(update).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        self.call(ApiRequest::put("/api/users/profile").bearer(token).json(body)).await
    }
}

fn require_token(token: Option<&str>) -> ClientResult<&str> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ClientError::AuthRequired)
}

/// Trims user-entered content, rejecting empty or whitespace-only text.
pub fn require_content(raw: &str, what: &str) -> ClientResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::services::transport::fake::FakeTransport;
    use crate::client::services::transport::HttpMethod;

    fn client() -> (Arc<FakeTransport>, ApiClient) {
        let fake = Arc::new(FakeTransport::new());
        let api = ApiClient::new(fake.clone());
        (fake, api)
    }

    #[tokio::test]
    async fn login_posts_credentials_without_token() {
        let (fake, api) = client();
        fake.reply(Ok(json!({"token": "t1", "user": {"id": 1, "username": "johndoe"}})));

        let resp = api.login("johndoe", "x").await.unwrap();
        assert_eq!(resp.token, "t1");
        assert_eq!(resp.user.id, 1);

        let sent = fake.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].path, "/api/auth/login");
        assert_eq!(sent[0].bearer, None);
        assert_eq!(sent[0].body, Some(json!({"username": "johndoe", "password": "x"})));
    }

    #[tokio::test]
    async fn authenticated_calls_fail_locally_without_token() {
        let (fake, api) = client();
        assert_eq!(api.notifications(None).await, Err(ClientError::AuthRequired));
        assert_eq!(api.profile(Some("  ")).await, Err(ClientError::AuthRequired));
        assert_eq!(api.like_post(None, 3).await, Err(ClientError::AuthRequired));
        assert!(fake.sent().is_empty());
    }

    #[tokio::test]
    async fn blank_content_is_rejected_before_the_request() {
        let (fake, api) = client();
        let err = api.create_post(Some("t1"), " \n\t ").await.unwrap_err();
        assert!(matches!(err, ClientError::ValidationError(_)));
        let err = api.create_reply(Some("t1"), 4, "").await.unwrap_err();
        assert!(matches!(err, ClientError::ValidationError(_)));
        assert!(fake.sent().is_empty());
    }

    #[tokio::test]
    async fn bearer_and_trimmed_body_are_attached() {
        let (fake, api) = client();
        fake.reply(Ok(json!({"id": 9, "content": "hello"})));
        let post = api.create_post(Some("t1"), "  hello ").await.unwrap();
        assert_eq!(post.id, 9);
        let sent = fake.sent();
        assert_eq!(sent[0].bearer.as_deref(), Some("t1"));
        assert_eq!(sent[0].body, Some(json!({"content": "hello"})));
    }

    #[tokio::test]
    async fn following_feed_adds_query_parameter() {
        let (fake, api) = client();
        fake.reply(Ok(json!([]))).reply(Ok(json!([])));
        api.list_posts(FeedTab::ForYou).await.unwrap();
        api.list_posts(FeedTab::Following).await.unwrap();
        let sent = fake.sent();
        assert!(sent[0].query.is_empty());
        assert_eq!(sent[1].query, vec![("feed".to_string(), "following".to_string())]);
    }

    #[tokio::test]
    async fn follow_and_unfollow_are_authenticated_posts() {
        let (fake, api) = client();
        assert_eq!(api.follow_user(None, 2).await, Err(ClientError::AuthRequired));
        assert!(fake.sent().is_empty());

        fake.reply(Ok(json!({"message": "User followed successfully"})));
        fake.reply(Err(ClientError::from_status(400, r#"{"message":"Cannot follow yourself"}"#)));
        api.follow_user(Some("t1"), 2).await.unwrap();
        let err = api.unfollow_user(Some("t1"), 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot follow yourself");

        let sent = fake.sent();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].path, "/api/users/2/follow");
        assert_eq!(sent[0].bearer.as_deref(), Some("t1"));
        assert_eq!(sent[1].path, "/api/users/1/unfollow");
    }

    #[tokio::test]
    async fn undecodable_body_is_an_invalid_response() {
        let (fake, api) = client();
        fake.reply(Ok(json!({"unexpected": true})));
        let err = api.list_posts(FeedTab::ForYou).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn http_errors_pass_through() {
        let (fake, api) = client();
        fake.reply(Err(ClientError::from_status(401, r#"{"message":"Invalid credentials"}"#)));
        let err = api.login("johndoe", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
