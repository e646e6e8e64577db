use crate::client::error::{ClientError, ClientResult};
use crate::client::models::domain::Session;
use crate::client::services::api_client::{ApiClient, RegisterRequest};

/// What a validated login form asks the server to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login { username: String, password: String },
    Register { username: String, email: String, password: String, name: String },
}

impl AuthRequest {
    /// Sends the request and turns the server's answer into a session.
    pub async fn send(self, api: &ApiClient) -> ClientResult<Session> {
        let response = match self {
            AuthRequest::Login { username, password } => api.login(&username, &password).await?,
            AuthRequest::Register { username, email, password, name } => {
                api.register(&RegisterRequest { username, email, password, name }).await?
            }
        };
        Ok(Session::from(response))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    pub is_register: bool,
    pub show_password: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn toggle_mode(&mut self) {
        self.is_register = !self.is_register;
        self.error = None;
    }

    /// Checks required fields and marks the form as loading.
    pub fn submit(&mut self) -> ClientResult<AuthRequest> {
        if self.loading {
            return Err(ClientError::validation("A request is already in progress"));
        }
        let result = self.validate();
        match &result {
            Ok(_) => {
                self.loading = true;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        result
    }

    fn validate(&self) -> ClientResult<AuthRequest> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ClientError::validation("Username is required"));
        }
        if self.password.is_empty() {
            return Err(ClientError::validation("Password is required"));
        }
        if !self.is_register {
            return Ok(AuthRequest::Login { username: username.to_string(), password: self.password.clone() });
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ClientError::validation("A valid email is required"));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientError::validation("Name is required"));
        }
        Ok(AuthRequest::Register {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            name: name.to_string(),
        })
    }

    pub fn failed(&mut self, err: &ClientError) {
        self.loading = false;
        self.error = Some(err.to_string());
    }

    /// Forgets everything typed, keeping the chosen mode.
    pub fn reset(&mut self) {
        *self = LoginForm { is_register: self.is_register, ..Default::default() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::services::transport::fake::FakeTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn login_needs_username_and_password() {
        let mut form = LoginForm { username: "  ".into(), password: "x".into(), ..Default::default() };
        assert!(matches!(form.submit(), Err(ClientError::ValidationError(_))));
        assert!(!form.loading);
        assert_eq!(form.error.as_deref(), Some("Username is required"));

        form.username = " johndoe ".into();
        assert_eq!(
            form.submit(),
            Ok(AuthRequest::Login { username: "johndoe".into(), password: "x".into() })
        );
        assert!(form.loading);
    }

    #[test]
    fn register_needs_email_and_name() {
        let mut form = LoginForm { username: "jd".into(), password: "pw".into(), is_register: true, ..Default::default() };
        assert!(form.submit().is_err());
        form.email = "jd@example.com".into();
        assert!(form.submit().is_err());
        form.name = "John Doe".into();
        match form.submit().unwrap() {
            AuthRequest::Register { email, name, .. } => {
                assert_eq!(email, "jd@example.com");
                assert_eq!(name, "John Doe");
            }
            other => panic!("expected register, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn register_request_posts_every_field() {
        let fake = Arc::new(FakeTransport::new());
        fake.reply(Ok(json!({"token": "t9", "user": {"id": 9, "username": "jd"}})));
        let api = ApiClient::new(fake.clone());

        let request = AuthRequest::Register {
            username: "jd".into(),
            email: "jd@example.com".into(),
            password: "pw".into(),
            name: "John Doe".into(),
        };
        let session = request.send(&api).await.unwrap();
        assert_eq!(session.token, "t9");
        assert_eq!(session.user.username, "jd");

        let sent = fake.sent();
        assert_eq!(sent[0].path, "/api/auth/register");
        assert_eq!(sent[0].body.as_ref().unwrap()["email"], "jd@example.com");
        assert!(sent[0].bearer.is_none());
    }

    #[test]
    fn double_submit_is_refused() {
        let mut form = LoginForm { username: "jd".into(), password: "pw".into(), ..Default::default() };
        form.submit().unwrap();
        assert!(form.submit().is_err());
        form.failed(&ClientError::from_status(401, r#"{"message":"Invalid credentials"}"#));
        assert!(!form.loading);
        assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
    }
}
