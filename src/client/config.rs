use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub search_debounce: Duration,
    pub conference_domain: String,
    pub call_display_name: String,
    /// Launch meetings in the system browser when a call starts.
    pub open_meetings: bool,
    pub keyring_fallback: bool,
    pub session_file: PathBuf,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup, applying defaults
    /// for anything missing or unparsable.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            api_base_url: non_empty("API_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(
                non_empty("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(15),
            ),
            search_debounce: Duration::from_millis(
                non_empty("SEARCH_DEBOUNCE_MS").and_then(|v| v.parse().ok()).unwrap_or(500),
            ),
            conference_domain: non_empty("CONFERENCE_DOMAIN").unwrap_or_else(|| "meet.jit.si".to_string()),
            call_display_name: non_empty("CALL_DISPLAY_NAME").unwrap_or_else(|| "User".to_string()),
            open_meetings: non_empty("OPEN_MEETINGS").map(|v| v == "true" || v == "1").unwrap_or(true),
            keyring_fallback: non_empty("KEYRING_FALLBACK").map(|v| v == "true" || v == "1").unwrap_or(false),
            session_file: non_empty("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data").join("session.json")),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }
}
