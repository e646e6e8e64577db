use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() { &self.username } else { &self.name }
    }

    /// First letter used when no avatar image is shown.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Post body as sent by the server: either a bare string or a rich object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostContent {
    Text(String),
    Rich {
        #[serde(default)]
        text: String,
        #[serde(default)]
        attachment: Option<Attachment>,
    },
    Other(serde_json::Value),
}

impl Default for PostContent {
    fn default() -> Self {
        PostContent::Text(String::new())
    }
}

impl PostContent {
    pub fn text(&self) -> &str {
        match self {
            PostContent::Text(t) => t,
            PostContent::Rich { text, .. } => text,
            PostContent::Other(_) => "",
        }
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        match self {
            PostContent::Rich { attachment, .. } => attachment.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "user", default)]
    pub author: User,
    #[serde(default)]
    pub content: PostContent,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub replies_count: u64,
    #[serde(default, alias = "reposts_count")]
    pub reposts: u64,
    #[serde(default, rename = "is_liked")]
    pub viewer_has_liked: bool,
}

impl Post {
    pub fn timestamp_label(&self, now: DateTime<Utc>) -> String {
        self.created_at
            .as_deref()
            .map(|ts| relative_label(ts, now))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub post_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Successful login / register payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

/// Token and user always travel together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Session { token: resp.token, user: resp.user }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallType {
    #[default]
    Video,
    Audio,
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallType::Video => "Video",
            CallType::Audio => "Audio",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSession {
    pub room_name: String,
    pub call_type: CallType,
}

/// Parses a server timestamp (RFC 3339, or naive UTC as the backend emits).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Short "2h"-style label relative to `now`.
pub fn relative_label(raw: &str, now: DateTime<Utc>) -> String {
    let Some(ts) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let secs = (now - ts).num_seconds();
    match secs {
        s if s < 60 => "now".to_string(),
        s if s < 3600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3600),
        s if s < 7 * 86_400 => format!("{}d", s / 86_400),
        _ => ts.format("%b %d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_decodes_backend_shape() {
        let raw = r#"{
            "id": 7,
            "content": "Just shipped a new feature!",
            "user_id": 2,
            "user": {"id": 2, "username": "alice_dev", "name": "Alice Johnson", "followers_count": 3},
            "created_at": "2024-05-01T10:00:00.123456",
            "likes_count": 42,
            "replies_count": 8,
            "reposts": 3,
            "type": "standard_post",
            "is_liked": false
        }"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.author.username, "alice_dev");
        assert_eq!(post.content.text(), "Just shipped a new feature!");
        assert_eq!(post.likes_count, 42);
        assert_eq!(post.reposts, 3);
        assert!(!post.viewer_has_liked);
    }

    #[test]
    fn rich_content_keeps_attachment() {
        let raw = r#"{"id":1,"content":{"text":"look","attachment":{"url":"https://img/x.png","kind":"image"}}}"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.content.text(), "look");
        assert_eq!(post.content.attachment().map(|a| a.url.as_str()), Some("https://img/x.png"));
        assert_eq!(post.author, User::default());
    }

    #[test]
    fn relative_labels() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(relative_label("2024-05-01T11:59:30", now), "now");
        assert_eq!(relative_label("2024-05-01T11:15:00", now), "45m");
        assert_eq!(relative_label("2024-05-01T10:00:00.5", now), "2h");
        assert_eq!(relative_label("2024-04-28T12:00:00+00:00", now), "3d");
        assert_eq!(relative_label("2024-03-01T12:00:00Z", now), "Mar 01");
        assert_eq!(relative_label("yesterday", now), "yesterday");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user = User { username: "johndoe".into(), ..Default::default() };
        assert_eq!(user.display_name(), "johndoe");
        assert_eq!(user.initial(), "J");
    }
}
