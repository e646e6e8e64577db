use crate::client::error::{ClientError, ClientResult};
use crate::client::services::api_client::require_content;

/// Shown as a counter; longer posts are flagged but not blocked.
pub const SOFT_CHAR_LIMIT: usize = 500;

#[derive(Debug, Clone, Default)]
pub struct ComposerState {
    pub content: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl ComposerState {
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.error = None;
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn over_limit(&self) -> bool {
        self.char_count() > SOFT_CHAR_LIMIT
    }

    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.char_count(), SOFT_CHAR_LIMIT)
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.content.trim().is_empty()
    }

    /// Validates locally; on success the composer is marked as submitting.
    pub fn begin_submit(&mut self) -> ClientResult<String> {
        if self.submitting {
            return Err(ClientError::validation("Already posting"));
        }
        match require_content(&self.content, "Post") {
            Ok(content) => {
                self.submitting = true;
                self.error = None;
                Ok(content)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn submitted(&mut self) {
        *self = ComposerState::default();
    }

    pub fn failed(&mut self, err: &ClientError) {
        self.submitting = false;
        self.error = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_rejected() {
        for blank in ["", " ", "\n\t  "] {
            let mut c = ComposerState::default();
            c.set_content(blank.to_string());
            assert!(!c.can_submit());
            assert!(matches!(c.begin_submit(), Err(ClientError::ValidationError(_))));
            assert!(!c.submitting);
        }
    }

    #[test]
    fn limit_is_soft() {
        let mut c = ComposerState::default();
        c.set_content("é".repeat(501));
        assert_eq!(c.counter_label(), "501/500");
        assert!(c.over_limit());
        assert!(c.begin_submit().is_ok());
    }

    #[test]
    fn success_clears_the_draft() {
        let mut c = ComposerState::default();
        c.set_content("hello".into());
        c.begin_submit().unwrap();
        c.submitted();
        assert!(c.content.is_empty());
        assert!(!c.submitting);
    }
}
