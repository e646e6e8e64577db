use crate::client::error::{ClientError, ClientResult};
use crate::client::models::domain::{Post, Reply};
use crate::client::services::api_client::require_content;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

/// Interactive state of one post in a list.
///
/// Counters start from the server's numbers and are adjusted optimistically
/// until the next feed reload replaces the whole card.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCardState {
    pub post: Post,
    pub liked: bool,
    pub likes_count: u64,
    pub replies_count: u64,
    pub reply_draft_visible: bool,
    pub reply_draft: String,
    pub like_in_flight: Option<LikeAction>,
    pub reply_submitting: bool,
    pub replies: Option<Vec<Reply>>,
    pub error: Option<String>,
}

impl From<Post> for PostCardState {
    fn from(post: Post) -> Self {
        Self {
            liked: post.viewer_has_liked,
            likes_count: post.likes_count,
            replies_count: post.replies_count,
            post,
            reply_draft_visible: false,
            reply_draft: String::new(),
            like_in_flight: None,
            reply_submitting: false,
            replies: None,
            error: None,
        }
    }
}

impl PostCardState {
    pub fn id(&self) -> i64 {
        self.post.id
    }

    /// Flips the like locally and returns the request to send.
    ///
    /// Ignored (returns `Ok(None)`) while a previous toggle is still in flight.
    pub fn toggle_like(&mut self, authenticated: bool) -> ClientResult<Option<LikeAction>> {
        if !authenticated {
            self.error = Some(ClientError::AuthRequired.to_string());
            return Err(ClientError::AuthRequired);
        }
        if self.like_in_flight.is_some() {
            return Ok(None);
        }
        let action = if self.liked { LikeAction::Unlike } else { LikeAction::Like };
        self.apply_like(action);
        self.like_in_flight = Some(action);
        self.error = None;
        Ok(Some(action))
    }

    pub fn like_confirmed(&mut self) {
        self.like_in_flight = None;
    }

    /// Undoes the optimistic change made for `action`.
    pub fn like_failed(&mut self, action: LikeAction, err: &ClientError) {
        if self.like_in_flight != Some(action) {
            return;
        }
        let inverse = match action {
            LikeAction::Like => LikeAction::Unlike,
            LikeAction::Unlike => LikeAction::Like,
        };
        self.apply_like(inverse);
        self.like_in_flight = None;
        self.error = Some(err.to_string());
    }

    fn apply_like(&mut self, action: LikeAction) {
        match action {
            LikeAction::Like => {
                self.liked = true;
                self.likes_count += 1;
            }
            LikeAction::Unlike => {
                self.liked = false;
                self.likes_count = self.likes_count.saturating_sub(1);
            }
        }
    }

    pub fn toggle_reply_draft(&mut self) {
        self.reply_draft_visible = !self.reply_draft_visible;
        if !self.reply_draft_visible {
            self.reply_draft.clear();
        }
        self.error = None;
    }

    pub fn set_reply_draft(&mut self, text: String) {
        self.reply_draft = text;
    }

    /// Validates the draft and marks the reply as submitting.
    pub fn begin_reply(&mut self) -> ClientResult<String> {
        match require_content(&self.reply_draft, "Reply") {
            Ok(content) => {
                self.reply_submitting = true;
                self.error = None;
                Ok(content)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn reply_succeeded(&mut self) {
        self.replies_count += 1;
        self.reply_draft.clear();
        self.reply_draft_visible = false;
        self.reply_submitting = false;
    }

    pub fn reply_failed(&mut self, err: &ClientError) {
        self.reply_submitting = false;
        self.error = Some(err.to_string());
    }
}
