use std::fmt;

use crate::client::error::ClientResult;
use crate::client::models::domain::Post;
use crate::client::models::load::{Generation, LoadStatus};
use crate::client::models::post_card::PostCardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedTab {
    #[default]
    ForYou,
    Following,
}

impl FeedTab {
    pub fn all() -> &'static [FeedTab] {
        &[FeedTab::ForYou, FeedTab::Following]
    }

    /// Value of the `feed` query parameter; the default feed sends none.
    /// Servers that do not filter by follows answer `following` with the
    /// full timeline.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            FeedTab::ForYou => None,
            FeedTab::Following => Some("following"),
        }
    }
}

impl fmt::Display for FeedTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeedTab::ForYou => "For you",
            FeedTab::Following => "Following",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub tab: FeedTab,
    pub status: LoadStatus,
    pub cards: Vec<PostCardState>,
    generation: Generation,
}

impl FeedState {
    /// Marks a reload as started and returns its stamp.
    pub fn begin_load(&mut self) -> u64 {
        self.status = LoadStatus::Loading;
        self.generation.next()
    }

    /// Forgets everything loaded for the signed-in user. The stamp counter
    /// survives, so answers to requests sent before the reset stay stale.
    pub fn reset(&mut self) {
        let mut generation = self.generation;
        generation.invalidate();
        *self = Self { generation, ..Self::default() };
    }

    /// Switches content tab; returns a load stamp only if the tab changed.
    pub fn select_tab(&mut self, tab: FeedTab) -> Option<u64> {
        if self.tab == tab {
            return None;
        }
        self.tab = tab;
        Some(self.begin_load())
    }

    /// Replaces every card with the server's list. Stale responses are
    /// dropped and `false` is returned.
    pub fn apply(&mut self, generation: u64, result: ClientResult<Vec<Post>>) -> bool {
        if !self.generation.is_current(generation) {
            log::debug!("[FEED] Dropping stale feed response #{}", generation);
            return false;
        }
        match result {
            Ok(posts) => {
                self.cards = posts.into_iter().map(PostCardState::from).collect();
                self.status = LoadStatus::settled(self.cards.is_empty());
            }
            Err(e) => {
                self.cards.clear();
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    pub fn card(&self, post_id: i64) -> Option<&PostCardState> {
        self.cards.iter().find(|c| c.id() == post_id)
    }

    pub fn card_mut(&mut self, post_id: i64) -> Option<&mut PostCardState> {
        self.cards.iter_mut().find(|c| c.id() == post_id)
    }
}
