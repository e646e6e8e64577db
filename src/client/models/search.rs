use std::collections::HashSet;

use crate::client::models::domain::{Post, User};
use crate::client::models::load::{Generation, LoadStatus};

/// What the caller should do after the query changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep {
    /// Blank query: results were cleared, nothing to send.
    Cleared,
    /// Wait for the debounce interval, then report back with this stamp.
    Debounce(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Unfollow,
}

/// Debounced search over users and posts.
///
/// Every keystroke bumps the generation. A debounce timer only fires a
/// request if its stamp is still current, and results are only applied if
/// they belong to the latest stamp, so a slow answer for an old query can
/// never overwrite a newer one.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub status: LoadStatus,
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    generation: Generation,
    following: HashSet<i64>,
    follow_pending: HashSet<i64>,
}

impl SearchState {
    pub fn set_query(&mut self, query: String) -> SearchStep {
        self.query = query;
        let stamp = self.generation.next();
        if self.query.trim().is_empty() {
            self.users.clear();
            self.posts.clear();
            self.status = LoadStatus::Idle;
            return SearchStep::Cleared;
        }
        SearchStep::Debounce(stamp)
    }

    /// Debounce timer for `stamp` expired; returns the query to send if the
    /// input has not changed since.
    pub fn debounce_elapsed(&mut self, stamp: u64) -> Option<String> {
        if !self.generation.is_current(stamp) {
            return None;
        }
        let q = self.query.trim();
        if q.is_empty() {
            return None;
        }
        self.status = LoadStatus::Loading;
        Some(q.to_string())
    }

    /// Clears the query, results and follow marks of the signed-in user.
    pub fn reset(&mut self) {
        let mut generation = self.generation;
        generation.invalidate();
        *self = Self { generation, ..Self::default() };
    }

    pub fn is_following(&self, user_id: i64) -> bool {
        self.following.contains(&user_id)
    }

    pub fn is_follow_pending(&self, user_id: i64) -> bool {
        self.follow_pending.contains(&user_id)
    }

    /// Picks follow or unfollow for `user_id`. `None` while a request for
    /// that user is still pending.
    pub fn begin_follow(&mut self, user_id: i64) -> Option<FollowAction> {
        if !self.follow_pending.insert(user_id) {
            return None;
        }
        Some(if self.following.contains(&user_id) { FollowAction::Unfollow } else { FollowAction::Follow })
    }

    /// Settles a pending follow request. On success the listed follower
    /// count moves by one. Returns `false` when nothing was pending for
    /// `user_id`, which is the case after a reset.
    pub fn follow_finished(&mut self, user_id: i64, action: FollowAction, succeeded: bool) -> bool {
        if !self.follow_pending.remove(&user_id) {
            return false;
        }
        if !succeeded {
            return true;
        }
        let listed = self.users.iter_mut().find(|u| u.id == user_id);
        match action {
            FollowAction::Follow => {
                self.following.insert(user_id);
                if let Some(u) = listed {
                    u.followers_count += 1;
                }
            }
            FollowAction::Unfollow => {
                self.following.remove(&user_id);
                if let Some(u) = listed {
                    u.followers_count = u.followers_count.saturating_sub(1);
                }
            }
        }
        true
    }

    pub fn apply(&mut self, stamp: u64, users: Vec<User>, posts: Vec<Post>) -> bool {
        if !self.generation.is_current(stamp) {
            log::debug!("[SEARCH] Dropping results for outdated query #{}", stamp);
            return false;
        }
        self.status = LoadStatus::settled(users.is_empty() && posts.is_empty());
        self.users = users;
        self.posts = posts;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_last_keystroke_fires() {
        let mut s = SearchState::default();
        let stamps: Vec<u64> = ["a", "ab", "abc"]
            .iter()
            .map(|q| match s.set_query(q.to_string()) {
                SearchStep::Debounce(g) => g,
                SearchStep::Cleared => panic!("non-blank query cleared"),
            })
            .collect();
        assert_eq!(s.debounce_elapsed(stamps[0]), None);
        assert_eq!(s.debounce_elapsed(stamps[1]), None);
        assert_eq!(s.debounce_elapsed(stamps[2]), Some("abc".to_string()));
        assert!(s.status.is_loading());
    }

    #[test]
    fn blank_query_short_circuits() {
        let mut s = SearchState::default();
        s.users.push(User::default());
        assert_eq!(s.set_query("   ".into()), SearchStep::Cleared);
        assert!(s.users.is_empty());
        assert_eq!(s.status, LoadStatus::Idle);
    }

    #[test]
    fn late_results_for_an_old_query_are_dropped() {
        let mut s = SearchState::default();
        let SearchStep::Debounce(old) = s.set_query("jo".into()) else { panic!() };
        s.debounce_elapsed(old);
        let SearchStep::Debounce(new) = s.set_query("john".into()) else { panic!() };
        s.debounce_elapsed(new);

        let john = User { username: "john".into(), ..Default::default() };
        assert!(s.apply(new, vec![john.clone()], vec![]));
        assert!(!s.apply(old, vec![], vec![]));
        assert_eq!(s.users, vec![john]);
        assert_eq!(s.status, LoadStatus::Ready);
    }

    fn listed(id: i64, followers: u64) -> User {
        User { id, username: format!("user{}", id), followers_count: followers, ..Default::default() }
    }

    #[test]
    fn follow_then_unfollow_moves_the_count() {
        let mut s = SearchState::default();
        let SearchStep::Debounce(g) = s.set_query("jane".into()) else { panic!() };
        s.apply(g, vec![listed(2, 10)], vec![]);

        assert_eq!(s.begin_follow(2), Some(FollowAction::Follow));
        assert_eq!(s.begin_follow(2), None);
        assert!(s.is_follow_pending(2));
        assert!(s.follow_finished(2, FollowAction::Follow, true));
        assert!(s.is_following(2));
        assert_eq!(s.users[0].followers_count, 11);

        assert_eq!(s.begin_follow(2), Some(FollowAction::Unfollow));
        assert!(s.follow_finished(2, FollowAction::Unfollow, true));
        assert!(!s.is_following(2));
        assert_eq!(s.users[0].followers_count, 10);
    }

    #[test]
    fn failed_follow_changes_nothing() {
        let mut s = SearchState::default();
        let SearchStep::Debounce(g) = s.set_query("jane".into()) else { panic!() };
        s.apply(g, vec![listed(2, 10)], vec![]);
        s.begin_follow(2);
        assert!(s.follow_finished(2, FollowAction::Follow, false));
        assert!(!s.is_following(2));
        assert!(!s.is_follow_pending(2));
        assert_eq!(s.users[0].followers_count, 10);
    }

    #[test]
    fn reset_forgets_follows_and_late_results() {
        let mut s = SearchState::default();
        let SearchStep::Debounce(g) = s.set_query("jane".into()) else { panic!() };
        s.debounce_elapsed(g);
        s.begin_follow(2);
        s.reset();

        assert!(s.query.is_empty());
        assert!(!s.apply(g, vec![listed(2, 10)], vec![]));
        assert!(!s.follow_finished(2, FollowAction::Follow, true));
        assert!(!s.is_following(2));
    }
}
