use std::sync::Arc;

use crate::client::config::ClientConfig;
use crate::client::gui::views::logger::LogMessage;
use crate::client::models::activity::ActivityState;
use crate::client::models::composer::ComposerState;
use crate::client::models::feed::FeedState;
use crate::client::models::login::LoginForm;
use crate::client::models::profile::ProfileState;
use crate::client::models::screen::{Screen, ScreenController};
use crate::client::models::search::SearchState;
use crate::client::services::api_client::ApiClient;
use crate::client::services::conferencing::{open_in_browser, JitsiMeetBackend};
use crate::client::utils::session_store::SessionProvider;

/// Long-lived collaborators shared by every update.
#[derive(Clone)]
pub struct Services {
    pub api: ApiClient,
    pub conference: Arc<JitsiMeetBackend>,
    pub config: ClientConfig,
}

impl Services {
    pub fn new(api: ApiClient, config: ClientConfig) -> Self {
        let mut backend = JitsiMeetBackend::new(config.conference_domain.clone());
        if config.open_meetings {
            backend = backend.with_opener(Box::new(open_in_browser));
        }
        Self { api, conference: Arc::new(backend), config }
    }
}

#[derive(Debug)]
pub struct ThreadsAppState {
    pub screen: ScreenController,
    pub login: LoginForm,
    pub feed: FeedState,
    pub search: SearchState,
    pub composer: ComposerState,
    pub activity: ActivityState,
    pub profile: ProfileState,
    pub logger: Vec<LogMessage>,
}

impl ThreadsAppState {
    pub fn new(store: Arc<dyn SessionProvider>) -> Self {
        Self {
            screen: ScreenController::startup(store),
            login: LoginForm::default(),
            feed: FeedState::default(),
            search: SearchState::default(),
            composer: ComposerState::default(),
            activity: ActivityState::default(),
            profile: ProfileState::default(),
            logger: Vec::new(),
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.screen.screen()
    }

    pub fn token(&self) -> Option<String> {
        self.screen.token().map(str::to_string)
    }

    /// Drops every per-user screen state, used on logout. Load stamps keep
    /// counting, so responses to the previous user's requests are ignored.
    pub fn reset_user_state(&mut self) {
        self.feed.reset();
        self.search.reset();
        self.composer = ComposerState::default();
        self.activity.reset();
        self.profile.reset();
        self.login.reset();
    }

    pub fn push_log(&mut self, log: LogMessage) {
        self.logger.push(log);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::domain::{Session, User};
    use crate::client::utils::session_store::MemorySessionStore;

    #[test]
    fn stored_session_opens_home_with_token() {
        let session = Session {
            token: "t1".into(),
            user: User { id: 1, username: "johndoe".into(), ..Default::default() },
        };
        let state = ThreadsAppState::new(Arc::new(MemorySessionStore::with_session(session)));
        assert_eq!(state.current_screen(), Screen::Home);
        assert_eq!(state.token().as_deref(), Some("t1"));
    }

    #[test]
    fn reset_keeps_login_mode() {
        let mut state = ThreadsAppState::new(Arc::new(MemorySessionStore::new()));
        state.login.is_register = true;
        state.login.username = "x".into();
        state.composer.content = "draft".into();
        state.reset_user_state();
        assert!(state.login.is_register);
        assert!(state.login.username.is_empty());
        assert!(state.composer.content.is_empty());
    }

    #[test]
    fn reset_leaves_earlier_loads_stale() {
        let mut state = ThreadsAppState::new(Arc::new(MemorySessionStore::new()));
        let feed = state.feed.begin_load();
        let activity = state.activity.begin_load();
        let profile = state.profile.begin_load();
        state.reset_user_state();

        assert!(!state.feed.apply(feed, Ok(vec![])));
        assert!(!state.activity.apply(activity, Ok(vec![])));
        assert!(!state.profile.apply(profile, Ok(User::default())));
        assert_ne!(state.profile.begin_load(), profile);
    }
}
