use std::fmt;
use std::sync::Arc;

use crate::client::error::{ClientError, ClientResult};
use crate::client::models::domain::{Session, User};
use crate::client::utils::session_store::SessionProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Home,
    Search,
    Create,
    Activity,
    Profile,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Search, Tab::Create, Tab::Activity, Tab::Profile]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tab::Home => "Home",
            Tab::Search => "Search",
            Tab::Create => "Create",
            Tab::Activity => "Activity",
            Tab::Profile => "Profile",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    LoggedOut,
    Home,
    Search,
    Create,
    Activity,
    Profile,
}

impl From<Tab> for Screen {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Home => Screen::Home,
            Tab::Search => Screen::Search,
            Tab::Create => Screen::Create,
            Tab::Activity => Screen::Activity,
            Tab::Profile => Screen::Profile,
        }
    }
}

impl Screen {
    pub fn tab(&self) -> Option<Tab> {
        match self {
            Screen::LoggedOut => None,
            Screen::Home => Some(Tab::Home),
            Screen::Search => Some(Tab::Search),
            Screen::Create => Some(Tab::Create),
            Screen::Activity => Some(Tab::Activity),
            Screen::Profile => Some(Tab::Profile),
        }
    }
}

/// Top-level navigation. Every screen except `LoggedOut` requires a session,
/// and the session is always persisted before the screen changes.
pub struct ScreenController {
    screen: Screen,
    session: Option<Session>,
    store: Arc<dyn SessionProvider>,
}

impl fmt::Debug for ScreenController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenController")
            .field("screen", &self.screen)
            .field("user", &self.session.as_ref().map(|s| &s.user.username))
            .finish()
    }
}

impl ScreenController {
    /// Reads the stored session: `Home` if one exists, `LoggedOut` otherwise.
    pub fn startup(store: Arc<dyn SessionProvider>) -> Self {
        let session = store.get();
        let screen = if session.is_some() { Screen::Home } else { Screen::LoggedOut };
        match &session {
            Some(s) => log::info!("[APP] Restored session for @{}", s.user.username),
            None => log::info!("[APP] No stored session"),
        }
        Self { screen, session, store }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Persists the session, then moves to `Home`. Nothing changes if the
    /// store refuses the write.
    pub fn complete_login(&mut self, session: Session) -> ClientResult<()> {
        self.store.set(session.clone())?;
        log::info!("[APP] Logged in as @{}", session.user.username);
        self.session = Some(session);
        self.screen = Screen::Home;
        Ok(())
    }

    /// Replaces the cached user (e.g. after a profile edit) keeping the token.
    pub fn update_user(&mut self, user: User) -> ClientResult<()> {
        let Some(current) = &self.session else {
            return Err(ClientError::AuthRequired);
        };
        let session = Session { token: current.token.clone(), user };
        self.store.set(session.clone())?;
        self.session = Some(session);
        Ok(())
    }

    pub fn select_tab(&mut self, tab: Tab) -> ClientResult<()> {
        if self.session.is_none() {
            return Err(ClientError::AuthRequired);
        }
        self.screen = tab.into();
        Ok(())
    }

    /// Navigation after a post was published from the composer.
    pub fn post_submitted(&mut self) {
        if self.screen == Screen::Create {
            self.screen = Screen::Home;
        }
    }

    /// Clears the stored session, then moves to `LoggedOut`. Safe to repeat.
    pub fn logout(&mut self) -> ClientResult<()> {
        self.store.clear()?;
        if self.session.take().is_some() {
            log::info!("[APP] Logged out");
        }
        self.screen = Screen::LoggedOut;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::utils::session_store::MemorySessionStore;

    fn session(token: &str) -> Session {
        Session { token: token.into(), user: User { id: 1, username: "johndoe".into(), ..Default::default() } }
    }

    struct FailingStore;

    impl SessionProvider for FailingStore {
        fn get(&self) -> Option<Session> {
            None
        }
        fn set(&self, _session: Session) -> ClientResult<()> {
            Err(ClientError::Storage("keyring locked".into()))
        }
        fn clear(&self) -> ClientResult<()> {
            Ok(())
        }
    }

    #[test]
    fn startup_depends_on_stored_session() {
        let empty = ScreenController::startup(Arc::new(MemorySessionStore::new()));
        assert_eq!(empty.screen(), Screen::LoggedOut);

        let stored = ScreenController::startup(Arc::new(MemorySessionStore::with_session(session("t0"))));
        assert_eq!(stored.screen(), Screen::Home);
        assert_eq!(stored.token(), Some("t0"));
    }

    #[test]
    fn tabs_are_unreachable_without_session() {
        let mut ctl = ScreenController::startup(Arc::new(MemorySessionStore::new()));
        assert_eq!(ctl.select_tab(Tab::Profile), Err(ClientError::AuthRequired));
        assert_eq!(ctl.screen(), Screen::LoggedOut);
    }

    #[test]
    fn login_persists_before_transition() {
        let store = Arc::new(MemorySessionStore::new());
        let mut ctl = ScreenController::startup(store.clone());
        ctl.complete_login(session("t1")).unwrap();
        assert_eq!(ctl.screen(), Screen::Home);
        assert_eq!(store.get().map(|s| s.token), Some("t1".to_string()));
    }

    #[test]
    fn failed_persist_keeps_logged_out() {
        let mut ctl = ScreenController::startup(Arc::new(FailingStore));
        assert!(ctl.complete_login(session("t1")).is_err());
        assert_eq!(ctl.screen(), Screen::LoggedOut);
        assert!(!ctl.is_logged_in());
    }

    #[test]
    fn create_returns_home_after_posting() {
        let mut ctl = ScreenController::startup(Arc::new(MemorySessionStore::with_session(session("t1"))));
        ctl.select_tab(Tab::Create).unwrap();
        ctl.post_submitted();
        assert_eq!(ctl.screen(), Screen::Home);

        ctl.select_tab(Tab::Search).unwrap();
        ctl.post_submitted();
        assert_eq!(ctl.screen(), Screen::Search);
    }

    #[test]
    fn logout_clears_store_and_is_idempotent() {
        let store = Arc::new(MemorySessionStore::with_session(session("t1")));
        let mut ctl = ScreenController::startup(store.clone());
        ctl.select_tab(Tab::Activity).unwrap();

        ctl.logout().unwrap();
        assert_eq!(ctl.screen(), Screen::LoggedOut);
        assert_eq!(store.get(), None);
        assert_eq!(ctl.token(), None);

        ctl.logout().unwrap();
        assert_eq!(ctl.screen(), Screen::LoggedOut);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn profile_edit_keeps_token() {
        let store = Arc::new(MemorySessionStore::with_session(session("t1")));
        let mut ctl = ScreenController::startup(store.clone());
        let renamed = User { id: 1, username: "johndoe".into(), name: "Johnny".into(), ..Default::default() };
        ctl.update_user(renamed).unwrap();
        let saved = store.get().unwrap();
        assert_eq!(saved.token, "t1");
        assert_eq!(saved.user.name, "Johnny");
    }
}
