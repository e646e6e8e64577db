use std::sync::Arc;
use std::time::Duration;

use iced::widget::{Column, Container, Space};
use iced::{Application, Command, Element, Length, Theme};

use crate::client::gui::style::bg_main_appearance;
use crate::client::gui::views::logger::{logger_view, LogMessage};
use crate::client::gui::views::{activity, create, home, login, profile, search};
use crate::client::gui::widgets::bottom_nav;
use crate::client::models::app_state::{Services, ThreadsAppState};
use crate::client::models::call::CallState;
use crate::client::models::messages::Message;
use crate::client::models::post_card::LikeAction;
use crate::client::models::screen::Screen;
use crate::client::models::search::{FollowAction, SearchStep};
use crate::client::services::conferencing::ConferenceEvent;
use crate::client::services::search_service::{debounce, search_all};
use crate::client::utils::session_store::SessionProvider;

const LOG_CLEAR_DELAY: Duration = Duration::from_millis(2000);
const CALL_POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct AppFlags {
    pub services: Services,
    pub store: Arc<dyn SessionProvider>,
}

pub struct ThreadsApp {
    pub state: ThreadsAppState,
    pub services: Services,
}

impl ThreadsApp {
    /// Shows `log` in the status bar and schedules its removal.
    fn log(&mut self, log: LogMessage) -> Command<Message> {
        self.state.push_log(log);
        Command::perform(tokio::time::sleep(LOG_CLEAR_DELAY), |_| Message::ClearLog)
    }

    fn load_feed(&mut self) -> Command<Message> {
        let generation = self.state.feed.begin_load();
        self.fetch_feed(generation)
    }

    fn fetch_feed(&self, generation: u64) -> Command<Message> {
        let api = self.services.api.clone();
        let tab = self.state.feed.tab;
        Command::perform(async move { api.list_posts(tab).await }, move |result| Message::FeedLoaded {
            generation,
            result,
        })
    }

    fn load_activity(&mut self) -> Command<Message> {
        let generation = self.state.activity.begin_load();
        let api = self.services.api.clone();
        let token = self.state.token();
        Command::perform(async move { api.notifications(token.as_deref()).await }, move |result| {
            Message::ActivityLoaded { generation, result }
        })
    }

    fn load_profile(&mut self) -> Command<Message> {
        let generation = self.state.profile.begin_load();
        let api = self.services.api.clone();
        let token = self.state.token();
        Command::perform(async move { api.profile(token.as_deref()).await }, move |result| {
            Message::ProfileLoaded { generation, result }
        })
    }

    /// Fetch-on-mount for whichever screen is now showing.
    fn screen_entered(&mut self) -> Command<Message> {
        match self.state.current_screen() {
            Screen::Home => self.load_feed(),
            Screen::Activity => self.load_activity(),
            Screen::Profile => self.load_profile(),
            Screen::LoggedOut | Screen::Search | Screen::Create => Command::none(),
        }
    }

    fn poll_call_later(session_id: u64) -> Command<Message> {
        Command::perform(tokio::time::sleep(CALL_POLL_INTERVAL), move |_| Message::PollCallEvents(session_id))
    }

    fn handle(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UsernameChanged(v) => {
                self.state.login.username = v;
                Command::none()
            }
            Message::PasswordChanged(v) => {
                self.state.login.password = v;
                Command::none()
            }
            Message::EmailChanged(v) => {
                self.state.login.email = v;
                Command::none()
            }
            Message::NameChanged(v) => {
                self.state.login.name = v;
                Command::none()
            }
            Message::ToggleShowPassword => {
                self.state.login.show_password = !self.state.login.show_password;
                Command::none()
            }
            Message::ToggleLoginRegister => {
                self.state.login.toggle_mode();
                Command::none()
            }
            Message::SubmitLoginOrRegister => match self.state.login.submit() {
                Ok(request) => {
                    let api = self.services.api.clone();
                    let notice = self.log(LogMessage::info(format!("Connecting to {}...", self.services.config.api_base_url)));
                    let auth = Command::perform(async move { request.send(&api).await }, Message::AuthResult);
                    Command::batch(vec![notice, auth])
                }
                Err(e) => self.log(LogMessage::from_error(&e)),
            },
            Message::AuthResult(Ok(session)) => {
                let username = session.user.username.clone();
                match self.state.screen.complete_login(session) {
                    Ok(()) => {
                        self.state.login.reset();
                        let notice = self.log(LogMessage::success(format!("Logged in as @{}", username)));
                        Command::batch(vec![notice, self.load_feed()])
                    }
                    Err(e) => {
                        log::error!("[APP] Could not persist session: {}", e);
                        self.state.login.failed(&e);
                        self.log(LogMessage::error(format!("Could not save the session: {}", e)))
                    }
                }
            }
            Message::AuthResult(Err(e)) => {
                log::warn!("[APP] Authentication failed: {}", e);
                self.state.login.failed(&e);
                self.log(LogMessage::from_error(&e))
            }
            Message::Logout => {
                self.state.profile.call.end(self.services.conference.as_ref());
                match self.state.screen.logout() {
                    Ok(()) => {
                        self.state.reset_user_state();
                        self.log(LogMessage::info("Logged out"))
                    }
                    Err(e) => self.log(LogMessage::from_error(&e)),
                }
            }

            Message::TabSelected(tab) => match self.state.screen.select_tab(tab) {
                Ok(()) => self.screen_entered(),
                Err(e) => self.log(LogMessage::from_error(&e)),
            },

            Message::FeedTabSelected(tab) => match self.state.feed.select_tab(tab) {
                Some(generation) => self.fetch_feed(generation),
                None => Command::none(),
            },
            Message::RefreshFeed => self.load_feed(),
            Message::FeedLoaded { generation, result } => {
                if let Err(e) = &result {
                    log::warn!("[FEED] Loading posts failed: {}", e);
                }
                self.state.feed.apply(generation, result);
                Command::none()
            }
            Message::ToggleLike(post_id) => {
                let authenticated = self.state.screen.is_logged_in();
                let toggled = match self.state.feed.card_mut(post_id) {
                    Some(card) => card.toggle_like(authenticated),
                    None => return Command::none(),
                };
                match toggled {
                    Ok(Some(action)) => {
                        let api = self.services.api.clone();
                        let token = self.state.token();
                        Command::perform(
                            async move {
                                match action {
                                    LikeAction::Like => api.like_post(token.as_deref(), post_id).await,
                                    LikeAction::Unlike => api.unlike_post(token.as_deref(), post_id).await,
                                }
                            },
                            move |result| Message::LikeResult { post_id, action, result },
                        )
                    }
                    Ok(None) => Command::none(),
                    Err(e) => self.log(LogMessage::from_error(&e)),
                }
            }
            Message::LikeResult { post_id, action, .. }
                if self.state.feed.card(post_id).and_then(|c| c.like_in_flight) != Some(action) =>
            {
                log::debug!("[FEED] Ignoring like result for post {} that is no longer pending", post_id);
                Command::none()
            }
            Message::LikeResult { post_id, action, result } => match result {
                Ok(()) => {
                    if let Some(card) = self.state.feed.card_mut(post_id) {
                        card.like_confirmed();
                    }
                    self.load_feed()
                }
                Err(e) => {
                    log::warn!("[FEED] Like on post {} failed: {}", post_id, e);
                    if let Some(card) = self.state.feed.card_mut(post_id) {
                        card.like_failed(action, &e);
                    }
                    self.log(LogMessage::from_error(&e))
                }
            },
            Message::ToggleReplyDraft(post_id) => {
                if let Some(card) = self.state.feed.card_mut(post_id) {
                    card.toggle_reply_draft();
                }
                Command::none()
            }
            Message::ReplyDraftChanged(post_id, text) => {
                if let Some(card) = self.state.feed.card_mut(post_id) {
                    card.set_reply_draft(text);
                }
                Command::none()
            }
            Message::SubmitReply(post_id) => {
                let Some(card) = self.state.feed.card_mut(post_id) else {
                    return Command::none();
                };
                if card.reply_submitting {
                    return Command::none();
                }
                match card.begin_reply() {
                    Ok(content) => {
                        let api = self.services.api.clone();
                        let token = self.state.token();
                        Command::perform(
                            async move { api.create_reply(token.as_deref(), post_id, &content).await },
                            move |result| Message::ReplyResult { post_id, result },
                        )
                    }
                    Err(_) => Command::none(),
                }
            }
            Message::ReplyResult { post_id, .. }
                if !self.state.feed.card(post_id).is_some_and(|c| c.reply_submitting) =>
            {
                Command::none()
            }
            Message::ReplyResult { post_id, result } => match result {
                Ok(()) => {
                    if let Some(card) = self.state.feed.card_mut(post_id) {
                        card.reply_succeeded();
                    }
                    let notice = self.log(LogMessage::success("Reply posted"));
                    Command::batch(vec![notice, self.load_feed()])
                }
                Err(e) => {
                    if let Some(card) = self.state.feed.card_mut(post_id) {
                        card.reply_failed(&e);
                    }
                    self.log(LogMessage::from_error(&e))
                }
            },
            Message::ShowReplies(post_id) => {
                let api = self.services.api.clone();
                Command::perform(async move { api.list_replies(post_id).await }, move |result| {
                    Message::RepliesLoaded { post_id, result }
                })
            }
            Message::RepliesLoaded { post_id, result } => {
                if let Some(card) = self.state.feed.card_mut(post_id) {
                    match result {
                        Ok(replies) => card.replies = Some(replies),
                        Err(e) => card.error = Some(e.to_string()),
                    }
                }
                Command::none()
            }

            Message::SearchQueryChanged(query) => match self.state.search.set_query(query) {
                SearchStep::Cleared => Command::none(),
                SearchStep::Debounce(stamp) => {
                    Command::perform(debounce(self.services.config.search_debounce, stamp), Message::SearchDebounceElapsed)
                }
            },
            Message::SearchDebounceElapsed(stamp) => match self.state.search.debounce_elapsed(stamp) {
                Some(query) => {
                    let api = self.services.api.clone();
                    Command::perform(async move { search_all(&api, &query).await }, move |(users, posts)| {
                        Message::SearchResults { generation: stamp, users, posts }
                    })
                }
                None => Command::none(),
            },
            Message::SearchResults { generation, users, posts } => {
                self.state.search.apply(generation, users, posts);
                Command::none()
            }
            Message::ToggleFollow(user_id) => match self.state.search.begin_follow(user_id) {
                Some(action) => {
                    let api = self.services.api.clone();
                    let token = self.state.token();
                    Command::perform(
                        async move {
                            match action {
                                FollowAction::Follow => api.follow_user(token.as_deref(), user_id).await,
                                FollowAction::Unfollow => api.unfollow_user(token.as_deref(), user_id).await,
                            }
                        },
                        move |result| Message::FollowResult { user_id, action, result },
                    )
                }
                None => Command::none(),
            },
            Message::FollowResult { user_id, action, result } => {
                if !self.state.search.follow_finished(user_id, action, result.is_ok()) {
                    return Command::none();
                }
                match result {
                    Ok(()) => Command::none(),
                    Err(e) => {
                        log::warn!("[SEARCH] {:?} of user {} failed: {}", action, user_id, e);
                        self.log(LogMessage::from_error(&e))
                    }
                }
            }

            Message::ComposerChanged(content) => {
                self.state.composer.set_content(content);
                Command::none()
            }
            Message::SubmitPost => match self.state.composer.begin_submit() {
                Ok(content) => {
                    let api = self.services.api.clone();
                    let token = self.state.token();
                    Command::perform(async move { api.create_post(token.as_deref(), &content).await }, Message::PostResult)
                }
                Err(e) => self.log(LogMessage::from_error(&e)),
            },
            Message::PostResult(_) if !self.state.composer.submitting => Command::none(),
            Message::PostResult(Ok(post)) => {
                log::info!("[APP] Published post {}", post.id);
                self.state.composer.submitted();
                self.state.screen.post_submitted();
                let notice = self.log(LogMessage::success("Posted"));
                Command::batch(vec![notice, self.load_feed()])
            }
            Message::PostResult(Err(e)) => {
                self.state.composer.failed(&e);
                self.log(LogMessage::from_error(&e))
            }

            Message::ActivityLoaded { generation, result } => {
                self.state.activity.apply(generation, result);
                Command::none()
            }
            Message::MarkNotificationRead(id) => {
                if !self.state.activity.mark_read(id) {
                    return Command::none();
                }
                let api = self.services.api.clone();
                let token = self.state.token();
                Command::perform(async move { api.mark_notification_read(token.as_deref(), id).await }, move |result| {
                    Message::NotificationMarked { id, result }
                })
            }
            Message::NotificationMarked { id, result } => {
                if let Err(e) = result {
                    log::warn!("[ACTIVITY] Marking notification {} read failed: {}", id, e);
                }
                Command::none()
            }

            Message::ProfileLoaded { generation, result } => {
                let fresh = result.as_ref().ok().cloned();
                if self.state.profile.apply(generation, result) {
                    if let Some(user) = fresh {
                        if let Err(e) = self.state.screen.update_user(user) {
                            log::warn!("[APP] Could not refresh stored user: {}", e);
                        }
                    }
                }
                Command::none()
            }
            Message::EditProfile => {
                self.state.profile.start_editing();
                Command::none()
            }
            Message::CancelEditProfile => {
                self.state.profile.cancel_editing();
                Command::none()
            }
            Message::ProfileNameChanged(v) => {
                if let Some(draft) = self.state.profile.draft.as_mut() {
                    draft.name = v;
                }
                Command::none()
            }
            Message::ProfileBioChanged(v) => {
                if let Some(draft) = self.state.profile.draft.as_mut() {
                    draft.bio = v;
                }
                Command::none()
            }
            Message::ProfileAvatarChanged(v) => {
                if let Some(draft) = self.state.profile.draft.as_mut() {
                    draft.avatar_url = v;
                }
                Command::none()
            }
            Message::SaveProfile => match self.state.profile.begin_save() {
                Ok(update) => {
                    let api = self.services.api.clone();
                    let token = self.state.token();
                    Command::perform(async move { api.update_profile(token.as_deref(), &update).await }, Message::ProfileSaved)
                }
                Err(_) => Command::none(),
            },
            Message::ProfileSaved(_) if !self.state.profile.is_saving() => Command::none(),
            Message::ProfileSaved(result) => {
                let notice = match &result {
                    Ok(user) => match self.state.screen.update_user(user.clone()) {
                        Ok(()) => LogMessage::success("Profile updated"),
                        Err(e) => LogMessage::from_error(&e),
                    },
                    Err(e) => LogMessage::from_error(e),
                };
                self.state.profile.save_finished(result);
                self.log(notice)
            }

            Message::OpenCallSetup(call_type) => {
                self.state.profile.call.open(call_type);
                Command::none()
            }
            Message::CallRoomChanged(room) => {
                self.state.profile.call.set_room_input(room);
                Command::none()
            }
            Message::CallTypeSelected(call_type) => {
                self.state.profile.call.set_call_type(call_type);
                Command::none()
            }
            Message::CancelCallSetup => {
                self.state.profile.call.cancel();
                Command::none()
            }
            Message::StartCall => {
                let display_name = self.services.config.call_display_name.clone();
                match self.state.profile.call.start(self.services.conference.as_ref(), &display_name) {
                    Ok(call) => {
                        let notice = self.log(LogMessage::info(format!("Joined {}", call.room_name)));
                        match self.state.profile.call.session_id() {
                            Some(id) => Command::batch(vec![notice, Self::poll_call_later(id)]),
                            None => notice,
                        }
                    }
                    Err(e) => self.log(LogMessage::from_error(&e)),
                }
            }
            // one polling loop per call; timers left over from an ended call stop here
            Message::PollCallEvents(session_id)
                if self.state.profile.call.session_id() != Some(session_id) =>
            {
                Command::none()
            }
            Message::PollCallEvents(session_id) => {
                if let Some(call) = self.state.profile.call.poll_events(self.services.conference.as_ref()) {
                    return self.log(LogMessage::info(format!("Call in {} ended", call.room_name)));
                }
                Self::poll_call_later(session_id)
            }
            Message::EndCall => {
                // hang up goes through the same close signal the meeting raises
                let CallState::Active { handle, .. } = self.state.profile.call.state() else {
                    return Command::none();
                };
                let session_id = handle.id;
                self.services.conference.emit(handle, ConferenceEvent::ReadyToClose);
                self.handle(Message::PollCallEvents(session_id))
            }
            Message::CopyCallLink => {
                let link = match self.state.profile.call.state() {
                    CallState::Active { handle, .. } => handle.join_url.clone(),
                    _ => return Command::none(),
                };
                let notice = self.log(LogMessage::info("Meeting link copied"));
                Command::batch(vec![iced::clipboard::write(link), notice])
            }

            Message::ClearLog => {
                if !self.state.logger.is_empty() {
                    self.state.logger.remove(0);
                }
                Command::none()
            }
        }
    }
}

impl Application for ThreadsApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        let mut app = ThreadsApp { state: ThreadsAppState::new(flags.store), services: flags.services };
        // a restored session lands on Home, which loads the feed
        let cmd = app.screen_entered();
        (app, cmd)
    }

    fn title(&self) -> String {
        match self.state.screen.current_user() {
            Some(user) => format!("Threads - @{}", user.username),
            None => "Threads".to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        self.handle(message)
    }

    fn view(&self) -> Element<Message> {
        let screen = self.state.current_screen();
        let content: Element<Message> = match screen {
            Screen::LoggedOut => login::view(&self.state.login),
            Screen::Home => home::view(&self.state.feed),
            Screen::Search => search::view(&self.state.search, self.state.screen.current_user()),
            Screen::Create => create::view(&self.state.composer, self.state.screen.current_user()),
            Screen::Activity => activity::view(&self.state.activity),
            Screen::Profile => profile::view(&self.state.profile),
        };

        let status_bar = if self.state.logger.is_empty() {
            Container::new(Space::new(Length::Fill, Length::Fixed(0.0)))
        } else {
            Container::new(logger_view(&self.state.logger)).width(Length::Fill).padding([8, 12, 0, 12])
        };

        let mut layout = Column::new()
            .push(status_bar)
            .push(Container::new(content).width(Length::Fill).height(Length::Fill));
        if let Some(tab) = screen.tab() {
            layout = layout.push(bottom_nav::view(tab, self.state.activity.unread_count()));
        }

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(bg_main_appearance)))
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
