use crate::client::error::ClientError;
use crate::client::models::domain::{CallType, Notification, Post, Reply, Session, User};
use crate::client::models::feed::FeedTab;
use crate::client::models::post_card::LikeAction;
use crate::client::models::screen::Tab;
use crate::client::models::search::FollowAction;

#[derive(Debug, Clone)]
pub enum Message {
    // Login / register form
    UsernameChanged(String),
    PasswordChanged(String),
    EmailChanged(String),
    NameChanged(String),
    ToggleShowPassword,
    ToggleLoginRegister,
    SubmitLoginOrRegister,
    AuthResult(Result<Session, ClientError>),
    Logout,
    // Shell navigation
    TabSelected(Tab),
    // Home feed
    FeedTabSelected(FeedTab),
    RefreshFeed,
    FeedLoaded { generation: u64, result: Result<Vec<Post>, ClientError> },
    ToggleLike(i64),
    LikeResult { post_id: i64, action: LikeAction, result: Result<(), ClientError> },
    ToggleReplyDraft(i64),
    ReplyDraftChanged(i64, String),
    SubmitReply(i64),
    ReplyResult { post_id: i64, result: Result<(), ClientError> },
    ShowReplies(i64),
    RepliesLoaded { post_id: i64, result: Result<Vec<Reply>, ClientError> },
    // Search
    SearchQueryChanged(String),
    SearchDebounceElapsed(u64),
    SearchResults { generation: u64, users: Vec<User>, posts: Vec<Post> },
    ToggleFollow(i64),
    FollowResult { user_id: i64, action: FollowAction, result: Result<(), ClientError> },
    // Composer
    ComposerChanged(String),
    SubmitPost,
    PostResult(Result<Post, ClientError>),
    // Activity
    ActivityLoaded { generation: u64, result: Result<Vec<Notification>, ClientError> },
    MarkNotificationRead(i64),
    NotificationMarked { id: i64, result: Result<(), ClientError> },
    // Profile
    ProfileLoaded { generation: u64, result: Result<User, ClientError> },
    EditProfile,
    CancelEditProfile,
    ProfileNameChanged(String),
    ProfileBioChanged(String),
    ProfileAvatarChanged(String),
    SaveProfile,
    ProfileSaved(Result<User, ClientError>),
    // Calls
    OpenCallSetup(CallType),
    CallRoomChanged(String),
    CallTypeSelected(CallType),
    CancelCallSetup,
    StartCall,
    EndCall,
    /// Carries the conference session id the poll was scheduled for.
    PollCallEvents(u64),
    CopyCallLink,
    // Status bar
    ClearLog,
}
