use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use threads_client::client::error::{ClientError, ClientResult};
use threads_client::client::models::activity::ActivityState;
use threads_client::client::models::feed::{FeedState, FeedTab};
use threads_client::client::models::load::LoadStatus;
use threads_client::client::models::login::LoginForm;
use threads_client::client::models::post_card::LikeAction;
use threads_client::client::models::screen::{Screen, ScreenController, Tab};
use threads_client::client::models::search::{FollowAction, SearchState, SearchStep};
use threads_client::client::services::api_client::ApiClient;
use threads_client::client::services::search_service::search_all;
use threads_client::client::services::transport::{ApiRequest, Transport};
use threads_client::client::utils::session_store::{MemorySessionStore, SessionProvider};

/// Answers requests in order from a script and remembers what was sent.
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<ClientResult<Value>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn with(replies: Vec<ClientResult<Value>>) -> Arc<Self> {
        Arc::new(Self { script: Mutex::new(replies.into()), sent: Mutex::default() })
    }

    fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        self.sent.lock().unwrap().push(request);
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(Value::Null))
    }
}

fn post_json(id: i64, likes: u64) -> Value {
    json!({
        "id": id,
        "user": {"id": 2, "username": "janedoe", "name": "Jane"},
        "content": "hello",
        "created_at": "2024-01-01T00:00:00Z",
        "likes_count": likes,
        "replies_count": 0
    })
}

#[tokio::test]
async fn login_lands_on_home_and_persists_token() {
    let transport = ScriptedTransport::with(vec![Ok(json!({
        "token": "t1",
        "user": {"id": 1, "username": "johndoe", "name": "John Doe"}
    }))]);
    let api = ApiClient::new(transport.clone());
    let store = Arc::new(MemorySessionStore::new());
    let mut screen = ScreenController::startup(store.clone());
    assert_eq!(screen.screen(), Screen::LoggedOut);

    let mut form = LoginForm { username: "johndoe".into(), password: "x".into(), ..Default::default() };
    let session = form.submit().unwrap().send(&api).await.unwrap();
    screen.complete_login(session).unwrap();

    assert_eq!(screen.screen(), Screen::Home);
    let stored = store.get().unwrap();
    assert_eq!(stored.token, "t1");
    assert_eq!(stored.user.id, 1);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "/api/auth/login");
    assert_eq!(sent[0].body, Some(json!({"username": "johndoe", "password": "x"})));
}

#[tokio::test]
async fn logout_twice_is_idempotent() {
    let transport = ScriptedTransport::with(vec![Ok(json!({"token": "t1", "user": {"id": 1, "username": "johndoe"}}))]);
    let api = ApiClient::new(transport);
    let store = Arc::new(MemorySessionStore::new());
    let mut screen = ScreenController::startup(store.clone());
    screen.complete_login(api.login("johndoe", "x").await.unwrap().into()).unwrap();
    screen.select_tab(Tab::Profile).unwrap();

    screen.logout().unwrap();
    assert_eq!(screen.screen(), Screen::LoggedOut);
    assert!(store.get().is_none());
    assert!(screen.token().is_none());

    screen.logout().unwrap();
    assert_eq!(screen.screen(), Screen::LoggedOut);
    assert_eq!(screen.select_tab(Tab::Home), Err(ClientError::AuthRequired));
}

#[tokio::test]
async fn notifications_without_token_never_hit_the_network() {
    let transport = ScriptedTransport::with(vec![]);
    let api = ApiClient::new(transport.clone());
    let mut activity = ActivityState::default();

    let stamp = activity.begin_load();
    let result = api.notifications(None).await;
    assert!(matches!(result, Err(ClientError::AuthRequired)));
    activity.apply(stamp, result);

    assert!(activity.notifications.is_empty());
    assert_eq!(activity.status, LoadStatus::Failed("You need to log in first".into()));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn blank_post_is_rejected_locally() {
    let transport = ScriptedTransport::with(vec![]);
    let api = ApiClient::new(transport.clone());

    let err = api.create_post(Some("t1"), "   \n\t ").await.unwrap_err();
    assert!(matches!(err, ClientError::ValidationError(_)));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn liking_from_the_feed_updates_then_refetch_wins() {
    let transport = ScriptedTransport::with(vec![
        Ok(json!([post_json(7, 42)])),
        Ok(json!({"message": "liked"})),
        Ok(json!([post_json(7, 50)])),
    ]);
    let api = ApiClient::new(transport.clone());
    let mut feed = FeedState::default();

    let first = feed.begin_load();
    assert!(feed.apply(first, api.list_posts(FeedTab::ForYou).await));

    let card = feed.card_mut(7).unwrap();
    assert_eq!(card.toggle_like(true).unwrap(), Some(LikeAction::Like));
    assert!(card.liked);
    assert_eq!(card.likes_count, 43);

    api.like_post(Some("t1"), 7).await.unwrap();
    card.like_confirmed();

    let second = feed.begin_load();
    assert!(feed.apply(second, api.list_posts(FeedTab::ForYou).await));
    assert_eq!(feed.card(7).unwrap().likes_count, 50);
    assert!(!feed.card(7).unwrap().liked);

    let sent = transport.sent();
    assert_eq!(sent[1].path, "/api/posts/7/like");
    assert_eq!(sent[1].bearer.as_deref(), Some("t1"));
}

#[tokio::test]
async fn following_a_search_result_bumps_its_count() {
    let transport = ScriptedTransport::with(vec![
        Ok(json!([{"id": 2, "username": "janedoe", "name": "Jane", "followers_count": 10}])),
        Ok(json!([])),
        Ok(json!({"message": "User followed successfully"})),
    ]);
    let api = ApiClient::new(transport.clone());
    let mut search = SearchState::default();

    let SearchStep::Debounce(stamp) = search.set_query("jane".into()) else { panic!("query was blank") };
    let query = search.debounce_elapsed(stamp).unwrap();
    let (users, posts) = search_all(&api, &query).await;
    assert!(search.apply(stamp, users, posts));

    let action = search.begin_follow(2).unwrap();
    assert_eq!(action, FollowAction::Follow);
    let result = api.follow_user(Some("t1"), 2).await;
    assert!(search.follow_finished(2, action, result.is_ok()));

    assert!(search.is_following(2));
    assert_eq!(search.users[0].followers_count, 11);
    let sent = transport.sent();
    assert_eq!(sent[2].path, "/api/users/2/follow");
    assert_eq!(sent[2].bearer.as_deref(), Some("t1"));
}
