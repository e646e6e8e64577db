use std::time::Duration;

use crate::client::models::domain::{Post, User};
use crate::client::services::api_client::ApiClient;

/// Resolves to `stamp` after `delay`; the caller compares it with the
/// current search generation.
pub async fn debounce(delay: Duration, stamp: u64) -> u64 {
    tokio::time::sleep(delay).await;
    stamp
}

/// Runs the user and post searches together. A failing half degrades to an
/// empty list with a warning instead of failing the whole search.
pub async fn search_all(api: &ApiClient, query: &str) -> (Vec<User>, Vec<Post>) {
    let (users, posts) = tokio::join!(api.search_users(query), api.search_posts(query));
    let users = users.unwrap_or_else(|e| {
        log::warn!("[SEARCH] User search for '{}' failed: {}", query, e);
        Vec::new()
    });
    let posts = posts.unwrap_or_else(|e| {
        log::warn!("[SEARCH] Post search for '{}' failed: {}", query, e);
        Vec::new()
    });
    (users, posts)
}
