use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

use threads_client::client::config::ClientConfig;
use threads_client::client::models::domain::{Post, Session};
use threads_client::client::models::feed::FeedTab;
use threads_client::client::models::login::AuthRequest;
use threads_client::client::services::api_client::ApiClient;
use threads_client::client::services::search_service::search_all;
use threads_client::client::utils::session_store::{KeyringSessionStore, SessionProvider};

const HELP: &str = "Commands:
  /login <username> <password>
  /register <username> <email> <password> <name...>
  /feed [following]
  /search <query...>
  /post <text...>
  /replies <post id>
  /follow <user id>
  /unfollow <user id>
  /notifications
  /profile
  /logout
  /quit";

fn print_posts(posts: &[Post]) {
    let now = Utc::now();
    if posts.is_empty() {
        println!("(no posts)");
    }
    for p in posts {
        println!(
            "#{} @{} · {}\n  {}\n  ♥ {}  ↩ {}  ⟳ {}",
            p.id,
            p.author.username,
            p.timestamp_label(now),
            p.content.text(),
            p.likes_count,
            p.replies_count,
            p.reposts
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = ClientConfig::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cfg.log_level.as_str())).init();

    let api = ApiClient::from_config(&cfg)?;
    let store: Arc<dyn SessionProvider> = Arc::new(KeyringSessionStore::from_config(&cfg));
    let mut session: Option<Session> = store.get();

    println!("[CLIENT] Connected to {}. Type /help for commands.", cfg.api_base_url);
    if let Some(s) = &session {
        println!("[CLIENT] Restored session for @{}", s.user.username);
    }

    let mut input = BufReader::new(stdin());
    let mut line = String::new();
    loop {
        line.clear();
        print!("> ");
        std::io::stdout().flush()?;
        if input.read_line(&mut line).await? == 0 {
            break;
        }
        let cmd = line.trim();
        if cmd.is_empty() {
            continue;
        }
        let (command, rest) = cmd.split_once(' ').unwrap_or((cmd, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();
        let token = session.as_ref().map(|s| s.token.clone());

        let outcome = async {
            match command {
                "/help" => println!("{}", HELP),
                "/quit" => return Ok(()),
                "/login" if args.len() == 2 => {
                    let request = AuthRequest::Login { username: args[0].to_string(), password: args[1].to_string() };
                    let s = request.send(&api).await?;
                    store.set(s.clone())?;
                    println!("[CLIENT] Logged in as @{}", s.user.username);
                    session = Some(s);
                }
                "/register" if args.len() >= 4 => {
                    let request = AuthRequest::Register {
                        username: args[0].to_string(),
                        email: args[1].to_string(),
                        password: args[2].to_string(),
                        name: args[3..].join(" "),
                    };
                    let s = request.send(&api).await?;
                    store.set(s.clone())?;
                    println!("[CLIENT] Registered as @{}", s.user.username);
                    session = Some(s);
                }
                "/feed" => {
                    let tab = if args.first() == Some(&"following") { FeedTab::Following } else { FeedTab::ForYou };
                    print_posts(&api.list_posts(tab).await?);
                }
                "/search" if !rest.trim().is_empty() => {
                    let (users, posts) = search_all(&api, rest.trim()).await;
                    for u in &users {
                        println!("#{} @{} ({}) · {} followers", u.id, u.username, u.display_name(), u.followers_count);
                    }
                    print_posts(&posts);
                }
                "/post" => {
                    let post = api.create_post(token.as_deref(), rest).await?;
                    println!("[CLIENT] Posted #{}", post.id);
                }
                "/replies" if args.len() == 1 => {
                    let post_id: i64 = args[0].parse()?;
                    for r in api.list_replies(post_id).await? {
                        let who = r.user.map(|u| u.username).unwrap_or_default();
                        println!("  @{}: {}", who, r.content);
                    }
                }
                "/follow" | "/unfollow" if args.len() == 1 => {
                    let user_id: i64 = args[0].parse()?;
                    if command == "/follow" {
                        api.follow_user(token.as_deref(), user_id).await?;
                        println!("[CLIENT] Following user #{}", user_id);
                    } else {
                        api.unfollow_user(token.as_deref(), user_id).await?;
                        println!("[CLIENT] Unfollowed user #{}", user_id);
                    }
                }
                "/notifications" => {
                    let list = api.notifications(token.as_deref()).await?;
                    if list.is_empty() {
                        println!("(no notifications)");
                    }
                    for n in list {
                        println!("{} [{}] {}", if n.is_read { " " } else { "*" }, n.kind, n.message);
                    }
                }
                "/profile" => {
                    let user = api.profile(token.as_deref()).await?;
                    println!(
                        "{} (@{})\n{}\n{} followers · {} following",
                        user.display_name(),
                        user.username,
                        user.bio.as_deref().unwrap_or(""),
                        user.followers_count,
                        user.following_count
                    );
                }
                "/logout" => {
                    store.clear()?;
                    session = None;
                    println!("[CLIENT] Logged out");
                }
                _ => println!("[CLIENT] Invalid command syntax. Type /help."),
            }
            Ok::<(), anyhow::Error>(())
        }
        .await;

        if let Err(e) = outcome {
            println!("[CLIENT] Error: {}", e);
        }
        if command == "/quit" {
            break;
        }
    }
    Ok(())
}
