use std::sync::Arc;

use iced::{Application, Settings, Size};
use threads_client::client::config::ClientConfig;
use threads_client::client::gui::app::{AppFlags, ThreadsApp};
use threads_client::client::models::app_state::Services;
use threads_client::client::services::api_client::ApiClient;
use threads_client::client::utils::session_store::KeyringSessionStore;

fn main() -> anyhow::Result<()> {
    // load environment from .env (optional)
    let cfg = ClientConfig::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cfg.log_level.as_str())).init();
    log::info!("[APP] Using API at {}", cfg.api_base_url);

    let api = ApiClient::from_config(&cfg)?;
    let store = Arc::new(KeyringSessionStore::from_config(&cfg));
    let flags = AppFlags { services: Services::new(api, cfg), store };

    let mut settings = Settings::with_flags(flags);
    settings.window.size = Size::new(480.0, 820.0);
    ThreadsApp::run(settings)?;
    Ok(())
}
