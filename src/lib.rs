pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod export;
pub mod state;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use auth::MockAuthenticator;
use config::Config;
use state::AppState;

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("ARTICLE_DASH_LOG"))
        .init();

    let config = Config::from_env().expect("failed to load configuration");

    let store = match &config.seed_path {
        Some(path) => storage::load_from_file(path).expect("failed to load articles"),
        None => storage::mock_store(config.mock_count),
    };

    let app = AppState::new(
        store,
        MockAuthenticator::new(config.login_delay()),
        config.search_delay(),
    );

    api::run_server(app, &config.listen_addr).await
}
