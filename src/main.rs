use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use landmark_quest::config::Config;
use landmark_quest::infrastructure::{AppState, SeaOrmKeyValueStore};
use landmark_quest::{db, server};

/// Value of `--profile <name>` on the command line, if any
fn profile_arg() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == "--profile")
        .and_then(|pos| args.get(pos + 1).cloned())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landmark_quest=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let cli_profile = profile_arg();
    let config = Config::from_vars(|key| match (key, &cli_profile) {
        ("PROFILE", Some(profile)) => Some(profile.clone()),
        _ => std::env::var(key).ok(),
    });

    // Initialize the key-value store
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");
    let store = Arc::new(SeaOrmKeyValueStore::new(db));

    let preferred_port = config.port;
    let state = AppState::new(config, store).expect("Failed to build application state");
    let app = server::build_router(state);

    // Find available port
    let port = server::find_available_port(preferred_port).expect("Failed to find available port");

    if port != preferred_port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            preferred_port,
            port
        );
    }

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Landmark Quest server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
