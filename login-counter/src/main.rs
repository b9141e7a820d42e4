//! login-counter - records per-user login counts and serves the admin user list.

use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;

use login_counter::{
    logging, routes, AppState, Config, HookRegistry, LoginCounter, SqliteStore, SystemClock,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    if env::args().any(|a| a == "--version" || a == "-V") {
        println!("login-counter {}", VERSION);
        return Ok(());
    }

    // Load configuration
    let config = Config::load().map_err(|e| format!("Failed to load configuration: {}", e))?;

    logging::init(&config.logging.level);
    tracing::info!("Starting login-counter {}", VERSION);

    let store = Arc::new(SqliteStore::new(&config.database.url)?);
    let clock = Arc::new(SystemClock::new(config.display.clock));

    let mut hooks = HookRegistry::new();
    LoginCounter::new(store.clone(), clock, &config.display, &config.columns).install(&mut hooks);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, store, hooks));
    let app = routes::app(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
