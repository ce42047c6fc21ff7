//! forum-server - discussion-forum backend over a materialized-path post store

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forum_server::api::{create_router, AppState};
use forum_server::SqliteStore;

#[derive(Parser, Debug)]
#[command(name = "forum-server")]
#[command(about = "Discussion-forum backend over a materialized-path post store")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "FORUM_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(long, env = "FORUM_PORT", default_value = "5000")]
    port: u16,

    /// Path to SQLite database
    #[arg(long, env = "FORUM_DATABASE_PATH", default_value = "./forum.db")]
    database: String,

    /// Log level
    #[arg(long, env = "FORUM_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting forum-server v{}", env!("CARGO_PKG_VERSION"));

    let store = SqliteStore::new(&args.database)?;
    store.initialize()?;
    store.migrate()?;
    tracing::info!(database = %args.database, "storage ready");

    let state = Arc::new(AppState::from_store(Arc::new(store)));
    let router = create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router).await?;

    Ok(())
}
