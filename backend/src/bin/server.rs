//! Architecture timeline HTTP server binary.
//!
//! Initializes the repository, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Empty in-memory repository (default)
//! cargo run --bin arch-timeline-server
//!
//! # Preload a content export
//! CONTENT_SNAPSHOT=backend/data/sample_content.json \
//!   cargo run --bin arch-timeline-server
//!
//! # Use a config file
//! REPOSITORY_CONFIG=backend/repository.toml cargo run --bin arch-timeline-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: `memory` or `snapshot`
//! - `CONTENT_SNAPSHOT`: Content file preloaded as a dataset
//! - `REPOSITORY_CONFIG`: Path to `repository.toml`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use arch_timeline::db::{self, RepositoryConfig};
use arch_timeline::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting architecture timeline server");

    // Snapshot parsing is synchronous; keep it off the runtime threads.
    tokio::task::spawn_blocking(db::init_repository).await??;
    let repository = Arc::clone(db::get_repository()?);
    let datasets = db::list_datasets(repository.as_ref()).await?;
    info!("Repository initialized with {} dataset(s)", datasets.len());

    let mut state = AppState::new(repository);
    match RepositoryConfig::from_default_location() {
        Ok(config) => {
            info!(
                "Using layout and {} extra gazetteer entries from repository.toml",
                config.gazetteer.entries.len()
            );
            state = state
                .with_gazetteer(config.build_gazetteer())
                .with_layout(config.layout);
        }
        Err(e) if env::var(db::repo_config::REPOSITORY_CONFIG_ENV).is_ok() => {
            return Err(e.into());
        }
        Err(e) => info!("No repository.toml loaded, using defaults: {}", e),
    }

    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
