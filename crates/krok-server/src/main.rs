//! Binary entrypoint for the Krok HTTP server.
//!
//! Loads `.env` (if present), reads [`Settings`] from the environment, opens
//! the stores, and serves the router. See [`krok_server::config`] for the
//! recognised variables; log verbosity follows `RUST_LOG` (default: `info`).

use krok_server::config::Settings;
use krok_server::router::build_router;
use krok_server::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::info!("loaded environment from {}", path.display());
    }

    let settings = Settings::from_env()?;
    let addr = settings.bind_addr();
    let project_name = settings.project_name.clone();

    let state = AppState::new(settings)?;
    let app = build_router(state);

    tracing::info!("{} starting on {}", project_name, addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
