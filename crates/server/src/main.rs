//! Todo server
//!
//! Listens for single-request TCP connections on `TODO_LISTEN_ADDR`
//! (default port 9986) and stores entities under `TODO_DATA_DIR`.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_server::config::ServerConfig;
use todo_server::server::Server;
use todo_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=debug,todo_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    tracing::info!("Using data directory: {:?}", config.data_dir);
    tracing::info!(
        "Serialization mode: {}, id strategy: {}",
        config.serialization_mode,
        config.id_strategy
    );

    let state = AppState::new(&config)
        .await
        .context("failed to initialize application state")?;

    let server = Server::bind(&config.listen_addr, state, config.read_buffer_bytes)
        .await
        .with_context(|| format!("can't listen on {}", config.listen_addr))?;
    tracing::info!("Server listening on {}", server.local_addr()?);

    server
        .serve(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", err);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
