mod cli;

use crate::cli::Cli;
use clap::Parser;
use linkhash_gateway::{App, AppState};
use linkhash_shortener::build_shortener;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse()?;
    linkhash_telemetry::init(cli.log_format)?;

    let base_url = cli.base_url();
    info!(
        listen_addr = %cli.listen_addr,
        base_url = %base_url,
        storage_backend = %cli.shortener.storage,
        "starting gateway"
    );

    let config = cli.shortener.into_config()?;
    let shortener = build_shortener(&config).await?;
    let app = App::router(AppState::new(shortener, base_url));

    let listener = TcpListener::bind(cli.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
