mod cli;

use crate::cli::Cli;
use clap::Parser;
use linkhash_shortener::build_shortener;
use linkhash_shortener::grpc::{ShortenerGrpcServer, ShortenerServiceServer};
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse()?;
    linkhash_telemetry::init(cli.log_format)?;

    info!(
        listen_addr = %cli.listen_addr,
        storage_backend = %cli.shortener.storage,
        "starting shortener gRPC server"
    );

    let config = cli.shortener.into_config()?;
    let shortener = build_shortener(&config).await?;

    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<ShortenerServiceServer<ShortenerGrpcServer>>()
        .await;

    Server::builder()
        .add_service(health_service)
        .add_service(ShortenerGrpcServer::new(shortener).into_service())
        .serve_with_shutdown(cli.listen_addr, shutdown_signal())
        .await?;

    info!("shortener gRPC server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
