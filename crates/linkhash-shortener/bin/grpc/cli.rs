use clap::Parser;
use linkhash_shortener::ShortenerArgs;
use linkhash_telemetry::LogFormat;
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "LINKHASH_GRPC_LISTEN_ADDR";
pub const LOG_FORMAT_ENV: &str = "LINKHASH_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:50051";

#[derive(Debug, Parser)]
#[command(name = "linkhash-shortener-grpc-server")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub shortener: ShortenerArgs,
}
