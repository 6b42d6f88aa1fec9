use clap::Parser;
use linkhash_shortener::ShortenerArgs;
use linkhash_telemetry::LogFormat;
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "LINKHASH_HTTP_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "LINKHASH_PUBLIC_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "LINKHASH_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "linkhash-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Origin used when rendering short links. Defaults to
    /// `http://<listen-addr>`.
    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub shortener: ShortenerArgs,
}

impl Cli {
    pub fn base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.listen_addr))
    }
}
