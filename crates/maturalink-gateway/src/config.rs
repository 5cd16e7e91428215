//! Gateway configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// MaturaLink HTTP/JSON gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "maturalink-gateway")]
#[command(about = "HTTP/JSON API for MaturaLink study maps")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Path to the SQLite database file.
    #[arg(short, long, default_value = "maturalink.db")]
    pub database: PathBuf,

    /// Per-request timeout (ms) for storage work.
    #[arg(long, default_value_t = 30_000)]
    pub request_timeout_ms: u64,

    /// Upsert the default subject palette before serving.
    #[arg(long)]
    pub seed: bool,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Per-request timeout enforced at the gateway.
    pub request_timeout: Duration,
    /// Whether to seed default subjects at startup.
    pub seed: bool,
    /// Fallback log level.
    pub log_level: String,
}

impl GatewayConfig {
    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Filter directive used when RUST_LOG is unset.
    pub fn default_filter(&self) -> String {
        format!("maturalink_gateway={},tower_http=info", self.log_level)
    }
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: args.listen.clone(),
            database_path: args.database.clone(),
            request_timeout: Duration::from_millis(args.request_timeout_ms),
            seed: args.seed,
            log_level: args.log_level.clone(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            database_path: PathBuf::from("maturalink.db"),
            request_timeout: Duration::from_secs(30),
            seed: false,
            log_level: "info".to_string(),
        }
    }
}
