//! Gateway configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use recordview_core::loader::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_REMOTE_ENDPOINT};
use recordview_core::SourceConfig;

/// Bundled record document shipped with the gateway.
pub const BUNDLED_RECORDS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/records.json");

/// Default origin allowed to call the records API from a browser.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Which record source to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Public object fetched over HTTP(S).
    Remote,
    /// Local JSON file.
    Local,
}

/// recordview gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "recordview-gateway")]
#[command(about = "HTTP/JSON gateway serving paginated work records")]
#[command(version)]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, env = "RECORDVIEW_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Record source to load from.
    #[arg(long, env = "RECORDVIEW_SOURCE", value_enum, default_value_t = SourceKind::Local)]
    pub source: SourceKind,

    /// Base URL of the public object endpoint (remote source).
    #[arg(long, env = "RECORDVIEW_ENDPOINT", default_value = DEFAULT_REMOTE_ENDPOINT)]
    pub endpoint: String,

    /// Bucket holding the record document (remote source).
    #[arg(long, env = "RECORDVIEW_BUCKET")]
    pub bucket: Option<String>,

    /// Object name of the record document (remote source).
    #[arg(long, env = "RECORDVIEW_OBJECT")]
    pub object: Option<String>,

    /// Path to the record document (local source).
    #[arg(long, env = "RECORDVIEW_FILE", default_value = BUNDLED_RECORDS_PATH)]
    pub file: PathBuf,

    /// Timeout (ms) for fetching the remote record document.
    #[arg(long, env = "RECORDVIEW_FETCH_TIMEOUT_MS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS * 1000)]
    pub fetch_timeout_ms: u64,

    /// Origin allowed to call the API from a browser (`*` for any).
    #[arg(long, env = "RECORDVIEW_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// Load the record collection at startup instead of on the first request.
    #[arg(long, default_value_t = false)]
    pub preload: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Where records are loaded from.
    pub source: SourceConfig,
    /// Origin allowed by CORS.
    pub cors_origin: String,
    /// Whether to load records before serving.
    pub preload: bool,
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        let source = match args.source {
            SourceKind::Remote => SourceConfig::Remote {
                endpoint: args.endpoint.clone(),
                bucket: args.bucket.clone().unwrap_or_default(),
                object: args.object.clone().unwrap_or_default(),
                timeout: Duration::from_millis(args.fetch_timeout_ms),
            },
            SourceKind::Local => SourceConfig::local(&args.file),
        };

        Self {
            listen_addr: args.listen.clone(),
            source,
            cors_origin: args.cors_origin.clone(),
            preload: args.preload,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            source: SourceConfig::local(BUNDLED_RECORDS_PATH),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            preload: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_bundled_file() {
        let args = Args::parse_from(["recordview-gateway"]);
        let config = GatewayConfig::from(&args);

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.source, SourceConfig::local(BUNDLED_RECORDS_PATH));
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
        assert!(!config.preload);
    }

    #[test]
    fn test_remote_source_from_args() {
        let args = Args::parse_from([
            "recordview-gateway",
            "--source",
            "remote",
            "--bucket",
            "public-records",
            "--object",
            "records.json",
            "--fetch-timeout-ms",
            "1500",
        ]);
        let config = GatewayConfig::from(&args);

        assert_eq!(
            config.source,
            SourceConfig::Remote {
                endpoint: DEFAULT_REMOTE_ENDPOINT.to_string(),
                bucket: "public-records".to_string(),
                object: "records.json".to_string(),
                timeout: Duration::from_millis(1500),
            }
        );
    }
}
