//! Bootstrap configuration loaded from a TOML file
//!
//! All settings are static for the lifetime of the process; the spotter must
//! be restarted to pick up changes. Only the cluster endpoint, the ClubLog
//! API key and the matrix path are required — everything else has a built-in
//! default.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Spotter configuration.
///
/// ```toml
/// matrix_path = "dxcc_matrix.json"
/// watchlist = ["K5D", "VP8"]
/// cooldown_secs = 3600
///
/// [cluster]
/// host = "dxc.example.net"
/// callsign = "W1AW"
///
/// [clublog]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// DX cluster endpoint and login
    pub cluster: ClusterConfig,

    /// ClubLog API access
    pub clublog: ClubLogConfig,

    /// Path to the DXCC work matrix JSON file (read-only; maintained
    /// outside the spotter)
    pub matrix_path: PathBuf,

    /// Callsign fragments to always surface, regardless of DXCC novelty
    #[serde(default)]
    pub watchlist: Vec<String>,

    /// Fold case when matching the watch list
    ///
    /// Default: false. Short watch entries overmatch easily; exact case is
    /// the safer default.
    #[serde(default)]
    pub watchlist_case_insensitive: bool,

    /// Minimum seconds between two novelty alerts for the same
    /// (entity, band) pair
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Timeout for a single ClubLog lookup, in seconds
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// DX cluster connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    /// Cluster host name or address
    pub host: String,

    /// Cluster port
    ///
    /// Default: 7300
    #[serde(default = "default_cluster_port")]
    pub port: u16,

    /// Callsign sent in response to the login prompt
    pub callsign: String,
}

/// ClubLog API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ClubLogConfig {
    /// API key for the DXCC lookup endpoint
    pub api_key: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    ///
    /// Overridden by RUST_LOG when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_cluster_port() -> u16 {
    7300
}

fn default_cooldown_secs() -> u64 {
    3600
}

fn default_lookup_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config file {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            Error::Config(format!("failed to parse config file {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        matrix_path = "dxcc_matrix.json"

        [cluster]
        host = "dxc.example.net"
        callsign = "W1AW"

        [clublog]
        api_key = "secret"
    "#;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.cluster.host, "dxc.example.net");
        assert_eq!(config.cluster.port, 7300);
        assert_eq!(config.cluster.callsign, "W1AW");
        assert_eq!(config.clublog.api_key, "secret");
        assert_eq!(config.matrix_path, PathBuf::from("dxcc_matrix.json"));
        assert!(config.watchlist.is_empty());
        assert!(!config.watchlist_case_insensitive);
        assert_eq!(config.cooldown_secs, 3600);
        assert_eq!(config.lookup_timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            matrix_path = "/var/lib/dxwatch/matrix.json"
            watchlist = ["K5D", "VP8"]
            watchlist_case_insensitive = true
            cooldown_secs = 900
            lookup_timeout_secs = 5

            [cluster]
            host = "cluster.local"
            port = 8000
            callsign = "N0CALL"

            [clublog]
            api_key = "key"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster.port, 8000);
        assert_eq!(config.watchlist, vec!["K5D", "VP8"]);
        assert!(config.watchlist_case_insensitive);
        assert_eq!(config.cooldown_secs, 900);
        assert_eq!(config.lookup_timeout_secs, 5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_cluster_section_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            matrix_path = "matrix.json"

            [clublog]
            api_key = "key"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(default_cluster_port(), 7300);
        assert_eq!(default_cooldown_secs(), 3600);
        assert_eq!(default_lookup_timeout_secs(), 10);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/dxwatch.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
