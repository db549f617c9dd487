//! Configuration for the snapshot server.
//!
//! Configuration can be loaded from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Environment variables (prefixed with `SNAP__`)
//! 2. YAML configuration file (specified via `-c` or `--config` flag)
//! 3. Defaults
//!
//! Environment variables use `SNAP__` as a prefix and double underscores
//! (`__`) to denote nested configuration structures. For example:
//!
//! - `SNAP__HTTP_ADDR=0.0.0.0:8888` sets the HTTP server address
//! - `SNAP__LAYOUT__ROOT=/mnt/btrfs` sets the volume mount point
//! - `SNAP__LOGGING__LEVEL=debug` raises the log level

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use snapshot_service::SnapshotLayout;

/// Environment variable prefix for all configuration options.
const ENV_PREFIX: &str = "SNAP__";

/// The volume layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Mount point of the btrfs volume.
    pub root: String,
    /// The subvolume snapshots are taken from.
    pub source_subvolume: String,
    /// Path token identifying test snapshots, relative to the root.
    pub snapshot_prefix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let layout = SnapshotLayout::default();
        Self {
            root: layout.root,
            source_subvolume: layout.source_subvolume,
            snapshot_prefix: layout.snapshot_prefix,
        }
    }
}

impl From<LayoutConfig> for SnapshotLayout {
    fn from(config: LayoutConfig) -> Self {
        Self {
            root: config.root,
            source_subvolume: config.source_subvolume,
            snapshot_prefix: config.snapshot_prefix,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// The default log level, overridable via `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// The snapshot server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The address the HTTP server binds to.
    pub http_addr: SocketAddr,
    /// The volume layout.
    pub layout: LayoutConfig,
    /// Logging options.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".parse().expect("valid default addr"),
            layout: LayoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from defaults, an optional YAML file, and the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = figment::Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_the_volume_layout() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.http_addr.port(), 8080);
        assert_eq!(config.layout.root, "/data");
        assert_eq!(config.layout.source_subvolume, "/data/@meta");
        assert_eq!(config.layout.snapshot_prefix, "@data/test/");
    }

    #[test]
    fn configurable_via_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SNAP__HTTP_ADDR", "127.0.0.1:9999");
            jail.set_env("SNAP__LAYOUT__ROOT", "/mnt/btrfs");

            let config = Config::load(None).unwrap();
            assert_eq!(config.http_addr.port(), 9999);
            assert_eq!(config.layout.root, "/mnt/btrfs");
            // Unset fields keep their defaults.
            assert_eq!(config.layout.source_subvolume, "/data/@meta");

            Ok(())
        });
    }

    #[test]
    fn configurable_via_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "http_addr: 127.0.0.1:8123\nlayout:\n  snapshot_prefix: '@scratch/'\n"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.http_addr.port(), 8123);
        assert_eq!(config.layout.snapshot_prefix, "@scratch/");
    }
}
