//! 服务配置（TOML）

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use dram_utils_toolbox::WHOIS_TIMEOUT;
use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "DRAM_UTILS_CONFIG";
/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const HOST_ENV: &str = "DRAM_UTILS_HOST";
const PORT_ENV: &str = "DRAM_UTILS_PORT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub whois: WhoisConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads; 0 means one per CPU.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4567,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Effective worker count.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }
}

/// WHOIS query settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WhoisConfig {
    /// Bound on one WHOIS query, in seconds.
    pub timeout_secs: u64,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            timeout_secs: WHOIS_TIMEOUT.as_secs(),
        }
    }
}

impl WhoisConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Directory for daily rolling log files; stdout only when unset.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl Config {
    /// Load the configuration named by `DRAM_UTILS_CONFIG` (default `config.toml`)
    /// and apply the `DRAM_UTILS_HOST` / `DRAM_UTILS_PORT` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut config = Self::from_path(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)
                .with_context(|| format!("invalid configuration file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read configuration file {}", path.display()))
            }
        }
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .parse()
                .with_context(|| format!("{PORT_ENV} must be a port number, got {port:?}"))?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.server.port == 0 {
            bail!("server.port must not be 0");
        }
        if self.whois.timeout_secs == 0 {
            bail!("whois.timeout_secs must not be 0");
        }
        Ok(())
    }

    /// `host:port` the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 4567));
        assert_eq!(config.log.level, LogLevel::Info);
        assert_eq!(config.log.format, LogFormat::Text);
        assert!(config.log.directory.is_none());
        assert!(config.server.worker_count() >= 1);
        assert_eq!(config.whois.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_whois_timeout() {
        let config = Config::from_toml("[whois]\ntimeout_secs = 3\n").unwrap();
        assert_eq!(config.whois.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_zero_whois_timeout_is_rejected() {
        assert!(Config::from_toml("[whois]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn test_parse_full() {
        let config = Config::from_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            workers = 2

            [log]
            level = "debug"
            format = "json"
            directory = "/var/log/dram-utils"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(config.server.worker_count(), 2);
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(
            config.log.directory.as_deref(),
            Some(Path::new("/var/log/dram-utils"))
        );
    }

    #[test]
    fn test_partial_uses_defaults() {
        let config = Config::from_toml("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn test_rejects_port_zero() {
        assert!(Config::from_toml("[server]\nport = 0\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Config::from_toml("[log]\nlevel = \"loud\"\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_field() {
        assert!(Config::from_toml("[server]\nbogus = 1\n").is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 4567);
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[log]\nformat = \"json\"\n").unwrap();
        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\n").unwrap();
        assert!(Config::from_path(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(HOST_ENV, "::"), (PORT_ENV, "8000")].into();
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| env.get(key).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.bind_address(), ("::".to_string(), 8000));
    }

    #[test]
    fn test_env_override_bad_port() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|key| {
            (key == PORT_ENV).then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }
}
