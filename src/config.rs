//! Configuration management for notesd
//!
//! Loads settings from TOML file at ~/.notesd/config.toml

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Operation tracing configuration
    #[serde(default)]
    pub tracing: TracingConfig,

    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server host (default: 0.0.0.0 - all interfaces)
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// What the operation tracer does after logging an unexpected error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnexpectedPolicy {
    /// Terminate the process with exit code 1
    #[default]
    Exit,
    /// Answer the request with a 500 and keep serving
    Respond,
}

impl FromStr for UnexpectedPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exit" => Ok(UnexpectedPolicy::Exit),
            "respond" => Ok(UnexpectedPolicy::Respond),
            other => Err(CoreError::Config(format!(
                "Unknown on_unexpected policy: {} (expected \"exit\" or \"respond\")",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracingConfig {
    #[serde(default)]
    pub on_unexpected: UnexpectedPolicy,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily rolling log files. Console only when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Log file name prefix
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_file_prefix() -> String {
    "notesd.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: None,
            file_prefix: default_file_prefix(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded_path = expand_path(path.as_ref());

        if !expanded_path.exists() {
            return Err(CoreError::Config(format!(
                "Configuration file not found: {}",
                expanded_path.display()
            )));
        }

        let content = std::fs::read_to_string(&expanded_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Load configuration from file or use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(".notesd").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".notesd/config.toml"))
    }

    /// Get the log directory, expanding ~ if present
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging.dir.as_deref().map(expand_path)
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> SocketAddr {
        use std::net::ToSocketAddrs;

        format!("{}:{}", self.server.host, self.server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("NOTESD_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("NOTESD_SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| CoreError::Config(format!("Invalid NOTESD_SERVER_PORT: {}", port)))?;
        }
        if let Ok(policy) = std::env::var("NOTESD_ON_UNEXPECTED") {
            self.tracing.on_unexpected = policy.parse()?;
        }
        Ok(())
    }

    /// Create a default configuration file at the given path
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let content = r#"# notesd Configuration

[server]
# Port to listen on (default: 8000)
port = 8000

# Host to bind to
# "0.0.0.0" = all interfaces (default)
# "127.0.0.1" = localhost only
host = "0.0.0.0"

[tracing]
# What to do when an operation fails unexpectedly (malformed payload, internal error)
# "exit" = log the error and terminate the process with exit code 1 (default)
# "respond" = log the error and answer with 500 Internal Server Error
on_unexpected = "exit"

[logging]
# Also write logs to daily rolling files in this directory
# dir = "~/.notesd/logs"
file_prefix = "notesd.log"
"#;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Expand ~ to home directory in paths
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
