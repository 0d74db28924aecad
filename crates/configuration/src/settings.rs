use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Where the price history comes from.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Path to the CSV file loaded at startup.
    pub path: PathBuf,
    /// `chrono` format of the `Date` column (e.g. "%Y-%m-%d").
    pub date_format: String,
}

/// Contains parameters for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    /// Resolves `host` (an IP literal or a hostname such as `localhost`) to the
    /// first address it names.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = |reason: String| {
            ConfigError::ValidationError(format!("invalid server address '{}': {reason}", self.host))
        };
        if self.host.is_empty() || self.host.contains(char::is_whitespace) {
            return Err(invalid("not a hostname or IP address".to_string()));
        }
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("host resolved to no addresses".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to daily-rolling files in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

/// Command-line overrides applied on top of the file and environment.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct Overrides {
    /// Path to the dataset CSV.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub data: Option<PathBuf>,

    /// Port for the HTTP server.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub port: Option<u16>,

    /// Log filter directive, e.g. "debug" or "web_server=debug,info".
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub log_level: Option<String>,
}

impl Settings {
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(path) = &overrides.data {
            self.data.path = path.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.date_format.trim().is_empty() {
            return Err(ConfigError::ValidationError("data.date_format must not be empty".to_string()));
        }
        if self.data.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("data.path must not be empty".to_string()));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}
