//! Server configuration from environment variables.
//!
//! | Variable           | Default            |
//! |--------------------|--------------------|
//! | `HOST`             | `0.0.0.0`          |
//! | `PORT`             | `8000`             |
//! | `LIQUOR_DATA_PATH` | `data/liquors.csv` |

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATA_PATH: &str = "data/liquors.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, so tests need not touch
    /// the real environment.
    ///
    /// Unset variables take their defaults; set but invalid ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            let host = host.trim();
            if host.is_empty() {
                bail!("HOST must not be empty");
            }
            config.host = host.to_string();
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value '{}'", port))?;
        }

        if let Some(path) = lookup("LIQUOR_DATA_PATH") {
            if path.trim().is_empty() {
                bail!("LIQUOR_DATA_PATH must not be empty");
            }
            config.data_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// `host:port`, ready for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
