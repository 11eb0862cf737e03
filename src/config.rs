//! Server configuration, built once at startup and passed into the
//! server rather than read from ambient global state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOGS_DIR: &str = "./logs";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory containing the chat-log corpus.
    pub logs_dir: PathBuf,
    /// TCP port the HTTP server listens on.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML file if one was given,
    /// then `LOGSIEVE_*` environment variables on top.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.merge_env_vars();
        Ok(config)
    }

    fn merge_env_vars(&mut self) {
        self.merge_env(|key| std::env::var(key).ok());
    }

    fn merge_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = get("LOGSIEVE_LOGS_DIR") {
            self.logs_dir = PathBuf::from(dir);
        }
        if let Some(port) = get("LOGSIEVE_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(err) => warn!("ignoring unparseable LOGSIEVE_PORT {port:?}: {err}"),
            }
        }
    }
}
