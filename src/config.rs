//! Configuration for the collector and viewer

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::facility::DEFAULT_LOG_DIR;
use crate::viewer::Credentials;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "loglens.toml";

/// Environment variables that override (or stand in for) the file
const ENV_ADMIN_USER: &str = "ADMIN_USER";
const ENV_ADMIN_PASS: &str = "ADMIN_PASS";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the daily log files are written to
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Address the viewer binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port the viewer listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Viewer credentials; required, usually supplied via ADMIN_USER /
    /// ADMIN_PASS environment variables rather than the file
    #[serde(default)]
    pub admin_user: Option<String>,
    #[serde(default)]
    pub admin_pass: Option<String>,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            bind_addr: default_bind_addr(),
            port: default_port(),
            admin_user: None,
            admin_pass: None,
        }
    }
}

impl Config {
    /// Load configuration from `loglens.toml` if present, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(CONFIG_FILE);
        let config = if path.exists() {
            let content =
                std::fs::read_to_string(&path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply credential overrides from an environment lookup
    ///
    /// Takes the lookup as a closure so tests never touch process-global
    /// environment state.
    pub fn with_env_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(user) = get(ENV_ADMIN_USER) {
            self.admin_user = Some(user);
        }
        if let Some(pass) = get(ENV_ADMIN_PASS) {
            self.admin_pass = Some(pass);
        }
        self
    }

    /// Viewer credentials; absent credentials are fatal at startup, the
    /// viewer never runs unprotected
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.admin_user, &self.admin_pass) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Ok(Credentials {
                    user: user.clone(),
                    pass: pass.clone(),
                })
            }
            _ => anyhow::bail!(
                "ADMIN_USER and ADMIN_PASS must be set in {} or the environment",
                CONFIG_FILE
            ),
        }
    }

    /// The socket address the viewer binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .context("Invalid bind_addr/port in configuration")
    }
}
