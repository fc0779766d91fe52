use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{Connection, Credentials};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: String,

    // Basic auth, both or neither
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub insecure_skip_verify: bool,

    // File logging is off unless a directory is given
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_protocol() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5984
}

fn default_database() -> String {
    "default".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    /// Like [`Config::load`], but a file that does not exist is `Ok(None)`.
    ///
    /// A file that exists and fails to parse is still an error.
    pub fn load_if_exists(path: &str) -> anyhow::Result<Option<Self>> {
        if !Path::new(path).exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn connection(&self) -> Connection {
        Connection::new(
            self.protocol.clone(),
            self.host.clone(),
            self.port,
            self.database.clone(),
        )
    }

    /// Credentials when both username and password are set
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(Credentials::new(user.clone(), pass.clone())),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: default_protocol(),
            host: default_host(),
            port: default_port(),
            database: default_database(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            insecure_skip_verify: false,
            log_dir: None,
        }
    }
}
