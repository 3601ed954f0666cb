use crate::utils::types::Port;
use base64ct::{Base64, Encoding};
use log::LevelFilter;
use serde::Deserialize;
use std::{
    env,
    fs::read_to_string,
    io,
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// The service version extracted from the Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable key to load the config from
const CONFIG_ENV_KEY: &str = "LV_CONFIG_JSON";
/// Environment variable overriding the service account key ID
const KEY_ID_ENV_KEY: &str = "LV_SERVICE_KEY_ID";
/// Environment variable overriding the service account secret key
const SECRET_KEY_ENV_KEY: &str = "LV_SERVICE_SECRET_KEY";

/// Config file read when no config is provided through the environment
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] io::Error),
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads the service config. JSON from the [CONFIG_ENV_KEY] variable is
/// preferred over [CONFIG_FILE], the defaults are used when neither is
/// present or the config is invalid. Credential overrides from the
/// environment are applied last.
///
/// Problems are written to stderr as the logger depends on this config
pub fn load_config() -> Config {
    let mut config = match read_config(env::var(CONFIG_ENV_KEY).ok(), Path::new(CONFIG_FILE)) {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(err) => {
            eprintln!("{err} (Using defaults)");
            Config::default()
        }
    };
    config.apply_env();
    config
}

/// Reads the config from `env_json` when present otherwise from
/// `file`, a missing file is not an error
fn read_config(env_json: Option<String>, file: &Path) -> Result<Option<Config>, ConfigError> {
    let data = match env_json {
        Some(value) => value,
        None if !file.exists() => return Ok(None),
        None => read_to_string(file).map_err(|err| ConfigError::Read(file.to_path_buf(), err))?,
    };
    Ok(Some(serde_json::from_str(&data)?))
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: IpAddr,
    pub port: Port,
    pub logging: LevelFilter,
    /// Directory for rolling log files, only stdout is logged to
    /// when this is not set
    pub logging_dir: Option<PathBuf>,
    pub title: String,
    pub leaderboard: LeaderboardConfig,
    pub credentials: CredentialsConfig,
    pub retry: RetryConfig,
    /// Optional timeout in seconds applied to each upstream request
    pub timeout_secs: Option<u64>,
    /// When set the page is rendered once into this file and the
    /// service exits instead of serving HTTP
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            logging: LevelFilter::Info,
            logging_dir: None,
            title: "Leaderboard".to_string(),
            leaderboard: Default::default(),
            credentials: Default::default(),
            retry: Default::default(),
            timeout_secs: None,
            output: None,
        }
    }
}

impl Config {
    /// Applies the credential overrides from the environment, these take
    /// priority over anything present in the config file
    pub fn apply_env(&mut self) {
        if let Ok(value) = env::var(KEY_ID_ENV_KEY) {
            self.credentials.key_id = Some(value);
        }
        if let Ok(value) = env::var(SECRET_KEY_ENV_KEY) {
            self.credentials.secret_key = Some(value);
        }
    }
}

/// Identifies the leaderboard resource on the leaderboards API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub base_url: String,
    pub project_id: String,
    pub environment_id: String,
    pub leaderboard_id: String,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            base_url: "https://services.api.unity.com".to_string(),
            project_id: "27317be4-6f62-4c57-9c43-4eb77a5039ab".to_string(),
            environment_id: "adf2ac5b-2487-4de4-bd7a-6721c1cea5ec".to_string(),
            leaderboard_id: "Pirate_Troops_Ranking".to_string(),
        }
    }
}

impl LeaderboardConfig {
    /// Creates the URL of the scores resource for this leaderboard
    pub fn scores_url(&self) -> String {
        format!(
            "{}/leaderboards/v1/projects/{}/environments/{}/leaderboards/{}/scores",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.environment_id,
            self.leaderboard_id
        )
    }
}

/// Service account credentials used for Basic authorization
#[derive(Default, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub key_id: Option<String>,
    pub secret_key: Option<String>,
}

impl CredentialsConfig {
    /// Creates the value for the Authorization header, [None] when
    /// either the key ID or secret key is missing or empty
    pub fn authorization(&self) -> Option<String> {
        let key_id = self.key_id.as_deref().filter(|value| !value.is_empty())?;
        let secret_key = self
            .secret_key
            .as_deref()
            .filter(|value| !value.is_empty())?;

        let encoded = Base64::encode_string(format!("{key_id}:{secret_key}").as_bytes());
        Some(format!("Basic {encoded}"))
    }
}

/// Retry policy for upstream requests. The default performs no
/// retries at all
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Number of extra attempts after the first request
    pub attempts: u32,
    /// Base delay in milliseconds, doubled after every attempt
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 0,
            delay_ms: 500,
        }
    }
}
