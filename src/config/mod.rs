#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::export::ExportFormat;
use crate::domain::model::{Carrier, FedExCredentials, FedExEnvironment};
use crate::utils::error::{Result, TrackError};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DHL_API_KEY: &str = "DHL_API_KEY";
pub const DHL_BASE_URL: &str = "DHL_BASE_URL";
pub const FEDEX_CLIENT_ID: &str = "FEDEX_CLIENT_ID";
pub const FEDEX_CLIENT_SECRET: &str = "FEDEX_CLIENT_SECRET";
pub const FEDEX_ENVIRONMENT: &str = "FEDEX_ENVIRONMENT";
pub const FEDEX_BASE_URL: &str = "FEDEX_BASE_URL";
pub const TRACK_REQUEST_TIMEOUT_SECONDS: &str = "TRACK_REQUEST_TIMEOUT_SECONDS";
pub const TRACK_DELAY_SECONDS: &str = "TRACK_DELAY_SECONDS";

const DEFAULT_DHL_BASE_URL: &str = "https://api-test.dhl.com";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_DELAY_SECONDS: u64 = 5;

fn default_dhl_base_url() -> String {
    DEFAULT_DHL_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_delay_seconds() -> u64 {
    DEFAULT_DELAY_SECONDS
}

/// 設定檔中尚未被替換的 `${VAR}` 視為未設定
fn resolved(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !(v.starts_with("${") && v.ends_with('}')))
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DhlConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_dhl_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl DhlConfig {
    pub fn api_key(&self) -> Result<&str> {
        resolved(&self.api_key).ok_or_else(|| TrackError::MissingCredentialError {
            name: DHL_API_KEY.to_string(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for DhlConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_dhl_base_url(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl fmt::Debug for DhlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhlConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct FedExConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    #[serde(default)]
    pub environment: FedExEnvironment,
    /// 覆寫 OAuth 與 tracking 的主機位址
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl FedExConfig {
    pub fn credentials(&self) -> Result<FedExCredentials> {
        let client_id = resolved(&self.client_id).ok_or_else(|| {
            TrackError::MissingCredentialError {
                name: FEDEX_CLIENT_ID.to_string(),
            }
        })?;
        let client_secret = resolved(&self.client_secret).ok_or_else(|| {
            TrackError::MissingCredentialError {
                name: FEDEX_CLIENT_SECRET.to_string(),
            }
        })?;

        Ok(FedExCredentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url_override()
            .unwrap_or_else(|| self.environment.base_url())
    }

    pub fn base_url_override(&self) -> Option<&str> {
        resolved(&self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for FedExConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            environment: FedExEnvironment::default(),
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl fmt::Debug for FedExConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FedExConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: u64,
}

impl BatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_seconds: DEFAULT_DELAY_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: Option<String>,
    #[serde(default)]
    pub formats: Vec<ExportFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub dhl: DhlConfig,
    #[serde(default)]
    pub fedex: FedExConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl TrackerConfig {
    /// 從行程環境變數建立設定
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 透過注入的查詢函式建立設定，測試時不需修改行程環境
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.dhl.api_key = lookup(DHL_API_KEY);
        config.fedex.client_id = lookup(FEDEX_CLIENT_ID);
        config.fedex.client_secret = lookup(FEDEX_CLIENT_SECRET);
        config.apply_lookup_overrides(&lookup)?;
        Ok(config)
    }

    /// 只覆寫環境中有設定的非憑證欄位
    pub(crate) fn apply_lookup_overrides<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DHL_BASE_URL) {
            self.dhl.base_url = url;
        }
        if let Some(url) = lookup(FEDEX_BASE_URL) {
            self.fedex.base_url = Some(url);
        }
        if let Some(env) = lookup(FEDEX_ENVIRONMENT) {
            self.fedex.environment = env.parse()?;
        }
        if let Some(raw) = lookup(TRACK_REQUEST_TIMEOUT_SECONDS) {
            let timeout = parse_seconds(TRACK_REQUEST_TIMEOUT_SECONDS, &raw)?;
            self.dhl.timeout_seconds = timeout;
            self.fedex.timeout_seconds = timeout;
        }
        if let Some(raw) = lookup(TRACK_DELAY_SECONDS) {
            self.batch.delay_seconds = parse_seconds(TRACK_DELAY_SECONDS, &raw)?;
        }
        Ok(())
    }

    /// 檢查指定承運商所需的憑證是否齊全
    pub fn require_credentials(&self, carrier: Carrier) -> Result<()> {
        match carrier {
            Carrier::Dhl => self.dhl.api_key().map(|_| ()),
            Carrier::Fedex => self.fedex.credentials().map(|_| ()),
        }
    }
}

fn parse_seconds(field: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| TrackError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: format!("Expected a whole number of seconds: {}", e),
        })
}

impl Validate for TrackerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("dhl.base_url", &self.dhl.base_url)?;
        validate_url("fedex.base_url", self.fedex.base_url())?;
        validate_range("dhl.timeout_seconds", self.dhl.timeout_seconds, 1, 300)?;
        validate_range("fedex.timeout_seconds", self.fedex.timeout_seconds, 1, 300)?;
        validate_range("batch.delay_seconds", self.batch.delay_seconds, 0, 3600)?;

        if let Some(path) = &self.output.output_path {
            crate::utils::validation::validate_non_empty_string("output.output_path", path)?;
        }

        Ok(())
    }
}
