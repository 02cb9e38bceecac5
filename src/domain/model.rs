use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::{Result, TrackError};
use crate::utils::validation::validate_tracking_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Carrier {
    Dhl,
    Fedex,
}

impl Carrier {
    pub fn slug(&self) -> &'static str {
        match self {
            Carrier::Dhl => "dhl",
            Carrier::Fedex => "fedex",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Carrier::Dhl => write!(f, "DHL"),
            Carrier::Fedex => write!(f, "FedEx"),
        }
    }
}

/// FedEx OAuth / tracking 所使用的環境
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FedExEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl FedExEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            FedExEnvironment::Sandbox => "https://apis-sandbox.fedex.com",
            FedExEnvironment::Production => "https://apis.fedex.com",
        }
    }
}

impl FromStr for FedExEnvironment {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(FedExEnvironment::Sandbox),
            "production" => Ok(FedExEnvironment::Production),
            other => Err(TrackError::InvalidConfigValueError {
                field: "fedex.environment".to_string(),
                value: other.to_string(),
                reason: "Expected 'sandbox' or 'production'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRequest {
    pub tracking_id: String,
}

impl TrackingRequest {
    /// 去除前後空白並驗證格式
    pub fn new(tracking_id: &str) -> Result<Self> {
        let tracking_id = tracking_id.trim();
        validate_tracking_id(tracking_id)?;
        Ok(Self {
            tracking_id: tracking_id.to_string(),
        })
    }
}

/// FedEx client-credentials 組合
#[derive(Clone, PartialEq, Eq)]
pub struct FedExCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for FedExCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FedExCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// OAuth bearer token。到期時間只做記錄，不做快取。
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_in: Option<u64>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResult {
    pub tracking_id: String,
    pub status_description: Option<String>,
    #[serde(rename = "shipper_countryCode")]
    pub shipper_country: Option<String>,
    #[serde(rename = "consignee_countryCode")]
    pub consignee_country: Option<String>,
}

impl TrackingResult {
    /// 只有 tracking_id 的紀錄，其餘欄位皆為空
    pub fn bare(tracking_id: &str) -> Self {
        Self {
            tracking_id: tracking_id.to_string(),
            status_description: None,
            shipper_country: None,
            consignee_country: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    rows: Vec<TrackingResult>,
    failed: Vec<String>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: TrackingResult) {
        self.rows.push(row);
    }

    pub fn push_failure(&mut self, tracking_id: &str) {
        self.failed.push(tracking_id.to_string());
    }

    pub fn rows(&self) -> &[TrackingResult] {
        &self.rows
    }

    /// 查詢或解析失敗的追蹤號碼，依輸入順序
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
