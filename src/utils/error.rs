use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Missing credential: {name} is not set")]
    MissingCredentialError { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("HTTP {status} from {endpoint}: {body}")]
    ProtocolError {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("Failed to decode JSON response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Failed to extract fields for {tracking_id}: {message}")]
    ExtractionError {
        tracking_id: String,
        message: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Network,
    Protocol,
    Data,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrackError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackError::MissingCredentialError { .. }
            | TrackError::ConfigError { .. }
            | TrackError::InvalidConfigValueError { .. }
            | TrackError::TomlError(_) => ErrorCategory::Configuration,
            TrackError::AuthenticationError { .. } => ErrorCategory::Authentication,
            TrackError::TransportError(_) => ErrorCategory::Network,
            TrackError::ProtocolError { .. } => ErrorCategory::Protocol,
            TrackError::DecodeError(_) | TrackError::ExtractionError { .. } => ErrorCategory::Data,
            TrackError::CsvError(_) | TrackError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackError::ExtractionError { .. } => ErrorSeverity::Low,
            TrackError::TransportError(_) => ErrorSeverity::Medium,
            // 429 與 5xx 屬於暫時性錯誤
            TrackError::ProtocolError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            TrackError::ProtocolError { .. }
            | TrackError::AuthenticationError { .. }
            | TrackError::DecodeError(_) => ErrorSeverity::High,
            TrackError::MissingCredentialError { .. }
            | TrackError::ConfigError { .. }
            | TrackError::InvalidConfigValueError { .. }
            | TrackError::TomlError(_)
            | TrackError::CsvError(_)
            | TrackError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TrackError::MissingCredentialError { name } => {
                format!("Export {} in the environment or set it in the config file", name)
            }
            TrackError::ConfigError { .. } | TrackError::TomlError(_) => {
                "Check the configuration file syntax and values".to_string()
            }
            TrackError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            TrackError::AuthenticationError { .. } => {
                "Verify the client id/secret and the selected environment".to_string()
            }
            TrackError::TransportError(_) => {
                "Check network connectivity and try again later".to_string()
            }
            TrackError::ProtocolError { status: 401 | 403, .. } => {
                "The API rejected the credentials; verify the API key".to_string()
            }
            TrackError::ProtocolError { status: 404, .. } => {
                "The tracking number was not found; verify it belongs to this carrier".to_string()
            }
            TrackError::ProtocolError { status: 429, .. } => {
                "Rate limited; increase the delay between lookups".to_string()
            }
            TrackError::ProtocolError { .. } => "Retry later or contact the carrier".to_string(),
            TrackError::DecodeError(_) | TrackError::ExtractionError { .. } => {
                "The carrier response format may have changed; inspect the raw response".to_string()
            }
            TrackError::CsvError(_) | TrackError::IoError(_) => {
                "Check that the input file exists and the output path is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Authentication => format!("Could not authenticate: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Protocol => format!("Carrier API error: {}", self),
            ErrorCategory::Data => format!("Unexpected response: {}", self),
            ErrorCategory::Storage => format!("File problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_severity_by_status() {
        let not_found = TrackError::ProtocolError {
            status: 404,
            endpoint: "https://api-test.dhl.com/track/shipments".to_string(),
            body: "{}".to_string(),
        };
        let unavailable = TrackError::ProtocolError {
            status: 503,
            endpoint: "https://api-test.dhl.com/track/shipments".to_string(),
            body: String::new(),
        };

        assert_eq!(not_found.category(), ErrorCategory::Protocol);
        assert_eq!(not_found.severity(), ErrorSeverity::High);
        assert_eq!(unavailable.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_missing_credential_is_critical_configuration_error() {
        let err = TrackError::MissingCredentialError {
            name: "FEDEX_CLIENT_ID".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("FEDEX_CLIENT_ID"));
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }
}
