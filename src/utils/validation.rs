use crate::utils::error::{Result, TrackError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TrackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TrackError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TrackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TrackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 追蹤號碼只允許英數字與連字號，且不可含空白
pub fn validate_tracking_id(tracking_id: &str) -> Result<()> {
    validate_non_empty_string("tracking_id", tracking_id)?;

    if !tracking_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(TrackError::InvalidConfigValueError {
            field: "tracking_id".to_string(),
            value: tracking_id.to_string(),
            reason: "Only ASCII letters, digits and '-' are allowed".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("dhl.base_url", "https://api-test.dhl.com").is_ok());
        assert!(validate_url("dhl.base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("dhl.base_url", "").is_err());
        assert!(validate_url("dhl.base_url", "invalid-url").is_err());
        assert!(validate_url("dhl.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_tracking_id() {
        assert!(validate_tracking_id("8917799995").is_ok());
        assert!(validate_tracking_id("JD014600006281230704").is_ok());
        assert!(validate_tracking_id("").is_err());
        assert!(validate_tracking_id("   ").is_err());
        assert!(validate_tracking_id("8917 799995").is_err());
    }
}
