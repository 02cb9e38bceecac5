use crate::utils::error::{Result, TrackError};
use reqwest::{Response, StatusCode};

/// 讀取追蹤 API 的回應：只接受 HTTP 200，其餘狀態碼連同 body 一起回報
pub(crate) async fn read_tracking_json(
    response: Response,
    endpoint: &str,
) -> Result<serde_json::Value> {
    let status = response.status();
    tracing::debug!("📡 API response status: {}", status);

    let body = response.text().await?;

    if status != StatusCode::OK {
        return Err(TrackError::ProtocolError {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            body,
        });
    }

    let json_data: serde_json::Value = serde_json::from_str(&body)?;
    Ok(json_data)
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
