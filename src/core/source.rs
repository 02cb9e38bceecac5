use crate::domain::model::TrackingRequest;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, TrackError};

const TRACKING_ID_COLUMN: &str = "tracking_id";

/// 無效的追蹤號碼記錄後略過，不中斷整批
fn accept(raw: &str) -> Option<TrackingRequest> {
    match TrackingRequest::new(raw) {
        Ok(request) => Some(request),
        Err(e) => {
            tracing::warn!("🔶 Skipping tracking number {:?}: {}", raw, e);
            None
        }
    }
}

/// 從命令列參數建立查詢清單，保留輸入順序
pub fn from_args(ids: &[String]) -> Vec<TrackingRequest> {
    ids.iter().filter_map(|id| accept(id)).collect()
}

/// 解析輸入檔內容：含 `tracking_id` 標題列的 CSV，或每行一個追蹤號碼
pub fn parse_tracking_ids(content: &str) -> Result<Vec<TrackingRequest>> {
    let first_line = content.lines().map(str::trim).find(|l| !l.is_empty());

    let has_header = first_line
        .map(|line| line.split(',').any(|c| c.trim() == TRACKING_ID_COLUMN))
        .unwrap_or(false);

    if has_header {
        parse_csv(content)
    } else {
        let requests = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter_map(accept)
            .collect();
        Ok(requests)
    }
}

fn parse_csv(content: &str) -> Result<Vec<TrackingRequest>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == TRACKING_ID_COLUMN)
        .ok_or_else(|| TrackError::ConfigError {
            message: format!("input file has no '{}' column", TRACKING_ID_COLUMN),
        })?;

    let mut requests = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(id) if !id.is_empty() => requests.extend(accept(id)),
            _ => tracing::debug!("Skipping input row without tracking_id: {:?}", record),
        }
    }
    Ok(requests)
}

/// 透過 Storage 讀取輸入檔
pub async fn read_tracking_file<S: Storage>(storage: &S, path: &str) -> Result<Vec<TrackingRequest>> {
    let data = storage.read_file(path).await?;
    let content = String::from_utf8(data).map_err(|e| TrackError::ConfigError {
        message: format!("input file {} is not valid UTF-8: {}", path, e),
    })?;

    let requests = parse_tracking_ids(&content)?;
    tracing::info!("📋 Loaded {} tracking numbers from {}", requests.len(), path);
    Ok(requests)
}
