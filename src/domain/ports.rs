use crate::domain::model::{AccessToken, Carrier, FedExCredentials, FedExEnvironment, TrackingResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn obtain(
        &self,
        credentials: &FedExCredentials,
        environment: FedExEnvironment,
    ) -> Result<AccessToken>;
}

#[async_trait]
pub trait CarrierClient: Send + Sync {
    fn carrier(&self) -> Carrier;

    /// 查詢單一追蹤號碼，回傳解析後的 JSON 內容
    async fn lookup(&self, tracking_id: &str) -> Result<serde_json::Value>;

    /// 與 `lookup` 相同，但失敗時只記錄日誌並回傳 None
    async fn try_lookup(&self, tracking_id: &str) -> Option<serde_json::Value> {
        match self.lookup(tracking_id).await {
            Ok(body) => {
                tracing::info!(
                    "✅ {}: Successfully retrieved status for {}",
                    self.carrier(),
                    tracking_id
                );
                Some(body)
            }
            Err(e) => {
                tracing::error!(
                    "❌ {}: Lookup failed for {}: {} (Category: {:?}, Severity: {:?})",
                    self.carrier(),
                    tracking_id,
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::debug!("💡 {}", e.recovery_suggestion());
                None
            }
        }
    }
}

pub trait RecordExtractor: Send + Sync {
    fn extract(&self, tracking_id: &str, raw: &serde_json::Value) -> Result<TrackingResult>;
}
