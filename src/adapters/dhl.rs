use crate::adapters::http::{join_url, read_tracking_json};
use crate::config::DhlConfig;
use crate::domain::model::Carrier;
use crate::domain::ports::CarrierClient;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

pub const DHL_API_KEY_HEADER: &str = "DHL-API-Key";

/// DHL Shipment Tracking - Unified API
pub struct DhlClient {
    client: Client,
    config: DhlConfig,
}

impl DhlClient {
    pub fn new(config: DhlConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: DhlConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        join_url(&self.config.base_url, "/track/shipments")
    }
}

#[async_trait]
impl CarrierClient for DhlClient {
    fn carrier(&self) -> Carrier {
        Carrier::Dhl
    }

    async fn lookup(&self, tracking_id: &str) -> Result<serde_json::Value> {
        // 缺少金鑰時不發出任何請求
        let api_key = self.config.api_key()?;
        let endpoint = self.endpoint();

        tracing::info!(
            "🚚 Attempting to retrieve status for tracking number: {}...",
            tracking_id
        );
        tracing::debug!("📡 Making API request to: {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("trackingNumber", tracking_id)])
            .header(DHL_API_KEY_HEADER, api_key)
            .timeout(self.config.timeout())
            .send()
            .await?;

        read_tracking_json(response, &endpoint).await
    }
}
