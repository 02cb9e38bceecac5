use crate::adapters::http::{join_url, read_tracking_json};
use crate::adapters::token::FedExTokenProvider;
use crate::config::FedExConfig;
use crate::domain::model::Carrier;
use crate::domain::ports::{CarrierClient, TokenProvider};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// FedEx Track API 用戶端；每次查詢都先取得新的 token
pub struct FedExClient<T: TokenProvider = FedExTokenProvider> {
    client: Client,
    config: FedExConfig,
    tokens: T,
}

impl FedExClient<FedExTokenProvider> {
    pub fn new(config: FedExConfig) -> Self {
        let client = Client::new();
        let tokens = FedExTokenProvider::with_client(client.clone(), &config);
        Self {
            client,
            config,
            tokens,
        }
    }
}

impl<T: TokenProvider> FedExClient<T> {
    pub fn with_token_provider(config: FedExConfig, tokens: T) -> Self {
        Self {
            client: Client::new(),
            config,
            tokens,
        }
    }

    fn endpoint(&self) -> String {
        join_url(self.config.base_url(), "/track/v1/trackingnumbers")
    }
}

fn tracking_payload(tracking_id: &str) -> serde_json::Value {
    serde_json::json!({
        "trackingInfo": [
            {
                "trackingNumberInfo": {
                    "trackingNumber": tracking_id
                }
            }
        ],
        "includeDetailedScans": true
    })
}

#[async_trait]
impl<T: TokenProvider> CarrierClient for FedExClient<T> {
    fn carrier(&self) -> Carrier {
        Carrier::Fedex
    }

    async fn lookup(&self, tracking_id: &str) -> Result<serde_json::Value> {
        let credentials = self.config.credentials()?;

        let token = self
            .tokens
            .obtain(&credentials, self.config.environment)
            .await?;

        let endpoint = self.endpoint();
        tracing::info!(
            "🚚 Attempting to retrieve status for tracking number: {}...",
            tracking_id
        );
        tracing::debug!("📡 Making API request to: {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header("X-locale", "en_US")
            .bearer_auth(&token.value)
            .json(&tracking_payload(tracking_id))
            .timeout(self.config.timeout())
            .send()
            .await?;

        read_tracking_json(response, &endpoint).await
    }
}
