use crate::adapters::http::join_url;
use crate::config::FedExConfig;
use crate::domain::model::{AccessToken, FedExCredentials, FedExEnvironment};
use crate::domain::ports::TokenProvider;
use crate::utils::error::{Result, TrackError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    token_type: Option<String>,
}

/// FedEx OAuth2 client-credentials 取得 bearer token。每次呼叫都重新取得，不做快取。
#[derive(Debug, Clone)]
pub struct FedExTokenProvider {
    client: Client,
    base_url_override: Option<String>,
    timeout: Duration,
}

impl FedExTokenProvider {
    pub fn new(config: &FedExConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &FedExConfig) -> Self {
        Self {
            client,
            base_url_override: config.base_url_override().map(str::to_string),
            timeout: config.timeout(),
        }
    }

    fn token_url(&self, environment: FedExEnvironment) -> String {
        let base_url = self
            .base_url_override
            .as_deref()
            .unwrap_or_else(|| environment.base_url());
        join_url(base_url, "/oauth/token")
    }
}

fn auth_error(message: String) -> TrackError {
    TrackError::AuthenticationError { message }
}

#[async_trait]
impl TokenProvider for FedExTokenProvider {
    async fn obtain(
        &self,
        credentials: &FedExCredentials,
        environment: FedExEnvironment,
    ) -> Result<AccessToken> {
        let token_url = self.token_url(environment);
        tracing::info!("🔐 Attempting to get access token from: {}", token_url);

        let response = self
            .client
            .post(&token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!("⏱️ Timeout error occurred: {}", e);
                } else if e.is_connect() {
                    tracing::error!("🔌 Connection error occurred: {}", e);
                } else {
                    tracing::error!("❌ Token request error occurred: {}", e);
                }
                auth_error(format!("token request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("❌ Failed to read token response: {}", e);
            auth_error(format!("failed to read token response: {}", e))
        })?;

        if !status.is_success() {
            tracing::error!("❌ HTTP error occurred: {}", status);
            tracing::debug!("Response content: {}", body);
            return Err(auth_error(format!(
                "token endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let token_data: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("❌ Error decoding JSON response: {}", e);
            tracing::debug!("Raw response text: {}", body);
            auth_error(format!("invalid token response: {}", e))
        })?;

        match token_data.access_token.filter(|t| !t.is_empty()) {
            Some(value) => {
                tracing::info!(
                    "✅ Successfully obtained access token ({}). Expires in {} seconds.",
                    token_data.token_type.as_deref().unwrap_or("bearer"),
                    token_data
                        .expires_in
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "unknown".to_string())
                );
                Ok(AccessToken {
                    value,
                    expires_in: token_data.expires_in,
                })
            }
            None => {
                tracing::error!("❌ Access token not found in response");
                Err(auth_error(
                    "access_token missing from token response".to_string(),
                ))
            }
        }
    }
}
