use crate::domain::model::{BatchSummary, TrackingRequest};
use crate::domain::ports::{CarrierClient, RecordExtractor};
use std::time::Duration;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

/// 依序查詢每個追蹤號碼。單筆失敗只會略過該列，不會中斷整批。
pub struct BatchRunner<C: CarrierClient, E: RecordExtractor> {
    client: C,
    extractor: E,
    delay: Duration,
}

impl<C: CarrierClient, E: RecordExtractor> BatchRunner<C, E> {
    pub fn new(client: C, extractor: E) -> Self {
        Self {
            client,
            extractor,
            delay: DEFAULT_DELAY,
        }
    }

    /// 兩次查詢之間固定等待的時間
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn run(&self, requests: &[TrackingRequest]) -> BatchSummary {
        let mut summary = BatchSummary::new();
        let carrier = self.client.carrier();

        tracing::info!(
            "🚀 Starting {} batch with {} tracking numbers",
            carrier,
            requests.len()
        );

        for (index, request) in requests.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tracing::debug!("⏳ Waiting {:?} before next lookup", self.delay);
                tokio::time::sleep(self.delay).await;
            }

            let tracking_id = request.tracking_id.as_str();

            match self.client.try_lookup(tracking_id).await {
                Some(raw) => match self.extractor.extract(tracking_id, &raw) {
                    Ok(row) => summary.push_row(row),
                    Err(e) => {
                        tracing::warn!("🔶 {}: {}", carrier, e);
                        tracing::debug!("Raw response for {}: {}", tracking_id, raw);
                        summary.push_failure(tracking_id);
                    }
                },
                None => summary.push_failure(tracking_id),
            }

            tracing::info!("{}", "-".repeat(30));
        }

        if summary.failed().is_empty() {
            tracing::info!("✅ {} batch completed: {} rows", carrier, summary.len());
        } else {
            tracing::warn!(
                "🔶 {} batch completed: {} rows, {} skipped ({})",
                carrier,
                summary.len(),
                summary.failed().len(),
                summary.failed().join(", ")
            );
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::{DhlExtractor, FedExExtractor};
    use crate::domain::model::{Carrier, TrackingResult};
    use crate::utils::error::{Result, TrackError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Instant;

    /// 依追蹤號碼回傳預先設定的回應，並記錄呼叫順序
    struct ScriptedClient {
        responses: HashMap<String, serde_json::Value>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(responses: &[(&str, serde_json::Value)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(id, body)| (id.to_string(), body.clone()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CarrierClient for ScriptedClient {
        fn carrier(&self) -> Carrier {
            Carrier::Dhl
        }

        async fn lookup(&self, tracking_id: &str) -> Result<serde_json::Value> {
            self.calls.lock().unwrap().push(tracking_id.to_string());
            self.responses
                .get(tracking_id)
                .cloned()
                .ok_or_else(|| TrackError::ProtocolError {
                    status: 404,
                    endpoint: "scripted".to_string(),
                    body: "not found".to_string(),
                })
        }
    }

    fn requests(ids: &[&str]) -> Vec<TrackingRequest> {
        ids.iter().map(|id| TrackingRequest::new(id).unwrap()).collect()
    }

    fn delivered(country: &str) -> serde_json::Value {
        json!({
            "shipments": [{
                "status": {"description": "Delivered"},
                "details": {"shipper": {"address": {"countryCode": country}}}
            }]
        })
    }

    #[tokio::test]
    async fn test_failed_lookup_is_skipped_and_order_preserved() {
        let client = ScriptedClient::new(&[("A1", delivered("DE")), ("C3", delivered("FR"))]);
        let runner = BatchRunner::new(client, DhlExtractor).with_delay(Duration::ZERO);

        let summary = runner.run(&requests(&["A1", "B2", "C3"])).await;

        let ids: Vec<&str> = summary.rows().iter().map(|r| r.tracking_id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "C3"]);
        assert_eq!(summary.failed(), &["B2".to_string()]);
        assert_eq!(summary.rows()[1].shipper_country.as_deref(), Some("FR"));
        assert_eq!(runner.client.calls(), vec!["A1", "B2", "C3"]);
    }

    #[tokio::test]
    async fn test_extraction_failure_produces_no_row() {
        let client = ScriptedClient::new(&[
            ("A1", json!({"shipments": []})),
            ("B2", delivered("DE")),
        ]);
        let runner = BatchRunner::new(client, DhlExtractor).with_delay(Duration::ZERO);

        let summary = runner.run(&requests(&["A1", "B2"])).await;

        assert_eq!(summary.len(), 1);
        assert_eq!(summary.rows()[0].tracking_id, "B2");
        assert_eq!(summary.failed(), &["A1".to_string()]);
    }

    #[tokio::test]
    async fn test_partial_fedex_response_keeps_bare_row() {
        let client = ScriptedClient::new(&[("122816215025810", json!({"output": {}}))]);
        let runner = BatchRunner::new(client, FedExExtractor).with_delay(Duration::ZERO);

        let summary = runner.run(&requests(&["122816215025810"])).await;

        assert_eq!(summary.rows(), &[TrackingResult::bare("122816215025810")]);
        assert!(summary.failed().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let runner = BatchRunner::new(ScriptedClient::new(&[]), DhlExtractor);

        let summary = runner.run(&[]).await;

        assert!(summary.is_empty());
        assert!(runner.client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delay_applied_between_lookups_only() {
        let client = ScriptedClient::new(&[("A1", delivered("DE"))]);
        let delay = Duration::from_millis(100);
        let runner = BatchRunner::new(client, DhlExtractor).with_delay(delay);

        // 單筆不需要等待
        let started = Instant::now();
        runner.run(&requests(&["A1"])).await;
        assert!(started.elapsed() < delay);

        // 三筆（含失敗）等待兩次
        let started = Instant::now();
        let summary = runner.run(&requests(&["A1", "B2", "A1"])).await;
        assert!(started.elapsed() >= delay * 2);
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn test_default_delay_is_five_seconds() {
        let runner = BatchRunner::new(ScriptedClient::new(&[]), DhlExtractor);
        assert_eq!(runner.delay(), Duration::from_secs(5));
    }
}
