use crate::domain::model::TrackingResult;
use crate::domain::ports::RecordExtractor;
use crate::utils::error::{Result, TrackError};
use serde_json::Value;

fn structural_error(tracking_id: &str, message: String) -> TrackError {
    TrackError::ExtractionError {
        tracking_id: tracking_id.to_string(),
        message,
    }
}

/// 沿路徑取出字串原值；任何一層缺少或型別不符都回傳 None
fn text_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// 取物件欄位：不存在時為 None，存在但不是物件則視為結構錯誤
fn object_field<'a>(value: &'a Value, key: &str, tracking_id: &str) -> Result<Option<&'a Value>> {
    match value.get(key) {
        None => Ok(None),
        Some(field @ Value::Object(_)) => Ok(Some(field)),
        Some(other) => Err(structural_error(
            tracking_id,
            format!("'{}' is not an object (found {})", key, type_name(other)),
        )),
    }
}

/// 取陣列第一個元素：不存在時為 None，空陣列或非陣列視為結構錯誤
fn first_element<'a>(value: &'a Value, key: &str, tracking_id: &str) -> Result<Option<&'a Value>> {
    match value.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .first()
            .map(Some)
            .ok_or_else(|| structural_error(tracking_id, format!("'{}' is an empty array", key))),
        Some(other) => Err(structural_error(
            tracking_id,
            format!("'{}' is not an array (found {})", key, type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// DHL：`shipments[0]` 必須存在，其餘欄位盡力解析
#[derive(Debug, Clone, Copy, Default)]
pub struct DhlExtractor;

impl RecordExtractor for DhlExtractor {
    fn extract(&self, tracking_id: &str, raw: &Value) -> Result<TrackingResult> {
        let shipment = first_element(raw, "shipments", tracking_id)?.ok_or_else(|| {
            structural_error(tracking_id, "response has no 'shipments' array".to_string())
        })?;

        Ok(TrackingResult {
            tracking_id: tracking_id.to_string(),
            status_description: text_at(shipment, &["status", "description"]),
            shipper_country: text_at(shipment, &["details", "shipper", "address", "countryCode"]),
            consignee_country: text_at(
                shipment,
                &["details", "consignee", "address", "countryCode"],
            ),
        })
    }
}

/// FedEx：`output.completeTrackResults[0].trackResults[0]`。
/// 回應本身須為非空物件；內層缺少的鍵視為空物件，空陣列則整筆放棄。
#[derive(Debug, Clone, Copy, Default)]
pub struct FedExExtractor;

impl RecordExtractor for FedExExtractor {
    fn extract(&self, tracking_id: &str, raw: &Value) -> Result<TrackingResult> {
        match raw {
            Value::Object(fields) if !fields.is_empty() => {}
            Value::Object(_) => {
                return Err(structural_error(tracking_id, "response body is empty".to_string()))
            }
            other => {
                return Err(structural_error(
                    tracking_id,
                    format!("response body is not an object (found {})", type_name(other)),
                ))
            }
        }

        let Some(output) = object_field(raw, "output", tracking_id)? else {
            return Ok(TrackingResult::bare(tracking_id));
        };
        let Some(shipment) = first_element(output, "completeTrackResults", tracking_id)? else {
            return Ok(TrackingResult::bare(tracking_id));
        };
        let Some(track_result) = first_element(shipment, "trackResults", tracking_id)? else {
            return Ok(TrackingResult::bare(tracking_id));
        };

        Ok(TrackingResult {
            tracking_id: tracking_id.to_string(),
            status_description: text_at(track_result, &["latestStatusDetail", "description"]),
            shipper_country: text_at(
                track_result,
                &["shipperInformation", "address", "countryCode"],
            ),
            consignee_country: text_at(
                track_result,
                &["recipientInformation", "address", "countryCode"],
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dhl_full_extraction() {
        let raw = json!({
            "shipments": [{
                "id": "8917799995",
                "service": "express",
                "status": {"statusCode": "delivered", "description": "Delivered"},
                "details": {
                    "shipper": {"address": {"countryCode": "DE", "addressLocality": "Bonn"}},
                    "consignee": {"address": {"countryCode": "US"}}
                }
            }]
        });

        let result = DhlExtractor.extract("8917799995", &raw).unwrap();

        assert_eq!(result.tracking_id, "8917799995");
        assert_eq!(result.status_description.as_deref(), Some("Delivered"));
        assert_eq!(result.shipper_country.as_deref(), Some("DE"));
        assert_eq!(result.consignee_country.as_deref(), Some("US"));
    }

    #[test]
    fn test_dhl_status_only() {
        let raw = json!({"shipments": [{"status": {"description": "Delivered"}}]});

        let result = DhlExtractor.extract("8917799995", &raw).unwrap();

        assert_eq!(result.status_description.as_deref(), Some("Delivered"));
        assert_eq!(result.shipper_country, None);
        assert_eq!(result.consignee_country, None);
    }

    #[test]
    fn test_dhl_wrong_types_degrade_to_absent_fields() {
        let raw = json!({
            "shipments": [{
                "status": "Delivered",
                "details": {"shipper": {"address": {"countryCode": 49}}, "consignee": null}
            }]
        });

        let result = DhlExtractor.extract("8917799995", &raw).unwrap();
        assert_eq!(result, TrackingResult::bare("8917799995"));
    }

    #[test]
    fn test_dhl_missing_or_empty_shipments_is_extraction_error() {
        for raw in [json!({}), json!({"shipments": []}), json!({"shipments": {}})] {
            let result = DhlExtractor.extract("8917799995", &raw);
            assert!(
                matches!(result, Err(TrackError::ExtractionError { .. })),
                "expected extraction error for {}",
                raw
            );
        }
    }

    #[test]
    fn test_fedex_full_extraction() {
        let raw = json!({
            "transactionId": "624deea6-b709-470c-8c39-4b5511281492",
            "output": {
                "completeTrackResults": [{
                    "trackingNumber": "122816215025810",
                    "trackResults": [{
                        "latestStatusDetail": {"code": "IT", "description": "In transit"},
                        "shipperInformation": {"address": {"city": "POST FALLS", "countryCode": "US"}},
                        "recipientInformation": {"address": {"city": "NORTON", "countryCode": "CA"}}
                    }]
                }]
            }
        });

        let result = FedExExtractor.extract("122816215025810", &raw).unwrap();

        assert_eq!(result.tracking_id, "122816215025810");
        assert_eq!(result.status_description.as_deref(), Some("In transit"));
        assert_eq!(result.shipper_country.as_deref(), Some("US"));
        assert_eq!(result.consignee_country.as_deref(), Some("CA"));
    }

    #[test]
    fn test_fedex_missing_keys_produce_bare_record() {
        for raw in [
            json!({"transactionId": "624deea6"}),
            json!({"output": {}}),
            json!({"output": {"completeTrackResults": [{}]}}),
            json!({"output": {"completeTrackResults": [{"trackResults": [{}]}]}}),
        ] {
            let result = FedExExtractor.extract("122816215025810", &raw).unwrap();
            assert_eq!(result, TrackingResult::bare("122816215025810"));
        }
    }

    #[test]
    fn test_fedex_empty_arrays_are_extraction_errors() {
        for raw in [
            json!({"output": {"completeTrackResults": []}}),
            json!({"output": {"completeTrackResults": [{"trackResults": []}]}}),
            json!({"output": null}),
            json!({"output": {"completeTrackResults": "none"}}),
        ] {
            let result = FedExExtractor.extract("122816215025810", &raw);
            assert!(
                matches!(result, Err(TrackError::ExtractionError { .. })),
                "expected extraction error for {}",
                raw
            );
        }
    }

    #[test]
    fn test_fedex_empty_or_non_object_body_yields_no_row() {
        for raw in [json!({}), json!(null), json!([]), json!("oops"), json!(42)] {
            let result = FedExExtractor.extract("122816215025810", &raw);
            assert!(
                matches!(result, Err(TrackError::ExtractionError { .. })),
                "expected extraction error for {}",
                raw
            );
        }
    }

    #[test]
    fn test_string_values_pass_through_unchanged() {
        let raw = json!({
            "shipments": [{
                "status": {"description": " Delivered "},
                "details": {"shipper": {"address": {"countryCode": ""}}}
            }]
        });

        let result = DhlExtractor.extract("8917799995", &raw).unwrap();

        assert_eq!(result.status_description.as_deref(), Some(" Delivered "));
        assert_eq!(result.shipper_country.as_deref(), Some(""));
        assert_eq!(result.consignee_country, None);
    }
}
