use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::api::admin::{
    AdminTransport, ApiError, CouponForm, DeleteResponse, PointsRuleForm, WriteMethod,
};
use crate::models::{Query, Record};
use crate::resources::{FormKind, ResourceConfig};
use crate::services::fetch_service;
use crate::utils::format::parse_date;

fn write_path(resource: &ResourceConfig) -> Result<&'static str, ApiError> {
    resource
        .write_path
        .ok_or_else(|| ApiError::Validation(format!("{} is read-only", resource.title)))
}

fn item_path(base: &str, id: &str) -> Result<String, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::Validation("An id is required".to_string()));
    }
    Ok(format!("{}/{}", base, id))
}

/// Create a record. `loaded` is the collection currently on screen, if any.
pub async fn create(
    source: &dyn AdminTransport,
    resource: &'static ResourceConfig,
    body: Value,
    loaded: Option<&[Record]>,
) -> Result<Value, ApiError> {
    let base = write_path(resource)?;
    let existing = existing_records(source, resource, loaded, None).await?;
    let body = prepare_body(resource, None, body, &existing)?;

    let answer = source.send_json(WriteMethod::Post, base, Some(&body)).await?;
    info!("Created {} record", resource.name);
    Ok(answer)
}

/// Update a record; fields not in `body` keep their loaded values
pub async fn update(
    source: &dyn AdminTransport,
    resource: &'static ResourceConfig,
    id: &str,
    body: Value,
    loaded: Option<&[Record]>,
) -> Result<Value, ApiError> {
    let path = item_path(write_path(resource)?, id)?;
    let id = id.trim();
    let existing = existing_records(source, resource, loaded, Some(id)).await?;
    let body = prepare_body(resource, Some(id), body, &existing)?;

    let answer = source.send_json(WriteMethod::Put, &path, Some(&body)).await?;
    info!("Updated {} record {}", resource.name, id);
    Ok(answer)
}

/// Delete a record. A `{"success": false}` answer is reported as a validation error.
pub async fn delete(
    source: &dyn AdminTransport,
    resource: &'static ResourceConfig,
    id: &str,
) -> Result<Value, ApiError> {
    let path = item_path(write_path(resource)?, id)?;
    let answer = source.send_json(WriteMethod::Delete, &path, None).await?;

    if answer.is_object() {
        let outcome: DeleteResponse = serde_json::from_value(answer.clone()).unwrap_or_default();
        if outcome.success == Some(false) {
            return Err(ApiError::Validation(
                outcome
                    .message
                    .unwrap_or_else(|| format!("Failed to delete {} {}", resource.name, id)),
            ));
        }
    }

    info!("Deleted {} record {}", resource.name, id);
    Ok(answer)
}

/// The loaded collection, or a fresh fetch when it lacks what the write needs:
/// the record being edited, or the rules a points-rule range is checked against
async fn existing_records(
    source: &dyn AdminTransport,
    resource: &'static ResourceConfig,
    loaded: Option<&[Record]>,
    editing_id: Option<&str>,
) -> Result<Vec<Record>, ApiError> {
    let holds_edited = |records: &[Record]| {
        editing_id.map_or(true, |id| records.iter().any(|r| r.id().as_deref() == Some(id)))
    };
    match loaded {
        Some(records) if holds_edited(records) => return Ok(records.to_vec()),
        None if editing_id.is_none() && resource.form != FormKind::PointsRule => {
            return Ok(Vec::new())
        }
        _ => {}
    }

    debug!("Fetching {} before writing", resource.name);
    let page = fetch_service::fetch_page(source, resource, &Query::new(), usize::MAX).await?;
    Ok(page.records)
}

/// Merge `body` over the loaded record being edited, then run the resource's form checks
pub fn prepare_body(
    resource: &ResourceConfig,
    editing_id: Option<&str>,
    body: Value,
    existing: &[Record],
) -> Result<Value, ApiError> {
    let Value::Object(fields) = body else {
        return Err(ApiError::Validation("Expected a JSON object".to_string()));
    };

    let mut merged = editing_id
        .and_then(|id| existing.iter().find(|r| r.id().as_deref() == Some(id)))
        .and_then(|r| r.as_value().as_object().cloned())
        .unwrap_or_else(Map::new);
    merged.extend(fields);
    let merged = Value::Object(merged);

    match resource.form {
        FormKind::Free => Ok(merged),
        FormKind::Coupon => {
            let mut form: CouponForm = read_form(merged)?;
            require(&[
                ("name", &form.name),
                ("description", &form.description),
                ("code", &form.code),
                ("min_order_value", &form.min_order_value),
                ("max_order_value", &form.max_order_value),
                ("offer_percentage", &form.offer_percentage),
                ("expiry_date", &form.expiry_date),
            ])?;
            form.expiry_date = normalize_date(&form.expiry_date)?;
            encode(&form)
        }
        FormKind::PointsRule => {
            let mut form: PointsRuleForm = read_form(merged)?;
            validate_points_rule(&form, editing_id, existing)?;
            form.expiry_date = normalize_date(&form.expiry_date)?;
            encode(&form)
        }
    }
}

/// Points rule checks: all fields, min below max, no duplicate range among other rules
pub fn validate_points_rule(
    form: &PointsRuleForm,
    editing_id: Option<&str>,
    existing: &[Record],
) -> Result<(), ApiError> {
    require(&[
        ("min_amount", &form.min_amount),
        ("max_amount", &form.max_amount),
        ("percentage", &form.percentage),
        ("points_valid_days", &form.points_valid_days),
        ("expiry_date", &form.expiry_date),
    ])?;

    let (min, max) = match (
        form.min_amount.trim().parse::<f64>(),
        form.max_amount.trim().parse::<f64>(),
    ) {
        (Ok(min), Ok(max)) => (min, max),
        _ => {
            return Err(ApiError::Validation(
                "min_amount and max_amount must be numbers".to_string(),
            ))
        }
    };
    if min >= max {
        return Err(ApiError::Validation(
            "Min amount must be less than Max amount.".to_string(),
        ));
    }

    let duplicate = existing.iter().any(|rule| {
        rule.number("min_amount") == Some(min)
            && rule.number("max_amount") == Some(max)
            && rule.id().as_deref() != editing_id
    });
    if duplicate {
        return Err(ApiError::Validation(
            "A rule with this Min/Max range already exists.".to_string(),
        ));
    }

    Ok(())
}

fn require(fields: &[(&str, &String)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Please fill all fields (missing: {})",
            missing.join(", ")
        )))
    }
}

fn normalize_date(raw: &str) -> Result<String, ApiError> {
    parse_date(raw)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ApiError::Validation(format!("'{}' is not a YYYY-MM-DD date", raw.trim())))
}

fn read_form<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Validation(format!("Invalid form: {}", e)))
}

fn encode<T: Serialize>(form: &T) -> Result<Value, ApiError> {
    serde_json::to_value(form).map_err(|e| ApiError::Parse(format!("Failed to encode form: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::admin::testing::FakeTransport;
    use crate::resources;
    use serde_json::json;

    fn coupon_body() -> Value {
        json!({
            "name": "Ramadan",
            "description": "10% off",
            "code": "RMD10",
            "min_order_value": 50,
            "max_order_value": "500",
            "offer_percentage": 10,
            "expiry_date": "2025-03-30T00:00:00.000Z"
        })
    }

    fn rules() -> Vec<Record> {
        vec![
            Record::new(json!({ "id": "r1", "min_amount": 0, "max_amount": 100, "percentage": 5 })),
            Record::new(json!({ "id": "r2", "min_amount": "100", "max_amount": "500", "percentage": 8 })),
        ]
    }

    fn rule_form(min: &str, max: &str) -> PointsRuleForm {
        PointsRuleForm {
            min_amount: min.to_string(),
            max_amount: max.to_string(),
            percentage: "5".to_string(),
            points_valid_days: "90".to_string(),
            expiry_date: "2025-12-31".to_string(),
        }
    }

    #[test]
    fn test_coupon_expiry_cut_to_date() {
        let coupons = resources::find("coupons").expect("coupons");
        let body = prepare_body(coupons, None, coupon_body(), &[]).expect("valid coupon");
        assert_eq!(body["expiry_date"], "2025-03-30");
        assert_eq!(body["min_order_value"], "50");
    }

    #[test]
    fn test_coupon_requires_every_field() {
        let coupons = resources::find("coupons").expect("coupons");
        let mut body = coupon_body();
        body["code"] = json!("  ");
        match prepare_body(coupons, None, body, &[]) {
            Err(ApiError::Validation(msg)) => assert!(msg.contains("code")),
            other => panic!("expected validation error, got {:?}", other),
        }

        let mut body = coupon_body();
        body["expiry_date"] = json!("next week");
        assert!(matches!(
            prepare_body(coupons, None, body, &[]),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_update_merges_over_loaded_record() {
        let coupons = resources::find("coupons").expect("coupons");
        let mut loaded = coupon_body();
        loaded["id"] = json!(9);
        let existing = vec![Record::new(loaded)];

        let body = prepare_body(coupons, Some("9"), json!({ "offer_percentage": 15 }), &existing)
            .expect("merged");
        assert_eq!(body["offer_percentage"], "15");
        assert_eq!(body["code"], "RMD10");
    }

    #[test]
    fn test_points_rule_range_checks() {
        let existing = rules();
        assert!(validate_points_rule(&rule_form("500", "1000"), None, &existing).is_ok());
        assert!(matches!(
            validate_points_rule(&rule_form("300", "200"), None, &existing),
            Err(ApiError::Validation(msg)) if msg.contains("less than")
        ));
        assert!(matches!(
            validate_points_rule(&rule_form("100", "500"), None, &existing),
            Err(ApiError::Validation(msg)) if msg.contains("already exists")
        ));
        // editing the rule that owns the range is allowed
        assert!(validate_points_rule(&rule_form("100", "500"), Some("r2"), &existing).is_ok());
    }

    #[tokio::test]
    async fn test_read_only_resource_rejects_writes() {
        let source = FakeTransport::new();
        let orders = resources::find("orders").expect("orders");
        let result = create(&source, orders, json!({}), None).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(source.writes().is_empty());
    }

    #[tokio::test]
    async fn test_points_rule_create_fetches_rules_when_nothing_loaded() {
        let source = FakeTransport::new().with_body("/api/points-rules", Value::Array(
            rules().into_iter().map(|r| r.as_value().clone()).collect(),
        ));
        let points_rules = resources::find("points-rules").expect("points-rules");
        let body = json!({
            "min_amount": 0, "max_amount": 100, "percentage": 3,
            "points_valid_days": 30, "expiry_date": "2025-06-01"
        });

        let result = create(&source, points_rules, body, None).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(source.calls().len(), 1);
        assert!(source.writes().is_empty());
    }

    #[tokio::test]
    async fn test_update_without_open_view_merges_fetched_record() {
        let source = FakeTransport::new().with_body("/api/coupons", json!([{
            "id": 1, "name": "Welcome", "description": "5% off", "code": "HELLO5",
            "min_order_value": 20, "max_order_value": 200, "offer_percentage": 5,
            "expiry_date": "2025-01-31"
        }]));
        let coupons = resources::find("coupons").expect("coupons");

        update(&source, coupons, "1", json!({ "offer_percentage": 15 }), None)
            .await
            .expect("update");

        assert_eq!(source.calls()[0].0, "/api/coupons");
        let writes = source.writes();
        assert_eq!(writes[0].1, "/api/coupons/1");
        let sent = writes[0].2.clone().expect("body");
        assert_eq!(sent["code"], "HELLO5");
        assert_eq!(sent["offer_percentage"], "15");

        // a loaded view holding the record needs no fetch
        let loaded = vec![Record::new(coupon_body_with_id(1))];
        update(&source, coupons, "1", json!({ "code": "NEW" }), Some(&loaded))
            .await
            .expect("update");
        assert_eq!(source.calls().len(), 1);
    }

    fn coupon_body_with_id(id: u64) -> Value {
        let mut body = coupon_body();
        body["id"] = json!(id);
        body
    }

    #[tokio::test]
    async fn test_delete_soft_failure() {
        let coupons = resources::find("coupons").expect("coupons");
        let source = FakeTransport::new().with_document(
            "DELETE /api/coupons/3",
            Ok(json!({ "success": false, "message": "Coupon is in use" })),
        );

        assert_eq!(
            delete(&source, coupons, "3").await,
            Err(ApiError::Validation("Coupon is in use".to_string()))
        );
        assert!(delete(&source, coupons, "4").await.is_ok());
        assert_eq!(source.writes()[1].1, "/api/coupons/4");
        assert!(matches!(
            delete(&source, coupons, " ").await,
            Err(ApiError::Validation(_))
        ));
    }
}
