use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::admin::{
    AdminTransport, ApiError, DashboardStats, GeneralSettings, UserDetails, WriteMethod,
};
use crate::models::Record;

const DASHBOARD_STATS_PATH: &str = "/api/dashboard/stats";
const GENERAL_SETTINGS_PATH: &str = "/api/settings/general";

fn decode<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::Parse(format!("Failed to parse {}: {}", path, e)))
}

/// GET /api/admin/users/{id}
pub async fn get_user_details(
    source: &dyn AdminTransport,
    user_id: &str,
) -> Result<UserDetails, ApiError> {
    let path = format!("/api/admin/users/{}", user_id.trim());
    let body = source.get_json(&path).await?;
    decode(&path, body)
}

/// Wallet record attached to an order, if the backend has one
///
/// A 404 or an empty answer is the normal "no wallet record" case.
pub async fn find_order_wallet(
    source: &dyn AdminTransport,
    order_id: &str,
) -> Result<Option<Record>, ApiError> {
    let path = format!("/api/wallet/orders/{}", order_id.trim());
    match source.get_json(&path).await {
        Ok(Value::Null) => Ok(None),
        Ok(Value::Object(map)) if map.is_empty() => Ok(None),
        Ok(body) => Ok(Some(Record::new(body))),
        Err(ApiError::NotFound(_)) => {
            debug!("No wallet record for order {}", order_id);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub async fn get_dashboard_stats(source: &dyn AdminTransport) -> Result<DashboardStats, ApiError> {
    let body = source.get_json(DASHBOARD_STATS_PATH).await?;
    decode(DASHBOARD_STATS_PATH, body)
}

pub async fn get_general_settings(source: &dyn AdminTransport) -> Result<GeneralSettings, ApiError> {
    let body = source.get_json(GENERAL_SETTINGS_PATH).await?;
    decode(GENERAL_SETTINGS_PATH, body)
}

/// Change one general setting; the full settings object is posted back
pub async fn update_general_settings(
    source: &dyn AdminTransport,
    key: &str,
    value: &str,
) -> Result<GeneralSettings, ApiError> {
    let mut settings = get_general_settings(source).await?;
    match key {
        "min_order_value" => {
            let value = value.trim();
            if value.parse::<f64>().map_or(true, |n| !n.is_finite() || n < 0.0) {
                return Err(ApiError::Validation(
                    "min_order_value must be a non-negative number".to_string(),
                ));
            }
            settings.min_order_value = value.to_string();
        }
        "support_contact" => settings.support_contact = value.trim().to_string(),
        other => {
            return Err(ApiError::Validation(format!(
                "Unknown setting '{}'. Use min_order_value or support_contact",
                other
            )))
        }
    }

    let body = serde_json::to_value(&settings)
        .map_err(|e| ApiError::Parse(format!("Failed to encode settings: {}", e)))?;
    source
        .send_json(WriteMethod::Post, GENERAL_SETTINGS_PATH, Some(&body))
        .await?;
    info!("Updated general setting {}", key);

    Ok(settings)
}
