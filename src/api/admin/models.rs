use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Comprehensive error type for admin API operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request failed or timed out
    #[error("Network Error: {0}")]
    Network(String),
    /// Response body did not have an expected shape
    #[error("Parse Error: {0}")]
    Parse(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 400/422, or a form rejected before sending
    #[error("Validation Error: {0}")]
    Validation(String),
    /// 401/403
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    Server(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    Http(u16, String),
}

/// Successful answer of a list endpoint, before shape normalization
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionResponse {
    /// Raw `Link` header, present on upstream cursor endpoints
    pub link: Option<String>,
    pub body: Value,
}

/// HTTP verbs used for writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for WriteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMethod::Post => write!(f, "POST"),
            WriteMethod::Put => write!(f, "PUT"),
            WriteMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Accept strings, numbers and null for fields the backend sends inconsistently
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Response from GET /api/dashboard/stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: i64,
    #[serde(default)]
    pub total_coupons: i64,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_internal_users: i64,
}

/// Body of GET/POST /api/settings/general
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default, deserialize_with = "lenient_string")]
    pub min_order_value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub support_contact: String,
}

/// One coin movement in a user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: String,
}

/// Response from GET /api/admin/users/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub coins: String,
    #[serde(default)]
    pub history: Vec<CoinEntry>,
}

/// Request body for POST/PUT /api/coupons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub min_order_value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub max_order_value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub offer_percentage: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub expiry_date: String,
}

/// Request body for POST/PUT /api/points-rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsRuleForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub min_amount: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub max_amount: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub percentage: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub points_valid_days: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub expiry_date: String,
}

/// Answer of DELETE endpoints that report soft failures in the body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
}
