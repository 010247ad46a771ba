use crate::api::admin::ApiError;

/// Extract a clean error message from a backend error body
///
/// The admin API answers failures with `{"message": "..."}` or `{"error": "..."}`;
/// anything else is returned trimmed as-is.
pub fn extract_backend_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let message = ["message", "error"]
            .iter()
            .find_map(|key| json.get(key).and_then(|v| v.as_str()));
        if let Some(message) = message {
            return message.trim().to_string();
        }
    }
    body.trim().to_string()
}

/// One-line banner shown to the operator for a failed request
pub fn banner(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => {
            "⚠️ Network Error: Having trouble reaching the admin API. Please try again.".to_string()
        }
        ApiError::Parse(detail) => format!("⚠️ Unexpected response from the admin API ({})", detail),
        ApiError::Unauthorized(_) => {
            "🔒 Unauthorized: check ADMIN_TOKEN and try again.".to_string()
        }
        ApiError::NotFound(detail) if detail.is_empty() => "❌ Not found".to_string(),
        ApiError::NotFound(detail) => format!("❌ Not found: {}", detail),
        ApiError::Validation(detail) => format!("❌ {}", detail),
        ApiError::Server(code, _) => format!("⚠️ The admin API failed ({}). Please try again.", code),
        ApiError::Http(code, detail) => format!("❌ Request rejected ({}): {}", code, detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field() {
        assert_eq!(
            extract_backend_message(r#"{"message": "Coupon code already exists"}"#),
            "Coupon code already exists"
        );
        assert_eq!(extract_backend_message(r#"{"error":"Invalid token"}"#), "Invalid token");
    }

    #[test]
    fn test_plain_body() {
        assert_eq!(extract_backend_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(extract_backend_message(r#"{"status": 500}"#), r#"{"status": 500}"#);
    }

    #[test]
    fn test_banner_hides_network_detail() {
        let text = banner(&ApiError::Network("connection refused (os error 111)".into()));
        assert!(text.contains("Network Error"));
        assert!(!text.contains("os error"));
        assert_eq!(
            banner(&ApiError::Validation("Min amount must be less than Max amount.".into())),
            "❌ Min amount must be less than Max amount."
        );
    }
}
