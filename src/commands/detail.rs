use serde_json::Value;

use crate::api::admin::{ApiError, UserDetails};
use crate::commands::Session;
use crate::services::detail_service;
use crate::utils::format::format_datetime;
use crate::utils::{banner, Table};

/// `user <id>`
pub async fn user(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let id = args.first().ok_or("Usage: user <id>")?;

    match detail_service::get_user_details(session.source.as_ref(), id).await {
        Ok(details) => Ok(render_user(id, &details)),
        Err(ApiError::NotFound(_)) => Err(format!("User {} not found", id)),
        Err(e) => Err(banner(&e)),
    }
}

fn render_user(id: &str, details: &UserDetails) -> String {
    let mut output = format!("👤 User {}\n", id);
    output.push_str(&format!("Name:  {}\n", details.name));
    output.push_str(&format!("Email: {}\n", details.email));
    output.push_str(&format!("Coins: {}\n", details.coins));

    output.push_str("\nCoin History\n");
    if details.history.is_empty() {
        output.push_str("No coin history found.\n");
        return output;
    }

    let mut table = Table::new(vec!["Date", "Amount"]);
    for entry in &details.history {
        table.add_row(vec![format_datetime(&entry.date), entry.amount.clone()]);
    }
    output.push_str(&table.render());
    output
}

/// `wallet <order id>`
pub async fn wallet(session: &mut Session, args: &[&str]) -> Result<String, String> {
    let order_id = args.first().ok_or("Usage: wallet <order id>")?;

    let record = detail_service::find_order_wallet(session.source.as_ref(), order_id)
        .await
        .map_err(|e| banner(&e))?;

    let Some(record) = record else {
        return Ok(format!("No wallet record for order {}.", order_id));
    };

    let mut table = Table::new(vec!["Field", "Value"]);
    if let Value::Object(map) = record.as_value() {
        for key in map.keys() {
            if let Some(text) = record.text(key) {
                table.add_row(vec![key.clone(), text]);
            }
        }
    }
    Ok(format!("👛 Wallet for order {}\n{}", order_id, table.render()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::admin::testing::FakeTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_user_details_render() {
        let fake = FakeTransport::new().with_document(
            "/api/admin/users/42",
            Ok(json!({
                "name": "Amal Haddad",
                "email": "amal@example.com",
                "coins": 120,
                "history": [{ "date": "not a date", "amount": -20 }]
            })),
        );
        let mut session = Session::new(Arc::new(fake), 10);

        let output = user(&mut session, &["42"]).await.expect("user");
        assert!(output.contains("Amal Haddad"));
        assert!(output.contains("Coins: 120"));
        assert!(output.contains("-20"));

        let missing = user(&mut session, &["7"]).await;
        assert_eq!(missing, Err("User 7 not found".to_string()));
    }

    #[tokio::test]
    async fn test_wallet_empty_state() {
        let fake = FakeTransport::new().with_document(
            "/api/wallet/orders/1001",
            Ok(json!({ "order_id": 1001, "coins_earned": 12, "items": [] })),
        );
        let mut session = Session::new(Arc::new(fake), 10);

        let output = wallet(&mut session, &["1001"]).await.expect("wallet");
        assert!(output.contains("coins_earned"));
        assert!(!output.contains("items"));

        let output = wallet(&mut session, &["1002"]).await.expect("empty state");
        assert_eq!(output, "No wallet record for order 1002.");
    }
}
