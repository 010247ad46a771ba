//! Generic row model shared by every list view

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row returned by a list endpoint (order, user, coin entry, coupon, ...)
///
/// The backend shapes differ per resource, so fields are addressed by dotted
/// paths such as `customer.first_name` instead of typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Record(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Stable identifier: `id`, falling back to Mongo-style `_id`
    pub fn id(&self) -> Option<String> {
        self.text("id").or_else(|| self.text("_id"))
    }

    /// Raw value at a dotted path. Numeric segments index into arrays.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.0, |current, key| match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        })
    }

    /// Display text of a scalar field. Null, missing and nested values yield `None`.
    pub fn text(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Numeric value of a field. Amounts often arrive as strings ("12.50").
    pub fn number(&self, path: &str) -> Option<f64> {
        match self.get(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Nested sub-records, e.g. an order's `line_items`
    pub fn children(&self, path: &str) -> Vec<Record> {
        match self.get(path) {
            Some(Value::Array(items)) => items.iter().cloned().map(Record).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Record(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order() -> Record {
        Record::new(json!({
            "id": 5012,
            "email": "amal@example.com",
            "total_price": "48.50",
            "fulfillment_status": null,
            "customer": { "first_name": "Amal", "last_name": "Haddad" },
            "line_items": [{ "title": "Dates box" }, { "title": "Coffee" }]
        }))
    }

    #[test]
    fn test_dotted_paths() {
        let record = order();
        assert_eq!(record.text("customer.first_name").as_deref(), Some("Amal"));
        assert_eq!(record.text("line_items.1.title").as_deref(), Some("Coffee"));
        assert_eq!(record.text("customer.middle_name"), None);
    }

    #[test]
    fn test_id_and_scalars() {
        let record = order();
        assert_eq!(record.id().as_deref(), Some("5012"));
        assert_eq!(record.text("fulfillment_status"), None);
        assert_eq!(record.text("customer"), None);

        let mongo = Record::new(json!({ "_id": "64f0c2", "status": true }));
        assert_eq!(mongo.id().as_deref(), Some("64f0c2"));
        assert_eq!(mongo.text("status").as_deref(), Some("true"));
    }

    #[test]
    fn test_numbers_accept_numeric_strings() {
        let record = order();
        assert_eq!(record.number("total_price"), Some(48.5));
        assert_eq!(record.number("id"), Some(5012.0));
        assert_eq!(record.number("email"), None);
    }

    #[test]
    fn test_children() {
        let record = order();
        let items = record.children("line_items");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text("title").as_deref(), Some("Dates box"));
        assert!(record.children("refunds").is_empty());
    }
}
