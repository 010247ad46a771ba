use std::str::FromStr;

use crate::models::{Query, Record};
use crate::resources::{FilterKind, ResourceConfig, SearchField};

/// Numeric buckets used by filters like "zero coins" / "positive coins"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericBucket {
    Zero,
    Positive,
    Negative,
}

impl NumericBucket {
    pub fn contains(&self, value: f64) -> bool {
        match self {
            NumericBucket::Zero => value == 0.0,
            NumericBucket::Positive => value > 0.0,
            NumericBucket::Negative => value < 0.0,
        }
    }
}

impl FromStr for NumericBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" | "0" => Ok(NumericBucket::Zero),
            "positive" | "pos" | ">0" => Ok(NumericBucket::Positive),
            "negative" | "neg" | "<0" => Ok(NumericBucket::Negative),
            other => Err(format!(
                "Unknown bucket '{}'. Use zero, positive or negative",
                other
            )),
        }
    }
}

/// Apply the query's search term and filters to an in-memory collection
///
/// Pure: the output keeps the input order and depends only on the arguments.
/// An empty search with no filters returns the collection unchanged.
pub fn apply(records: &[Record], query: &Query, resource: &ResourceConfig) -> Vec<Record> {
    if query.is_unfiltered() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches(record, query, resource))
        .cloned()
        .collect()
}

/// Whether one record passes the search term and every active filter
pub fn matches(record: &Record, query: &Query, resource: &ResourceConfig) -> bool {
    if let Some(term) = query.search_term() {
        if !matches_search(record, &term.to_lowercase(), &resource.search_fields) {
            return false;
        }
    }

    query.active_filters().all(|(key, value)| {
        let kind = resource
            .filter_field(key)
            .map(|field| field.kind)
            .unwrap_or(FilterKind::Exact);
        matches_filter(record, key, value, kind)
    })
}

fn matches_search(record: &Record, term_lower: &str, fields: &[SearchField]) -> bool {
    fields.iter().any(|field| {
        field
            .value(record)
            .is_some_and(|text| text.to_lowercase().contains(term_lower))
    })
}

fn matches_filter(record: &Record, key: &str, value: &str, kind: FilterKind) -> bool {
    match kind {
        FilterKind::Exact => record.text(key).is_some_and(|text| text == value),
        FilterKind::ExactOrDefault(default) => match record.text(key) {
            Some(text) => text == value,
            None => default.eq_ignore_ascii_case(value),
        },
        FilterKind::Bucket => match (value.parse::<NumericBucket>(), record.number(key)) {
            (Ok(bucket), Some(number)) => bucket.contains(number),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources;
    use serde_json::json;

    fn users() -> Vec<Record> {
        vec![
            Record::new(json!({ "id": 1, "name": "Amal Haddad", "email": "amal@example.com", "coins": 120 })),
            Record::new(json!({ "id": 2, "name": "Omar Saleh", "email": "omar@example.com", "coins": 0 })),
            Record::new(json!({ "id": 3, "name": "Layla", "email": "LAYLA@moona.qa", "coins": "35" })),
            Record::new(json!({ "id": 4, "name": "Karim", "email": "karim@moona.qa", "coins": null })),
        ]
    }

    fn orders() -> Vec<Record> {
        vec![
            Record::new(json!({
                "id": 1001, "name": "#1001", "email": "a@x.qa",
                "financial_status": "paid", "fulfillment_status": "fulfilled",
                "customer": { "first_name": "Amal", "last_name": "Haddad" }
            })),
            Record::new(json!({
                "id": 1002, "name": "#1002", "email": "b@x.qa",
                "financial_status": "pending", "fulfillment_status": null,
                "customer": { "first_name": "Omar", "last_name": "Saleh" }
            })),
            Record::new(json!({
                "id": 1003, "name": "#1003", "email": "c@x.qa",
                "financial_status": "paid", "fulfillment_status": "partial",
                "customer": { "first_name": "Layla", "last_name": "Haddad" }
            })),
        ]
    }

    fn ids(records: &[Record]) -> Vec<String> {
        records.iter().filter_map(|r| r.id()).collect()
    }

    #[test]
    fn test_unfiltered_query_returns_input() {
        let resource = resources::find("users").expect("users");
        let input = users();
        assert_eq!(apply(&input, &Query::new(), resource), input);
        assert_eq!(apply(&input, &Query::new().with_search("  "), resource), input);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let resource = resources::find("users").expect("users");
        let query = Query::new().with_search("MOONA");
        let result = apply(&users(), &query, resource);
        assert_eq!(ids(&result), vec!["3", "4"]);

        for record in &result {
            let hit = resource.search_fields.iter().any(|f| {
                f.value(record)
                    .is_some_and(|v| v.to_lowercase().contains("moona"))
            });
            assert!(hit);
        }
    }

    #[test]
    fn test_search_matches_composite_name() {
        let resource = resources::find("orders").expect("orders");
        let query = Query::new().with_search("amal haddad");
        assert_eq!(ids(&apply(&orders(), &query, resource)), vec!["1001"]);

        let query = Query::new().with_search("haddad");
        assert_eq!(ids(&apply(&orders(), &query, resource)), vec!["1001", "1003"]);
    }

    #[test]
    fn test_filters_and_together() {
        let resource = resources::find("orders").expect("orders");
        let query = Query::new()
            .with_filter("financial_status", "paid")
            .with_filter("fulfillment_status", "partial");
        assert_eq!(ids(&apply(&orders(), &query, resource)), vec!["1003"]);
    }

    #[test]
    fn test_filter_order_does_not_matter() {
        let resource = resources::find("orders").expect("orders");
        let records = orders();

        let first = Query::new().with_filter("financial_status", "paid");
        let both = first.clone().with_filter("email", "a@x.qa");
        let reversed = Query::new()
            .with_filter("email", "a@x.qa")
            .with_filter("financial_status", "paid");

        let step_by_step = apply(
            &apply(&records, &first, resource),
            &Query::new().with_filter("email", "a@x.qa"),
            resource,
        );
        assert_eq!(apply(&records, &both, resource), apply(&records, &reversed, resource));
        assert_eq!(apply(&records, &both, resource), step_by_step);
    }

    #[test]
    fn test_null_status_matches_its_displayed_default() {
        let resource = resources::find("orders").expect("orders");
        let query = Query::new().with_filter("fulfillment_status", "unfulfilled");
        assert_eq!(ids(&apply(&orders(), &query, resource)), vec!["1002"]);

        let query = Query::new().with_filter("fulfillment_status", "fulfilled");
        assert_eq!(ids(&apply(&orders(), &query, resource)), vec!["1001"]);
    }

    #[test]
    fn test_exact_filter_does_not_match_null() {
        let resource = resources::find("orders").expect("orders");
        let mut records = orders();
        records.push(Record::new(json!({ "id": 1004, "financial_status": null })));

        let query = Query::new().with_filter("financial_status", "pending");
        assert_eq!(ids(&apply(&records, &query, resource)), vec!["1002"]);
    }

    #[test]
    fn test_numeric_buckets() {
        let resource = resources::find("users").expect("users");
        let zero = Query::new().with_filter("coins", "zero");
        assert_eq!(ids(&apply(&users(), &zero, resource)), vec!["2"]);

        let positive = Query::new().with_filter("coins", "positive");
        assert_eq!(ids(&apply(&users(), &positive, resource)), vec!["1", "3"]);

        let nonsense = Query::new().with_filter("coins", "plenty");
        assert!(apply(&users(), &nonsense, resource).is_empty());
    }

    #[test]
    fn test_bucket_parsing() {
        assert_eq!("Positive".parse::<NumericBucket>(), Ok(NumericBucket::Positive));
        assert_eq!("0".parse::<NumericBucket>(), Ok(NumericBucket::Zero));
        assert!("many".parse::<NumericBucket>().is_err());
    }
}
