//! Resource registry: one configuration per list view
//!
//! Every list view (orders, users, coin history, ...) is the same
//! fetch/filter/paginate pipeline driven by a [`ResourceConfig`]: its endpoints,
//! columns, search fields and filter fields.

use lazy_static::lazy_static;

use crate::models::Record;
use crate::utils::format::{capitalize_first, format_date, format_datetime, format_fixed2};

/// How an endpoint paginates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStyle {
    /// `?search=&page=&limit=` with `pagination.totalPages` in the body
    Offset,
    /// `?limit=&page_info=` with tokens in the `Link` header
    Cursor,
    /// Whole collection, no parameters
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub style: EndpointStyle,
    /// Body key holding the rows when the answer is an object
    pub key: Option<&'static str>,
    /// Query parameter carrying the search term
    pub search_param: Option<&'static str>,
}

impl Endpoint {
    pub fn offset(path: &'static str) -> Self {
        Self {
            path,
            style: EndpointStyle::Offset,
            key: None,
            search_param: Some("search"),
        }
    }

    pub fn cursor(path: &'static str) -> Self {
        Self {
            path,
            style: EndpointStyle::Cursor,
            key: None,
            search_param: None,
        }
    }

    pub fn collection(path: &'static str) -> Self {
        Self {
            path,
            style: EndpointStyle::Collection,
            key: None,
            search_param: None,
        }
    }

    pub fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    pub fn search_param(mut self, param: &'static str) -> Self {
        self.search_param = Some(param);
        self
    }
}

/// A field searched by free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchField {
    Field(&'static str),
    /// Several fields joined by a space, e.g. "first last"
    Composite(&'static [&'static str]),
}

impl SearchField {
    pub fn value(&self, record: &Record) -> Option<String> {
        match self {
            SearchField::Field(path) => record.text(path),
            SearchField::Composite(paths) => join_present(record, paths),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Exact equality against the field text
    Exact,
    /// Exact equality, with a missing or null field read as the given value
    ExactOrDefault(&'static str),
    /// `zero` / `positive` / `negative` over a numeric field
    Bucket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub kind: FilterKind,
    pub choices: &'static [&'static str],
}

/// How a column turns a record into display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(&'static str),
    Composite(&'static [&'static str]),
    OrDefault(&'static str, &'static str),
    Money {
        amount: &'static str,
        currency: &'static str,
    },
    DateTime(&'static str),
    Date(&'static str),
    Percent(&'static str),
    Fixed2(&'static str),
    Flag {
        field: &'static str,
        on: &'static str,
        off: &'static str,
    },
    Status(&'static str),
    /// Number of nested sub-records, e.g. an order's line items
    Count(&'static str),
}

impl Cell {
    pub fn render(&self, record: &Record) -> String {
        match self {
            Cell::Text(path) => record.text(path).unwrap_or_default(),
            Cell::Composite(paths) => join_present(record, paths).unwrap_or_default(),
            Cell::OrDefault(path, default) => record
                .text(path)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default.to_string()),
            Cell::Money { amount, currency } => {
                join_present(record, &[*amount, *currency]).unwrap_or_default()
            }
            Cell::DateTime(path) => record
                .text(path)
                .map(|s| format_datetime(&s))
                .unwrap_or_default(),
            Cell::Date(path) => record.text(path).map(|s| format_date(&s)).unwrap_or_default(),
            Cell::Percent(path) => record
                .text(path)
                .map(|s| format!("{}%", s))
                .unwrap_or_default(),
            Cell::Fixed2(path) => match record.number(path) {
                Some(n) => format_fixed2(n),
                None => record.text(path).unwrap_or_default(),
            },
            Cell::Flag { field, on, off } => {
                let enabled = match record.get(field) {
                    Some(serde_json::Value::Bool(b)) => *b,
                    Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
                    Some(serde_json::Value::String(s)) => {
                        matches!(s.as_str(), "true" | "1" | "enabled" | "active")
                    }
                    _ => false,
                };
                let label = if enabled { on } else { off };
                label.to_string()
            }
            Cell::Status(path) => record
                .text(path)
                .map(|s| capitalize_first(&s))
                .unwrap_or_default(),
            Cell::Count(path) => record.children(path).len().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub cell: Cell,
}

/// Client-side checks run before a write is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Free,
    Coupon,
    PointsRule,
}

/// Configuration of one list view
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    pub name: &'static str,
    pub title: &'static str,
    pub aliases: &'static [&'static str],
    pub primary: Endpoint,
    /// Legacy endpoint retried once when the primary fails
    pub fallback: Option<Endpoint>,
    /// Base path for POST/PUT/DELETE; `None` means read-only
    pub write_path: Option<&'static str>,
    pub form: FormKind,
    pub columns: Vec<Column>,
    pub search_fields: Vec<SearchField>,
    pub filter_fields: Vec<FilterField>,
}

impl ResourceConfig {
    pub fn new(name: &'static str, title: &'static str, primary: Endpoint) -> Self {
        Self {
            name,
            title,
            aliases: &[],
            primary,
            fallback: None,
            write_path: None,
            form: FormKind::Free,
            columns: Vec::new(),
            search_fields: Vec::new(),
            filter_fields: Vec::new(),
        }
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn fallback(mut self, endpoint: Endpoint) -> Self {
        self.fallback = Some(endpoint);
        self
    }

    pub fn writable(mut self, path: &'static str, form: FormKind) -> Self {
        self.write_path = Some(path);
        self.form = form;
        self
    }

    pub fn column(mut self, header: &'static str, cell: Cell) -> Self {
        self.columns.push(Column { header, cell });
        self
    }

    pub fn search(mut self, field: SearchField) -> Self {
        self.search_fields.push(field);
        self
    }

    pub fn filter(mut self, key: &'static str, choices: &'static [&'static str]) -> Self {
        self.filter_fields.push(FilterField {
            key,
            kind: FilterKind::Exact,
            choices,
        });
        self
    }

    /// Exact filter whose null rows count as `default`, matching an `OrDefault` column
    pub fn filter_or_default(
        mut self,
        key: &'static str,
        choices: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        self.filter_fields.push(FilterField {
            key,
            kind: FilterKind::ExactOrDefault(default),
            choices,
        });
        self
    }

    pub fn bucket(mut self, key: &'static str) -> Self {
        self.filter_fields.push(FilterField {
            key,
            kind: FilterKind::Bucket,
            choices: &["zero", "positive", "negative"],
        });
        self
    }

    pub fn filter_field(&self, key: &str) -> Option<&FilterField> {
        self.filter_fields.iter().find(|f| f.key == key)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

fn join_present(record: &Record, paths: &[&str]) -> Option<String> {
    let parts: Vec<String> = paths
        .iter()
        .filter_map(|path| record.text(path))
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

lazy_static! {
    static ref RESOURCES: Vec<ResourceConfig> = vec![
        ResourceConfig::new(
            "orders",
            "Shopify Orders",
            Endpoint::cursor("/api/orders").key("orders").search_param("name"),
        )
        .fallback(Endpoint::collection("/api/admin/orders").key("orders"))
        .column("Order ID", Cell::Text("id"))
        .column("Name", Cell::Composite(&["customer.first_name", "customer.last_name"]))
        .column("Email", Cell::Text("email"))
        .column("Total Price", Cell::Money { amount: "total_price", currency: "currency" })
        .column("Status", Cell::OrDefault("fulfillment_status", "Unfulfilled"))
        .column("Created", Cell::DateTime("created_at"))
        .column("Items", Cell::Count("line_items"))
        .search(SearchField::Field("name"))
        .search(SearchField::Field("email"))
        .search(SearchField::Field("id"))
        .search(SearchField::Composite(&["customer.first_name", "customer.last_name"]))
        .filter("email", &[])
        .filter("financial_status", &["paid", "pending", "refunded"])
        .filter_or_default(
            "fulfillment_status",
            &["fulfilled", "unfulfilled", "partial"],
            "unfulfilled",
        ),
        ResourceConfig::new("users", "Users", Endpoint::offset("/api/users"))
            .fallback(Endpoint::collection("/api/admin/users"))
            .column("Name", Cell::Text("name"))
            .column("Email", Cell::Text("email"))
            .column("Coins", Cell::Text("coins"))
            .column("ID", Cell::Text("id"))
            .search(SearchField::Field("name"))
            .search(SearchField::Field("email"))
            .search(SearchField::Field("id"))
            .bucket("coins"),
        ResourceConfig::new("coins-history", "Coins History", Endpoint::offset("/api/coins-history"))
            .aliases(&["coins", "coin-history"])
            .fallback(Endpoint::collection("/api/admin/coins-history"))
            .column("User", Cell::Text("userName"))
            .column("Amount", Cell::Text("amount"))
            .column("Date", Cell::DateTime("date"))
            .search(SearchField::Field("userName"))
            .search(SearchField::Field("id"))
            .bucket("amount"),
        ResourceConfig::new("coupons", "Coupons", Endpoint::collection("/api/coupons"))
            .writable("/api/coupons", FormKind::Coupon)
            .column("Name", Cell::Text("name"))
            .column("Code", Cell::Text("code"))
            .column("Offer %", Cell::Percent("offer_percentage"))
            .column("Min Order", Cell::Text("min_order_value"))
            .column("Max Order", Cell::Text("max_order_value"))
            .column("Expiry", Cell::Date("expiry_date"))
            .column("ID", Cell::Text("id"))
            .search(SearchField::Field("name"))
            .search(SearchField::Field("code"))
            .search(SearchField::Field("description")),
        ResourceConfig::new(
            "delivery-locations",
            "Delivery Locations",
            Endpoint::collection("/api/delivery-settings"),
        )
        .aliases(&["delivery"])
        .column("Zone", Cell::Text("zone"))
        .column("Municipality", Cell::Text("municipality"))
        .column("District", Cell::Text("district"))
        .column("Delivery Fee (QAR)", Cell::Fixed2("delivery_fee"))
        .column("Free Delivery Order Amount", Cell::Text("free_delivery_order_amount"))
        .column("Status", Cell::Flag { field: "status", on: "Enabled", off: "Disabled" })
        .search(SearchField::Field("zone"))
        .search(SearchField::Field("municipality"))
        .search(SearchField::Field("district"))
        .filter("status", &["true", "false"]),
        ResourceConfig::new("points-rules", "Points Rules", Endpoint::collection("/api/points-rules"))
            .aliases(&["rules"])
            .writable("/api/points-rules", FormKind::PointsRule)
            .column("Min", Cell::Text("min_amount"))
            .column("Max", Cell::Text("max_amount"))
            .column("Offer %", Cell::Percent("percentage"))
            .column("Expiry Date", Cell::Date("expiry_date"))
            .column("Valid Days", Cell::Text("points_valid_days"))
            .column("ID", Cell::Text("id")),
        ResourceConfig::new(
            "internal-users",
            "Internal Users",
            Endpoint::collection("/api/admin/internal-users"),
        )
        .aliases(&["admins"])
        .column("Username", Cell::Text("username"))
        .column("Email", Cell::Text("email"))
        .column("Role", Cell::Status("role"))
        .search(SearchField::Field("username"))
        .search(SearchField::Field("email"))
        .filter("role", &[]),
    ];
}

pub fn all() -> &'static [ResourceConfig] {
    &RESOURCES
}

/// Look up a resource by name or alias, case-insensitively
pub fn find(name: &str) -> Option<&'static ResourceConfig> {
    RESOURCES.iter().find(|r| r.matches_name(name))
}
