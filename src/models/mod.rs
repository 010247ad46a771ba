//! Data models for the admin console
//!
//! Rows are kept generic ([`Record`]) because every list view is driven by the
//! same fetch/filter/paginate pipeline; typed request and detail payloads live
//! next to the API client.

pub mod query;
pub mod record;

pub use query::{PageResult, Paging, Position, Query};
pub use record::Record;
