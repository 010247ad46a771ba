//! List query and page result models

use std::collections::BTreeMap;

use super::record::Record;

/// Where a fetch starts. Offset and cursor positions never mix in one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// 1-based page number
    Page(usize),
    /// Opaque `page_info` token issued by the upstream commerce platform
    Cursor(String),
}

impl Default for Position {
    fn default() -> Self {
        Position::Page(1)
    }
}

/// Search, filters and position for one fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub position: Position,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        if term.is_empty() {
            None
        } else {
            Some(term)
        }
    }

    /// Filters with a non-empty value
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search_term().is_none() && self.active_filters().next().is_none()
    }

    /// Requested page number; cursor queries always count as page 1
    pub fn page(&self) -> usize {
        match self.position {
            Position::Page(page) => page.max(1),
            Position::Cursor(_) => 1,
        }
    }

    pub fn cursor(&self) -> Option<&str> {
        match &self.position {
            Position::Cursor(token) => Some(token.as_str()),
            Position::Page(_) => None,
        }
    }
}

/// How the answering endpoint paginates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paging {
    /// The whole collection came back; filtering and slicing happen locally
    Full,
    /// Server-sliced offset page
    Offset { page: usize, total_pages: usize },
    /// Upstream cursor tokens; there is no page count in this mode
    Cursor {
        prev: Option<String>,
        next: Option<String>,
    },
}

/// One normalized answer from a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub records: Vec<Record>,
    pub paging: Paging,
    /// Path of the endpoint that answered (primary or fallback)
    pub endpoint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_is_unfiltered() {
        let query = Query::new().with_search("   ").with_filter("role", "");
        assert!(query.is_unfiltered());
        assert_eq!(query.search_term(), None);
    }

    #[test]
    fn test_active_filters_skip_empty_values() {
        let query = Query::new()
            .with_filter("financial_status", "paid")
            .with_filter("fulfillment_status", " ");
        let active: Vec<_> = query.active_filters().collect();
        assert_eq!(active, vec![("financial_status", "paid")]);
        assert!(!query.is_unfiltered());
    }

    #[test]
    fn test_position_accessors() {
        let query = Query::new().at(Position::Cursor("eyJsYXN0".to_string()));
        assert_eq!(query.page(), 1);
        assert_eq!(query.cursor(), Some("eyJsYXN0"));

        let query = Query::new().at(Position::Page(0));
        assert_eq!(query.page(), 1);
        assert_eq!(query.cursor(), None);
    }
}
