use tracing::{debug, info};

use crate::api::admin::{AdminTransport, ApiError};
use crate::models::{PageResult, Paging, Position, Query, Record};
use crate::resources::ResourceConfig;
use crate::services::{fetch_service, filter_service};
use crate::utils::page::{slice_page, total_pages};
use crate::utils::{banner, PageControls};

/// Lifecycle of a list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    /// Last fetch failed; the last good collection is still held
    Error(String),
}

/// Handed out by [`ListView::begin_fetch`]; only the newest ticket may complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    pub query: Query,
}

/// What the caller must do to honour a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Already applied against the held collection
    Local,
    /// Needs a fetch with this query
    Fetch(Query),
    /// Not possible in the current mode
    Unavailable(String),
}

/// State container for one list view
#[derive(Debug, Clone)]
pub struct ListView {
    pub resource: &'static ResourceConfig,
    page_size: usize,
    query: Query,
    state: LoadState,
    records: Vec<Record>,
    paging: Paging,
    current_page: usize,
    last_ticket: u64,
    endpoint: Option<String>,
}

impl ListView {
    pub fn new(resource: &'static ResourceConfig, page_size: usize) -> Self {
        Self {
            resource,
            page_size: page_size.max(1),
            query: Query::new(),
            state: LoadState::Idle,
            records: Vec::new(),
            paging: Paging::Full,
            current_page: 1,
            last_ticket: 0,
            endpoint: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Endpoint that produced the held collection
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Every held record, before local filtering
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn has_data(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Start a fetch; any earlier ticket becomes stale
    pub fn begin_fetch(&mut self, query: Query) -> Ticket {
        self.last_ticket += 1;
        self.state = LoadState::Loading;
        Ticket {
            seq: self.last_ticket,
            query,
        }
    }

    /// Apply a fetch outcome. Returns false when the ticket is stale and the
    /// outcome was discarded.
    pub fn complete(&mut self, ticket: Ticket, result: Result<PageResult, ApiError>) -> bool {
        if ticket.seq != self.last_ticket {
            debug!(
                "Discarding stale {} response (ticket {} < {})",
                self.resource.name, ticket.seq, self.last_ticket
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.current_page = match page.paging {
                    Paging::Offset { page, .. } => page,
                    Paging::Cursor { .. } => 1,
                    Paging::Full => ticket.query.page(),
                };
                self.records = page.records;
                self.paging = page.paging;
                self.endpoint = Some(page.endpoint);
                self.query = ticket.query;
                self.state = LoadState::Loaded;

                if self.paging == Paging::Full {
                    self.current_page = self.current_page.min(self.total_pages().unwrap_or(1));
                }
            }
            Err(e) => {
                self.state = LoadState::Error(banner(&e));
            }
        }

        true
    }

    fn filtered(&self) -> Vec<Record> {
        filter_service::apply(&self.records, &self.query, self.resource)
    }

    /// Rows to show for the current page
    pub fn visible(&self) -> Vec<Record> {
        match self.paging {
            Paging::Full => {
                slice_page(&self.filtered(), self.current_page, self.page_size).to_vec()
            }
            Paging::Offset { .. } | Paging::Cursor { .. } => self.records.clone(),
        }
    }

    /// Number of rows before the first visible one, for row numbering
    pub fn row_offset(&self) -> usize {
        match self.paging {
            Paging::Full | Paging::Offset { .. } => {
                (self.current_page.max(1) - 1) * self.page_size
            }
            Paging::Cursor { .. } => 0,
        }
    }

    /// Page count; cursor mode has none
    pub fn total_pages(&self) -> Option<usize> {
        match self.paging {
            Paging::Full => Some(total_pages(self.filtered().len(), self.page_size)),
            Paging::Offset { total_pages, .. } => Some(total_pages),
            Paging::Cursor { .. } => None,
        }
    }

    /// Pagination controls for the renderer, once something has loaded
    pub fn controls(&self) -> Option<PageControls> {
        if !self.has_data() {
            return None;
        }
        Some(match &self.paging {
            Paging::Full | Paging::Offset { .. } => PageControls::Offset {
                page: self.current_page,
                total_pages: self.total_pages().unwrap_or(1),
            },
            Paging::Cursor { prev, next } => PageControls::Cursor {
                has_prev: prev.is_some(),
                has_next: next.is_some(),
            },
        })
    }

    /// Re-query with a changed search term or filter set, back on page 1
    fn requery(&mut self, query: Query) -> Navigation {
        let query = query.at(Position::Page(1));
        if self.paging == Paging::Full && self.has_data() {
            self.query = query;
            self.current_page = 1;
            Navigation::Local
        } else {
            Navigation::Fetch(query)
        }
    }

    pub fn set_search(&mut self, term: &str) -> Navigation {
        let query = self.query.clone().with_search(term.trim());
        self.requery(query)
    }

    pub fn set_filter(&mut self, key: &str, value: &str) -> Navigation {
        let query = self.query.clone().with_filter(key, value.trim());
        self.requery(query)
    }

    pub fn clear_filter(&mut self, key: &str) -> Navigation {
        let mut query = self.query.clone();
        query.filters.remove(key);
        self.requery(query)
    }

    pub fn clear_filters(&mut self) -> Navigation {
        let mut query = self.query.clone();
        query.filters.clear();
        self.requery(query)
    }

    /// Jump to a 1-based page number
    pub fn goto_page(&mut self, page: usize) -> Navigation {
        let total = match self.paging {
            Paging::Cursor { .. } => {
                return Navigation::Unavailable(
                    "Page numbers are not available for this list, use next/prev".to_string(),
                )
            }
            _ => self.total_pages().unwrap_or(1),
        };

        if page == 0 || page > total {
            return Navigation::Unavailable(format!(
                "Page {} is out of range (1-{})",
                page, total
            ));
        }

        match self.paging {
            Paging::Full => {
                self.current_page = page;
                Navigation::Local
            }
            _ => Navigation::Fetch(self.query.clone().at(Position::Page(page))),
        }
    }

    pub fn next(&mut self) -> Navigation {
        if let Paging::Cursor { next, .. } = &self.paging {
            return match next {
                Some(token) => {
                    Navigation::Fetch(self.query.clone().at(Position::Cursor(token.clone())))
                }
                None => Navigation::Unavailable("Already on the last page".to_string()),
            };
        }
        if self
            .total_pages()
            .is_some_and(|total| self.current_page >= total)
        {
            return Navigation::Unavailable("Already on the last page".to_string());
        }
        self.goto_page(self.current_page + 1)
    }

    pub fn prev(&mut self) -> Navigation {
        if let Paging::Cursor { prev, .. } = &self.paging {
            return match prev {
                Some(token) => {
                    Navigation::Fetch(self.query.clone().at(Position::Cursor(token.clone())))
                }
                None => Navigation::Unavailable("Already on the first page".to_string()),
            };
        }
        if self.current_page <= 1 {
            return Navigation::Unavailable("Already on the first page".to_string());
        }
        self.goto_page(self.current_page - 1)
    }

    /// Query that reloads the current page
    pub fn refresh(&self) -> Query {
        self.query.clone()
    }
}

/// Fetch `query` into the view, applying the result under a fresh ticket
pub async fn load(view: &mut ListView, source: &dyn AdminTransport, query: Query) {
    let ticket = view.begin_fetch(query);
    let result = fetch_service::fetch_page_from_issuer(
        source,
        view.resource,
        &ticket.query,
        view.page_size(),
        view.endpoint(),
    )
    .await;

    if let Ok(page) = &result {
        info!(
            "Loaded {} record(s) of {} from {}",
            page.records.len(),
            view.resource.name,
            page.endpoint
        );
    }
    view.complete(ticket, result);
}

/// Carry out a navigation, fetching when required
///
/// Fetch failures land in the view's [`LoadState::Error`]; only an
/// unavailable navigation is reported as an `Err`.
pub async fn navigate(
    view: &mut ListView,
    source: &dyn AdminTransport,
    navigation: Navigation,
) -> Result<(), String> {
    match navigation {
        Navigation::Local => Ok(()),
        Navigation::Fetch(query) => {
            load(view, source, query).await;
            Ok(())
        }
        Navigation::Unavailable(reason) => Err(reason),
    }
}
