use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::admin::{AdminTransport, ApiError, CollectionResponse};
use crate::models::{PageResult, Paging, Position, Query, Record};
use crate::resources::{Endpoint, EndpointStyle, ResourceConfig};
use crate::utils::link::page_info_from_url;
use crate::utils::{parse_link_header, LinkCursors};

/// Keys tried, after the endpoint's own key, when the rows sit inside an object
const FALLBACK_ROW_KEYS: [&str; 2] = ["records", "data"];

/// Fetch one page of a resource
///
/// Tries the primary endpoint and, if it fails, retries once against the
/// resource's fallback endpoint with the query translated to that endpoint's
/// style. When both fail the primary error is returned.
pub async fn fetch_page(
    source: &dyn AdminTransport,
    resource: &ResourceConfig,
    query: &Query,
    page_size: usize,
) -> Result<PageResult, ApiError> {
    let primary_err = match fetch_from(source, &resource.primary, query, page_size).await {
        Ok(page) => return Ok(page),
        Err(e) => e,
    };

    let Some(fallback) = &resource.fallback else {
        return Err(primary_err);
    };

    warn!(
        "{} failed for {} ({}), retrying against {}",
        resource.primary.path, resource.name, primary_err, fallback.path
    );

    let translated = translate_query(query, fallback.style);
    match fetch_from(source, fallback, &translated, page_size).await {
        Ok(page) => Ok(page),
        Err(fallback_err) => {
            warn!("Fallback {} also failed: {}", fallback.path, fallback_err);
            Err(primary_err)
        }
    }
}

/// Fetch one page for a view whose held page came from `issuer`
///
/// A cursor is only meaningful to the endpoint that issued it, so a cursor
/// query goes straight to the fallback when the fallback issued the token.
pub async fn fetch_page_from_issuer(
    source: &dyn AdminTransport,
    resource: &ResourceConfig,
    query: &Query,
    page_size: usize,
    issuer: Option<&str>,
) -> Result<PageResult, ApiError> {
    let issued_by_fallback = resource
        .fallback
        .as_ref()
        .filter(|fallback| query.cursor().is_some() && issuer == Some(fallback.path));

    match issued_by_fallback {
        Some(fallback) => fetch_from(source, fallback, query, page_size).await,
        None => fetch_page(source, resource, query, page_size).await,
    }
}

/// Fetch and normalize against a single endpoint
pub async fn fetch_from(
    source: &dyn AdminTransport,
    endpoint: &Endpoint,
    query: &Query,
    page_size: usize,
) -> Result<PageResult, ApiError> {
    let params = build_params(endpoint, query, page_size);
    let response = source.get_collection(endpoint.path, &params).await?;
    let page = normalize(endpoint, query, response)?;
    debug!(
        "{} answered {} record(s), paging {:?}",
        endpoint.path,
        page.records.len(),
        page.paging
    );
    Ok(page)
}

/// Query parameters for an endpoint's style
pub fn build_params(endpoint: &Endpoint, query: &Query, page_size: usize) -> Vec<(String, String)> {
    let mut params = Vec::new();

    match endpoint.style {
        EndpointStyle::Collection => {
            // whole-collection endpoints only page when they handed out body links
            if let Some(token) = query.cursor() {
                params.push(("page_info".to_string(), token.to_string()));
            }
        }
        EndpointStyle::Offset => {
            push_search_and_filters(&mut params, endpoint, query);
            params.push(("page".to_string(), query.page().to_string()));
            params.push(("limit".to_string(), page_size.to_string()));
        }
        EndpointStyle::Cursor => {
            params.push(("limit".to_string(), page_size.to_string()));
            match query.cursor() {
                // the token already encodes the upstream filters; upstream
                // rejects other parameters alongside page_info
                Some(token) => params.push(("page_info".to_string(), token.to_string())),
                None => push_search_and_filters(&mut params, endpoint, query),
            }
        }
    }

    params
}

fn push_search_and_filters(params: &mut Vec<(String, String)>, endpoint: &Endpoint, query: &Query) {
    if let (Some(param), Some(term)) = (endpoint.search_param, query.search_term()) {
        params.push((param.to_string(), term.to_string()));
    }
    for (key, value) in query.active_filters() {
        params.push((key.to_string(), value.to_string()));
    }
}

/// Best-effort translation of a query for a fallback endpoint of another style
///
/// A cursor has no meaning outside the endpoint that issued it, so the
/// fallback starts over at page 1; a cursor endpoint likewise ignores page numbers.
pub fn translate_query(query: &Query, style: EndpointStyle) -> Query {
    let position = match (&query.position, style) {
        (Position::Page(page), EndpointStyle::Offset | EndpointStyle::Collection) => {
            Position::Page(*page)
        }
        _ => Position::Page(1),
    };
    Query {
        search: query.search.clone(),
        filters: query.filters.clone(),
        position,
    }
}

/// Collapse the observed response shapes into a [`PageResult`]
///
/// Accepted bodies: a bare array, an object with the rows under the endpoint
/// key (or `records` / `data`), optionally carrying `prev_link`/`next_link`
/// or `pagination.totalPages`. Cursor tokens may also come from the `Link` header.
pub fn normalize(
    endpoint: &Endpoint,
    query: &Query,
    response: CollectionResponse,
) -> Result<PageResult, ApiError> {
    let CollectionResponse { link, body } = response;

    let (rows, meta) = match body {
        Value::Array(rows) => (rows, Map::new()),
        Value::Object(mut map) => {
            let key = endpoint
                .key
                .into_iter()
                .chain(FALLBACK_ROW_KEYS)
                .find(|key| matches!(map.get(*key), Some(Value::Array(_))));
            let rows = match key.and_then(|key| map.remove(key)) {
                Some(Value::Array(rows)) => rows,
                _ => {
                    return Err(ApiError::Parse(format!(
                        "{} returned an object without a row list",
                        endpoint.path
                    )))
                }
            };
            (rows, map)
        }
        other => {
            return Err(ApiError::Parse(format!(
                "{} returned {} instead of a list",
                endpoint.path,
                json_kind(&other)
            )))
        }
    };

    let header_cursors = link.as_deref().map(parse_link_header).unwrap_or_default();
    let body_cursors = body_link_cursors(&meta);
    let has_body_links = meta.contains_key("prev_link") || meta.contains_key("next_link");

    let paging = if endpoint.style == EndpointStyle::Cursor
        || has_body_links
        || !header_cursors.is_empty()
    {
        Paging::Cursor {
            prev: header_cursors.prev.or(body_cursors.prev),
            next: header_cursors.next.or(body_cursors.next),
        }
    } else if let Some(total_pages) = total_pages_of(&meta) {
        let total_pages = total_pages.max(1);
        let page = current_page_of(&meta).unwrap_or_else(|| query.page());
        Paging::Offset {
            page: page.clamp(1, total_pages),
            total_pages,
        }
    } else {
        Paging::Full
    };

    Ok(PageResult {
        records: rows.into_iter().map(Record::new).collect(),
        paging,
        endpoint: endpoint.path.to_string(),
    })
}

fn body_link_cursors(meta: &Map<String, Value>) -> LinkCursors {
    let token = |key: &str| {
        meta.get(key)
            .and_then(|v| v.as_str())
            .and_then(page_info_from_url)
    };
    LinkCursors {
        next: token("next_link"),
        prev: token("prev_link"),
    }
}

fn total_pages_of(meta: &Map<String, Value>) -> Option<usize> {
    let pagination = meta.get("pagination");
    [
        pagination.and_then(|p| p.get("totalPages")),
        pagination.and_then(|p| p.get("total_pages")),
        meta.get("totalPages"),
        meta.get("total_pages"),
    ]
    .into_iter()
    .flatten()
    .find_map(|v| v.as_u64())
    .map(|n| n as usize)
}

fn current_page_of(meta: &Map<String, Value>) -> Option<usize> {
    let pagination = meta.get("pagination")?;
    ["currentPage", "current_page", "page"]
        .iter()
        .find_map(|key| pagination.get(*key).and_then(|v| v.as_u64()))
        .map(|n| n as usize)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
