use url::Url;

/// Cursor tokens extracted from upstream pagination links
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCursors {
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl LinkCursors {
    pub fn is_empty(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

/// Parse a `Link` response header of the form
/// `<https://shop/orders.json?page_info=ABC>; rel="next", <...>; rel="previous"`
///
/// Entries that do not parse are skipped; a fully malformed header yields no cursors.
pub fn parse_link_header(header: &str) -> LinkCursors {
    let mut cursors = LinkCursors::default();

    for entry in header.split(',') {
        let mut parts = entry.trim().split(';');
        let target = parts.next().unwrap_or_default().trim();
        let Some(url) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
            continue;
        };
        let Some(token) = page_info_from_url(url) else {
            continue;
        };

        for param in parts {
            let Some(rel) = param.trim().strip_prefix("rel=") else {
                continue;
            };
            for relation in rel.trim_matches('"').split_whitespace() {
                match relation {
                    "next" => cursors.next = Some(token.clone()),
                    "previous" | "prev" => cursors.prev = Some(token.clone()),
                    _ => {}
                }
            }
        }
    }

    cursors
}

/// Extract the `page_info` query parameter from an absolute or relative URL
pub fn page_info_from_url(raw: &str) -> Option<String> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => Url::parse("http://localhost/").ok()?.join(raw).ok()?,
    };

    url.query_pairs()
        .find(|(key, _)| key == "page_info")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
