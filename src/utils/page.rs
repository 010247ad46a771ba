/// Number of pages needed for `count` rows. An empty list still has one page.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Rows of a 1-based page. Out of range pages are empty.
pub fn slice_page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Navigation controls for the current paging mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageControls {
    Offset { page: usize, total_pages: usize },
    Cursor { has_prev: bool, has_next: bool },
}

impl PageControls {
    /// Check if on first page
    pub fn is_first(&self) -> bool {
        match self {
            PageControls::Offset { page, .. } => *page <= 1,
            PageControls::Cursor { has_prev, .. } => !has_prev,
        }
    }

    /// Check if on last page
    pub fn is_last(&self) -> bool {
        match self {
            PageControls::Offset { page, total_pages } => page >= total_pages,
            PageControls::Cursor { has_next, .. } => !has_next,
        }
    }

    /// Footer line shown under a table
    pub fn render(&self) -> String {
        let prev = if self.is_first() { "(prev)" } else { "[prev]" };
        let next = if self.is_last() { "(next)" } else { "[next]" };
        match self {
            PageControls::Offset { page, total_pages } => {
                format!("{} Page {}/{} {}", prev, page, total_pages, next)
            }
            PageControls::Cursor { .. } => format!("{} {}", prev, next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(7, 0), 1);
    }

    #[test]
    fn test_last_page_is_partial() {
        let rows: Vec<u32> = (1..=25).collect();
        assert_eq!(slice_page(&rows, 3, 10), &[21, 22, 23, 24, 25]);
        assert_eq!(slice_page(&rows, 1, 10).len(), 10);
        assert!(slice_page(&rows, 4, 10).is_empty());
    }

    #[test]
    fn test_controls_render() {
        let offset = PageControls::Offset { page: 1, total_pages: 3 };
        assert_eq!(offset.render(), "(prev) Page 1/3 [next]");

        let cursor = PageControls::Cursor { has_prev: true, has_next: false };
        assert_eq!(cursor.render(), "[prev] (next)");
    }
}
