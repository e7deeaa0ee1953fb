/// Number of page links shown by default in navigation controls
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Pages needed for `total_items`; 0 for an empty collection.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Clamp a one-based page number into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Zero-based half-open slice bounds of a one-based page, clipped to the
/// available items.
pub fn page_bounds(total_items: usize, page_size: usize, page: usize) -> (usize, usize) {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(total_items);
    let end = start.saturating_add(page_size).min(total_items);
    (start, end)
}

/// Page numbers to show as navigation links, centred on `current_page` and
/// re-anchored against the last page so the window stays full.
pub fn generate_page_window(current_page: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if max_visible == 0 {
        return Vec::new();
    }
    if total_pages <= max_visible {
        return (1..=total_pages).collect();
    }

    let half = max_visible / 2;
    let mut start = current_page.saturating_sub(half).max(1);
    let end = (start + max_visible - 1).min(total_pages);
    if end == total_pages {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    (start..=end).collect()
}

/// One-based page position over a collection of known size.
///
/// Every mutation keeps `current_page` inside `[1, max(1, total_pages)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub current_page: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl PageCursor {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            current_page: 1,
            total_items,
            page_size,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Highest page the cursor may point at; 1 even when there are no items.
    pub fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn prev_page(&mut self) -> bool {
        if self.can_go_prev() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        if self.can_go_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Move to `page`, clamped into range. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let target = clamp_page(page, self.total_pages());
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    pub fn go_to_first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn go_to_last_page(&mut self) -> bool {
        self.go_to_page(self.last_page())
    }

    /// Pull `current_page` back into range after `total_items` or
    /// `page_size` changed. Returns whether it had to move.
    pub fn reconcile(&mut self) -> bool {
        let clamped = clamp_page(self.current_page, self.total_pages());
        let moved = clamped != self.current_page;
        self.current_page = clamped;
        moved
    }

    pub fn get_current_page_range(&self) -> (usize, usize) {
        page_bounds(self.total_items, self.page_size, self.current_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(12, 5), 3);
    }

    #[test]
    fn test_page_bounds_are_clipped() {
        assert_eq!(page_bounds(12, 5, 1), (0, 5));
        assert_eq!(page_bounds(12, 5, 3), (10, 12));
        assert_eq!(page_bounds(12, 5, 4), (12, 12));
        assert_eq!(page_bounds(0, 5, 1), (0, 0));
        assert_eq!(page_bounds(12, 5, usize::MAX), (12, 12));
    }

    #[test]
    fn test_window_small_total_returns_everything() {
        assert_eq!(generate_page_window(1, 3, 5), vec![1, 2, 3]);
        assert_eq!(generate_page_window(1, 0, 5), Vec::<usize>::new());
    }

    #[test]
    fn test_window_centred_on_current_page() {
        assert_eq!(generate_page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(generate_page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(generate_page_window(2, 10, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_re_anchored_at_the_end() {
        assert_eq!(generate_page_window(8, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(generate_page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(generate_page_window(25, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_window_zero_visible() {
        assert!(generate_page_window(3, 10, 0).is_empty());
    }

    #[test]
    fn test_window_length_and_membership() {
        for max_visible in 1..=7 {
            for total in 0..=15 {
                for current in 1..=total.max(1) {
                    let window = generate_page_window(current, total, max_visible);
                    assert_eq!(window.len(), total.min(max_visible));
                    assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
                    if total > 0 {
                        assert!(window.contains(&current));
                    }
                }
            }
        }
    }

    #[test]
    fn test_cursor_navigation_is_clamped() {
        let mut cursor = PageCursor::new(12, 5);
        assert_eq!(cursor.total_pages(), 3);
        assert!(!cursor.prev_page());
        assert!(cursor.next_page());
        assert!(cursor.next_page());
        assert!(!cursor.next_page());
        assert_eq!(cursor.current_page, 3);
        assert!(cursor.go_to_first_page());
        assert!(!cursor.go_to_page(0));
        assert_eq!(cursor.current_page, 1);
        assert!(cursor.go_to_page(5));
        assert_eq!(cursor.current_page, 3);
        assert_eq!(cursor.get_current_page_range(), (10, 12));
    }

    #[test]
    fn test_cursor_on_empty_collection() {
        let mut cursor = PageCursor::new(0, 10);
        assert_eq!(cursor.total_pages(), 0);
        assert!(!cursor.go_to_last_page());
        assert!(!cursor.next_page());
        assert_eq!(cursor.current_page, 1);
        assert_eq!(cursor.get_current_page_range(), (0, 0));
    }

    #[test]
    fn test_cursor_reconcile_after_shrink() {
        let mut cursor = PageCursor::new(30, 10);
        cursor.go_to_page(3);
        cursor.total_items = 2;
        assert!(cursor.reconcile());
        assert_eq!(cursor.current_page, 1);
        assert!(!cursor.reconcile());
    }
}
