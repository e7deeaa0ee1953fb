use crate::pagination::PageCursor;
use crate::session::PageSession;
use serde::Serialize;
use std::fmt;

/// Display-ready description of where a session currently is.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub showing: String,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

impl PageSummary {
    pub fn from_cursor(cursor: &PageCursor) -> Self {
        let (start, end) = cursor.get_current_page_range();
        Self {
            current_page: cursor.current_page,
            total_pages: cursor.total_pages(),
            total_items: cursor.total_items,
            showing: format_showing(start, end, cursor.total_items),
            has_next_page: cursor.can_go_next(),
            has_prev_page: cursor.can_go_prev(),
            is_first_page: cursor.current_page == 1,
            is_last_page: cursor.current_page >= cursor.last_page(),
        }
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {} of {} ({})",
            self.current_page,
            self.total_pages.max(1),
            self.showing
        )
    }
}

/// `"<first>-<last> of <total>"` with one-based, inclusive positions, taking
/// zero-based half-open bounds. An empty range reads `"0-0 of <total>"`.
pub fn format_showing(start: usize, end: usize, total: usize) -> String {
    if start >= end {
        format!("0-0 of {}", total)
    } else {
        format!("{}-{} of {}", start + 1, end, total)
    }
}

pub fn summarize(session: &PageSession) -> PageSummary {
    let mut cursor = PageCursor::new(session.total_items(), session.page_size());
    cursor.current_page = session.current_page();
    PageSummary::from_cursor(&cursor)
}
