use crate::error::PageError;
use crate::filter::{FilterMap, filter_indices};
use crate::pagination::{PageCursor, generate_page_window};
use crate::record::{Record, Value};
use crate::sort::{SortDirection, sort_indices};
use tracing::{debug, info};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Starting state of a [`PageSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub page_size: usize,
    pub initial_page: usize,
    pub initial_search_term: String,
    pub initial_filters: FilterMap,
    pub initial_sort_key: Option<String>,
    pub initial_sort_direction: SortDirection,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            initial_page: 1,
            initial_search_term: String::new(),
            initial_filters: FilterMap::new(),
            initial_sort_key: None,
            initial_sort_direction: SortDirection::Ascending,
        }
    }
}

/// Search, filter, sort and page state over a fixed list of records.
///
/// Every setter runs the same derivation: reset to page 1 when search, filter
/// or sort inputs changed, rebuild the filtered and sorted views, then clamp
/// the current page to the last page.
#[derive(Debug, Clone)]
pub struct PageSession {
    items: Vec<Record>,
    config: SessionConfig,
    search_term: String,
    filters: FilterMap,
    sort_key: Option<String>,
    sort_direction: SortDirection,
    cursor: PageCursor,
    // indices into `items`
    filtered: Vec<usize>,
    sorted: Vec<usize>,
}

impl PageSession {
    pub fn new(items: Vec<Record>, config: SessionConfig) -> Result<Self, PageError> {
        if config.page_size == 0 {
            return Err(PageError::InvalidConfig(
                "Page size must be at least 1".to_string(),
            ));
        }

        let mut cursor = PageCursor::new(0, config.page_size);
        cursor.current_page = config.initial_page.max(1);

        let mut session = PageSession {
            items,
            search_term: config.initial_search_term.clone(),
            filters: config.initial_filters.clone(),
            sort_key: config.initial_sort_key.clone(),
            sort_direction: config.initial_sort_direction,
            config,
            cursor,
            filtered: Vec::new(),
            sorted: Vec::new(),
        };
        session.recompute(false);

        info!(
            item_count = session.items.len(),
            page_size = session.cursor.page_size,
            current_page = session.cursor.current_page,
            "Created page session"
        );
        Ok(session)
    }

    fn recompute(&mut self, reset_page: bool) {
        if reset_page {
            self.cursor.current_page = 1;
        }

        self.filtered = filter_indices(&self.items, &self.search_term, &self.filters);
        self.sorted = self.filtered.clone();
        sort_indices(
            &self.items,
            &mut self.sorted,
            self.sort_key.as_deref(),
            self.sort_direction,
        );
        self.cursor.total_items = self.sorted.len();

        let requested_page = self.cursor.current_page;
        if self.cursor.reconcile() {
            debug!(
                requested_page,
                current_page = self.cursor.current_page,
                "Clamped current page after derivation"
            );
        }

        debug!(
            total_items = self.items.len(),
            filtered = self.filtered.len(),
            total_pages = self.cursor.total_pages(),
            current_page = self.cursor.current_page,
            "Recomputed page session"
        );
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&Record> {
        indices.iter().map(|&index| &self.items[index]).collect()
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn current_page(&self) -> usize {
        self.cursor.current_page
    }

    pub fn page_size(&self) -> usize {
        self.cursor.page_size
    }

    /// Records passing search and filters, in input order.
    pub fn filtered_items(&self) -> Vec<&Record> {
        self.resolve(&self.filtered)
    }

    pub fn sorted_items(&self) -> Vec<&Record> {
        self.resolve(&self.sorted)
    }

    pub fn page_items(&self) -> Vec<&Record> {
        let (start, end) = self.cursor.get_current_page_range();
        self.resolve(&self.sorted[start..end])
    }

    /// Zero-based bounds of the current page within [`Self::sorted_items`].
    pub fn page_range(&self) -> (usize, usize) {
        self.cursor.get_current_page_range()
    }

    pub fn total_items(&self) -> usize {
        self.cursor.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.cursor.total_pages()
    }

    pub fn has_next_page(&self) -> bool {
        self.cursor.can_go_next()
    }

    pub fn has_prev_page(&self) -> bool {
        self.cursor.can_go_prev()
    }

    pub fn page_window(&self, max_visible: usize) -> Vec<usize> {
        generate_page_window(self.cursor.current_page, self.cursor.total_pages(), max_visible)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.recompute(true);
        }
    }

    pub fn set_filters(&mut self, filters: FilterMap) {
        if filters != self.filters {
            self.filters = filters;
            self.recompute(true);
        }
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        if self.filters.get(&field) != Some(&value) {
            self.filters.insert(field, value);
            self.recompute(true);
        }
    }

    pub fn remove_filter(&mut self, field: &str) {
        if self.filters.remove(field).is_some() {
            self.recompute(true);
        }
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.recompute(true);
        }
    }

    pub fn set_sort_key(&mut self, key: Option<&str>) {
        if key != self.sort_key.as_deref() {
            self.sort_key = key.map(String::from);
            self.recompute(true);
        }
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        if direction != self.sort_direction {
            self.sort_direction = direction;
            self.recompute(true);
        }
    }

    /// Column-header behaviour: the active key flips direction, a new key
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = Some(key.to_string());
            self.sort_direction = SortDirection::Ascending;
        }
        self.recompute(true);
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PageError> {
        if page_size == 0 {
            return Err(PageError::InvalidConfig(
                "Page size must be at least 1".to_string(),
            ));
        }
        // the page is kept and only clamped, like a dataset change
        if page_size != self.cursor.page_size {
            self.cursor.page_size = page_size;
            self.recompute(false);
        }
        Ok(())
    }

    /// Replace the dataset. The current page is kept where possible.
    pub fn set_items(&mut self, items: Vec<Record>) {
        self.items = items;
        self.recompute(false);
    }

    /// Back to the search, filters and sort the session was created with.
    pub fn reset(&mut self) {
        self.search_term = self.config.initial_search_term.clone();
        self.filters = self.config.initial_filters.clone();
        self.sort_key = self.config.initial_sort_key.clone();
        self.sort_direction = self.config.initial_sort_direction;
        self.recompute(true);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.cursor.go_to_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.cursor.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.cursor.prev_page()
    }

    pub fn go_to_first_page(&mut self) -> bool {
        self.cursor.go_to_first_page()
    }

    pub fn go_to_last_page(&mut self) -> bool {
        self.cursor.go_to_last_page()
    }
}
