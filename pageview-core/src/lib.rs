pub mod error;
pub mod filter;
pub mod pagination;
pub mod record;
pub mod session;
pub mod sort;
pub mod summary;

pub use error::PageError;
pub use filter::{FilterMap, is_active_filter, matches_filter, matches_filters, matches_search, search};
pub use pagination::{
    DEFAULT_MAX_VISIBLE, PageCursor, clamp_page, generate_page_window, page_bounds, total_pages,
};
pub use record::{Record, Value, records_from_json_str};
pub use session::{DEFAULT_PAGE_SIZE, PageSession, SessionConfig};
pub use sort::{SortDirection, compare_values, locale_compare, sort};
pub use summary::{PageSummary, format_showing, summarize};
