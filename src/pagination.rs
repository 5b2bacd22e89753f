//! Pagination window over the filtered and sorted rows.
//!
//! Requested pages outside `[1, total_pages]` are clamped, never rejected.
//! There is always at least one page, even when no rows remain.

use serde::{Deserialize, Serialize};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Requested page size and page number (both 1-based and positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_size: usize,
    pub current_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl PaginationState {
    /// First page with the given size. A zero size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        PaginationState {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }
}

/// Number of pages needed for `total_rows` rows. Never less than one.
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// One visible page of rows plus the metadata a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, R> {
    pub rows: Vec<&'a R>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub page_size: usize,
}

impl<'a, R> Page<'a, R> {
    /// The whole sequence as a single page, for tables without pagination.
    pub fn unpaginated(rows: &[&'a R]) -> Self {
        Page {
            rows: rows.to_vec(),
            current_page: 1,
            total_pages: 1,
            total_rows: rows.len(),
            page_size: rows.len().max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 1-based position of the first visible row, 0 when the page is empty.
    pub fn start_index(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last visible row, 0 when the page is empty.
    pub fn end_index(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.start_index() + self.rows.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Slice `rows` into the requested page.
///
/// # Examples
///
/// ```
/// use datatable::{paginate, PaginationState};
///
/// let values: Vec<u32> = (1..=25).collect();
/// let rows: Vec<&u32> = values.iter().collect();
///
/// let page = paginate(&rows, &PaginationState::new(10).with_page(4));
/// assert_eq!(page.total_pages, 3);
/// assert_eq!(page.current_page, 3);
/// assert_eq!(page.rows, vec![&21, &22, &23, &24, &25]);
/// ```
pub fn paginate<'a, R>(rows: &[&'a R], state: &PaginationState) -> Page<'a, R> {
    let page_size = state.page_size.max(1);
    let total_rows = rows.len();
    let total_pages = total_pages(total_rows, page_size);
    let current_page = state.current_page.clamp(1, total_pages);

    let start = ((current_page - 1) * page_size).min(total_rows);
    let end = (current_page * page_size).min(total_rows);

    if current_page != state.current_page {
        log::debug!(
            "requested page {} clamped to {} of {}",
            state.current_page,
            current_page,
            total_pages
        );
    }

    Page {
        rows: rows[start..end].to_vec(),
        current_page,
        total_pages,
        total_rows,
        page_size,
    }
}
