//! Pure pagination arithmetic shared by every paginated view.

use std::ops::RangeInclusive;

/// Display-ready pagination fields derived from a total count, a page size,
/// and a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Offset of the first item on the page.
    pub offset: u64,
    pub limit: u64,
    /// Number of pages shown to the user; never zero, even for an empty
    /// collection.
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageWindow {
    /// Compute the window for `page` (1-based).
    ///
    /// Pages outside `[1, total_pages]` are clamped, so even a direct caller
    /// bypassing the controller never obtains an out-of-range offset.
    pub fn compute(total: u64, limit: u64, page: u64) -> Self {
        debug_assert!(limit > 0, "page size must be positive");
        let limit = limit.max(1);

        let total_pages = total.div_ceil(limit);
        // An empty collection still renders as a single page.
        let display_pages = total_pages.max(1);
        let page = page.clamp(1, display_pages);

        Self {
            offset: (page - 1) * limit,
            limit,
            total_pages: display_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }

    /// Contiguous page numbers for direct-jump controls.
    pub fn page_numbers(&self) -> RangeInclusive<u64> {
        1..=self.total_pages
    }

    pub fn contains_page(&self, page: u64) -> bool {
        page >= 1 && page <= self.total_pages
    }
}
