//! Pagination and sort state for one dashboard
//!
//! Once a result has been applied the controller holds a page in
//! `1..=total_pages`, or the sentinel `0` while the result set is empty. A
//! page-size change is the one exception: it keeps the page index until the
//! user navigates again. Sort and page size survive filter changes; replacing
//! the filters sends the page back to 1.

use alumni_core::{Error, Result, SortField, SortSpec};
use serde::Serialize;
use tracing::debug;

/// Pagination and sort state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationController {
    page: u32,
    page_size: u32,
    page_size_options: Vec<u32>,
    sort: SortSpec,
    total_items: u64,
    index_pinned: bool,
}

impl PaginationController {
    /// Start on page 1 with the default sort
    #[must_use]
    pub fn new(page_size: u32, page_size_options: Vec<u32>) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            page_size_options,
            sort: SortSpec::default(),
            total_items: 0,
            index_pinned: false,
        }
    }

    /// Start with a specific sort
    #[must_use]
    pub const fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Current page (1-based, `0` while empty)
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page sizes offered to the user
    #[must_use]
    pub fn page_size_options(&self) -> &[u32] {
        &self.page_size_options
    }

    /// Active sort
    #[must_use]
    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Filtered item count of the last applied result
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages for the last applied result
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_items.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Rows skipped before the current page
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page.saturating_sub(1) as u64) * self.page_size as u64
    }

    /// Whether a previous page exists
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1 && self.total_pages() > 0
    }

    /// Whether a next page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Select a sort column: same field flips, a new field starts at its default
    pub fn set_sort(&mut self, field: SortField) -> SortSpec {
        self.sort = self.sort.toggle(field);
        debug!(field = %self.sort.field, direction = %self.sort.direction, "Sort changed");
        self.sort
    }

    /// Jump to `page`
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageOutOfRange`] and leaves the state untouched unless
    /// `1 <= page <= total_pages`, or `page == 0` with no pages at all.
    pub fn set_page(&mut self, page: u32) -> Result<u32> {
        let total_pages = self.total_pages();
        let valid = if total_pages == 0 {
            page == 0
        } else {
            (1..=total_pages).contains(&page)
        };

        if !valid {
            return Err(Error::PageOutOfRange {
                requested: page,
                total_pages,
            });
        }
        self.page = page;
        self.index_pinned = false;
        Ok(page)
    }

    /// Advance one page if possible
    pub fn next_page(&mut self) -> bool {
        self.has_next() && self.set_page(self.page + 1).is_ok()
    }

    /// Go back one page if possible
    pub fn prev_page(&mut self) -> bool {
        self.has_prev() && self.set_page(self.page - 1).is_ok()
    }

    /// Change the page size, keeping the page index
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `size` is not one of the offered sizes.
    pub fn set_page_size(&mut self, size: u32) -> Result<()> {
        if !self.page_size_options.contains(&size) {
            return Err(Error::Validation {
                field: "page_size".to_string(),
                message: format!("{size} is not one of {:?}", self.page_size_options),
            });
        }
        self.page_size = size;
        self.index_pinned = true;
        Ok(())
    }

    /// Back to page 1, used when the owning filters are replaced
    pub fn reset_page(&mut self) {
        self.page = 1;
        self.index_pinned = false;
    }

    /// Bring the page back inside the last applied result
    ///
    /// No pages moves to the sentinel `0`. Otherwise the page is clamped into
    /// `1..=total_pages`, except that an index kept by a page-size change is
    /// left alone. Returns true when the page moved.
    pub fn clamp_to_total(&mut self) -> bool {
        let total_pages = self.total_pages();
        let clamped = if total_pages == 0 {
            0
        } else if self.index_pinned {
            self.page.max(1)
        } else {
            self.page.clamp(1, total_pages)
        };
        if clamped == self.page {
            return false;
        }
        debug!(from = self.page, to = clamped, total_pages, "Page clamped to result");
        self.page = clamped;
        true
    }

    /// Record the filtered size of the result that was just applied
    pub fn set_total_items(&mut self, total_items: u64) {
        self.total_items = total_items;
    }

    /// Positional number of the `index`-th row on the current page
    #[must_use]
    pub const fn row_number(&self, index: usize) -> u64 {
        self.offset() + index as u64 + 1
    }

    /// Snapshot for the pagination footer
    #[must_use]
    pub fn footer(&self) -> PaginationFooter {
        PaginationFooter {
            page: self.page,
            total_pages: self.total_pages(),
            page_size: self.page_size,
            page_size_options: self.page_size_options.clone(),
            total_items: self.total_items,
            has_prev: self.has_prev(),
            has_next: self.has_next(),
        }
    }
}

/// Pagination footer as rendered under a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationFooter {
    /// Current page
    pub page: u32,
    /// Total pages
    pub total_pages: u32,
    /// Rows per page
    pub page_size: u32,
    /// Sizes offered by the selector
    pub page_size_options: Vec<u32>,
    /// Filtered item count
    pub total_items: u64,
    /// Previous button enabled
    pub has_prev: bool,
    /// Next button enabled
    pub has_next: bool,
}

/// Free-text page number box
///
/// Typing only edits the text. Enter or blur commits it through
/// [`PageInput::commit`]; Escape reverts through [`PageInput::cancel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInput {
    text: String,
    last_valid: u32,
}

impl PageInput {
    /// Input showing `page`
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self {
            text: page.to_string(),
            last_valid: page,
        }
    }

    /// Text currently in the box
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text without committing
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Follow a page change made elsewhere (buttons, filter reset)
    pub fn sync(&mut self, page: u32) {
        self.last_valid = page;
        self.text = page.to_string();
    }

    /// Discard the edit
    pub fn cancel(&mut self) {
        self.text = self.last_valid.to_string();
    }

    /// Apply the typed page to `controller`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageInput`] for non-numeric text and
    /// [`Error::PageOutOfRange`] for pages the controller rejects; in both
    /// cases the text reverts to the last valid page.
    pub fn commit(&mut self, controller: &mut PaginationController) -> Result<u32> {
        let parsed = self.text.trim().parse::<u32>().map_err(|_| Error::InvalidPageInput {
            input: self.text.clone(),
        });

        match parsed.and_then(|page| controller.set_page(page)) {
            Ok(page) => {
                self.sync(page);
                Ok(page)
            }
            Err(err) => {
                debug!(input = %self.text, error = %err, "Rejected page input");
                self.cancel();
                Err(err)
            }
        }
    }
}
