use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PaginationError;

pub const DEFAULT_MAXIMUM_PAGES_TO_DISPLAY: usize = 5;

/// Constructor input for [`Pagination`]. Only `take` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    pub take: i64,
    pub offset: Option<i64>,
    pub total_items_count: Option<i64>,
    pub has_more: Option<bool>,
    pub maximum_pages_to_display: Option<usize>,
}

impl PaginationOptions {
    pub fn new(take: i64) -> Self {
        Self {
            take,
            offset: None,
            total_items_count: None,
            has_more: None,
            maximum_pages_to_display: None,
        }
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn total_items_count(mut self, total_items_count: i64) -> Self {
        self.total_items_count = Some(total_items_count);
        self
    }

    pub fn has_more(mut self, has_more: bool) -> Self {
        self.has_more = Some(has_more);
        self
    }

    pub fn maximum_pages_to_display(mut self, maximum_pages_to_display: usize) -> Self {
        self.maximum_pages_to_display = Some(maximum_pages_to_display);
        self
    }
}

/// Everything a pager control needs, computed in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSnapshot {
    pub pages: Vec<u64>,
    pub current_page_number: u64,
    pub maximum_pages_to_display: usize,
    pub total_quantity_of_pages: u64,
    pub has_more: bool,
    pub take: i64,
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items_count: Option<i64>,
}

/// Pagination state over a collection of items.
///
/// `take` is the page size and `offset` the zero-based index of the first item
/// of the current window. The current page and the page count are derived on
/// every call, never stored.
///
/// Navigation comes in two families: `go_to_*` steps move `offset` in place
/// without re-checking the total, while [`next_page`](Self::next_page),
/// [`previous_page`](Self::previous_page) and [`page`](Self::page) return a new
/// value that goes through the same normalization as construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    take: i64,
    offset: i64,
    total_items_count: Option<i64>,
    has_more: bool,
    maximum_pages_to_display: usize,
}

impl Pagination {
    /// Builds a pagination state.
    ///
    /// Fails only when `take` is not positive. A total that does not leave any
    /// item at or after `offset` is dropped and treated as unknown.
    pub fn new(options: PaginationOptions) -> Result<Self, PaginationError> {
        if options.take <= 0 {
            return Err(PaginationError::InvalidTake(options.take));
        }

        let maximum_pages_to_display = options
            .maximum_pages_to_display
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAXIMUM_PAGES_TO_DISPLAY);

        Ok(Self::from_parts(
            options.take,
            options.offset.unwrap_or(0),
            options.total_items_count,
            options.has_more.unwrap_or(false),
            maximum_pages_to_display,
        ))
    }

    pub fn from_take(take: i64) -> Result<Self, PaginationError> {
        Self::new(PaginationOptions::new(take))
    }

    // `take` is positive here.
    fn from_parts(
        take: i64,
        offset: i64,
        total_items_count: Option<i64>,
        has_more: bool,
        maximum_pages_to_display: usize,
    ) -> Self {
        let mut pagination = Self {
            take,
            offset,
            total_items_count,
            has_more,
            maximum_pages_to_display,
        };
        pagination.validate_total_items_count();
        pagination.validate_has_more();
        pagination
    }

    fn with_offset(&self, offset: i64) -> Self {
        Self::from_parts(
            self.take,
            offset,
            self.total_items_count,
            self.has_more,
            self.maximum_pages_to_display,
        )
    }

    fn validate_total_items_count(&mut self) {
        if let Some(total) = self.total_items_count {
            if total <= 0 || total.saturating_sub(self.offset) <= 0 {
                tracing::debug!(
                    total,
                    offset = self.offset,
                    "total items count leaves nothing past offset, treating it as unknown"
                );
                self.total_items_count = None;
            }
        }
    }

    fn validate_has_more(&mut self) {
        let Some(total) = self.total_items_count else {
            return;
        };
        if self.offset >= total {
            self.has_more = false;
        } else if total > self.offset.saturating_add(self.take) {
            self.has_more = true;
        }
        // On the exact last page `has_more` keeps whatever the caller passed.
    }

    pub fn take(&self) -> i64 {
        self.take
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn total_items_count(&self) -> Option<i64> {
        self.total_items_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn maximum_pages_to_display(&self) -> usize {
        self.maximum_pages_to_display
    }

    /// 1-based page holding `offset`. Negative offsets yield 0.
    pub fn current_page_number(&self) -> u64 {
        let page = self.offset.div_euclid(self.take).saturating_add(1);
        u64::try_from(page).unwrap_or(0)
    }

    /// Page count from the known total, or a lower bound inferred from
    /// `offset` and `has_more` when the total is unknown.
    pub fn total_quantity_of_pages(&self) -> u64 {
        if let Some(total) = self.total_items_count {
            let pages = total / self.take + i64::from(total % self.take != 0);
            return pages.unsigned_abs();
        }

        let behind = self.offset.div_euclid(self.take);
        match (behind > 0, self.has_more) {
            (true, true) => behind.unsigned_abs().saturating_add(2),
            (true, false) => behind.unsigned_abs().saturating_add(1),
            (false, true) => 2,
            (false, false) => 1,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page_number() <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page_number() >= self.total_quantity_of_pages()
    }

    /// Window of page numbers around the current page, in ascending order.
    ///
    /// At each distance from the current page the following page is tried
    /// before the preceding one, until `maximum_pages_to_display` entries are
    /// collected.
    pub fn pages(&self) -> Vec<u64> {
        let current = self.current_page_number();
        let total_pages = self.total_quantity_of_pages();
        let limit = self.maximum_pages_to_display;

        let mut pages = VecDeque::new();
        pages.push_back(current);

        for distance in 1..=limit as u64 {
            let forward_done = current.saturating_add(distance) > total_pages;
            if pages.len() >= limit || (forward_done && current <= distance) {
                break;
            }
            if let Some(after) = current
                .checked_add(distance)
                .filter(|page| *page <= total_pages)
            {
                pages.push_back(after);
            }
            if pages.len() < limit {
                if let Some(behind) = current.checked_sub(distance).filter(|page| *page > 0) {
                    pages.push_front(behind);
                }
            }
        }

        Vec::from(pages)
    }

    pub fn get_all(&self) -> PaginationSnapshot {
        PaginationSnapshot {
            pages: self.pages(),
            current_page_number: self.current_page_number(),
            maximum_pages_to_display: self.maximum_pages_to_display,
            total_quantity_of_pages: self.total_quantity_of_pages(),
            has_more: self.has_more,
            take: self.take,
            offset: self.offset,
            total_items_count: self.total_items_count,
        }
    }

    /// Moves `offset` forward by one page in place. The total and `has_more`
    /// are left as they are.
    pub fn go_to_next_page(&mut self) {
        self.offset = self.offset.saturating_add(self.take);
    }

    /// Moves `offset` back by one page in place. The total and `has_more`
    /// are left as they are.
    pub fn go_to_previous_page(&mut self) {
        self.offset = self.offset.saturating_sub(self.take);
    }

    pub fn next_page(&self) -> Self {
        self.with_offset(self.offset.saturating_add(self.take))
    }

    pub fn previous_page(&self) -> Self {
        self.with_offset(self.offset.saturating_sub(self.take))
    }

    /// Returns the state for `page_number`.
    ///
    /// Targets outside `1..=total_quantity_of_pages()` and the current page
    /// itself produce a re-validated copy of `self`.
    ///
    /// Jumping backward computes `distance * take - offset`, which only lands
    /// on the expected `offset - distance * take` when the two are equal
    /// (jumping to page 1 from an offset aligned to `take`).
    pub fn page(&self, page_number: u64) -> Self {
        let current = self.current_page_number();

        if page_number < 1 || page_number > self.total_quantity_of_pages() || page_number == current
        {
            tracing::debug!(page_number, current, "page jump stays on the current state");
            return self.with_offset(self.offset);
        }

        let distance = i64::try_from(page_number.abs_diff(current))
            .unwrap_or(i64::MAX)
            .saturating_mul(self.take);

        let offset = if page_number > current {
            distance.saturating_add(self.offset)
        } else {
            distance.saturating_sub(self.offset)
        };

        self.with_offset(offset)
    }
}

impl TryFrom<PaginationOptions> for Pagination {
    type Error = PaginationError;

    fn try_from(options: PaginationOptions) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {} of {}",
            self.current_page_number(),
            self.total_quantity_of_pages()
        )
    }
}
