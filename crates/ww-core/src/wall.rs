//! # Blessings Wall arithmetic
//!
//! Ordering, paging and column layout for the read side. Nothing here
//! performs I/O; both the server-rendered page and the client view-model
//! slice an already-fetched list with these helpers.

use crate::models::GuestMessage;

/// Cards shown per page.
pub const PAGE_SIZE: usize = 9;
/// Columns the cards of one page are dealt into.
pub const COLUMN_COUNT: usize = 3;

/// Sorts descending by timestamp (newest first).
///
/// The sort is stable, so records sharing a timestamp keep their store
/// order and sorting twice is a no-op.
pub fn sort_newest_first(messages: &mut [GuestMessage]) {
    messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Number of pages needed for `len` items: `ceil(len / page_size)`.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items on the 1-based `page`. Out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Deals items round-robin: item `i` lands in column `i % columns`.
///
/// Always returns exactly `columns` vectors (some possibly empty); their
/// lengths differ by at most one.
pub fn into_columns<T>(items: impl IntoIterator<Item = T>, columns: usize) -> Vec<Vec<T>> {
    let columns = columns.max(1);
    let mut out: Vec<Vec<T>> = (0..columns).map(|_| Vec::new()).collect();
    for (i, item) in items.into_iter().enumerate() {
        out[i % columns].push(item);
    }
    out
}

/// Page cursor over a list of known length.
///
/// Navigation outside `1..=total_pages` is ignored, mirroring a pager whose
/// previous/next buttons are disabled at the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total_items: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            current: 1,
            total_items,
            page_size,
        }
    }

    /// Builds a pager positioned at `page`, clamped into range.
    pub fn at(total_items: usize, page_size: usize, page: usize) -> Self {
        let mut pager = Self::new(total_items, page_size);
        let last = pager.total_pages().max(1);
        pager.current = page.clamp(1, last);
        pager
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.total_items, self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Moves to `page`. Returns false (and stays put) when out of range.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.go_to(self.current - 1)
    }

    /// 1-based `(first, last, total)` of the items on the current page,
    /// as in "Showing 10 - 18 of 20". All zeros for an empty list.
    pub fn showing(&self) -> (usize, usize, usize) {
        if self.total_items == 0 {
            return (0, 0, 0);
        }
        let first = (self.current - 1) * self.page_size + 1;
        let last = (self.current * self.page_size).min(self.total_items);
        (first, last, self.total_items)
    }

    /// Slice of `items` visible on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.current, self.page_size)
    }
}
