//! Pagination state

/// Progress of one offset-paginated listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Offset of the page being requested
    pub offset: u32,
    /// Pages fetched so far
    pub pages: u32,
    /// Items streamed so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state starting at offset 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page of `count` items
    pub fn add_page(&mut self, count: usize) {
        self.pages += 1;
        self.total_fetched += count as u64;
    }

    /// Move to the next page's offset
    pub fn advance_to(&mut self, offset: u32) {
        self.offset = offset;
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
