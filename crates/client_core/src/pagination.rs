use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page: u32,
    limit: NonZeroU32,
    total_count: u64,
}

impl PaginationState {
    pub fn new(limit: NonZeroU32) -> Self {
        Self {
            page: 1,
            limit,
            total_count: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// `ceil(total_count / limit)`; zero means there is nothing to page through.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(self.limit.get()));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn clamp_page(&self, requested: i64) -> u32 {
        let upper = self.total_pages().max(1);
        // upper fits in i64 and the clamp keeps the result inside [1, upper]
        requested.clamp(1, i64::from(upper)) as u32
    }

    pub fn next_page(&self) -> Option<u32> {
        self.step(1)
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.step(-1)
    }

    pub fn has_next(&self) -> bool {
        self.next_page().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous_page().is_some()
    }

    pub fn settled(&self, page: u32, total_count: u64) -> Self {
        let mut next = Self {
            page: 1,
            limit: self.limit,
            total_count,
        };
        next.page = next.clamp_page(i64::from(page));
        next
    }

    fn step(&self, delta: i64) -> Option<u32> {
        if self.total_pages() == 0 {
            return None;
        }
        let target = self.clamp_page(i64::from(self.page) + delta);
        (target != self.page).then_some(target)
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
