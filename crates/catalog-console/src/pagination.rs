//! Page cursor for the admin product listing

use catalog_core::PageInfo;
use serde::Serialize;

/// Tracks the requested page and the server-reported page bounds
///
/// The current page moves as soon as the operator navigates; the server's
/// [`PageInfo`] is only replaced when a response for the latest request
/// arrives. If that request fails, [`PaginationController::rollback`]
/// returns the cursor to the page whose data is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationController {
    current_page: u32,
    settled_page: u32,
    info: PageInfo,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PaginationController {
    /// Start at `initial_page`, raised to 1 if zero
    pub fn new(initial_page: u32) -> Self {
        let page = initial_page.max(1);
        Self {
            current_page: page,
            settled_page: page,
            info: PageInfo::default(),
        }
    }

    /// Page the next fetch targets
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages reported by the server, never below 1
    pub fn total_pages(&self) -> u32 {
        self.info.total_pages.max(1)
    }

    /// Server-reported pagination of the last applied response
    pub const fn info(&self) -> PageInfo {
        self.info
    }

    /// Whether Previous is enabled
    pub const fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether Next is enabled
    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Advance one page, returning the new page when it changed
    pub fn next(&mut self) -> Option<u32> {
        self.go_to(self.current_page.saturating_add(1))
    }

    /// Go back one page, returning the new page when it changed
    pub fn previous(&mut self) -> Option<u32> {
        self.go_to(self.current_page.saturating_sub(1))
    }

    /// Jump to `page`, clamped into `1..=total_pages`
    ///
    /// Returns `None` when the clamped page equals the current one, so
    /// callers issue no fetch.
    pub fn go_to(&mut self, page: u32) -> Option<u32> {
        let target = page.clamp(1, self.total_pages());
        if target == self.current_page {
            return None;
        }
        self.current_page = target;
        Some(target)
    }

    /// Adopt the pagination of a fresh response
    pub fn apply(&mut self, info: PageInfo) {
        self.info = info;
        self.current_page = info.page.max(1);
        self.settled_page = self.current_page;
    }

    /// Return the cursor to the last applied page after a failed fetch
    pub const fn rollback(&mut self) {
        self.current_page = self.settled_page;
    }
}
