// Scroll state for TUI panels, and the page-level scroll lock
//
// ScrollState is owned by whatever scrolls (the event list, the overlay body,
// the log panel). PageScroll wraps the listing page's state with a lock
// count; while an overlay holds a ScrollLock the page underneath stays put.

use std::cell::Cell;
use std::rc::Rc;

/// Scroll position within content of known size
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Line/item index at top of viewport
    offset: usize,
    total: usize,
    viewport: usize,
    /// Keep the view pinned to the bottom as content grows
    pub auto_follow: bool,
}

impl ScrollState {
    /// Auto-following scroll (log panel)
    pub fn following() -> Self {
        Self {
            auto_follow: true,
            ..Self::default()
        }
    }

    /// Manual scroll starting at the top
    pub fn manual() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions; call each render frame
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    /// Scroll up one line; disables auto-follow
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down one line
    pub fn scroll_down(&mut self) {
        // Dimensions unknown until first render; render clamps
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.viewport.max(1));
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.viewport.max(1)).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Make sure `index` is inside the viewport
    pub fn reveal(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.viewport > 0 && index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page scroll lock
// ─────────────────────────────────────────────────────────────────────────────

/// Scroll state of the listing page, which an overlay can lock
///
/// Locks are counted, so guards may be dropped in any order.
#[derive(Debug)]
pub struct PageScroll {
    locks: Rc<Cell<usize>>,
    pub state: ScrollState,
}

impl Default for PageScroll {
    fn default() -> Self {
        Self {
            locks: Rc::new(Cell::new(0)),
            state: ScrollState::manual(),
        }
    }
}

impl PageScroll {
    pub fn is_enabled(&self) -> bool {
        self.locks.get() == 0
    }

    /// Disable page scrolling until the returned guard is dropped
    pub fn lock(&self) -> ScrollLock {
        self.locks.set(self.locks.get() + 1);
        ScrollLock {
            locks: Rc::clone(&self.locks),
        }
    }

    pub fn scroll_up(&mut self) {
        if self.is_enabled() {
            self.state.scroll_up();
        }
    }

    pub fn scroll_down(&mut self) {
        if self.is_enabled() {
            self.state.scroll_down();
        }
    }
}

/// Guard returned by [`PageScroll::lock`]
#[derive(Debug)]
pub struct ScrollLock {
    locks: Rc<Cell<usize>>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.locks.set(self.locks.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_restores_on_drop() {
        let page = PageScroll::default();
        assert!(page.is_enabled());

        let lock = page.lock();
        assert!(!page.is_enabled());
        drop(lock);
        assert!(page.is_enabled());
    }

    #[test]
    fn test_overlapping_locks() {
        let page = PageScroll::default();
        let first = page.lock();
        let second = page.lock();
        // Replacing an overlay locks for the new one before the old guard drops
        drop(first);
        assert!(!page.is_enabled());
        drop(second);
        assert!(page.is_enabled());
    }

    #[test]
    fn test_locked_page_does_not_scroll() {
        let mut page = PageScroll::default();
        page.state.update_dimensions(20, 5);

        let lock = page.lock();
        page.scroll_down();
        assert_eq!(page.state.offset(), 0);

        drop(lock);
        page.scroll_down();
        assert_eq!(page.state.offset(), 1);
    }

    #[test]
    fn test_scroll_state_bounds() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 4);
        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 6);

        scroll.scroll_to_top();
        scroll.reveal(8);
        assert_eq!(scroll.offset(), 5);
        scroll.reveal(2);
        assert_eq!(scroll.offset(), 2);
    }

    #[test]
    fn test_following_tracks_bottom() {
        let mut scroll = ScrollState::following();
        scroll.update_dimensions(10, 4);
        assert_eq!(scroll.offset(), 6);
        scroll.update_dimensions(12, 4);
        assert_eq!(scroll.offset(), 8);
        scroll.scroll_up();
        scroll.update_dimensions(14, 4);
        assert_eq!(scroll.offset(), 7);
    }
}
