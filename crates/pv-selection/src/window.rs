/// Items revealed at first and added by every "load more".
pub const DEFAULT_PAGE_SIZE: usize = 18;

/// Progressive reveal counter for one catalog view.
///
/// `visible_count` only ever grows. It is clamped against the view it is
/// applied to, so a window larger than a short view simply shows all of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    visible_count: usize,
    page_size: usize,
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationWindow {
    /// A zero page size would never reveal anything; it is bumped to one.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            visible_count: page_size,
            page_size,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The first `visible_count` entries of `view`.
    pub fn reveal<'a, T>(&self, view: &'a [T]) -> &'a [T] {
        &view[..self.revealed_len(view.len())]
    }

    pub fn revealed_len(&self, view_len: usize) -> usize {
        self.visible_count.min(view_len)
    }

    pub fn has_more(&self, view_len: usize) -> bool {
        self.visible_count < view_len
    }

    /// Grow by one page, clamped to `view_len`. Returns how many items became
    /// newly visible.
    pub fn load_more(&mut self, view_len: usize) -> usize {
        let before = self.revealed_len(view_len);
        let grown = self.visible_count.saturating_add(self.page_size).min(view_len);
        self.visible_count = self.visible_count.max(grown);
        self.revealed_len(view_len) - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_first_page_only() {
        let view: Vec<u32> = (0..40).collect();
        let window = PaginationWindow::default();
        assert_eq!(window.reveal(&view), &view[..18]);
        assert!(window.has_more(view.len()));
    }

    #[test]
    fn short_view_is_fully_revealed() {
        let view = [1, 2, 3];
        let window = PaginationWindow::default();
        assert_eq!(window.reveal(&view), &view);
        assert!(!window.has_more(view.len()));
    }

    #[test]
    fn load_more_grows_by_page_and_clamps() {
        let mut window = PaginationWindow::default();
        assert_eq!(window.load_more(40), 18);
        assert_eq!(window.visible_count(), 36);
        assert_eq!(window.load_more(40), 4);
        assert_eq!(window.visible_count(), 40);
        assert_eq!(window.load_more(40), 0);
        assert_eq!(window.visible_count(), 40);
    }

    #[test]
    fn load_more_never_shrinks_on_a_shorter_view() {
        let mut window = PaginationWindow::default();
        window.load_more(40);
        let before = window.visible_count();

        assert_eq!(window.load_more(12), 0);
        assert_eq!(window.visible_count(), before);
        assert_eq!(window.revealed_len(12), 12);
    }

    #[test]
    fn zero_page_size_is_bumped() {
        let mut window = PaginationWindow::new(0);
        assert_eq!(window.page_size(), 1);
        assert_eq!(window.load_more(5), 1);
    }
}
