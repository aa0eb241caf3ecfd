use impl_helper::ImplHelper;
use std::ops::Range;

/// Splits `total` rows into pages of `size` rows, `start` being the first row
/// of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ImplHelper)]
pub struct Paginator {
    #[helper(copy)]
    size: usize,

    #[helper(copy)]
    start: usize,

    #[helper(copy, upd)]
    total: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(usize::MAX, 0, 0)
    }
}

impl Paginator {
    pub fn new(size: usize, start: usize, total: usize) -> Self {
        let mut paginator = Self {
            size: size.max(1),
            start: 0,
            total,
        };
        paginator.follow(start);
        paginator
    }

    pub fn size_update(&mut self, size: usize) -> &mut Self {
        self.size = size.max(1);
        self.start = self.page_of(self.start) * self.size;
        self
    }

    pub fn page_of(&self, index: usize) -> usize {
        index / self.size
    }

    pub fn page_index(&self) -> usize {
        self.page_of(self.start)
    }

    pub fn pages_count(&self) -> usize {
        self.total.div_ceil(self.size)
    }

    /// First row of the page `index`.
    pub fn page_start(&self, index: usize) -> usize {
        index.saturating_mul(self.size)
    }

    /// Moves to the page containing `index`.
    pub fn follow(&mut self, index: usize) -> &mut Self {
        self.start = self.page_start(self.page_of(index));
        self
    }

    /// Rows of the current page.
    pub fn page_range(&self) -> Range<usize> {
        self.start.min(self.total)..self.start.saturating_add(self.size).min(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unlimited_page_holds_everything() {
        let paginator = Paginator::new(usize::MAX, 0, 42);

        assert_eq!(paginator.pages_count(), 1);
        assert_eq!(paginator.page_range(), 0..42);
    }

    #[test]
    fn follow_keeps_start_aligned() {
        let mut paginator = Paginator::new(5, 0, 12);
        assert_eq!(paginator.pages_count(), 3);

        paginator.follow(7);
        assert_eq!(paginator.start(), 5);
        assert_eq!(paginator.page_index(), 1);
        assert_eq!(paginator.page_range(), 5..10);

        paginator.follow(11);
        assert_eq!(paginator.start(), 10);
        assert_eq!(paginator.page_range(), 10..12);
    }

    #[test]
    fn resizing_realigns_start() {
        let mut paginator = Paginator::new(4, 8, 12);
        paginator.size_update(3);

        assert_eq!(paginator.start(), 6);
        assert_eq!(paginator.start() % paginator.size(), 0);
    }

    #[test]
    fn empty_has_no_pages() {
        let paginator = Paginator::new(3, 0, 0);

        assert_eq!(paginator.pages_count(), 0);
        assert_eq!(paginator.page_range(), 0..0);
    }
}
