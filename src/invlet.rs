use impl_helper::ImplHelper;
use std::collections::HashSet;

/// Hands out shortcut keys from `[min, max]` that nobody else uses.
///
/// One allocator is shared by every column of a reassignment pass, so keys
/// never repeat across columns.
#[derive(Debug, Clone, ImplHelper)]
pub struct InvletAllocator {
    next: Option<char>,

    #[helper(copy)]
    min: char,

    #[helper(copy)]
    max: char,

    bound: HashSet<char>,
}

impl InvletAllocator {
    pub fn new<I>(min: char, max: char, bound: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut allocator = Self {
            next: Some(min),
            min,
            max,
            bound: bound.into_iter().collect(),
        };
        allocator.skip_unavailable();
        allocator
    }

    /// The key the next call to [`Self::allocate`] returns.
    pub fn peek(&self) -> Option<char> {
        self.next
    }

    pub fn allocate(&mut self) -> Option<char> {
        let invlet = self.next?;
        self.next = successor(invlet);
        self.skip_unavailable();
        Some(invlet)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    fn skip_unavailable(&mut self) {
        while let Some(invlet) = self.next {
            if invlet > self.max {
                self.next = None;
            } else if self.bound.contains(&invlet) {
                self.next = successor(invlet);
            } else {
                break;
            }
        }
    }
}

fn successor(invlet: char) -> Option<char> {
    (u32::from(invlet) + 1..=u32::from(char::MAX)).find_map(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn allocates_in_order_skipping_bound() {
        let mut allocator = InvletAllocator::new('0', '4', ['0', '2']);

        assert_eq!(allocator.allocate(), Some('1'));
        assert_eq!(allocator.allocate(), Some('3'));
        assert_eq!(allocator.peek(), Some('4'));
        assert_eq!(allocator.allocate(), Some('4'));
        assert_eq!(allocator.allocate(), None);
        assert!(allocator.is_exhausted());
    }

    #[test]
    fn fully_bound_range_is_exhausted() {
        let allocator = InvletAllocator::new('a', 'b', ['a', 'b']);

        assert!(allocator.is_exhausted());
        assert_eq!(allocator.min(), 'a');
        assert_eq!(allocator.max(), 'b');
    }
}
