//! An ordered, duplicate-free set of lexemes tuned for nearly-sorted input.
//!
//! Segmenters finish their matches at different cursor positions, so the
//! lexemes they submit arrive roughly, but not strictly, in stream order. The
//! [`LexemeSet`] keeps them in a doubly linked list ordered by [`Ord`]:
//!
//! - a lexeme after the current tail is appended in O(1)
//! - a lexeme before the current head is prepended in O(1)
//! - anything else is placed by scanning backward from the tail, which is
//!   short for the usual late-but-close arrivals
//!
//! Elements comparing equal to one already present are dropped.
//!
//! The list lives in an arena of slots addressed by index, with the `prev` and
//! `next` links stored as optional indices. Freed slots are recycled.
//!
//! # Examples
//!
//! ```no_run
//! use lexis_core::{Lexeme, LexemeKind, LexemeSet};
//!
//! let mut set = LexemeSet::new();
//! set.insert(Lexeme::new(5, 1, LexemeKind::Word));
//! set.insert(Lexeme::new(2, 1, LexemeKind::Word));
//! set.insert(Lexeme::new(5, 1, LexemeKind::Letter)); // same entry as the first
//!
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.take_first().map(|l| l.begin), Some(2));
//! assert_eq!(set.take_last().map(|l| l.begin), Some(5));
//! assert!(set.take_first().is_none());
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::trace;

use crate::lexeme::Lexeme;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Sorted linked set; see the [module documentation](self).
pub struct LexemeSet<T = Lexeme> {
    slots: Vec<Option<Node<T>>>,
    /// Vacant slot indices available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T: Ord> LexemeSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty set with room for `capacity` elements before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of distinct elements held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` at its ordered position.
    ///
    /// Returns `false` and leaves the set untouched when an equal element is
    /// already present.
    ///
    /// # Panics
    ///
    /// Panics if the backward scan runs past the head, which can only happen
    /// when `T`'s ordering is not a total order.
    pub fn insert(&mut self, value: T) -> bool {
        let (head, tail) = match (self.head, self.tail) {
            (Some(head), Some(tail)) => (head, tail),
            _ => {
                let idx = self.alloc(value, None, None);
                self.head = Some(idx);
                self.tail = Some(idx);
                self.len = 1;
                return true;
            }
        };

        match value.cmp(&self.node(tail).value) {
            Ordering::Equal => return false,
            Ordering::Greater => {
                let idx = self.alloc(value, Some(tail), None);
                self.node_mut(tail).next = Some(idx);
                self.tail = Some(idx);
                self.len += 1;
                return true;
            }
            Ordering::Less => {}
        }

        if value < self.node(head).value {
            let idx = self.alloc(value, None, Some(head));
            self.node_mut(head).prev = Some(idx);
            self.head = Some(idx);
            self.len += 1;
            return true;
        }

        // Head <= value < tail: walk back to the largest node not greater than value.
        let mut at = tail;
        loop {
            let node = self.node(at);
            match node.value.cmp(&value) {
                Ordering::Greater => match node.prev {
                    Some(prev) => at = prev,
                    None => panic!("backward scan passed the head of the lexeme set: ordering is not total"),
                },
                Ordering::Equal => return false,
                Ordering::Less => break,
            }
        }

        let next = match self.node(at).next {
            Some(next) => next,
            None => panic!("interior insert found no successor after slot {at}"),
        };
        let idx = self.alloc(value, Some(at), Some(next));
        self.node_mut(at).next = Some(idx);
        self.node_mut(next).prev = Some(idx);
        self.len += 1;
        trace!("interior insert after slot {at}, set now holds {}", self.len);
        true
    }

    /// Detach and return the smallest element, or `None` when empty.
    pub fn take_first(&mut self) -> Option<T> {
        let idx = self.head?;
        let node = self.release(idx);
        self.head = node.next;
        match node.next {
            Some(next) => self.node_mut(next).prev = None,
            None => self.tail = None,
        }
        self.len -= 1;
        self.compact_if_empty();
        Some(node.value)
    }

    /// Detach and return the largest element, or `None` when empty.
    pub fn take_last(&mut self) -> Option<T> {
        let idx = self.tail?;
        let node = self.release(idx);
        self.tail = node.prev;
        match node.prev {
            Some(prev) => self.node_mut(prev).next = None,
            None => self.head = None,
        }
        self.len -= 1;
        self.compact_if_empty();
        Some(node.value)
    }

    /// Borrow the smallest element.
    pub fn first(&self) -> Option<&T> {
        self.head.map(|idx| &self.node(idx).value)
    }

    /// Borrow the largest element.
    pub fn last(&self) -> Option<&T> {
        self.tail.map(|idx| &self.node(idx).value)
    }

    /// Iterate from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            set: self,
            front: self.head,
            remaining: self.len,
        }
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn alloc(&mut self, value: T, prev: Option<usize>, next: Option<usize>) -> usize {
        let node = Node { value, prev, next };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) -> Node<T> {
        match self.slots[idx].take() {
            Some(node) => {
                self.free.push(idx);
                node
            }
            None => panic!("lexeme set link points at vacant slot {idx}"),
        }
    }

    fn compact_if_empty(&mut self) {
        if self.len == 0 {
            self.slots.clear();
            self.free.clear();
        }
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match &self.slots[idx] {
            Some(node) => node,
            None => panic!("lexeme set link points at vacant slot {idx}"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.slots[idx] {
            Some(node) => node,
            None => panic!("lexeme set link points at vacant slot {idx}"),
        }
    }
}

impl<T: Ord> Default for LexemeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for LexemeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> Extend<T> for LexemeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for LexemeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Borrowing iterator over a [`LexemeSet`], head to tail.
pub struct Iter<'a, T> {
    set: &'a LexemeSet<T>,
    front: Option<usize>,
    remaining: usize,
}

impl<'a, T: Ord> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.front?;
        let node = self.set.node(idx);
        self.front = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: Ord> IntoIterator for &'a LexemeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexeme::LexemeKind;
    use pretty_assertions::assert_eq;

    fn word(begin: usize) -> Lexeme {
        Lexeme::new(begin, 1, LexemeKind::Word)
    }

    fn begins<T: Ord>(set: &LexemeSet<T>, key: impl Fn(&T) -> usize) -> Vec<usize> {
        set.iter().map(key).collect()
    }

    /// Walk the links in both directions and check them against `len`.
    fn assert_links<T: Ord>(set: &LexemeSet<T>) {
        let mut forward = 0;
        let mut prev = None;
        let mut at = set.head;
        while let Some(idx) = at {
            let node = set.node(idx);
            assert_eq!(node.prev, prev, "prev link of slot {idx}");
            if let Some(p) = prev {
                assert!(set.node(p).value < node.value, "slot {idx} out of order");
            }
            prev = Some(idx);
            at = node.next;
            forward += 1;
        }
        assert_eq!(prev, set.tail);
        assert_eq!(forward, set.len());
    }

    #[test]
    fn test_merge_collapses_duplicates() {
        let mut set = LexemeSet::new();
        for begin in [5, 2, 8, 2, 5] {
            set.insert(word(begin));
        }

        assert_eq!(set.len(), 3);
        assert_links(&set);

        let mut drained = Vec::new();
        while let Some(lexeme) = set.take_first() {
            drained.push(lexeme.begin);
        }
        assert_eq!(drained, vec![2, 5, 8]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_takes() {
        let mut set: LexemeSet = LexemeSet::new();
        assert!(set.take_first().is_none());
        assert!(set.take_last().is_none());
        assert_eq!(set.len(), 0);
        assert!(set.first().is_none());
        assert!(set.last().is_none());
    }

    #[test]
    fn test_ascending_inserts_only_append() {
        let mut set = LexemeSet::new();
        for begin in 0..10 {
            assert!(set.insert(word(begin)));
            assert_eq!(set.last().map(|l| l.begin), Some(begin));
            assert_eq!(set.first().map(|l| l.begin), Some(0));
        }
        assert_links(&set);
    }

    #[test]
    fn test_descending_inserts_only_prepend() {
        let mut set = LexemeSet::new();
        for begin in (0..10).rev() {
            assert!(set.insert(word(begin)));
            assert_eq!(set.first().map(|l| l.begin), Some(begin));
            assert_eq!(set.last().map(|l| l.begin), Some(9));
        }
        assert_links(&set);
    }

    #[test]
    fn test_interior_insert_and_duplicate() {
        let mut set: LexemeSet = [0, 10, 20, 30].into_iter().map(word).collect();

        assert!(set.insert(word(25)));
        assert!(set.insert(word(5)));
        assert!(!set.insert(word(10)));
        assert!(!set.insert(word(0)));
        assert!(!set.insert(word(30)));

        assert_eq!(begins(&set, |l| l.begin), vec![0, 5, 10, 20, 25, 30]);
        assert_links(&set);
    }

    #[test]
    fn test_longer_lexeme_sorts_first_at_same_begin() {
        let mut set = LexemeSet::new();
        set.insert(Lexeme::new(3, 1, LexemeKind::Word));
        set.insert(Lexeme::new(0, 2, LexemeKind::Word));
        set.insert(Lexeme::new(3, 4, LexemeKind::Word));
        set.insert(Lexeme::new(3, 2, LexemeKind::Word));

        let spans: Vec<_> = set.iter().map(|l| (l.begin, l.length)).collect();
        assert_eq!(spans, vec![(0, 2), (3, 4), (3, 2), (3, 1)]);
    }

    #[test]
    fn test_take_last_drains_descending() {
        let mut set: LexemeSet = [7, 1, 4, 9, 3].into_iter().map(word).collect();
        let mut drained = Vec::new();
        while let Some(lexeme) = set.take_last() {
            drained.push(lexeme.begin);
            assert_links(&set);
        }
        assert_eq!(drained, vec![9, 7, 4, 3, 1]);
    }

    #[test]
    fn test_mixed_takes_keep_links_consistent() {
        let mut set: LexemeSet<u32> = [4, 8, 1, 6, 3].into_iter().collect();
        assert_eq!(set.take_first(), Some(1));
        assert_eq!(set.take_last(), Some(8));
        assert_links(&set);

        // Freed slots are reused.
        set.insert(5);
        set.insert(2);
        assert_links(&set);
        assert_eq!(set.slots.len(), 5);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_single_element_take_clears_both_ends() {
        let mut set = LexemeSet::new();
        set.insert(word(1));
        assert_eq!(set.take_last().map(|l| l.begin), Some(1));
        assert!(set.head.is_none());
        assert!(set.tail.is_none());

        set.insert(word(2));
        assert_eq!(set.take_first().map(|l| l.begin), Some(2));
        assert!(set.head.is_none());
        assert!(set.tail.is_none());
    }

    #[test]
    fn test_clear() {
        let mut set: LexemeSet<u8> = (0..5).collect();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
        assert!(set.insert(3));
        assert_eq!(set.len(), 1);
    }

    /// An ordering that claims everything is greater than everything else.
    #[derive(Debug)]
    struct Broken(u8);

    impl PartialEq for Broken {
        fn eq(&self, _: &Self) -> bool {
            false
        }
    }
    impl Eq for Broken {}
    impl PartialOrd for Broken {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Broken {
        fn cmp(&self, other: &Self) -> Ordering {
            // Consistent enough to build a two-element list, then lies.
            match (self.0, other.0) {
                (0, 1) | (2, 1) => Ordering::Less,
                _ => Ordering::Greater,
            }
        }
    }

    #[test]
    #[should_panic(expected = "backward scan passed the head")]
    fn test_inconsistent_order_panics() {
        let mut set = LexemeSet::new();
        set.insert(Broken(0));
        set.insert(Broken(1));
        // Less than the tail, not less than the head, greater than every node.
        set.insert(Broken(2));
    }
}
