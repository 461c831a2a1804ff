//! A circular doubly-linked list whose links live in an index addressed slab
//!
//! Lists are threaded through slots of a [`LinkedSlab`] instead of through pointers embedded in the listed records.
//! A list is identified by its *head*, a sentinel slot that carries no item.
//! An empty list is a head whose `next` and `prev` both point back to itself.
//! All list operations are O(1) and never allocate; only creating new slots does.

use alloc::collections::TryReserveError;
use alloc::vec::Vec;

/// The index of a slot (either a list head or a list entry) inside a [`LinkedSlab`]
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
pub struct Link(usize);

#[derive(Debug, Clone)]
struct Slot<T> {
    prev: Link,
    next: Link,
    item: Option<T>,
}

/// Backing storage for any number of circular lists.
///
/// The slab owns the listed items but imposes no ownership between them; it only records adjacency.
///
/// # Panics
/// Every method taking a [`Link`] panics if that link was not handed out by the same slab.
#[derive(Debug, Clone)]
pub struct LinkedSlab<T> {
    slots: Vec<Slot<T>>,
}

impl<T> LinkedSlab<T> {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create a slab that already holds the head of one empty list
    pub fn with_head() -> (Self, Link) {
        let head = Link(0);
        let slab = Self {
            slots: alloc::vec![Slot {
                prev: head,
                next: head,
                item: None,
            }],
        };
        (slab, head)
    }

    /// Drop all slots and with them every list that was built inside this slab
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// How many slots (heads and entries) are allocated
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_slab_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn alloc(&mut self, item: Option<T>) -> Result<Link, TryReserveError> {
        self.slots.try_reserve(1)?;
        let link = Link(self.slots.len());
        self.slots.push(Slot {
            prev: link,
            next: link,
            item,
        });
        Ok(link)
    }

    /// Create the head of a new, empty list
    pub fn new_head(&mut self) -> Result<Link, TryReserveError> {
        self.alloc(None)
    }

    /// Create a new entry carrying `item` that is not yet part of any list
    pub fn new_entry(&mut self, item: T) -> Result<Link, TryReserveError> {
        self.alloc(Some(item))
    }

    fn link_between(&mut self, prev: Link, entry: Link, next: Link) {
        self.slots[entry.0].prev = prev;
        self.slots[entry.0].next = next;
        self.slots[prev.0].next = entry;
        self.slots[next.0].prev = entry;
    }

    /// Insert `entry` at the tail of the list identified by `head`
    pub fn push_back(&mut self, head: Link, entry: Link) {
        let tail = self.slots[head.0].prev;
        self.link_between(tail, entry, head);
    }

    /// Insert `entry` at the front of the list identified by `head`
    pub fn push_front(&mut self, head: Link, entry: Link) {
        let front = self.slots[head.0].next;
        self.link_between(head, entry, front);
    }

    /// Remove `entry` from whatever list it is currently part of.
    ///
    /// The entry is left self-linked so that unlinking it again is a no-op.
    pub fn unlink(&mut self, entry: Link) {
        let Slot { prev, next, .. } = self.slots[entry.0];
        self.slots[prev.0].next = next;
        self.slots[next.0].prev = prev;
        self.slots[entry.0].prev = entry;
        self.slots[entry.0].next = entry;
    }

    /// Remove the tail entry of the list and return it
    pub fn pop_back(&mut self, head: Link) -> Option<Link> {
        if self.is_empty(head) {
            return None;
        }
        let tail = self.slots[head.0].prev;
        self.unlink(tail);
        Some(tail)
    }

    /// Remove the front entry of the list and return it
    pub fn pop_front(&mut self, head: Link) -> Option<Link> {
        if self.is_empty(head) {
            return None;
        }
        let front = self.slots[head.0].next;
        self.unlink(front);
        Some(front)
    }

    pub fn is_empty(&self, head: Link) -> bool {
        self.slots[head.0].next == head
    }

    pub fn next(&self, link: Link) -> Link {
        self.slots[link.0].next
    }

    pub fn prev(&self, link: Link) -> Link {
        self.slots[link.0].prev
    }

    /// The item carried by `link` or `None` if it is a list head
    pub fn get(&self, link: Link) -> Option<&T> {
        self.slots[link.0].item.as_ref()
    }

    /// Iterate over the items of the list identified by `head` in list order
    pub fn iter(&self, head: Link) -> ListIter<'_, T> {
        ListIter {
            slab: self,
            head,
            front: self.next(head),
            back: self.prev(head),
        }
    }
}

impl<T> Default for LinkedSlab<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the items of one list inside a [`LinkedSlab`]
#[derive(Debug, Clone)]
pub struct ListIter<'slab, T> {
    slab: &'slab LinkedSlab<T>,
    head: Link,
    front: Link,
    back: Link,
}

impl<'slab, T> ListIter<'slab, T> {
    /// Exhaust the iterator if both ends point at the same entry and report whether that happened
    fn close_if_last(&mut self) -> bool {
        if self.front == self.back {
            self.front = self.head;
            self.back = self.head;
            return true;
        }
        false
    }
}

impl<'slab, T> Iterator for ListIter<'slab, T> {
    type Item = &'slab T;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.front;
        if link == self.head {
            return None;
        }
        if !self.close_if_last() {
            self.front = self.slab.next(link);
        }
        self.slab.get(link)
    }
}

impl<'slab, T> DoubleEndedIterator for ListIter<'slab, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let link = self.back;
        if link == self.head {
            return None;
        }
        if !self.close_if_last() {
            self.back = self.slab.prev(link);
        }
        self.slab.get(link)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec::Vec;

    fn collect(slab: &LinkedSlab<u32>, head: Link) -> Vec<u32> {
        slab.iter(head).copied().collect()
    }

    fn list_with(items: &[u32]) -> (LinkedSlab<u32>, Link, Vec<Link>) {
        let mut slab = LinkedSlab::new();
        let head = slab.new_head().unwrap();
        let mut entries = Vec::new();
        for &item in items {
            let entry = slab.new_entry(item).unwrap();
            slab.push_back(head, entry);
            entries.push(entry);
        }
        (slab, head, entries)
    }

    #[test]
    fn new_head_is_empty() {
        let mut slab = LinkedSlab::<u32>::new();
        let head = slab.new_head().unwrap();
        assert!(slab.is_empty(head));
        assert_eq!(slab.next(head), head);
        assert_eq!(slab.prev(head), head);
        assert_eq!(slab.get(head), None);
        assert_eq!(slab.iter(head).count(), 0);
    }

    #[test]
    fn with_head_is_empty() {
        let (mut slab, head) = LinkedSlab::with_head();
        assert!(slab.is_empty(head));
        let entry = slab.new_entry(7).unwrap();
        slab.push_back(head, entry);
        assert_eq!(collect(&slab, head), [7]);
    }

    #[test]
    fn push_back_keeps_insertion_order() {
        let (slab, head, _) = list_with(&[1, 2, 3]);
        assert!(!slab.is_empty(head));
        assert_eq!(collect(&slab, head), [1, 2, 3]);
        assert_eq!(slab.iter(head).rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[test]
    fn push_front_prepends() {
        let (mut slab, head, _) = list_with(&[2, 3]);
        let entry = slab.new_entry(1).unwrap();
        slab.push_front(head, entry);
        assert_eq!(collect(&slab, head), [1, 2, 3]);
        assert_eq!(slab.prev(entry), head);
    }

    #[test]
    fn pop_removes_from_both_ends() {
        let (mut slab, head, entries) = list_with(&[1, 2, 3]);
        assert_eq!(slab.pop_back(head), Some(entries[2]));
        assert_eq!(slab.pop_front(head), Some(entries[0]));
        assert_eq!(collect(&slab, head), [2]);
        assert_eq!(slab.pop_front(head), Some(entries[1]));
        assert!(slab.is_empty(head));
        assert_eq!(slab.pop_back(head), None);
        assert_eq!(slab.pop_front(head), None);
    }

    #[test]
    fn unlink_removes_arbitrary_entry() {
        let (mut slab, head, entries) = list_with(&[1, 2, 3, 4]);
        slab.unlink(entries[1]);
        assert_eq!(collect(&slab, head), [1, 3, 4]);
        assert_eq!(slab.next(entries[1]), entries[1]);

        // unlinking twice is harmless
        slab.unlink(entries[1]);
        assert_eq!(collect(&slab, head), [1, 3, 4]);
    }

    #[test]
    fn iterator_meets_in_the_middle() {
        let (slab, head, _) = list_with(&[1, 2, 3, 4, 5]);
        let mut iter = slab.iter(head);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn lists_in_one_slab_are_independent() {
        let mut slab = LinkedSlab::new();
        let a = slab.new_head().unwrap();
        let b = slab.new_head().unwrap();
        for i in 0..3 {
            let entry = slab.new_entry(i).unwrap();
            slab.push_back(if i % 2 == 0 { a } else { b }, entry);
        }
        assert_eq!(collect(&slab, a), [0, 2]);
        assert_eq!(collect(&slab, b), [1]);
        assert_eq!(slab.len(), 5);

        slab.clear();
        assert!(slab.is_slab_empty());
    }
}
