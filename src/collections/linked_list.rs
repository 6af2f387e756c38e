//! Doubly-linked list backed by a generational arena.
//!
//! Nodes live in a slot vector and link to each other by slot index, so the
//! list owns every node outright and there are no reference cycles. Callers
//! hold [`NodeHandle`]s: a handle records which list minted it and the slot's
//! generation at the time, so a handle from another list or one whose node
//! has since been removed is rejected instead of silently aliasing a reused
//! slot.
//!
//! Head and tail insertion/removal are O(1), as is removal or insertion next to
//! a node given its handle. Positional access walks from whichever end is
//! nearer.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

fn next_list_id() -> u64 {
    NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed)
}

/// Contract violations reported by [`LinkedList`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkedListError {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("node belongs to a different list")]
    ForeignNode,
    #[error("node is no longer in the list")]
    StaleNode,
    #[error("destination has room for {available} values but {needed} are required")]
    DestinationTooSmall { needed: usize, available: usize },
}

/// Opaque reference to a node in a specific [`LinkedList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    list_id: u64,
    slot: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

pub struct LinkedList<T> {
    id: u64,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            id: next_list_id(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `handle` refers to a live node of this list.
    pub fn owns(&self, handle: NodeHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    // ── Insertion ─────────────────────────────────────────────────────

    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let idx = self.allocate(value, None, self.head);
        match self.head {
            Some(old) => self.node_mut(old).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
        self.handle(idx)
    }

    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let idx = self.allocate(value, self.tail, None);
        match self.tail {
            Some(old) => self.node_mut(old).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
        self.handle(idx)
    }

    pub fn insert_before(&mut self, at: NodeHandle, value: T) -> Result<NodeHandle, LinkedListError> {
        let at = self.resolve(at)?;
        let prev = self.node(at).prev;
        let idx = self.allocate(value, prev, Some(at));
        self.node_mut(at).prev = Some(idx);
        match prev {
            Some(p) => self.node_mut(p).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.len += 1;
        Ok(self.handle(idx))
    }

    pub fn insert_after(&mut self, at: NodeHandle, value: T) -> Result<NodeHandle, LinkedListError> {
        let at = self.resolve(at)?;
        let next = self.node(at).next;
        let idx = self.allocate(value, Some(at), next);
        self.node_mut(at).next = Some(idx);
        match next {
            Some(n) => self.node_mut(n).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.len += 1;
        Ok(self.handle(idx))
    }

    // ── Removal ───────────────────────────────────────────────────────

    pub fn pop_front(&mut self) -> Option<T> {
        self.head.map(|idx| self.unlink(idx))
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.map(|idx| self.unlink(idx))
    }

    /// Removes the head. Returns false if the list was empty.
    pub fn remove_first(&mut self) -> bool {
        self.pop_front().is_some()
    }

    /// Removes the tail. Returns false if the list was empty.
    pub fn remove_last(&mut self) -> bool {
        self.pop_back().is_some()
    }

    /// Removes the node behind `handle` and returns its value. The handle is
    /// dead afterwards.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<T, LinkedListError> {
        let idx = self.resolve(handle)?;
        Ok(self.unlink(idx))
    }

    /// Removes every node, invalidating all outstanding handles.
    pub fn clear(&mut self) {
        self.free.clear();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(i as u32);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // ── Navigation ────────────────────────────────────────────────────

    pub fn first(&self) -> Option<NodeHandle> {
        self.head.map(|idx| self.handle(idx))
    }

    pub fn last(&self) -> Option<NodeHandle> {
        self.tail.map(|idx| self.handle(idx))
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|idx| &self.node(idx).value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|idx| &self.node(idx).value)
    }

    pub fn value(&self, handle: NodeHandle) -> Result<&T, LinkedListError> {
        let idx = self.resolve(handle)?;
        Ok(&self.node(idx).value)
    }

    pub fn value_mut(&mut self, handle: NodeHandle) -> Result<&mut T, LinkedListError> {
        let idx = self.resolve(handle)?;
        Ok(&mut self.node_mut(idx).value)
    }

    pub fn next(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, LinkedListError> {
        let idx = self.resolve(handle)?;
        Ok(self.node(idx).next.map(|n| self.handle(n)))
    }

    pub fn previous(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, LinkedListError> {
        let idx = self.resolve(handle)?;
        Ok(self.node(idx).prev.map(|p| self.handle(p)))
    }

    /// Positional access, walking from the nearer end.
    pub fn get(&self, index: usize) -> Result<&T, LinkedListError> {
        let idx = self.slot_at(index)?;
        Ok(&self.node(idx).value)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, LinkedListError> {
        let idx = self.slot_at(index)?;
        Ok(&mut self.node_mut(idx).value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    // ── Internals ─────────────────────────────────────────────────────

    fn handle(&self, idx: u32) -> NodeHandle {
        NodeHandle {
            list_id: self.id,
            slot: idx,
            generation: self.slots[idx as usize].generation,
        }
    }

    fn resolve(&self, handle: NodeHandle) -> Result<u32, LinkedListError> {
        if handle.list_id != self.id {
            return Err(LinkedListError::ForeignNode);
        }
        match self.slots.get(handle.slot as usize) {
            Some(slot) if slot.generation == handle.generation && slot.node.is_some() => {
                Ok(handle.slot)
            }
            _ => Err(LinkedListError::StaleNode),
        }
    }

    fn node(&self, idx: u32) -> &Node<T> {
        match &self.slots[idx as usize].node {
            Some(node) => node,
            None => unreachable!("linked slot {idx} is vacant"),
        }
    }

    fn node_mut(&mut self, idx: u32) -> &mut Node<T> {
        match &mut self.slots[idx as usize].node {
            Some(node) => node,
            None => unreachable!("linked slot {idx} is vacant"),
        }
    }

    fn allocate(&mut self, value: T, prev: Option<u32>, next: Option<u32>) -> u32 {
        let node = Node { value, prev, next };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize].node = Some(node);
                idx
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Detaches a live node, bumps its slot generation and returns the value.
    fn unlink(&mut self, idx: u32) -> T {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;

        let slot = &mut self.slots[idx as usize];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx);
        match slot.node.take() {
            Some(node) => node.value,
            None => unreachable!("linked slot {idx} is vacant"),
        }
    }

    fn slot_at(&self, index: usize) -> Result<u32, LinkedListError> {
        if index >= self.len {
            return Err(LinkedListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let mut cursor;
        if index <= self.len / 2 {
            cursor = self.head;
            for _ in 0..index {
                cursor = cursor.and_then(|c| self.node(c).next);
            }
        } else {
            cursor = self.tail;
            for _ in 0..(self.len - 1 - index) {
                cursor = cursor.and_then(|c| self.node(c).prev);
            }
        }
        cursor.ok_or(LinkedListError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// First node holding `value`, searching from the head.
    pub fn find(&self, value: &T) -> Option<NodeHandle> {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx);
            if node.value == *value {
                return Some(self.handle(idx));
            }
            cursor = node.next;
        }
        None
    }

    /// Last node holding `value`, searching from the tail.
    pub fn find_last(&self, value: &T) -> Option<NodeHandle> {
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            let node = self.node(idx);
            if node.value == *value {
                return Some(self.handle(idx));
            }
            cursor = node.prev;
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Removes the first node holding `value`.
    pub fn remove_value(&mut self, value: &T) -> bool {
        match self.find(value) {
            Some(handle) => self.remove(handle).is_ok(),
            None => false,
        }
    }
}

impl<T: Clone> LinkedList<T> {
    /// Copies the values, head first, into `dest` starting at `offset`.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), LinkedListError> {
        if offset > dest.len() {
            return Err(LinkedListError::IndexOutOfRange {
                index: offset,
                len: dest.len(),
            });
        }
        let available = dest.len() - offset;
        if available < self.len {
            return Err(LinkedListError::DestinationTooSmall {
                needed: self.len,
                available,
            });
        }
        for (slot, value) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = value.clone();
        }
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a new list: handles minted by the original do not resolve in it.
impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        Self {
            id: next_list_id(),
            slots: self.slots.clone(),
            free: self.free.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Ok(value) => value,
            Err(_) => panic!("index {index} is out of range for length {len}"),
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Head-to-tail iterator over a [`LinkedList`].
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        let node = self.list.node(idx);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        let node = self.list.node(idx);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
