//! Slab-backed recency list: a doubly linked list linked by stable indices.
//!
//! Entries live in a slab (`Vec<Option<Slot<T>>>` plus a free list) and are
//! addressed by `EntryId`. The `prev`/`next` links of each node are `EntryId`s
//! into the same slab, so splice and move operations are O(1) without any
//! pointer chasing, and a stale id can never dangle — it either resolves to a
//! live slot or to `None`.
//!
//! ```text
//!   slab
//!   ┌─────────┬────────────────────────────────────────────┐
//!   │ EntryId │ Slot { value, prev, next }                 │
//!   ├─────────┼────────────────────────────────────────────┤
//!   │ id_0    │ { value: A, prev: None, next: Some(id_1) } │
//!   │ id_1    │ { value: B, prev: Some(id_0), next: id_2 } │
//!   │ id_2    │ { value: C, prev: Some(id_1), next: None } │
//!   └─────────┴────────────────────────────────────────────┘
//!
//!   head ─► [id_0] ◄──► [id_1] ◄──► [id_2] ◄── tail
//!           (MRU)                   (LRU)
//! ```
//!
//! Head is the most recently used position, tail the least recently used.
//! The list owns only the ordering relation; entry payloads are owned by the
//! values stored in the slab and released when a node is removed or popped.
//!
//! - `push_front` / `pop_back` / `remove` / `move_to_front`: O(1)
//! - `iter`: O(n), head to tail
//!
//! `debug_validate` checks link symmetry, reachability, and the length
//! counter; it is always compiled so test and fuzz builds can call it at any
//! optimization level.

use std::collections::TryReserveError;

/// Stable handle to a node in a [`RecencyList`].
///
/// Ids are slab indices. An id freed by `remove` or `pop_back` may be reused
/// by a later `push_front`; holders must treat a removed id as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

impl EntryId {
    /// Returns the underlying slab index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Slot<T> {
    value: T,
    prev: Option<EntryId>,
    next: Option<EntryId>,
}

/// Doubly linked list in recency order, nodes stored in a slab and linked by
/// [`EntryId`].
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Slot<T>>>,
    free: Vec<usize>,
    head: Option<EntryId>,
    tail: Option<EntryId>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with slab capacity for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Reserves slab space for at least `additional` more nodes.
    ///
    /// Growth failure is reported instead of aborting, so callers can make
    /// insertion all-or-nothing: reserve first, then link. The free-slot
    /// stack is reserved alongside the slab so that node removal never
    /// allocates.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        if self.free.len() < additional {
            self.slots.try_reserve(additional)?;
            self.free.try_reserve(additional)?;
        }
        Ok(())
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` currently addresses a live node.
    pub fn contains(&self, id: EntryId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Returns the value at the head (MRU), if any.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the value at the tail (LRU), if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the id of the tail (LRU) node, if any.
    pub fn back_id(&self) -> Option<EntryId> {
        self.tail
    }

    /// Returns the value for a node id, if live.
    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.slots.get(id.0)?.as_ref().map(|slot| &slot.value)
    }

    /// Returns a mutable reference to a node value, if live.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.as_mut().map(|slot| &mut slot.value)
    }

    /// Inserts `value` as the new head (MRU) and returns its id.
    ///
    /// Reuses a freed slot when one is available, otherwise appends to the
    /// slab. Callers that need all-or-nothing allocation behavior should
    /// `try_reserve` first.
    pub fn push_front(&mut self, value: T) -> EntryId {
        let slot = Slot {
            value,
            prev: None,
            next: self.head,
        };
        let id = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                EntryId(idx)
            }
            None => {
                self.slots.push(Some(slot));
                EntryId(self.slots.len() - 1)
            }
        };
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.node_mut(old_head) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        id
    }

    /// Moves a live node to the head (MRU); returns `false` if `id` is stale.
    ///
    /// Already-head is a no-op. Tail and interior nodes are spliced out via
    /// their own links and relinked at the front.
    pub fn move_to_front(&mut self, id: EntryId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Unlinks and returns the tail (LRU) value.
    ///
    /// The freed slot goes back on the free list; the value is handed to the
    /// caller, who decides what to release.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.detach(id);
        self.release_slot(id)
    }

    /// Unlinks the node `id` and returns its value, if live.
    pub fn remove(&mut self, id: EntryId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.detach(id);
        self.release_slot(id)
    }

    /// Drops every node and resets the list to empty.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns an iterator over values from head (MRU) to tail (LRU).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn node(&self, id: EntryId) -> Option<&Slot<T>> {
        self.slots.get(id.0)?.as_ref()
    }

    fn node_mut(&mut self, id: EntryId) -> Option<&mut Slot<T>> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// Unlinks `id` from its neighbors without freeing the slot.
    fn detach(&mut self, id: EntryId) {
        let (prev, next) = match self.node(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Links an already-detached node as the new head.
    fn attach_front(&mut self, id: EntryId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        } else {
            return;
        }
        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.node_mut(old_head) {
                    head_node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Frees a detached slot and returns its value.
    fn release_slot(&mut self, id: EntryId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(slot.value)
    }

    /// Checks link symmetry, head/tail reachability, and the length counter.
    ///
    /// O(n) walk; always compiled so optimized test and fuzz builds can call
    /// it. Callers on hot paths should gate it on `debug_assertions`.
    pub fn debug_validate(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id), "cycle at {:?}", id);
            let node = self.node(id).expect("link to freed slot");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len);
        }

        assert_eq!(count, self.len);
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values from head (MRU) to tail (LRU).
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<EntryId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}
