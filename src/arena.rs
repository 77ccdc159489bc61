//! Storage for pillars.
//!
//! Every pillar of an [`EventList`][crate::EventList] lives by value inside a
//! single [`Arena`], and pillars refer to one another through [`PillarId`]
//! handles rather than pointers. Freed slots are threaded onto a free list and
//! reused by later allocations, so a handle is only meaningful while the
//! pillar it was returned for is still allocated.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to a value stored in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PillarId(usize);

enum Slot<T> {
    Occupied(T),
    Vacant(Option<PillarId>),
}

/// A single-type allocator backed by a `Vec`.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Option<PillarId>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    /// The number of live values.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `value`, reusing a vacant slot when one is available.
    pub(crate) fn allocate(&mut self, value: T) -> PillarId {
        self.len += 1;
        match self.free.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                PillarId(self.slots.len() - 1)
            }
            Some(id) => {
                let vacant = mem::replace(&mut self.slots[id.0], Slot::Occupied(value));
                match vacant {
                    Slot::Vacant(next) => {
                        self.free = next;
                        id
                    }
                    Slot::Occupied(_) => panic!("free list points at an occupied slot"),
                }
            }
        }
    }

    /// Releases the value behind `id` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds or already vacant, which would mean a
    /// pillar is being released twice.
    pub(crate) fn free(&mut self, id: PillarId) -> T {
        assert!(id.0 < self.slots.len(), "attempting to free an invalid slot");
        let old = mem::replace(&mut self.slots[id.0], Slot::Vacant(self.free));
        match old {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.free = Some(id);
                value
            }
            Slot::Vacant(next) => {
                self.slots[id.0] = Slot::Vacant(next);
                panic!("attempting to free a vacant slot");
            }
        }
    }

    /// Drops every value and forgets all slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }

    pub(crate) fn get(&self, id: PillarId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: PillarId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }
}

impl<T> Index<PillarId> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: PillarId) -> &T {
        self.get(id).expect("dangling pillar handle")
    }
}

impl<T> IndexMut<PillarId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: PillarId) -> &mut T {
        self.get_mut(id).expect("dangling pillar handle")
    }
}
