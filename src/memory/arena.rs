//! Generational slot arena
//!
//! Every variable lives in a [`Slot`] owned by the [`SlotArena`]. Pointers hold a
//! [`SlotId`]: an index plus the generation the slot had when it was allocated.
//! Freeing a slot bumps the generation of its index and puts the index on a free
//! list, so a pointer that outlives its variable no longer resolves. An index
//! whose generation cannot be bumped again is retired. This makes
//! dangling pointer detection exact while keeping memory bounded by the number of
//! simultaneously live variables.

use super::value::Value;
use crate::parser::ast::Type;
use std::fmt;

/// Handle to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot{}#{}", self.index, self.generation)
    }
}

/// A named, typed storage cell
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: String,
    pub ty: Type,
    pub value: Value,
}

impl Slot {
    /// A slot holding the zero value of its type.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Slot {
            name: name.into(),
            ty,
            value: Value::zero_of(ty),
        }
    }
}

#[derive(Debug)]
struct Entry {
    generation: u32,
    slot: Option<Slot>,
}

#[derive(Debug, Default)]
pub struct SlotArena {
    entries: Vec<Entry>,
    free: Vec<u32>,
    live: usize,
}

impl SlotArena {
    pub fn new() -> Self {
        SlotArena::default()
    }

    /// Store `slot`, reusing a freed index when one is available.
    pub fn allocate(&mut self, slot: Slot) -> SlotId {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.slot = Some(slot);
            return SlotId {
                index,
                generation: entry.generation,
            };
        }

        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            slot: Some(slot),
        });
        SlotId {
            index,
            generation: 0,
        }
    }

    /// Release a slot. Returns the slot, or None if `id` was already stale.
    pub fn free(&mut self, id: SlotId) -> Option<Slot> {
        let entry = self.entries.get_mut(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        let slot = entry.slot.take()?;
        // An index whose generation is exhausted is retired, never reused
        if let Some(next) = entry.generation.checked_add(1) {
            entry.generation = next;
            self.free.push(id.index);
        }
        self.live -= 1;
        Some(slot)
    }

    /// Resolve a handle. None if the slot has been freed since `id` was issued.
    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        let entry = self.entries.get(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        entry.slot.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        let entry = self.entries.get_mut(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        entry.slot.as_mut()
    }

    pub fn is_live(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of slots currently allocated
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of indices ever handed out
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_read() {
        let mut arena = SlotArena::new();
        let id = arena.allocate(Slot::new("x", Type::int()));
        let slot = arena.get(id).unwrap();
        assert_eq!(slot.name, "x");
        assert_eq!(slot.value, Value::Int(0));
        assert_eq!(arena.live_count(), 1);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut arena = SlotArena::new();
        let old = arena.allocate(Slot::new("a", Type::int()));
        assert!(arena.is_live(old));
        assert!(arena.free(old).is_some());
        assert!(!arena.is_live(old));

        let new = arena.allocate(Slot::new("b", Type::char()));
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert!(arena.get(old).is_none());
        assert_eq!(arena.get(new).unwrap().name, "b");
    }

    #[test]
    fn test_double_free_is_rejected() {
        let mut arena = SlotArena::new();
        let id = arena.allocate(Slot::new("a", Type::int()));
        assert!(arena.free(id).is_some());
        assert!(arena.free(id).is_none());
        assert_eq!(arena.live_count(), 0);
    }

    #[test]
    fn test_capacity_is_bounded_by_live_slots() {
        let mut arena = SlotArena::new();
        for _ in 0..1000 {
            let id = arena.allocate(Slot::new("tmp", Type::float()));
            arena.free(id);
        }
        assert_eq!(arena.capacity(), 1);
    }

    #[test]
    fn test_exhausted_generation_retires_index() {
        let mut arena = SlotArena::new();
        let first = arena.allocate(Slot::new("a", Type::int()));
        arena.free(first);
        arena.entries[0].generation = u32::MAX;

        let last = arena.allocate(Slot::new("b", Type::int()));
        assert_eq!((last.index(), last.generation()), (0, u32::MAX));
        assert!(arena.free(last).is_some());
        assert!(arena.get(last).is_none());
        assert_eq!(arena.live_count(), 0);

        let fresh = arena.allocate(Slot::new("c", Type::int()));
        assert_eq!((fresh.index(), fresh.generation()), (1, 0));
        assert!(arena.get(last).is_none());
        assert_eq!(arena.capacity(), 2);
    }

    #[test]
    fn test_write_through_get_mut() {
        let mut arena = SlotArena::new();
        let id = arena.allocate(Slot::new("x", Type::int()));
        arena.get_mut(id).unwrap().value = Value::Int(9);
        assert_eq!(arena.get(id).unwrap().value, Value::Int(9));
    }
}
