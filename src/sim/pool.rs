//! Ordered entity pools
//!
//! Each pool owns one role of entity (enemies, shots, bullets, effects) in
//! insertion order. Entities are addressed by a stable [`EntityId`] so that an
//! update pass can run over a snapshot of ids while entities remove
//! themselves, damage members of other pools, or append new members:
//!
//! ```text
//! for id in pool.ids() {                // snapshot: later pushes not visited
//!     let Some(e) = pool.check_out(id)  // None: removed earlier this pass
//!     ...update e...
//!     pool.check_in(id, e)              // omit to remove
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Stable handle for an entity inside a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

#[derive(Debug, Clone)]
enum Slot<T> {
    Present(T),
    /// Taken out for an update; invisible to queries until checked back in
    CheckedOut,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    id: EntityId,
    slot: Slot<T>,
}

#[derive(Debug, Clone)]
pub struct Pool<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entity under an id allocated by the caller
    pub fn push(&mut self, id: EntityId, value: T) {
        debug_assert!(
            self.position(id).is_none(),
            "duplicate entity id {:?}",
            id
        );
        self.entries.push(Entry {
            id,
            slot: Slot::Present(value),
        });
    }

    /// Remove an entity, returning it if it was present
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let index = self.position(id)?;
        match self.entries.remove(index).slot {
            Slot::Present(value) => Some(value),
            Slot::CheckedOut => None,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entities, including any currently checked out
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        match &self.entries[self.position(id)?].slot {
            Slot::Present(value) => Some(value),
            Slot::CheckedOut => None,
        }
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let index = self.position(id)?;
        match &mut self.entries[index].slot {
            Slot::Present(value) => Some(value),
            Slot::CheckedOut => None,
        }
    }

    /// Present entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().filter_map(|e| match &e.slot {
            Slot::Present(value) => Some((e.id, value)),
            Slot::CheckedOut => None,
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entries.iter_mut().filter_map(|e| match &mut e.slot {
            Slot::Present(value) => Some((e.id, value)),
            Slot::CheckedOut => None,
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, v)| v)
    }

    /// Snapshot of ids for an update pass
    pub fn ids(&self) -> Vec<EntityId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Take an entity out for updating. Returns `None` if it was removed.
    pub fn check_out(&mut self, id: EntityId) -> Option<T> {
        let index = self.position(id)?;
        match std::mem::replace(&mut self.entries[index].slot, Slot::CheckedOut) {
            Slot::Present(value) => Some(value),
            Slot::CheckedOut => None,
        }
    }

    /// Put a checked-out entity back in its original place.
    ///
    /// If the entity's entry vanished meanwhile (the pool was cleared or the
    /// id removed), the value is dropped.
    pub fn check_in(&mut self, id: EntityId, value: T) {
        if let Some(index) = self.position(id) {
            let entry = &mut self.entries[index];
            if matches!(entry.slot, Slot::CheckedOut) {
                entry.slot = Slot::Present(value);
            }
        }
    }

    /// Drop the entry of a checked-out entity that will not come back
    pub fn discard(&mut self, id: EntityId) {
        if let Some(index) = self.position(id) {
            if matches!(self.entries[index].slot, Slot::CheckedOut) {
                self.entries.remove(index);
            }
        }
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pool_of(values: &[i32]) -> Pool<i32> {
        let mut pool = Pool::new();
        for (i, &v) in values.iter().enumerate() {
            pool.push(EntityId(i as u32), v);
        }
        pool
    }

    #[test]
    fn test_insertion_order() {
        let mut pool = pool_of(&[10, 20, 30]);
        assert_eq!(pool.remove(EntityId(1)), Some(20));
        pool.push(EntityId(7), 40);
        let values: Vec<_> = pool.values().copied().collect();
        assert_eq!(values, vec![10, 30, 40]);
    }

    #[test]
    fn test_checked_out_is_hidden() {
        let mut pool = pool_of(&[1, 2]);
        let v = pool.check_out(EntityId(0)).unwrap();
        assert_eq!(pool.get(EntityId(0)), None);
        assert_eq!(pool.values().count(), 1);
        assert_eq!(pool.len(), 2);
        pool.check_in(EntityId(0), v);
        assert_eq!(pool.values().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_pass_skips_removed_and_appended() {
        let mut pool = pool_of(&[1, 2, 3]);
        let mut visited = Vec::new();
        let mut next = 100;
        for id in pool.ids() {
            let Some(v) = pool.check_out(id) else { continue };
            visited.push(v);
            if v == 1 {
                // First entity kills the last one and spawns a newcomer
                pool.remove(EntityId(2));
                pool.push(EntityId(next), 99);
                next += 1;
            }
            if v == 2 {
                // Second entity removes itself
                pool.discard(id);
                continue;
            }
            pool.check_in(id, v);
        }
        assert_eq!(visited, vec![1, 2]);
        assert_eq!(pool.values().copied().collect::<Vec<_>>(), vec![1, 99]);
    }

    #[test]
    fn test_check_in_after_clear_drops() {
        let mut pool = pool_of(&[5]);
        let v = pool.check_out(EntityId(0)).unwrap();
        pool.clear();
        pool.check_in(EntityId(0), v);
        assert!(pool.is_empty());
    }

    proptest! {
        #[test]
        fn pass_visits_each_original_exactly_once(
            n in 0usize..20,
            removals in proptest::collection::vec(0u32..20, 0..10),
        ) {
            let mut pool: Pool<u32> = Pool::new();
            for i in 0..n as u32 {
                pool.push(EntityId(i), i);
            }
            let mut visited = Vec::new();
            let mut next = 1000;
            for id in pool.ids() {
                let Some(v) = pool.check_out(id) else { continue };
                visited.push(v);
                // Every update appends a new entity and removes a later one
                pool.push(EntityId(next), next);
                next += 1;
                if let Some(&r) = removals.get(v as usize) {
                    if r > v {
                        pool.remove(EntityId(r));
                    }
                }
                pool.check_in(id, v);
            }
            prop_assert!(visited.iter().all(|&v| v < 1000));
            let mut sorted = visited.clone();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), visited.len());
        }
    }
}
