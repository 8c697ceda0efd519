//! Entity identifiers and their allocator.

use std::fmt;

/// Raw entity index into the entity storage.
pub type EntityId = u32;

/// A unique identifier for an entity in the simulation.
///
/// Handles are plain indices. They are `Copy`, hashable and ordered by
/// allocation, so the earliest-registered entity sorts first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    /// Index into the entity array.
    id: EntityId,
}

impl Entity {
    /// Create an entity handle from a raw index.
    ///
    /// Handles built this way are not necessarily alive; check them with
    /// [`EntityAllocator::is_alive`] before trusting them.
    #[must_use]
    pub const fn new(id: EntityId) -> Self {
        Self { id }
    }

    /// Get the entity's index.
    #[must_use]
    pub const fn id(self) -> EntityId {
        self.id
    }

    /// Index usable for slot tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.id as usize
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// Allocator for entity IDs.
///
/// Entities are never despawned, so slots are handed out densely in
/// registration order and stay valid for the allocator's lifetime.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Number of slots handed out so far.
    next: EntityId,
}

impl EntityAllocator {
    /// Create a new entity allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate a new entity.
    pub fn allocate(&mut self) -> Entity {
        let entity = Entity::new(self.next);
        self.next += 1;
        entity
    }

    /// Check if an entity was handed out by this allocator.
    #[must_use]
    pub const fn is_alive(&self, entity: Entity) -> bool {
        entity.id < self.next
    }

    /// Get the number of currently alive entities.
    #[must_use]
    pub const fn alive_count(&self) -> u32 {
        self.next
    }
}
