//! Entity handles for the nearwatch simulation.
//!
//! An [`Entity`] is a non-owning index into whatever table owns the entity's
//! state. Value types (positions, distance records, hand-off events) carry
//! entities instead of references, so the owning table alone controls
//! lifetime and a lookup with an unknown handle is a checkable condition.

mod entity;

pub use entity::{Entity, EntityAllocator, EntityId};
