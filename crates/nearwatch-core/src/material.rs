//! Material binding boundary.
//!
//! Rendering lives outside the crate. The simulation only reads an entity's
//! material once when the entity is constructed and writes materials when a
//! highlight moves.

use hashbrown::HashMap;
use nearwatch_ecs::Entity;
use serde::{Deserialize, Serialize};

/// Opaque handle to a renderer-side material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialHandle(pub u32);

impl core::fmt::Display for MaterialHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mat{}", self.0)
    }
}

/// Read/write access to the material shown for an entity.
pub trait MaterialBinding {
    /// Material currently shown for `entity`.
    fn material(&self, entity: Entity) -> MaterialHandle;

    /// Show `material` for `entity`.
    fn set_material(&mut self, entity: Entity, material: MaterialHandle);
}

/// In-memory material binding.
///
/// Used by the headless driver and by tests. Entities that were never
/// assigned a material report the fallback handle.
#[derive(Debug, Default)]
pub struct MaterialTable {
    materials: HashMap<Entity, MaterialHandle>,
    fallback: MaterialHandle,
    writes: u64,
}

impl MaterialTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `fallback` for entities without an assigned material.
    #[must_use]
    pub fn with_fallback(fallback: MaterialHandle) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Assigned material, without the fallback.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<MaterialHandle> {
        self.materials.get(&entity).copied()
    }

    /// Number of `set_material` calls so far.
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.writes
    }

    /// Entities currently showing `material`.
    pub fn showing(&self, material: MaterialHandle) -> impl Iterator<Item = Entity> + '_ {
        self.materials
            .iter()
            .filter(move |(_, m)| **m == material)
            .map(|(e, _)| *e)
    }
}

impl MaterialBinding for MaterialTable {
    fn material(&self, entity: Entity) -> MaterialHandle {
        self.get(entity).unwrap_or(self.fallback)
    }

    fn set_material(&mut self, entity: Entity, material: MaterialHandle) {
        self.writes += 1;
        self.materials.insert(entity, material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_for_unassigned() {
        let table = MaterialTable::with_fallback(MaterialHandle(9));
        assert_eq!(table.material(Entity::new(0)), MaterialHandle(9));
        assert_eq!(table.get(Entity::new(0)), None);
    }

    #[test]
    fn test_set_material_counts_writes() {
        let mut table = MaterialTable::new();
        table.set_material(Entity::new(0), MaterialHandle(1));
        table.set_material(Entity::new(0), MaterialHandle(2));
        table.set_material(Entity::new(1), MaterialHandle(2));

        assert_eq!(table.material(Entity::new(0)), MaterialHandle(2));
        assert_eq!(table.writes(), 3);

        let mut showing: Vec<_> = table.showing(MaterialHandle(2)).collect();
        showing.sort();
        assert_eq!(showing, vec![Entity::new(0), Entity::new(1)]);
    }
}
