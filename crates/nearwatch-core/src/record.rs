//! Value types exchanged between entities and the registry.
//!
//! Both types are snapshots: they are built fresh whenever a distance or a
//! location is reported and never mutated afterwards.

use nearwatch_ecs::Entity;

use crate::Vec3;

/// A snapshotted location paired with the entity it belongs to.
///
/// Equality is by subject only, so a stale snapshot of an entity still
/// matches it in neighbor sets.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    pub point: Vec3,
    pub subject: Entity,
}

impl Position {
    #[must_use]
    pub const fn new(point: Vec3, subject: Entity) -> Self {
        Self { point, subject }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
    }
}

impl Eq for Position {}

/// Squared distance measured to `subject`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceRecord {
    pub distance: f32,
    pub subject: Entity,
}

impl DistanceRecord {
    #[must_use]
    pub const fn new(distance: f32, subject: Entity) -> Self {
        Self { distance, subject }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_equality_ignores_point() {
        let e = Entity::new(3);
        let a = Position::new(Vec3::ZERO, e);
        let b = Position::new(Vec3::splat(5.0), e);

        assert_eq!(a, b);
        assert_ne!(a, Position::new(Vec3::ZERO, Entity::new(4)));
    }
}
