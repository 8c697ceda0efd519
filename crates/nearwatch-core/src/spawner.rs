//! Random placement of new entities inside the configured bounds.

use nearwatch_ecs::Entity;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::{Bounds, Kind, MaterialBinding, Simulation, Vec3};

/// Spawns entities at component-wise uniform points in [`Bounds`].
#[derive(Debug)]
pub struct Spawner<R> {
    rng: R,
}

impl Spawner<StdRng> {
    /// Deterministic spawner.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Spawner seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Spawner<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a point inside `bounds`, inclusive on both ends.
    pub fn sample(&mut self, bounds: &Bounds) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(bounds.min.x..=bounds.max.x),
            self.rng.gen_range(bounds.min.y..=bounds.max.y),
            self.rng.gen_range(bounds.min.z..=bounds.max.z),
        )
    }

    /// Spawn an entity of `kind` at a random point in the simulation's bounds.
    pub fn spawn<B: MaterialBinding>(&mut self, sim: &mut Simulation<B>, kind: Kind) -> Entity {
        let point = self.sample(&sim.config().bounds);
        let entity = sim.spawn(kind, point);
        info!(%entity, "{kind} has been spawned at {point}");
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialTable, SimConfig};

    #[test]
    fn test_samples_stay_in_bounds() {
        let bounds = Bounds::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 0.5, 3.0));
        let mut spawner = Spawner::seeded(7);

        for _ in 0..1000 {
            assert!(bounds.contains(spawner.sample(&bounds)));
        }
    }

    #[test]
    fn test_degenerate_bounds_yield_the_corner() {
        let corner = Vec3::new(4.0, 4.0, 4.0);
        let bounds = Bounds::new(corner, corner);
        let mut spawner = Spawner::seeded(1);

        assert_eq!(spawner.sample(&bounds), corner);
    }

    #[test]
    fn test_same_seed_same_points() {
        let bounds = Bounds::default();
        let mut a = Spawner::seeded(42);
        let mut b = Spawner::seeded(42);

        for _ in 0..10 {
            assert_eq!(a.sample(&bounds), b.sample(&bounds));
        }
    }

    #[test]
    fn test_spawn_registers_entity() {
        let mut sim = Simulation::new(SimConfig::default(), MaterialTable::new()).unwrap();
        let mut spawner = Spawner::seeded(3);

        let entity = spawner.spawn(&mut sim, Kind::Item);

        assert_eq!(sim.population(Kind::Item).len(), 1);
        assert_eq!(sim.active(Kind::Item), Some(entity));
        let point = sim.agent(entity).unwrap().point();
        assert!(sim.config().bounds.contains(point));
    }
}
