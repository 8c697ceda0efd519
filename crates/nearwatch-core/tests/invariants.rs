//! Randomized sweeps checking the neighbor-graph and active-entity invariants.

use hashbrown::HashSet;
use nearwatch_core::prelude::*;
use nearwatch_core::{Bounds, Materials};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEEDS: [u64; 4] = [1, 7, 1234, 0xdead_beef];

fn sim(k: usize) -> Simulation<MaterialTable> {
    let config = SimConfig::default()
        .with_neighbor_count(k)
        .with_bounds(Bounds::new(Vec3::splat(-50.0), Vec3::splat(50.0)));
    Simulation::new(config, MaterialTable::new()).unwrap()
}

fn populate(sim: &mut Simulation<MaterialTable>, seed: u64, per_kind: usize) {
    let mut spawner = Spawner::seeded(seed);
    for i in 0..per_kind * 2 {
        let kind = if i % 2 == 0 { Kind::Bot } else { Kind::Item };
        spawner.spawn(sim, kind);
    }
}

/// Every structural invariant of every agent's neighbor graph.
fn assert_graphs_consistent(sim: &Simulation<MaterialTable>) {
    let k = sim.config().neighbor_count;

    for agent in sim.agents() {
        let graph = agent.graph();
        let kind = agent.kind();
        let population = sim.population(kind).len();

        assert!(graph.ranking().is_sorted(), "{} ranking unsorted", agent.entity());
        assert_eq!(graph.ranking().len(), population - 1);
        assert_eq!(graph.near().len(), k.min(population - 1));

        // Near set is the ranking's prefix.
        let prefix: Vec<Entity> = graph.ranking().iter().take(k).map(|r| r.subject).collect();
        let near: Vec<Entity> = graph.near().iter().map(|p| p.subject).collect();
        assert_eq!(near, prefix);

        for unseen in graph.unseen() {
            assert!(!graph.is_near(unseen.subject), "near and unseen overlap");
        }

        // Referrers are exactly the entities that list this one as near.
        let referrers: HashSet<Entity> = graph.referrers().iter().map(|p| p.subject).collect();
        let listed_by: HashSet<Entity> = sim
            .agents()
            .filter(|other| other.graph().is_near(agent.entity()))
            .map(nearwatch_core::Agent::entity)
            .collect();
        assert_eq!(referrers, listed_by, "{} referrers drifted", agent.entity());

        // Unseen is referrers minus near.
        let unseen: HashSet<Entity> = graph.unseen().iter().map(|p| p.subject).collect();
        let expected: HashSet<Entity> = referrers
            .iter()
            .copied()
            .filter(|e| !graph.is_near(*e))
            .collect();
        assert_eq!(unseen, expected);

        for candidate in graph.candidates() {
            let other = sim.agent(candidate.subject).unwrap();
            assert_eq!(other.kind(), kind, "neighbor graphs crossed kinds");
        }
    }
}

fn assert_single_active(sim: &Simulation<MaterialTable>) {
    let materials = Materials::default();

    for kind in Kind::ALL {
        let active: Vec<Entity> = sim
            .agents()
            .filter(|a| a.kind() == kind && a.is_active())
            .map(nearwatch_core::Agent::entity)
            .collect();
        assert_eq!(active.len(), 1, "{kind} should have exactly one active");
        assert_eq!(sim.active(kind), Some(active[0]));

        let highlighted: Vec<Entity> = sim
            .binding()
            .showing(materials.palette(kind).highlight)
            .collect();
        assert_eq!(highlighted, active, "{kind} highlight out of sync");
    }
}

#[test]
fn test_graphs_consistent_after_random_registration() {
    for seed in SEEDS {
        for k in [0, 1, 2, 3, 5] {
            let mut sim = sim(k);
            populate(&mut sim, seed, 40);
            assert_graphs_consistent(&sim);
        }
    }
}

#[test]
fn test_graphs_consistent_at_every_registration() {
    let mut sim = sim(2);
    let mut spawner = Spawner::seeded(99);

    for _ in 0..30 {
        spawner.spawn(&mut sim, Kind::Item);
        assert_graphs_consistent(&sim);
    }
}

#[test]
fn test_single_active_across_moving_observer() {
    for seed in SEEDS {
        let mut sim = sim(3);
        populate(&mut sim, seed, 30);

        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let mut observer = Vec3::ZERO;

        for _ in 0..200 {
            observer = Vec3::new(
                (observer.x + rng.gen_range(-3.0..3.0)).clamp(-50.0, 50.0),
                (observer.y + rng.gen_range(-3.0..3.0)).clamp(-50.0, 50.0),
                (observer.z + rng.gen_range(-3.0..3.0)).clamp(-50.0, 50.0),
            );
            let report = sim.tick(observer);

            assert!(report.enqueued.len() <= Kind::COUNT);
            assert_single_active(&sim);
        }
    }
}

#[test]
fn test_settled_active_is_locally_closest() {
    for seed in SEEDS {
        let mut sim = sim(2);
        populate(&mut sim, seed, 50);
        let observer = Vec3::new(12.0, -4.0, 30.0);

        assert!(sim.settle(observer, 500));

        for kind in Kind::ALL {
            let active = sim.agent(sim.active(kind).unwrap()).unwrap();
            let own = observer.distance_squared(active.point());
            for candidate in active.graph().candidates() {
                assert!(own <= observer.distance_squared(candidate.point));
            }
        }
    }
}

#[test]
fn test_spawning_mid_run_keeps_invariants() {
    let mut sim = sim(2);
    let mut spawner = Spawner::seeded(5);
    let mut observer = Vec3::ZERO;

    for step in 0..120_u16 {
        if step % 3 == 0 {
            let kind = if step % 2 == 0 { Kind::Bot } else { Kind::Item };
            spawner.spawn(&mut sim, kind);
        }
        observer.x = f32::from(step % 40) - 20.0;
        sim.tick(observer);
    }

    assert_graphs_consistent(&sim);
    assert_single_active(&sim);
}
