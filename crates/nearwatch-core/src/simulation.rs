//! Simulation root and tick loop.
//!
//! ```text
//! spawn(kind, point):
//!   allocate handle -> base material -> Agent (Passive)
//!   Registry::register -> Rank messages to existing population
//!   deliver mailbox to completion
//!   newcomer seeds near set from returned ranking -> Unseen messages
//!   deliver mailbox to completion
//!
//! tick(observer):
//!   1. drain hand-off queue (demote, then promote, FIFO)
//!   2. active entity of each kind runs its check -> maybe enqueue hand-off
//! ```

use nearwatch_ecs::Entity;
use tracing::{trace, warn};

use crate::{
    Agent, AgentTable, ConfigResult, HighlightEvent, Kind, Mailbox, MaterialBinding,
    NeighborMessage, Position, Registry, SimConfig, Vec3,
};

/// Everything that happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Hand-offs applied at the start of the tick, in application order.
    pub applied: Vec<HighlightEvent>,
    /// Hand-offs raised during the tick, applied at the start of the next.
    pub enqueued: Vec<HighlightEvent>,
}

impl TickReport {
    /// No hand-off was applied or raised.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.applied.is_empty() && self.enqueued.is_empty()
    }
}

/// Owns every agent, the registry, the neighbor mailbox and the material
/// binding. All mutation goes through this single owner.
#[derive(Debug)]
pub struct Simulation<B> {
    config: SimConfig,
    agents: AgentTable,
    registry: Registry,
    mailbox: Mailbox,
    binding: B,
    tick: u64,
}

impl<B: MaterialBinding> Simulation<B> {
    /// Create an empty simulation after validating `config`.
    pub fn new(config: SimConfig, binding: B) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            registry: Registry::new(config.materials),
            config,
            agents: AgentTable::new(),
            mailbox: Mailbox::new(),
            binding,
            tick: 0,
        })
    }

    /// Instantiate, construct and register a new entity at `point`.
    ///
    /// Registration, ranking updates and neighbor bookkeeping all complete
    /// before this returns.
    pub fn spawn(&mut self, kind: Kind, point: Vec3) -> Entity {
        let entity = self.agents.reserve();

        // A freshly instantiated entity shows its kind's base material.
        let base = self.config.materials.palette(kind).base;
        self.binding.set_material(entity, base);

        let base_material = self.binding.material(entity);
        self.agents.insert(Agent::new(entity, kind, point, base_material));

        let me = Position::new(point, entity);
        let ranking = self.registry.register(
            kind,
            me,
            &mut self.agents,
            &mut self.binding,
            &mut self.mailbox,
        );
        self.deliver();

        if let Some(agent) = self.agents.get_mut(entity) {
            let registry = &self.registry;
            agent.graph_mut().seed(
                ranking,
                me,
                self.config.neighbor_count,
                |e| registry.location(e),
                &mut self.mailbox,
            );
        }
        self.deliver();

        entity
    }

    /// Deliver queued neighbor messages until the mailbox is empty.
    fn deliver(&mut self) {
        let neighbor_count = self.config.neighbor_count;

        while let Some(message) = self.mailbox.pop() {
            let to = message.recipient();
            let Some(agent) = self.agents.get_mut(to) else {
                warn!(%to, "dropping neighbor message to unknown entity");
                continue;
            };
            trace!(?message, "deliver");

            match message {
                NeighborMessage::Rank {
                    distance, subject, ..
                } => {
                    let me = agent.position();
                    let registry = &self.registry;
                    agent.graph_mut().update_ranking(
                        distance,
                        subject,
                        me,
                        neighbor_count,
                        |e| registry.location(e),
                        &mut self.mailbox,
                    );
                }
                NeighborMessage::Unseen { from, .. } => agent.graph_mut().update_unseen(from),
                NeighborMessage::Remove { from, .. } => agent.graph_mut().update_remove(from),
            }
        }
    }

    /// Advance one tick with the observer at `observer`.
    pub fn tick(&mut self, observer: Vec3) -> TickReport {
        self.tick += 1;

        let applied = self
            .registry
            .drain_handoffs(&mut self.agents, &mut self.binding);

        let mut enqueued = Vec::new();
        for kind in Kind::ALL {
            let Some(active) = self.registry.active(kind) else {
                continue;
            };
            let Some(event) = self.agents.get(active).and_then(|a| a.check(observer)) else {
                continue;
            };
            self.registry.enqueue_handoff(event);
            enqueued.push(event);
        }

        TickReport {
            tick: self.tick,
            applied,
            enqueued,
        }
    }

    /// Tick with a fixed observer until a tick is quiet.
    ///
    /// Returns `false` if `max_ticks` ran out first.
    pub fn settle(&mut self, observer: Vec3, max_ticks: u64) -> bool {
        for _ in 0..max_ticks {
            if self.tick(observer).is_quiet() {
                return true;
            }
        }
        false
    }

    #[must_use]
    pub fn agent(&self, entity: Entity) -> Option<&Agent> {
        self.agents.get(entity)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter()
    }

    /// The entity of `kind` currently believed closest to the observer.
    #[must_use]
    pub const fn active(&self, kind: Kind) -> Option<Entity> {
        self.registry.active(kind)
    }

    #[must_use]
    pub fn population(&self, kind: Kind) -> &[Position] {
        self.registry.population(kind)
    }

    pub fn pending_handoffs(&self) -> impl Iterator<Item = &HighlightEvent> + '_ {
        self.registry.pending_handoffs()
    }

    /// Exhaustive closest-entity scan, for auditing the incremental result.
    #[must_use]
    pub fn nearest_by_scan(&self, kind: Kind, observer: Vec3) -> Option<Entity> {
        self.registry.nearest_to(kind, observer)
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn binding(&self) -> &B {
        &self.binding
    }

    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialTable, Materials};

    fn sim(k: usize) -> Simulation<MaterialTable> {
        Simulation::new(
            SimConfig::default().with_neighbor_count(k),
            MaterialTable::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_spawn_snapshots_base_material() {
        let mut sim = sim(1);
        let a = sim.spawn(Kind::Bot, Vec3::ZERO);
        let b = sim.spawn(Kind::Bot, Vec3::new(1.0, 0.0, 0.0));

        let palette = Materials::default().bot;
        assert_eq!(sim.agent(a).unwrap().base_material(), palette.base);
        assert_eq!(sim.binding().get(a), Some(palette.highlight));
        assert_eq!(sim.binding().get(b), Some(palette.base));
    }

    #[test]
    fn test_tick_without_entities_is_quiet() {
        let mut sim = sim(2);
        let report = sim.tick(Vec3::ZERO);

        assert!(report.is_quiet());
        assert_eq!(report.tick, 1);
        assert_eq!(sim.tick_count(), 1);
    }

    #[test]
    fn test_handoff_applies_on_next_tick() {
        let mut sim = sim(1);
        let a = sim.spawn(Kind::Item, Vec3::ZERO);
        let b = sim.spawn(Kind::Item, Vec3::new(5.0, 0.0, 0.0));
        let observer = Vec3::new(5.0, 0.0, 0.0);

        let first = sim.tick(observer);
        assert!(first.applied.is_empty());
        assert_eq!(first.enqueued.len(), 1);
        assert_eq!(sim.active(Kind::Item), Some(a));

        let second = sim.tick(observer);
        assert_eq!(second.applied, first.enqueued);
        assert!(second.enqueued.is_empty());
        assert_eq!(sim.active(Kind::Item), Some(b));
    }

    #[test]
    fn test_settle_reports_exhaustion() {
        let mut sim = sim(1);
        sim.spawn(Kind::Item, Vec3::ZERO);
        sim.spawn(Kind::Item, Vec3::new(5.0, 0.0, 0.0));

        assert!(!sim.settle(Vec3::new(5.0, 0.0, 0.0), 1));
        assert!(sim.settle(Vec3::new(5.0, 0.0, 0.0), 10));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimConfig::default();
        config.materials.item.highlight = config.materials.item.base;

        assert!(Simulation::new(config, MaterialTable::new()).is_err());
    }
}
