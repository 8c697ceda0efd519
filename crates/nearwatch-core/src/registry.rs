//! The shared registration point and hand-off coordinator.
//!
//! The registry holds every registered entity's snapshotted position per kind,
//! fans out distances to the existing population when a newcomer registers,
//! and owns the FIFO queue of hand-off events. It is owned by the simulation
//! root and passed down explicitly; there is no global instance.

use hashbrown::HashMap;
use nearwatch_ecs::Entity;
use nearwatch_event::EventQueue;
use tracing::{debug, warn};

use crate::{
    Agent, AgentState, AgentTable, DistanceRecord, HighlightEvent, Kind, Mailbox, MaterialBinding,
    Materials, NeighborMessage, Position, Ranking, Vec3,
};

/// Per-kind populations, active slots and the hand-off queue.
#[derive(Debug)]
pub struct Registry {
    /// Registered positions per kind, in registration order. Append-only.
    populations: [Vec<Position>; Kind::COUNT],
    /// Registered point of every entity, for resolving ranked subjects.
    locations: HashMap<Entity, Vec3>,
    /// The active entity per kind, if the kind has any entities.
    active: [Option<Entity>; Kind::COUNT],
    handoffs: EventQueue<HighlightEvent>,
    materials: Materials,
}

impl Registry {
    #[must_use]
    pub fn new(materials: Materials) -> Self {
        Self {
            populations: Default::default(),
            locations: HashMap::new(),
            active: [None; Kind::COUNT],
            handoffs: EventQueue::new(),
            materials,
        }
    }

    /// Register a newcomer of `kind` and return its ranking of the existing
    /// population, closest first.
    ///
    /// Every existing entity of the kind is sent a [`NeighborMessage::Rank`]
    /// carrying its distance to the newcomer, in registration order. The
    /// first entity of a kind becomes active and is highlighted.
    pub fn register<B: MaterialBinding>(
        &mut self,
        kind: Kind,
        position: Position,
        agents: &mut AgentTable,
        binding: &mut B,
        mailbox: &mut Mailbox,
    ) -> Ranking {
        let population = &mut self.populations[kind.index()];
        let mut ranking = Ranking::with_capacity(population.len());

        for existing in population.iter() {
            let distance = existing.point.distance_squared(position.point);
            ranking.insert(DistanceRecord::new(distance, existing.subject));
            mailbox.push(NeighborMessage::Rank {
                to: existing.subject,
                distance,
                subject: position.subject,
            });
        }

        if population.is_empty() {
            if let Some(agent) = agents.get_mut(position.subject) {
                agent.set_state(AgentState::Active);
            }
            binding.set_material(position.subject, self.materials.palette(kind).highlight);
            self.active[kind.index()] = Some(position.subject);
            debug!(entity = %position.subject, %kind, "first of kind, now active");
        }

        population.push(position);
        self.locations.insert(position.subject, position.point);

        debug!(
            entity = %position.subject,
            %kind,
            fanout = ranking.len(),
            "registered"
        );

        ranking
    }

    /// Queue a hand-off for the next drain.
    pub fn enqueue_handoff(&mut self, event: HighlightEvent) {
        self.handoffs.push(event);
    }

    /// Apply every queued hand-off in arrival order and return them.
    ///
    /// For each event the demoted entity goes passive and gets its captured
    /// material back, then the promoted entity goes active and gets its kind's
    /// highlight. Events naming an unknown promote target are dropped.
    pub fn drain_handoffs<B: MaterialBinding>(
        &mut self,
        agents: &mut AgentTable,
        binding: &mut B,
    ) -> Vec<HighlightEvent> {
        let mut applied = Vec::with_capacity(self.handoffs.len());

        while let Some(event) = self.handoffs.pop() {
            let Some(kind) = agents.get(event.promote).map(Agent::kind) else {
                warn!(promote = %event.promote, "dropping hand-off to unknown entity");
                continue;
            };

            match agents.get_mut(event.demote) {
                Some(demoted) => {
                    demoted.set_state(AgentState::Passive);
                    binding.set_material(event.demote, event.demote_material);
                }
                None => warn!(demote = %event.demote, "hand-off from unknown entity"),
            }

            if let Some(promoted) = agents.get_mut(event.promote) {
                promoted.set_state(AgentState::Active);
            }
            binding.set_material(event.promote, self.materials.palette(kind).highlight);
            self.active[kind.index()] = Some(event.promote);

            debug!(
                promote = %event.promote,
                demote = %event.demote,
                %kind,
                "hand-off applied"
            );
            applied.push(event);
        }

        applied
    }

    /// Registered point of `entity`.
    #[must_use]
    pub fn location(&self, entity: Entity) -> Option<Vec3> {
        self.locations.get(&entity).copied()
    }

    /// Registered positions of `kind`, in registration order.
    #[must_use]
    pub fn population(&self, kind: Kind) -> &[Position] {
        &self.populations[kind.index()]
    }

    /// The active entity of `kind`.
    #[must_use]
    pub const fn active(&self, kind: Kind) -> Option<Entity> {
        self.active[kind.index()]
    }

    /// Hand-offs waiting for the next drain, oldest first.
    pub fn pending_handoffs(&self) -> impl Iterator<Item = &HighlightEvent> + '_ {
        self.handoffs.iter()
    }

    /// Exhaustive scan for the registered entity of `kind` closest to
    /// `observer`. Earliest-registered wins ties.
    #[must_use]
    pub fn nearest_to(&self, kind: Kind, observer: Vec3) -> Option<Entity> {
        let mut best: Option<(f32, Entity)> = None;
        for position in self.population(kind) {
            let distance = observer.distance_squared(position.point);
            if best.is_none_or(|(min, _)| distance < min) {
                best = Some((distance, position.subject));
            }
        }
        best.map(|(_, entity)| entity)
    }

    #[must_use]
    pub const fn materials(&self) -> &Materials {
        &self.materials
    }
}
