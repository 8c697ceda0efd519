//! Entity agents and the table that owns them.

use nearwatch_ecs::{Entity, EntityAllocator};

use crate::{HighlightEvent, MaterialHandle, NeighborGraph, Position, Vec3};

/// Entity category. Kinds never appear in each other's neighbor graphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    /// Mobile actor.
    Bot = 0,
    /// Static actor.
    Item = 1,
}

impl Kind {
    /// All kinds in tick order.
    pub const ALL: [Self; 2] = [Self::Bot, Self::Item];

    /// Number of kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Index for per-kind arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::Item => "item",
        }
    }
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an agent is responsible for tracking the observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AgentState {
    #[default]
    Passive,
    Active,
}

/// One registered entity.
#[derive(Clone, Debug)]
pub struct Agent {
    entity: Entity,
    kind: Kind,
    point: Vec3,
    /// Material shown before any highlight, snapshotted at construction.
    base_material: MaterialHandle,
    state: AgentState,
    graph: NeighborGraph,
}

impl Agent {
    #[must_use]
    pub fn new(entity: Entity, kind: Kind, point: Vec3, base_material: MaterialHandle) -> Self {
        Self {
            entity,
            kind,
            point,
            base_material,
            state: AgentState::Passive,
            graph: NeighborGraph::new(),
        }
    }

    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub const fn point(&self) -> Vec3 {
        self.point
    }

    /// Fresh snapshot of this agent's location.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.point, self.entity)
    }

    #[must_use]
    pub const fn base_material(&self) -> MaterialHandle {
        self.base_material
    }

    #[must_use]
    pub const fn state(&self) -> AgentState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == AgentState::Active
    }

    pub(crate) fn set_state(&mut self, state: AgentState) {
        self.state = state;
    }

    #[must_use]
    pub const fn graph(&self) -> &NeighborGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut NeighborGraph {
        &mut self.graph
    }

    /// Per-tick check, run only while active.
    ///
    /// Finds the candidate closest to `observer` among this agent and its
    /// near and unseen neighbors. Ties keep the incumbent. Returns a hand-off
    /// when someone else is strictly closer.
    #[must_use]
    pub fn check(&self, observer: Vec3) -> Option<HighlightEvent> {
        if !self.is_active() {
            return None;
        }

        let mut closest = self.entity;
        let mut min = observer.distance_squared(self.point);

        for candidate in self.graph.candidates() {
            let distance = observer.distance_squared(candidate.point);
            if distance < min {
                closest = candidate.subject;
                min = distance;
            }
        }

        (closest != self.entity).then_some(HighlightEvent {
            promote: closest,
            demote: self.entity,
            demote_material: self.base_material,
        })
    }
}

/// Owning table of agents, indexed by entity.
#[derive(Debug, Default)]
pub struct AgentTable {
    allocator: EntityAllocator,
    slots: Vec<Option<Agent>>,
}

impl AgentTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a handle for an agent that is about to be constructed.
    pub fn reserve(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.slots.push(None);
        entity
    }

    /// Store a constructed agent in its reserved slot.
    pub fn insert(&mut self, agent: Agent) {
        if let Some(slot) = self.slots.get_mut(agent.entity().index()) {
            *slot = Some(agent);
        }
    }

    /// Look up an agent. Unknown handles yield `None`.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&Agent> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.slots.get(entity.index())?.as_ref()
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut Agent> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.slots.get_mut(entity.index())?.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.slots.iter().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.allocator.alive_count() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
