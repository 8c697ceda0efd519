//! Requests passed between entities and the coordinator.
//!
//! Entities never touch each other's neighbor graphs directly. Every
//! cross-entity request is a [`NeighborMessage`] pushed onto the
//! [`Mailbox`], and every change of the active entity is a
//! [`HighlightEvent`] pushed onto the registry's hand-off queue.

use nearwatch_ecs::Entity;
use nearwatch_event::EventQueue;

use crate::{MaterialHandle, Position};

/// A request addressed to one entity's neighbor graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NeighborMessage {
    /// `subject` was registered at squared distance `distance` from `to`.
    Rank {
        to: Entity,
        distance: f32,
        subject: Entity,
    },
    /// `from` now lists `to` as one of its near neighbors.
    Unseen { to: Entity, from: Position },
    /// `from` no longer lists `to` as a near neighbor.
    Remove { to: Entity, from: Position },
}

impl NeighborMessage {
    /// The entity this message is addressed to.
    #[must_use]
    pub const fn recipient(&self) -> Entity {
        match *self {
            Self::Rank { to, .. } | Self::Unseen { to, .. } | Self::Remove { to, .. } => to,
        }
    }
}

/// Pending neighbor messages, delivered in arrival order.
pub type Mailbox = EventQueue<NeighborMessage>;

/// Transfer of the active/highlighted status from `demote` to `promote`.
///
/// `demote_material` is the demoted entity's own base material, captured
/// when the event is raised, so restoring it needs no coordinator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighlightEvent {
    pub promote: Entity,
    pub demote: Entity,
    pub demote_material: MaterialHandle,
}
