//! Per-entity neighbor graph.
//!
//! Each entity ranks every other entity of its kind by squared distance and
//! designates the first `k` as its *near* neighbors. The near relation is not
//! symmetric, so every entity also tracks its *referrers* (entities that list
//! it as near). Referrers it does not list back form its *unseen* set. The
//! active entity compares the observer against near and unseen neighbors
//! alike, which keeps a one-sided neighbor reachable.
//!
//! ```text
//!   A.near = {B}        B.near = {A}        C.near = {B}
//!
//!   B.referrers = {A, C}   B.unseen = {C}
//! ```

use nearwatch_ecs::Entity;
use smallvec::SmallVec;
use tracing::trace;

use crate::{DistanceRecord, Mailbox, NeighborMessage, Position, Ranking, Vec3};

/// Inline capacity for the near set. Neighbor counts are small in practice.
type NearSet = SmallVec<[Position; 4]>;

/// An entity's ranking of same-kind entities plus its derived neighbor sets.
///
/// Owned and mutated by exactly one entity. Requests from other entities
/// arrive through the mailbox and outgoing requests are pushed onto it.
#[derive(Clone, Debug, Default)]
pub struct NeighborGraph {
    ranking: Ranking,
    near: NearSet,
    referrers: Vec<Position>,
    unseen: Vec<Position>,
}

impl NeighborGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the ranking computed at registration and designate near neighbors.
    ///
    /// `locate` resolves a ranked subject to its registered point; subjects it
    /// cannot resolve are skipped.
    pub fn seed(
        &mut self,
        ranking: Ranking,
        me: Position,
        neighbor_count: usize,
        locate: impl Fn(Entity) -> Option<Vec3>,
        outbox: &mut Mailbox,
    ) {
        self.ranking = ranking;
        let next = self.prefix(neighbor_count, &locate);
        self.apply_near(next, me, outbox);
    }

    /// Rank a newly registered `subject` and refresh the near set if the
    /// ranking's first `neighbor_count` subjects changed.
    ///
    /// Returns `true` when the near set changed.
    pub fn update_ranking(
        &mut self,
        distance: f32,
        subject: Entity,
        me: Position,
        neighbor_count: usize,
        locate: impl Fn(Entity) -> Option<Vec3>,
        outbox: &mut Mailbox,
    ) -> bool {
        self.ranking.insert(DistanceRecord::new(distance, subject));

        let next = self.prefix(neighbor_count, &locate);
        let unchanged = next
            .iter()
            .map(|p| p.subject)
            .eq(self.near.iter().map(|p| p.subject));
        if unchanged {
            return false;
        }

        self.apply_near(next, me, outbox);
        true
    }

    /// `other` now lists this entity as near.
    ///
    /// It becomes unseen unless it is already one of our near neighbors.
    /// Repeated calls are no-ops.
    pub fn update_unseen(&mut self, other: Position) {
        if !self.referrers.contains(&other) {
            self.referrers.push(other);
        }
        if !self.near.contains(&other) && !self.unseen.contains(&other) {
            self.unseen.push(other);
        }
    }

    /// `other` no longer lists this entity as near. Absent entries are a no-op.
    pub fn update_remove(&mut self, other: Position) {
        self.referrers.retain(|p| *p != other);
        self.unseen.retain(|p| *p != other);
    }

    fn prefix(
        &self,
        neighbor_count: usize,
        locate: &impl Fn(Entity) -> Option<Vec3>,
    ) -> NearSet {
        self.ranking
            .iter()
            .filter_map(|r| locate(r.subject).map(|point| Position::new(point, r.subject)))
            .take(neighbor_count)
            .collect()
    }

    /// Replace the near set, telling the old members to forget us first and
    /// the new members to remember us after.
    fn apply_near(&mut self, next: NearSet, me: Position, outbox: &mut Mailbox) {
        for old in &self.near {
            outbox.push(NeighborMessage::Remove {
                to: old.subject,
                from: me,
            });
        }

        self.near = next;

        for new in &self.near {
            outbox.push(NeighborMessage::Unseen {
                to: new.subject,
                from: me,
            });
        }

        let near = &self.near;
        self.unseen = self
            .referrers
            .iter()
            .filter(|p| !near.contains(p))
            .copied()
            .collect();

        trace!(
            entity = %me.subject,
            near = self.near.len(),
            unseen = self.unseen.len(),
            "near set changed"
        );
    }

    #[must_use]
    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    /// Near neighbors, closest first.
    #[must_use]
    pub fn near(&self) -> &[Position] {
        &self.near
    }

    #[must_use]
    pub fn unseen(&self) -> &[Position] {
        &self.unseen
    }

    /// Entities that currently list this entity as near.
    #[must_use]
    pub fn referrers(&self) -> &[Position] {
        &self.referrers
    }

    #[must_use]
    pub fn is_near(&self, entity: Entity) -> bool {
        self.near.iter().any(|p| p.subject == entity)
    }

    #[must_use]
    pub fn is_unseen(&self, entity: Entity) -> bool {
        self.unseen.iter().any(|p| p.subject == entity)
    }

    /// Near neighbors followed by unseen neighbors.
    pub fn candidates(&self) -> impl Iterator<Item = &Position> + '_ {
        self.near.iter().chain(self.unseen.iter())
    }
}
