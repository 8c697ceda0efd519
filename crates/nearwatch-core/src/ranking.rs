//! Per-entity distance ranking.

use nearwatch_ecs::Entity;

use crate::DistanceRecord;

/// Distance records sorted ascending, unique by subject.
///
/// Records with equal distances keep insertion order: a new record is placed
/// after every existing record whose distance is equal or smaller, so the
/// earliest-reported subject wins ties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranking {
    records: Vec<DistanceRecord>,
}

impl Ranking {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Insert a record at its ordered position and return that index.
    ///
    /// An existing record for the same subject is replaced.
    pub fn insert(&mut self, record: DistanceRecord) -> usize {
        if let Some(old) = self.index_of(record.subject) {
            self.records.remove(old);
        }

        let index = self
            .records
            .partition_point(|r| r.distance <= record.distance);
        self.records.insert(index, record);
        index
    }

    /// Index of `subject`'s record, if ranked.
    #[must_use]
    pub fn index_of(&self, subject: Entity) -> Option<usize> {
        self.records.iter().position(|r| r.subject == subject)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DistanceRecord> {
        self.records.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&DistanceRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DistanceRecord> + '_ {
        self.records.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[DistanceRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check that distances are non-decreasing.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.records.is_sorted_by(|a, b| a.distance <= b.distance)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn e(id: u32) -> Entity {
        Entity::new(id)
    }

    #[test]
    fn test_insert_keeps_ascending_order() {
        let mut ranking = Ranking::new();
        ranking.insert(DistanceRecord::new(9.0, e(0)));
        ranking.insert(DistanceRecord::new(1.0, e(1)));
        ranking.insert(DistanceRecord::new(4.0, e(2)));
        ranking.insert(DistanceRecord::new(16.0, e(3)));

        let distances: Vec<f32> = ranking.iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![1.0, 4.0, 9.0, 16.0]);
        assert!(ranking.is_sorted());
    }

    #[test]
    fn test_ties_keep_earliest_first() {
        let mut ranking = Ranking::new();
        ranking.insert(DistanceRecord::new(2.0, e(0)));
        let index = ranking.insert(DistanceRecord::new(2.0, e(1)));

        assert_eq!(index, 1);
        assert_eq!(ranking.first().map(|r| r.subject), Some(e(0)));
    }

    #[test]
    fn test_insert_returns_index() {
        let mut ranking = Ranking::new();
        assert_eq!(ranking.insert(DistanceRecord::new(5.0, e(0))), 0);
        assert_eq!(ranking.insert(DistanceRecord::new(1.0, e(1))), 0);
        assert_eq!(ranking.insert(DistanceRecord::new(3.0, e(2))), 1);
        assert_eq!(ranking.insert(DistanceRecord::new(7.0, e(3))), 3);
    }

    #[test]
    fn test_reinserting_subject_replaces_record() {
        let mut ranking = Ranking::new();
        ranking.insert(DistanceRecord::new(1.0, e(0)));
        ranking.insert(DistanceRecord::new(2.0, e(1)));
        ranking.insert(DistanceRecord::new(3.0, e(0)));

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.index_of(e(0)), Some(1));
        assert_eq!(ranking.get(1).map(|r| r.distance), Some(3.0));
    }
}
