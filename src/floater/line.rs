//! Lines, relationships, and the record of what a destroy removed.

use glam::Vec3;

/// A straight line between two anchors
///
/// Anchors are referenced by index. Connector points exist only while the
/// line takes part in at least one relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub index: usize,
    pub anchor1: usize,
    pub anchor2: usize,
    pub(crate) connector_points: Vec<Vec3>,
}

impl Line {
    pub fn new(index: usize, anchor1: usize, anchor2: usize) -> Self {
        Self {
            index,
            anchor1,
            anchor2,
            connector_points: Vec::new(),
        }
    }

    /// Evenly spaced points from `anchor1` (first) to `anchor2` (last)
    pub fn connector_points(&self) -> &[Vec3] {
        &self.connector_points
    }

    /// Segment count shared by every relationship of this line
    ///
    /// `None` while the line is unrelated.
    pub fn segment_count(&self) -> Option<usize> {
        self.connector_points.len().checked_sub(1)
    }

    pub fn references(&self, anchor: usize) -> bool {
        self.anchor1 == anchor || self.anchor2 == anchor
    }

    /// Reallocate placeholders for `segment_count` divisions
    pub(crate) fn allocate_connectors(&mut self, segment_count: usize) {
        self.connector_points.clear();
        self.connector_points.resize(segment_count + 1, Vec3::ZERO);
    }

    pub(crate) fn release_connectors(&mut self) {
        self.connector_points = Vec::new();
    }
}

/// Two lines joined point-by-point: point `k` of `line1` to point `k` of `line2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub line1: usize,
    pub line2: usize,
    pub segment_count: usize,
}

impl Relationship {
    pub fn references(&self, line: usize) -> bool {
        self.line1 == line || self.line2 == line
    }
}

/// Entities removed by one destroy call
///
/// Indices are the ones the entities had before the call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    pub anchors: Vec<usize>,
    pub lines: Vec<usize>,
    pub relationships: Vec<usize>,
}

impl Cascade {
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty() && self.lines.is_empty() && self.relationships.is_empty()
    }

    /// Append a later cascade (its indices are relative to its own call)
    pub fn merge(&mut self, other: Cascade) {
        self.anchors.extend(other.anchors);
        self.lines.extend(other.lines);
        self.relationships.extend(other.relationships);
    }
}

/// Remove the entries at `dead` (sorted, unique) and return them in order
pub(crate) fn remove_sorted<T>(items: &mut Vec<T>, dead: &[usize]) -> Vec<T> {
    let mut removed = Vec::with_capacity(dead.len());
    let mut kept = Vec::with_capacity(items.len().saturating_sub(dead.len()));
    let mut dead_iter = dead.iter().peekable();

    for (index, item) in items.drain(..).enumerate() {
        if dead_iter.peek() == Some(&&index) {
            dead_iter.next();
            removed.push(item);
        } else {
            kept.push(item);
        }
    }

    *items = kept;
    removed
}

/// New position of a surviving index once `dead` (sorted) entries are gone
pub(crate) fn shift_index(old: usize, dead: &[usize]) -> usize {
    old - dead.partition_point(|&d| d < old)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_segment_count_tracks_connectors() {
        let mut line = Line::new(0, 0, 1);
        assert_eq!(line.segment_count(), None);

        line.allocate_connectors(4);
        assert_eq!(line.connector_points().len(), 5);
        assert_eq!(line.segment_count(), Some(4));

        line.release_connectors();
        assert!(line.connector_points().is_empty());
    }

    #[test]
    fn test_remove_sorted_keeps_order() {
        let mut items = vec!['a', 'b', 'c', 'd', 'e'];
        let removed = remove_sorted(&mut items, &[1, 3]);
        assert_eq!(removed, vec!['b', 'd']);
        assert_eq!(items, vec!['a', 'c', 'e']);
    }

    #[test]
    fn test_shift_index_closes_gaps() {
        let dead = [1, 3];
        assert_eq!(shift_index(0, &dead), 0);
        assert_eq!(shift_index(2, &dead), 1);
        assert_eq!(shift_index(4, &dead), 2);
    }

    #[test]
    fn test_cascade_merge() {
        let mut cascade = Cascade::default();
        assert!(cascade.is_empty());

        cascade.merge(Cascade {
            anchors: vec![2],
            lines: vec![0, 1],
            relationships: vec![0],
        });
        assert_eq!(cascade.lines, vec![0, 1]);
        assert!(!cascade.is_empty());
    }
}
