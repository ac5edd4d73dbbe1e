//! Structural edits: create/destroy with cascading cleanup.
//!
//! Identity is positional. Every destroy walks the dependency graph
//! anchor → lines → relationships inside one call, removes everything that
//! would dangle, then renumbers the survivors so indices stay dense.

use std::collections::BTreeSet;

use log::debug;

use super::line::{remove_sorted, shift_index, Cascade, Line, Relationship};
use super::Floater;
use crate::error::{FloaterError, Result};

impl Floater {
    /// Add a line between two live anchors, returning its index
    pub fn create_line(&mut self, anchor1: usize, anchor2: usize) -> Result<usize> {
        self.check_anchor(anchor1)?;
        self.check_anchor(anchor2)?;

        let index = self.lines.len();
        self.lines.push(Line::new(index, anchor1, anchor2));
        debug!("Created line {} ({} -> {})", index, anchor1, anchor2);
        Ok(index)
    }

    /// Relate two lines with `segment_count` divisions, returning the relationship index
    ///
    /// The segment count belongs to the lines: a line already related with a
    /// different count is rejected with [`FloaterError::SegmentMismatch`].
    pub fn create_relationship(
        &mut self,
        line1: usize,
        line2: usize,
        segment_count: usize,
    ) -> Result<usize> {
        self.check_line(line1)?;
        self.check_line(line2)?;
        if line1 == line2 {
            return Err(FloaterError::SelfRelationship(line1));
        }
        if segment_count == 0 {
            return Err(FloaterError::ZeroSegments);
        }
        for line in [line1, line2] {
            if let Some(existing) = self.lines[line].segment_count() {
                if existing != segment_count {
                    return Err(FloaterError::SegmentMismatch {
                        line,
                        existing,
                        requested: segment_count,
                    });
                }
            }
        }

        for line in [line1, line2] {
            if self.lines[line].segment_count().is_none() {
                self.lines[line].allocate_connectors(segment_count);
            }
        }

        let index = self.relationships.len();
        self.relationships.push(Relationship {
            line1,
            line2,
            segment_count,
        });
        self.recompute_segments();

        debug!(
            "Created relationship {} (lines {} and {}, {} segments)",
            index, line1, line2, segment_count
        );
        Ok(index)
    }

    /// Remove an anchor (default: the last) and every line and relationship that depended on it
    pub fn destroy_anchor(&mut self, index: Option<usize>) -> Result<Cascade> {
        let index = self.resolve_anchor(index)?;

        let dead_lines: Vec<usize> = self
            .lines
            .iter()
            .filter(|line| line.references(index))
            .map(|line| line.index)
            .collect();
        let mut cascade = self.remove_lines(&dead_lines);

        self.anchors.remove(index);
        for (position, anchor) in self.anchors.iter_mut().enumerate().skip(index) {
            anchor.index = position;
        }
        let dead_anchor = [index];
        for line in &mut self.lines {
            line.anchor1 = shift_index(line.anchor1, &dead_anchor);
            line.anchor2 = shift_index(line.anchor2, &dead_anchor);
        }
        cascade.anchors.push(index);

        self.recompute_segments();
        debug!(
            "Destroyed anchor {} ({} lines, {} relationships cascaded)",
            index,
            cascade.lines.len(),
            cascade.relationships.len()
        );
        Ok(cascade)
    }

    /// Remove a line (default: the last) and every relationship that used it
    pub fn destroy_line(&mut self, index: Option<usize>) -> Result<Cascade> {
        let index = self.resolve_line(index)?;
        let cascade = self.remove_lines(&[index]);
        self.recompute_segments();
        debug!(
            "Destroyed line {} ({} relationships cascaded)",
            index,
            cascade.relationships.len()
        );
        Ok(cascade)
    }

    /// Remove a relationship (default: the last)
    ///
    /// Lines left without any relationship drop their connector points.
    pub fn destroy_relationship(&mut self, index: Option<usize>) -> Result<Relationship> {
        let index = self.resolve_relationship(index)?;
        let removed = self.relationships.remove(index);
        self.release_unrelated_lines();
        debug!("Destroyed relationship {}", index);
        Ok(removed)
    }

    /// Change the segment count of a relationship
    ///
    /// Every line and relationship connected to it through shared lines
    /// shares one count, so the whole group is resized together.
    pub fn resize_segments(&mut self, relationship: usize, segment_count: usize) -> Result<()> {
        let start = *self
            .relationships
            .get(relationship)
            .ok_or(FloaterError::RelationshipOutOfRange {
                index: relationship,
                count: self.relationships.len(),
            })?;
        if segment_count == 0 {
            return Err(FloaterError::ZeroSegments);
        }

        let group = self.related_group(start.line1);
        for rel in &mut self.relationships {
            if group.contains(&rel.line1) {
                rel.segment_count = segment_count;
            }
        }
        for &line in &group {
            self.lines[line].allocate_connectors(segment_count);
        }
        self.recompute_segments();

        debug!(
            "Resized {} lines around relationship {} to {} segments",
            group.len(),
            relationship,
            segment_count
        );
        Ok(())
    }

    /// Create or destroy anchors at the end of the list until there are `target`
    pub fn reconcile_anchor_count(&mut self, target: usize) -> Result<Cascade> {
        let mut cascade = Cascade::default();
        while self.anchors.len() < target {
            self.create_anchor();
        }
        while self.anchors.len() > target {
            cascade.merge(self.destroy_anchor(None)?);
        }
        Ok(cascade)
    }

    /// Remove `dead` lines (any order) and the relationships that used them
    fn remove_lines(&mut self, dead: &[usize]) -> Cascade {
        let mut dead = dead.to_vec();
        dead.sort_unstable();
        dead.dedup();

        let dead_relationships: Vec<usize> = self
            .relationships
            .iter()
            .enumerate()
            .filter(|(_, rel)| dead.iter().any(|&line| rel.references(line)))
            .map(|(index, _)| index)
            .collect();
        remove_sorted(&mut self.relationships, &dead_relationships);
        remove_sorted(&mut self.lines, &dead);

        for (position, line) in self.lines.iter_mut().enumerate() {
            line.index = position;
        }
        for rel in &mut self.relationships {
            rel.line1 = shift_index(rel.line1, &dead);
            rel.line2 = shift_index(rel.line2, &dead);
        }
        self.release_unrelated_lines();

        Cascade {
            anchors: Vec::new(),
            lines: dead,
            relationships: dead_relationships,
        }
    }

    /// Clear connector points on lines no relationship refers to
    fn release_unrelated_lines(&mut self) {
        for line in &mut self.lines {
            let related = self
                .relationships
                .iter()
                .any(|rel| rel.references(line.index));
            if !related && !line.connector_points.is_empty() {
                line.release_connectors();
            }
        }
    }

    /// Lines reachable from `line` through relationships (including itself)
    fn related_group(&self, line: usize) -> BTreeSet<usize> {
        let mut group = BTreeSet::from([line]);
        let mut frontier = vec![line];

        while let Some(current) = frontier.pop() {
            for rel in self.relationships.iter().filter(|r| r.references(current)) {
                for next in [rel.line1, rel.line2] {
                    if group.insert(next) {
                        frontier.push(next);
                    }
                }
            }
        }
        group
    }

    fn check_anchor(&self, index: usize) -> Result<()> {
        if index < self.anchors.len() {
            Ok(())
        } else {
            Err(FloaterError::AnchorOutOfRange {
                index,
                count: self.anchors.len(),
            })
        }
    }

    fn check_line(&self, index: usize) -> Result<()> {
        if index < self.lines.len() {
            Ok(())
        } else {
            Err(FloaterError::LineOutOfRange {
                index,
                count: self.lines.len(),
            })
        }
    }

    fn resolve_anchor(&self, index: Option<usize>) -> Result<usize> {
        let count = self.anchors.len();
        let index = index.or(count.checked_sub(1)).unwrap_or(0);
        self.check_anchor(index).map(|_| index)
    }

    fn resolve_line(&self, index: Option<usize>) -> Result<usize> {
        let count = self.lines.len();
        let index = index.or(count.checked_sub(1)).unwrap_or(0);
        self.check_line(index).map(|_| index)
    }

    fn resolve_relationship(&self, index: Option<usize>) -> Result<usize> {
        let count = self.relationships.len();
        let index = index.or(count.checked_sub(1)).unwrap_or(0);
        if index < count {
            Ok(index)
        } else {
            Err(FloaterError::RelationshipOutOfRange { index, count })
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::params::{Dimensions, FloaterConfig, SegmentSpec};

    fn floater_with_anchors(count: usize) -> Floater {
        let mut floater = Floater::empty(Dimensions::Two, Vec3::splat(200.0), Some(3));
        for i in 0..count {
            let x = i as f32 * 10.0;
            floater.insert_anchor(Vec3::new(x, -x, 0.0), Vec3::ZERO);
        }
        floater
    }

    /// Every cross-reference resolves and every index is dense
    fn assert_consistent(floater: &Floater) {
        for (i, anchor) in floater.anchors().iter().enumerate() {
            assert_eq!(anchor.index, i);
        }
        for (i, line) in floater.lines().iter().enumerate() {
            assert_eq!(line.index, i);
            assert!(line.anchor1 < floater.anchors().len());
            assert!(line.anchor2 < floater.anchors().len());
        }
        for rel in floater.relationships() {
            assert!(rel.line1 < floater.lines().len());
            assert!(rel.line2 < floater.lines().len());
            for line in [rel.line1, rel.line2] {
                assert_eq!(
                    floater.lines()[line].connector_points().len(),
                    rel.segment_count + 1
                );
            }
        }
        for line in floater.lines() {
            let related = floater
                .relationships()
                .iter()
                .any(|r| r.references(line.index));
            assert_eq!(related, !line.connector_points().is_empty());
        }
    }

    #[test]
    fn test_create_line_rejects_dead_anchor() {
        let mut floater = floater_with_anchors(2);
        assert_eq!(floater.create_line(0, 1), Ok(0));
        assert_eq!(
            floater.create_line(1, 2),
            Err(FloaterError::AnchorOutOfRange { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_create_relationship_validation() {
        let mut floater = floater_with_anchors(3);
        floater.create_line(0, 1).unwrap();
        floater.create_line(1, 2).unwrap();

        assert_eq!(
            floater.create_relationship(0, 0, 4),
            Err(FloaterError::SelfRelationship(0))
        );
        assert_eq!(
            floater.create_relationship(0, 1, 0),
            Err(FloaterError::ZeroSegments)
        );
        assert_eq!(
            floater.create_relationship(0, 5, 4),
            Err(FloaterError::LineOutOfRange { index: 5, count: 2 })
        );
        assert!(floater.relationships().is_empty());
        assert!(floater.lines().iter().all(|l| l.connector_points().is_empty()));
    }

    #[test]
    fn test_shared_line_segment_mismatch_rejected() {
        let mut floater = floater_with_anchors(4);
        floater.create_line(0, 1).unwrap();
        floater.create_line(1, 2).unwrap();
        floater.create_line(2, 3).unwrap();
        floater.create_relationship(0, 1, 8).unwrap();

        // Line 1 already has 8 segments
        assert_eq!(
            floater.create_relationship(1, 2, 5),
            Err(FloaterError::SegmentMismatch {
                line: 1,
                existing: 8,
                requested: 5
            })
        );
        assert_eq!(floater.relationships().len(), 1);
        assert!(floater.lines()[2].connector_points().is_empty());

        // Matching count reuses line 1's points
        assert_eq!(floater.create_relationship(1, 2, 8), Ok(1));
        assert_eq!(floater.lines()[2].connector_points().len(), 9);
        assert_consistent(&floater);
    }

    #[test]
    fn test_destroy_anchor_renumbers() {
        let mut floater = floater_with_anchors(4);
        floater.create_line(0, 3).unwrap();
        floater.create_line(2, 3).unwrap();
        floater.create_line(0, 1).unwrap();
        floater.create_relationship(0, 1, 3).unwrap();

        let cascade = floater.destroy_anchor(Some(1)).unwrap();
        assert_eq!(cascade.anchors, vec![1]);
        assert_eq!(cascade.lines, vec![2]);
        assert!(cascade.relationships.is_empty());

        assert_eq!(floater.anchors().len(), 3);
        // Former anchors 2 and 3 are now 1 and 2
        assert_eq!((floater.lines()[0].anchor1, floater.lines()[0].anchor2), (0, 2));
        assert_eq!((floater.lines()[1].anchor1, floater.lines()[1].anchor2), (1, 2));
        assert_eq!(floater.anchors()[2].position, Vec3::new(30.0, -30.0, 0.0));
        assert_consistent(&floater);
    }

    #[test]
    fn test_destroy_shared_anchor_cascades() {
        let mut floater = floater_with_anchors(4);
        floater.create_line(0, 1).unwrap();
        floater.create_line(0, 2).unwrap();
        floater.create_line(2, 3).unwrap();
        floater.create_relationship(0, 1, 4).unwrap();
        floater.create_relationship(1, 2, 4).unwrap();

        let cascade = floater.destroy_anchor(Some(0)).unwrap();
        assert_eq!(cascade.lines, vec![0, 1]);
        assert_eq!(cascade.relationships, vec![0, 1]);

        assert_eq!(floater.lines().len(), 1);
        assert!(floater.relationships().is_empty());
        let survivor = &floater.lines()[0];
        assert_eq!((survivor.anchor1, survivor.anchor2), (1, 2));
        assert!(survivor.connector_points().is_empty());
        assert_consistent(&floater);
    }

    #[test]
    fn test_destroy_anchor_defaults_to_last() {
        let mut floater = floater_with_anchors(3);
        floater.create_line(1, 2).unwrap();

        let cascade = floater.destroy_anchor(None).unwrap();
        assert_eq!(cascade.anchors, vec![2]);
        assert_eq!(cascade.lines, vec![0]);
        assert_eq!(floater.anchors().len(), 2);

        // Index 0 is a real index, not "use the default"
        floater.destroy_anchor(Some(0)).unwrap();
        assert_eq!(floater.anchors()[0].position, Vec3::new(10.0, -10.0, 0.0));
    }

    #[test]
    fn test_destroy_on_empty_floater_fails() {
        let mut floater = floater_with_anchors(0);
        assert_eq!(
            floater.destroy_anchor(None),
            Err(FloaterError::AnchorOutOfRange { index: 0, count: 0 })
        );
        assert!(floater.destroy_line(None).is_err());
        assert!(floater.destroy_relationship(None).is_err());
    }

    #[test]
    fn test_destroy_line_cascades_and_renumbers() {
        let mut floater = floater_with_anchors(4);
        floater.create_line(0, 1).unwrap();
        floater.create_line(1, 2).unwrap();
        floater.create_line(2, 3).unwrap();
        floater.create_line(3, 0).unwrap();
        floater.create_relationship(0, 1, 5).unwrap();
        floater.create_relationship(2, 3, 7).unwrap();

        let cascade = floater.destroy_line(Some(1)).unwrap();
        assert_eq!(cascade.lines, vec![1]);
        assert_eq!(cascade.relationships, vec![0]);

        assert_eq!(floater.relationships().len(), 1);
        let rel = floater.relationships()[0];
        assert_eq!((rel.line1, rel.line2), (1, 2));
        assert_eq!(rel.segment_count, 7);
        // Old line 0 lost its only relationship
        assert!(floater.lines()[0].connector_points().is_empty());
        assert!(floater
            .relationships()
            .iter()
            .all(|r| r.line1 != 3 && r.line2 != 3));
        assert_consistent(&floater);
    }

    #[test]
    fn test_destroy_relationship_releases_lines() {
        let mut floater = floater_with_anchors(3);
        floater.create_line(0, 1).unwrap();
        floater.create_line(1, 2).unwrap();
        floater.create_relationship(0, 1, 4).unwrap();

        let removed = floater.destroy_relationship(None).unwrap();
        assert_eq!((removed.line1, removed.line2), (0, 1));
        assert!(floater.lines().iter().all(|l| l.connector_points().is_empty()));

        // Released lines can be related again with another count
        floater.create_relationship(1, 0, 6).unwrap();
        assert_eq!(floater.lines()[0].segment_count(), Some(6));
        assert_consistent(&floater);
    }

    #[test]
    fn test_resize_segments_updates_connected_group() {
        let mut floater = floater_with_anchors(5);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
            floater.create_line(a, b).unwrap();
        }
        floater.create_relationship(0, 1, 4).unwrap();
        floater.create_relationship(1, 2, 4).unwrap();

        floater.resize_segments(0, 12).unwrap();
        assert!(floater.relationships().iter().all(|r| r.segment_count == 12));
        for line in 0..3 {
            assert_eq!(floater.lines()[line].connector_points().len(), 13);
        }
        assert!(floater.lines()[3].connector_points().is_empty());

        // Resized points are already interpolated
        let line = &floater.lines()[2];
        assert_eq!(
            *line.connector_points().last().unwrap(),
            floater.anchors()[3].effective_position()
        );

        assert_eq!(
            floater.resize_segments(0, 0),
            Err(FloaterError::ZeroSegments)
        );
        assert_eq!(
            floater.resize_segments(9, 3),
            Err(FloaterError::RelationshipOutOfRange { index: 9, count: 2 })
        );
        assert_consistent(&floater);
    }

    #[test]
    fn test_reconcile_anchor_count() {
        let config = FloaterConfig {
            anchors: 4,
            lines_between: vec!["01".into(), "23".into(), "13".into()],
            relationships_between: vec!["01".into(), "12".into()],
            segments: SegmentSpec::Shared(6),
            seed: Some(5),
            ..Default::default()
        };
        let mut floater = Floater::new(config).unwrap();

        let cascade = floater.reconcile_anchor_count(7).unwrap();
        assert!(cascade.is_empty());
        assert_eq!(floater.anchors().len(), 7);
        assert_eq!(floater.lines().len(), 3);

        let cascade = floater.reconcile_anchor_count(3).unwrap();
        assert_eq!(cascade.anchors, vec![6, 5, 4, 3]);
        assert_eq!(floater.anchors().len(), 3);
        // Lines "23" and "13" touched anchor 3
        assert_eq!(floater.lines().len(), 1);
        assert!(floater.relationships().is_empty());
        assert_consistent(&floater);
    }

    #[test]
    fn test_random_edit_sequence_stays_consistent() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(2024);
        let mut floater = floater_with_anchors(6);

        for _ in 0..400 {
            match rng.random_range(0..6) {
                0 => {
                    floater.create_anchor();
                }
                1 if !floater.anchors().is_empty() => {
                    let index = rng.random_range(0..floater.anchors().len());
                    floater.destroy_anchor(Some(index)).unwrap();
                }
                2 | 3 if floater.anchors().len() >= 2 => {
                    let a = rng.random_range(0..floater.anchors().len());
                    let b = rng.random_range(0..floater.anchors().len());
                    floater.create_line(a, b).unwrap();
                }
                4 if floater.lines().len() >= 2 => {
                    let a = rng.random_range(0..floater.lines().len());
                    let b = rng.random_range(0..floater.lines().len());
                    let segments = rng.random_range(1..5);
                    // Mismatch and self-relationship are expected rejections
                    let _ = floater.create_relationship(a, b, segments);
                }
                5 if !floater.lines().is_empty() => {
                    let index = rng.random_range(0..floater.lines().len());
                    floater.destroy_line(Some(index)).unwrap();
                }
                _ => {}
            }
            floater.advance();
            floater.recompute_segments();
            assert_consistent(&floater);
        }
    }
}
