//! Connector point interpolation.
//!
//! Every related line carries `S + 1` evenly spaced points between its two
//! anchors' effective positions. Point `k` of one line is joined to point `k`
//! of the other; the fan of straight joins reads as a curve.

use glam::Vec3;
use log::trace;

use super::Floater;

/// Point `k` of `segment_count` divisions from `start` to `end`
///
/// Endpoints are returned exactly. With zero segments every point collapses
/// onto `start`.
pub fn interpolate(start: Vec3, end: Vec3, k: usize, segment_count: usize) -> Vec3 {
    if segment_count == 0 || k == 0 {
        return start;
    }
    if k >= segment_count {
        return end;
    }
    let t = k as f32 / segment_count as f32;
    start + (end - start) * t
}

impl Floater {
    /// Recompute every connector point from current anchor state
    ///
    /// A full recompute, never incremental, so the result depends only on
    /// anchor positions and jitter.
    pub fn recompute_segments(&mut self) {
        let anchors = &self.anchors;
        let mut updated = 0;

        for line in &mut self.lines {
            let Some(segment_count) = line.segment_count() else {
                continue;
            };
            let start = anchors[line.anchor1].effective_position();
            let end = anchors[line.anchor2].effective_position();

            for (k, point) in line.connector_points.iter_mut().enumerate() {
                *point = interpolate(start, end, k, segment_count);
            }
            updated += 1;
        }

        trace!("Recomputed connectors on {} lines", updated);
    }

    /// Connector joins of one relationship: `(line1[k], line2[k])` for `k` in `0..=S`
    pub fn connectors(
        &self,
        relationship: usize,
    ) -> Option<impl Iterator<Item = (Vec3, Vec3)> + '_> {
        let relationship = self.relationships.get(relationship)?;
        let points1 = self.lines[relationship.line1].connector_points();
        let points2 = self.lines[relationship.line2].connector_points();
        Some(points1.iter().copied().zip(points2.iter().copied()))
    }
}
