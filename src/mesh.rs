//! Line-list vertex buffers mirroring a floater for any line renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::floater::Floater;

/// Vertex data for line-list rendering (position only)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

impl From<Vec3> for LineVertex {
    fn from(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
        }
    }
}

/// Renderable mirror of a floater
///
/// Two vertices per segment: one buffer for the anchor-to-anchor lines, one
/// for the connector joins of every relationship.
#[derive(Debug, Default)]
pub struct FloaterMesh {
    pub anchor_lines: Vec<LineVertex>,
    pub connector_lines: Vec<LineVertex>,
}

impl FloaterMesh {
    /// Build buffers for the floater's current topology
    pub fn new(floater: &Floater) -> Self {
        let mut mesh = Self::default();
        mesh.update(floater);
        mesh
    }

    /// Copy current positions into the buffers
    ///
    /// Writes in place while the vertex counts still match; otherwise the
    /// buffers are rebuilt and `true` is returned.
    pub fn update(&mut self, floater: &Floater) -> bool {
        let anchor_count = floater.lines().len() * 2;
        let connector_count = floater.connector_count() * 2;

        if self.anchor_lines.len() == anchor_count && self.connector_lines.len() == connector_count
        {
            for (vertex, position) in self.anchor_lines.iter_mut().zip(anchor_positions(floater)) {
                vertex.position = position.to_array();
            }
            for (vertex, position) in self
                .connector_lines
                .iter_mut()
                .zip(connector_positions(floater))
            {
                vertex.position = position.to_array();
            }
            return false;
        }

        self.anchor_lines = anchor_positions(floater).map(LineVertex::from).collect();
        self.connector_lines = connector_positions(floater).map(LineVertex::from).collect();
        true
    }

    /// Raw bytes of the anchor-line buffer (for GPU upload)
    pub fn anchor_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.anchor_lines)
    }

    /// Raw bytes of the connector buffer (for GPU upload)
    pub fn connector_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.connector_lines)
    }
}

fn anchor_positions(floater: &Floater) -> impl Iterator<Item = Vec3> + '_ {
    (0..floater.lines().len())
        .filter_map(move |line| floater.line_endpoints(line))
        .flat_map(|(start, end)| [start, end])
}

fn connector_positions(floater: &Floater) -> impl Iterator<Item = Vec3> + '_ {
    (0..floater.relationships().len())
        .filter_map(move |rel| floater.connectors(rel))
        .flatten()
        .flat_map(|(p1, p2)| [p1, p2])
}
