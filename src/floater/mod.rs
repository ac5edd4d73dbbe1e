//! Floater geometry: anchors, lines, relationships, and connector points.
//!
//! Anchors drift through a bounded field. Lines join pairs of anchors.
//! Related lines carry evenly spaced connector points, and joining point `k`
//! of one line to point `k` of the other draws a parabolic-looking fan out of
//! straight lines only.

mod anchor;
mod edit;
mod line;
mod pairs;
mod segments;

use std::fmt;

use glam::Vec3;
use log::{info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::params::{Dimensions, FloaterConfig, JitterMapping};

// Re-export public types
pub use anchor::Anchor;
pub use line::{Cascade, Line, Relationship};
pub use pairs::parse_pair;
pub use segments::interpolate;

/// The geometry model
///
/// Exclusively owned by the driver; every public operation leaves indices
/// dense and references resolvable.
pub struct Floater {
    dimensions: Dimensions,
    field: Vec3,
    max_speed: f32,
    jitter_mapping: JitterMapping,
    anchors: Vec<Anchor>,
    lines: Vec<Line>,
    relationships: Vec<Relationship>,
    rng: StdRng,
}

impl Floater {
    /// Build a floater from configuration
    ///
    /// Anchors are placed randomly, then lines and relationships are created
    /// from their index pairs. Any malformed or out-of-range pair fails the
    /// whole construction.
    pub fn new(config: FloaterConfig) -> Result<Self> {
        config.validate()?;

        let mut floater = Self::empty(config.dimensions, config.field_extent(), config.seed);
        floater.max_speed = config.max_speed;
        floater.jitter_mapping = config.jitter.clone();

        for _ in 0..config.anchors {
            floater.create_anchor();
        }

        for pair in &config.lines_between {
            let (anchor1, anchor2) = parse_pair(pair)?;
            floater.create_line(anchor1, anchor2)?;
        }

        for (index, pair) in config.relationships_between.iter().enumerate() {
            let (line1, line2) = parse_pair(pair)?;
            let segment_count = config
                .segments
                .for_relationship(index, config.relationships_between.len())?;
            floater.create_relationship(line1, line2, segment_count)?;
        }

        info!(
            "Floater ready: {}D, {} anchors, {} lines, {} relationships",
            floater.dimensions.count(),
            floater.anchors.len(),
            floater.lines.len(),
            floater.relationships.len()
        );
        Ok(floater)
    }

    /// A floater with no anchors, lines, or relationships
    pub fn empty(dimensions: Dimensions, field: Vec3, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut field = field;
        if dimensions == Dimensions::Two {
            field.z = 0.0;
        }

        Self {
            dimensions,
            field,
            max_speed: 1.0,
            jitter_mapping: JitterMapping::default(),
            anchors: Vec::new(),
            lines: Vec::new(),
            relationships: Vec::new(),
            rng,
        }
    }

    /// One animation tick: jitter, move, recompute connectors
    ///
    /// Without a signal the tick runs unjittered.
    pub fn tick(&mut self, signal: Option<&[u8]>) -> Result<()> {
        match signal {
            Some(signal) => self.apply_jitter(signal)?,
            None => self.clear_jitter(),
        }
        self.advance();
        self.recompute_segments();
        trace!("Tick complete");
        Ok(())
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Field extents per axis (zero depth in 2-D)
    pub fn field(&self) -> Vec3 {
        self.field
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Drawn position of an anchor
    pub fn effective_position(&self, anchor: usize) -> Option<Vec3> {
        self.anchors.get(anchor).map(Anchor::effective_position)
    }

    /// Drawn endpoints of a line
    pub fn line_endpoints(&self, line: usize) -> Option<(Vec3, Vec3)> {
        let line = self.lines.get(line)?;
        Some((
            self.anchors[line.anchor1].effective_position(),
            self.anchors[line.anchor2].effective_position(),
        ))
    }

    /// Total connector joins across all relationships
    pub fn connector_count(&self) -> usize {
        self.relationships
            .iter()
            .map(|rel| rel.segment_count + 1)
            .sum()
    }
}

impl fmt::Display for Floater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Floater ({}D, field {:.0} x {:.0} x {:.0})",
            self.dimensions.count(),
            self.field.x,
            self.field.y,
            self.field.z
        )?;

        writeln!(f, "Anchors: {}", self.anchors.len())?;
        for anchor in &self.anchors {
            let p = anchor.effective_position();
            let v = anchor.velocity;
            writeln!(
                f,
                "  #{:<3} at ({:8.2}, {:8.2}, {:8.2})  velocity ({:5.2}, {:5.2}, {:5.2})",
                anchor.index, p.x, p.y, p.z, v.x, v.y, v.z
            )?;
        }

        writeln!(f, "Lines: {}", self.lines.len())?;
        for line in &self.lines {
            let segments = line
                .segment_count()
                .map_or_else(|| "unrelated".to_string(), |s| format!("{} segments", s));
            writeln!(
                f,
                "  #{:<3} anchor {} -> anchor {} ({})",
                line.index, line.anchor1, line.anchor2, segments
            )?;
        }

        write!(f, "Relationships: {}", self.relationships.len())?;
        for (index, rel) in self.relationships.iter().enumerate() {
            write!(
                f,
                "\n  #{:<3} line {} <-> line {} ({} segments)",
                index, rel.line1, rel.line2, rel.segment_count
            )?;
        }
        Ok(())
    }
}
