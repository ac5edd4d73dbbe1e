//! Anchor points: bounded random-walk motion and audio jitter.

use glam::Vec3;
use log::{debug, trace};
use rand::Rng;

use super::Floater;
use crate::error::{FloaterError, Result};

/// A moving point in the field
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Dense slot number, always equal to the anchor's position in the floater
    pub index: usize,

    /// Unjittered position (field units)
    pub position: Vec3,

    /// Transient offset from the audio signal, overwritten each time it is applied
    pub jitter: Vec3,

    /// Signed speed per axis (field units per tick)
    pub velocity: Vec3,
}

impl Anchor {
    pub fn new(index: usize, position: Vec3, velocity: Vec3) -> Self {
        Self {
            index,
            position,
            jitter: Vec3::ZERO,
            velocity,
        }
    }

    /// Position the anchor is drawn at: `position + jitter`
    pub fn effective_position(&self) -> Vec3 {
        self.position + self.jitter
    }

    /// Move one tick along the first `dims` axes, bouncing off the field walls
    ///
    /// The wall check happens before the move, so an anchor may overshoot a
    /// wall by up to one step before it turns around.
    pub fn advance(&mut self, field: Vec3, dims: usize) {
        for d in 0..dims {
            let half = field[d] / 2.0;
            if self.position[d] >= half || self.position[d] <= -half {
                self.velocity[d] = -self.velocity[d];
            }
            self.position[d] += self.velocity[d];
        }
    }
}

impl Floater {
    /// Advance every anchor one tick
    pub fn advance(&mut self) {
        let dims = self.dimensions.count();
        for anchor in &mut self.anchors {
            anchor.advance(self.field, dims);
        }
        trace!("Advanced {} anchors", self.anchors.len());
    }

    /// Set every anchor's jitter from a byte spectrum
    ///
    /// Fails without touching any anchor when the signal is too short for
    /// the configured bins, or when the stride pushes a bin past `usize`.
    pub fn apply_jitter(&mut self, signal: &[u8]) -> Result<()> {
        let dims = self.dimensions.count();
        let Some(last) = self.anchors.len().checked_sub(1) else {
            return Ok(());
        };

        // Bin offsets grow with the index, so the last anchor reads the highest bin
        let required = self.jitter_mapping.highest_bin(last, dims).ok_or_else(|| {
            FloaterError::JitterMapping(format!(
                "stride {} overflows the bin index for anchor {}",
                self.jitter_mapping.anchor_stride, last
            ))
        })?;
        if required >= signal.len() {
            return Err(FloaterError::SignalTooShort {
                len: signal.len(),
                required,
            });
        }

        let mapping = &self.jitter_mapping;
        for anchor in &mut self.anchors {
            let offset = anchor.index * mapping.anchor_stride;
            for d in 0..dims {
                anchor.jitter[d] = mapping.transform(signal[mapping.bins[d] + offset]);
            }
        }
        Ok(())
    }

    /// Reset all jitter to zero
    pub fn clear_jitter(&mut self) {
        for anchor in &mut self.anchors {
            anchor.jitter = Vec3::ZERO;
        }
    }

    /// Place a new anchor at a random whole-unit position with a random velocity
    ///
    /// Returns the new anchor's index.
    pub fn create_anchor(&mut self) -> usize {
        let dims = self.dimensions.count();
        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;

        for d in 0..dims {
            let extent = self.field[d];
            position[d] = (self.rng.random::<f32>() * extent - extent / 2.0).round();
            if self.max_speed > 0.0 {
                velocity[d] = self.rng.random_range(-self.max_speed..self.max_speed);
            }
        }

        self.push_anchor(position, velocity)
    }

    /// Add an anchor at an explicit position and velocity
    ///
    /// Inactive axes are zeroed and the position is clamped into the field.
    /// Returns the new anchor's index.
    pub fn insert_anchor(&mut self, mut position: Vec3, mut velocity: Vec3) -> usize {
        if self.dimensions.count() == 2 {
            position.z = 0.0;
            velocity.z = 0.0;
        }
        let half = self.field / 2.0;
        position = position.clamp(-half, half);
        self.push_anchor(position, velocity)
    }

    fn push_anchor(&mut self, position: Vec3, velocity: Vec3) -> usize {
        let index = self.anchors.len();
        self.anchors.push(Anchor::new(index, position, velocity));
        debug!("Created anchor {} at {:?}", index, position);
        index
    }
}
