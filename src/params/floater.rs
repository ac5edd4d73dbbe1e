//! Floater construction parameters and audio-jitter mapping.

use glam::Vec3;

use crate::error::{FloaterError, Result};

/// Number of active dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimensions {
    /// Flat floater, `z` is pinned at zero
    Two,
    /// Full cuboid field
    #[default]
    Three,
}

impl Dimensions {
    /// Number of active axes (2 or 3)
    pub fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<usize> for Dimensions {
    type Error = FloaterError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(FloaterError::Dimensions(other)),
        }
    }
}

/// How many segments each relationship gets
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentSpec {
    /// Every relationship uses the same count
    Shared(usize),
    /// One count per entry of `relationships_between`, in order
    PerRelationship(Vec<usize>),
}

impl Default for SegmentSpec {
    fn default() -> Self {
        Self::Shared(10)
    }
}

impl SegmentSpec {
    /// Segment count for the relationship at `index` of `relationships`
    pub fn for_relationship(&self, index: usize, relationships: usize) -> Result<usize> {
        match self {
            Self::Shared(count) => Ok(*count),
            Self::PerRelationship(counts) => {
                counts
                    .get(index)
                    .copied()
                    .ok_or(FloaterError::SegmentListLength {
                        segments: counts.len(),
                        relationships,
                    })
            }
        }
    }
}

/// Mapping from byte spectrum bins to anchor jitter
///
/// Formula: `jitter[d] = signal[bins[d] + anchor_index * anchor_stride] ^ exponent / divisor`
#[derive(Debug, Clone, PartialEq)]
pub struct JitterMapping {
    /// Spectrum bin sampled for each axis (x, y, z)
    pub bins: [usize; 3],

    /// Bin offset added per anchor index (0 = all anchors share one jitter)
    pub anchor_stride: usize,

    /// Power applied to the raw byte value
    /// 3 turns quiet bins into near-zero and loud bins into visible kicks
    pub exponent: i32,

    /// Scale-down divisor (field units per unit of `value^exponent`)
    /// 255^3 / 50000 ≈ 332 units at full energy
    pub divisor: f32,
}

impl Default for JitterMapping {
    fn default() -> Self {
        Self {
            bins: [0, 7, 15],
            anchor_stride: 0,
            exponent: 3,
            divisor: 50_000.0,
        }
    }
}

impl JitterMapping {
    /// Highest bin read for an anchor at `anchor_index` over the first `dims` axes
    ///
    /// `None` when the bin offset does not fit in `usize`.
    pub fn highest_bin(&self, anchor_index: usize, dims: usize) -> Option<usize> {
        let top = self.bins[..dims].iter().max().copied().unwrap_or(0);
        anchor_index
            .checked_mul(self.anchor_stride)
            .and_then(|offset| top.checked_add(offset))
    }

    /// Jitter offset for one byte sample
    pub fn transform(&self, value: u8) -> f32 {
        (value as f32).powi(self.exponent) / self.divisor
    }

    pub fn validate(&self) -> Result<()> {
        if !self.divisor.is_finite() || self.divisor == 0.0 {
            return Err(FloaterError::JitterMapping(format!(
                "divisor must be finite and non-zero, got {}",
                self.divisor
            )));
        }
        if self.exponent < 0 {
            return Err(FloaterError::JitterMapping(format!(
                "exponent must be non-negative, got {}",
                self.exponent
            )));
        }
        Ok(())
    }
}

/// Construction configuration for a floater
#[derive(Debug, Clone)]
pub struct FloaterConfig {
    /// Active dimensions (default 3)
    pub dimensions: Dimensions,

    /// Field width in field units (x extent)
    pub field_width: f32,

    /// Field height in field units (y extent, also used for z)
    pub field_height: f32,

    /// Anchors placed at construction
    pub anchors: usize,

    /// Anchor index pairs, one line each (e.g. "01" = anchor 0 to anchor 1)
    pub lines_between: Vec<String>,

    /// Segment counts for `relationships_between`
    pub segments: SegmentSpec,

    /// Line index pairs, one relationship each
    pub relationships_between: Vec<String>,

    /// Largest per-axis speed drawn for a new anchor (field units per tick)
    pub max_speed: f32,

    /// Audio jitter mapping
    pub jitter: JitterMapping,

    /// RNG seed (None = OS entropy)
    pub seed: Option<u64>,
}

impl Default for FloaterConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::Three,
            field_width: 800.0,
            field_height: 800.0,
            anchors: 3,
            lines_between: vec!["01".to_string(), "12".to_string()],
            segments: SegmentSpec::default(),
            relationships_between: vec!["01".to_string()],
            max_speed: 1.0,
            jitter: JitterMapping::default(),
            seed: None,
        }
    }
}

impl FloaterConfig {
    /// Field extents per axis (depth matches height)
    pub fn field_extent(&self) -> Vec3 {
        Vec3::new(self.field_width, self.field_height, self.field_height)
    }

    /// Validate scalar parameters (index pairs are checked during construction)
    pub fn validate(&self) -> Result<()> {
        for extent in [self.field_width, self.field_height] {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(FloaterError::FieldExtent(extent));
            }
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(FloaterError::MaxSpeed(self.max_speed));
        }
        if let SegmentSpec::PerRelationship(counts) = &self.segments {
            if counts.len() != self.relationships_between.len() {
                return Err(FloaterError::SegmentListLength {
                    segments: counts.len(),
                    relationships: self.relationships_between.len(),
                });
            }
        }
        self.jitter.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_from_count() {
        assert_eq!(Dimensions::try_from(2), Ok(Dimensions::Two));
        assert_eq!(Dimensions::try_from(3), Ok(Dimensions::Three));
        assert_eq!(Dimensions::try_from(4), Err(FloaterError::Dimensions(4)));
        assert_eq!(Dimensions::default().count(), 3);
    }

    #[test]
    fn test_jitter_transform_cubes_and_scales() {
        let mapping = JitterMapping::default();
        assert_eq!(mapping.transform(0), 0.0);
        assert_eq!(mapping.transform(10), 1000.0 / 50_000.0);
        assert!(mapping.transform(255) > 300.0);
    }

    #[test]
    fn test_jitter_highest_bin() {
        let mut mapping = JitterMapping::default();
        assert_eq!(mapping.highest_bin(5, 3), Some(15));
        assert_eq!(mapping.highest_bin(5, 2), Some(7));

        mapping.anchor_stride = 1;
        assert_eq!(mapping.highest_bin(5, 3), Some(20));
    }

    #[test]
    fn test_jitter_highest_bin_overflow() {
        let mapping = JitterMapping {
            anchor_stride: usize::MAX,
            ..Default::default()
        };
        assert_eq!(mapping.highest_bin(0, 3), Some(15));
        assert_eq!(mapping.highest_bin(1, 3), None);
        assert_eq!(mapping.highest_bin(2, 2), None);
    }

    #[test]
    fn test_segment_count_lookup() {
        assert_eq!(SegmentSpec::Shared(6).for_relationship(4, 5), Ok(6));

        let listed = SegmentSpec::PerRelationship(vec![4, 8]);
        assert_eq!(listed.for_relationship(1, 3), Ok(8));
        assert_eq!(
            listed.for_relationship(2, 3),
            Err(FloaterError::SegmentListLength {
                segments: 2,
                relationships: 3
            })
        );
    }

    #[test]
    fn test_segment_list_length_validated() {
        let config = FloaterConfig {
            segments: SegmentSpec::PerRelationship(vec![4, 8]),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(FloaterError::SegmentListLength {
                segments: 2,
                relationships: 1
            })
        );
    }

    #[test]
    fn test_field_extent_validated() {
        let config = FloaterConfig {
            field_width: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(FloaterError::FieldExtent(0.0)));
        assert!(FloaterConfig::default().validate().is_ok());
    }
}
