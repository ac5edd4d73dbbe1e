//! Error types for the floater model and its signal sources.

use thiserror::Error;

/// Errors raised by construction and structural edits of a [`Floater`](crate::floater::Floater)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FloaterError {
    /// Only 2-D and 3-D floaters exist
    #[error("Unsupported dimension count {0} (expected 2 or 3)")]
    Dimensions(usize),

    /// Field extents must be positive and finite
    #[error("Invalid field extent {0} (must be positive and finite)")]
    FieldExtent(f32),

    /// Anchor speed bound must be non-negative and finite
    #[error("Invalid max speed {0} (must be non-negative and finite)")]
    MaxSpeed(f32),

    /// Index pair string could not be parsed
    #[error("Malformed index pair '{0}' (expected two digits like \"01\" or two numbers like \"10-12\")")]
    MalformedPair(String),

    /// Anchor index does not refer to a live anchor
    #[error("Anchor {index} out of range ({count} anchors)")]
    AnchorOutOfRange { index: usize, count: usize },

    /// Line index does not refer to a live line
    #[error("Line {index} out of range ({count} lines)")]
    LineOutOfRange { index: usize, count: usize },

    /// Relationship index does not refer to a live relationship
    #[error("Relationship {index} out of range ({count} relationships)")]
    RelationshipOutOfRange { index: usize, count: usize },

    /// A line cannot be related to itself
    #[error("Line {0} cannot be related to itself")]
    SelfRelationship(usize),

    /// Segment counts must be at least one
    #[error("Segment count must be at least 1")]
    ZeroSegments,

    /// A line already carries connector points for another segment count
    #[error("Line {line} already has {existing} segments, relationship requested {requested}")]
    SegmentMismatch {
        line: usize,
        existing: usize,
        requested: usize,
    },

    /// Per-relationship segment list does not match the relationship list
    #[error("{segments} segment counts given for {relationships} relationships")]
    SegmentListLength {
        segments: usize,
        relationships: usize,
    },

    /// Jitter signal is shorter than the highest bin the mapping reads
    #[error("Jitter signal has {len} bins, bin {required} is required")]
    SignalTooShort { len: usize, required: usize },

    /// Jitter mapping parameters are unusable
    #[error("Invalid jitter mapping: {0}")]
    JitterMapping(String),
}

/// Errors raised by signal sources and the spectrum analyser
#[derive(Error, Debug)]
pub enum AudioError {
    /// Spectrum configuration rejected by validation
    #[error("Invalid spectrum config: {0}")]
    SpectrumConfig(String),

    /// WAV file could not be opened or decoded
    #[error("WAV decoding failed: {0}")]
    Wav(#[from] hound::Error),

    /// WAV file holds no samples
    #[error("WAV file '{0}' contains no samples")]
    EmptyWav(String),

    /// Synthesis engine failed to start
    #[error("Synthesis engine init failed: {0}")]
    Synthesis(String),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, FloaterError>;
