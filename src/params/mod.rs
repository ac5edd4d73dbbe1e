//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (field units, ticks, Hz, dB)
//! - Documented ranges and meanings
//! - Validation where a bad value would break the model

mod audio;
mod driver;
mod floater;

// Re-export all types
pub use audio::{audio_constants, SpectrumConfig};
pub use driver::DriverConfig;
pub use floater::{Dimensions, FloaterConfig, JitterMapping, SegmentSpec};
