//! Jitter signal production: sample sources and byte spectrum analysis.
//!
//! A source hands out one frame's worth of samples per tick; the analyser
//! turns the frame into the `[0, 255]` bins the floater samples for jitter.

mod source;
mod spectrum;
#[cfg(feature = "synth")]
mod synthesis;

use log::debug;

use crate::error::AudioError;
use crate::params::SpectrumConfig;

// Re-export public types
pub use source::{Silence, SignalSource, WavSource};
pub use spectrum::{hann_window, SpectrumAnalyser};
#[cfg(feature = "synth")]
pub use synthesis::{SynthSource, GLICOL_COMPOSITION};

/// A source paired with an analyser, producing one byte spectrum per frame
pub struct JitterFeed {
    source: Box<dyn SignalSource>,
    analyser: SpectrumAnalyser,
    frame: Vec<f32>,
}

impl JitterFeed {
    /// Feed reading `samples_per_frame` samples from `source` each frame
    pub fn new(
        source: Box<dyn SignalSource>,
        config: SpectrumConfig,
        samples_per_frame: usize,
    ) -> Result<Self, AudioError> {
        let analyser = SpectrumAnalyser::new(config)?;
        debug!(
            "Jitter feed: {} samples per frame at {} Hz",
            samples_per_frame,
            source.sample_rate()
        );
        Ok(Self {
            source,
            analyser,
            frame: vec![0.0; samples_per_frame.max(1)],
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    /// Pull the next frame of samples and analyse it
    pub fn next_frame(&mut self) -> &[u8] {
        let written = self.source.next_block(&mut self.frame);
        self.analyser.analyse(&self.frame[..written])
    }
}
