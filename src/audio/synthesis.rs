//! Procedural tune used as a jitter source when no recording is given.

use glicol::Engine;

use super::source::SignalSource;
use crate::error::AudioError;
use crate::params::audio_constants::BLOCK_SIZE;

/// Glicol composition (procedural music code)
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 4.0 >> seq 60 _60 _~a 48
~a: choose 48 55 60 72 0 0
~amp: ~gate >> envperc 0.002 0.2
~pit: ~gate >> mul 130.81
~lead: saw ~pit >> mul ~amp >> lpf ~mod 3.0 >> mul 0.2
~mod: sin 0.5 >> mul 900 >> add 1100
o: ~lead >> plate 0.2
"#;

/// Glicol engine rendered block by block into mono samples
pub struct SynthSource {
    engine: Engine<BLOCK_SIZE>,
    pending: Vec<f32>,
    sample_rate: u32,
}

impl SynthSource {
    /// Start the engine on the built-in composition
    pub fn new(sample_rate_hz: usize) -> Result<Self, AudioError> {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate_hz);
        engine.update_with_code(GLICOL_COMPOSITION);
        engine
            .update()
            .map_err(|e| AudioError::Synthesis(format!("{:?}", e)))?;

        Ok(Self {
            engine,
            pending: Vec::with_capacity(BLOCK_SIZE * 2),
            sample_rate: sample_rate_hz as u32,
        })
    }
}

impl SignalSource for SynthSource {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn next_block(&mut self, out: &mut [f32]) -> usize {
        // Generate multiple blocks if needed to fill the entire buffer
        while self.pending.len() < out.len() {
            let (buffers, _) = self.engine.next_block(vec![]);
            for i in 0..BLOCK_SIZE {
                // Left channel only, hard clipped like the speaker-safe limiter
                self.pending.push(buffers[0][i].clamp(-0.5, 0.5));
            }
        }

        out.copy_from_slice(&self.pending[..out.len()]);
        self.pending.drain(..out.len());
        out.len()
    }
}
