//! Sample sources feeding the spectrum analyser.

use std::path::Path;

use log::info;

use crate::error::AudioError;

/// Anything that can hand out mono samples block by block
pub trait SignalSource {
    /// Sample rate (Hz)
    fn sample_rate(&self) -> u32;

    /// Fill `out` with the next samples, returning how many were written
    fn next_block(&mut self, out: &mut [f32]) -> usize;
}

/// A source that never makes a sound
#[derive(Debug, Clone)]
pub struct Silence {
    sample_rate: u32,
}

impl Silence {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl SignalSource for Silence {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn next_block(&mut self, out: &mut [f32]) -> usize {
        out.fill(0.0);
        out.len()
    }
}

/// A WAV file decoded up front, mixed to mono, played on a loop
#[derive(Debug, Clone)]
pub struct WavSource {
    samples: Vec<f32>,
    position: usize,
    sample_rate: u32,
}

impl WavSource {
    /// Decode a WAV file (integer or float samples, any channel count)
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|sample| sample.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()?
            }
        };

        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();
        if samples.is_empty() {
            return Err(AudioError::EmptyWav(path.display().to_string()));
        }

        info!(
            "Audio: {} ({} Hz, {} channels, {:.1}s)",
            path.display(),
            spec.sample_rate,
            channels,
            samples.len() as f32 / spec.sample_rate as f32
        );
        Ok(Self::from_samples(samples, spec.sample_rate))
    }

    /// Wrap already-decoded mono samples
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            position: 0,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SignalSource for WavSource {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn next_block(&mut self, out: &mut [f32]) -> usize {
        if self.samples.is_empty() {
            out.fill(0.0);
            return out.len();
        }
        for sample in out.iter_mut() {
            *sample = self.samples[self.position];
            self.position = (self.position + 1) % self.samples.len();
        }
        out.len()
    }
}
