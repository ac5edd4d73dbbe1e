//! Byte spectrum analysis: audio samples in, `[0, 255]` energy per bin out.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::error::AudioError;
use crate::params::SpectrumConfig;

/// Windowed FFT with temporal smoothing and decibel-to-byte mapping
pub struct SpectrumAnalyser {
    config: SpectrumConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl SpectrumAnalyser {
    /// Create analyser with specified configuration
    pub fn new(config: SpectrumConfig) -> Result<Self, AudioError> {
        config.validate().map_err(AudioError::SpectrumConfig)?;

        let size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let window = (0..size).map(|i| hann_window(i, size)).collect();

        Ok(Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; config.bin_count()],
            bytes: vec![0; config.bin_count()],
            config,
        })
    }

    /// Analyse the most recent `fft_size` samples and return the byte spectrum
    ///
    /// Fewer samples than `fft_size` are zero-padded at the front.
    pub fn analyse(&mut self, samples: &[f32]) -> &[u8] {
        let size = self.config.fft_size;
        let tail = &samples[samples.len().saturating_sub(size)..];
        let pad = size - tail.len();

        // Apply Hann window
        for i in 0..size {
            let sample = if i < pad { 0.0 } else { tail[i - pad] };
            self.buffer[i] = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let smoothing = self.config.smoothing;
        let range_db = self.config.max_decibels - self.config.min_decibels;
        for (bin, (smoothed, byte)) in self
            .smoothed
            .iter_mut()
            .zip(self.bytes.iter_mut())
            .enumerate()
        {
            let magnitude = self.buffer[bin].norm() / size as f32;
            *smoothed = smoothing * *smoothed + (1.0 - smoothing) * magnitude;

            let db = 20.0 * smoothed.log10();
            let scaled = (db - self.config.min_decibels) / range_db * 255.0;
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }

        &self.bytes
    }

    /// Byte spectrum from the last analysis
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Forget smoothing history
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.bytes.fill(0);
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}
