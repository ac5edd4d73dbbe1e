//! Spectrum analysis configuration and constants.

/// Byte spectrum analysis configuration
///
/// Produces `fft_size / 2` bins of energy in `[0, 255]`, the jitter signal
/// the floater samples each frame.
#[derive(Debug, Clone)]
pub struct SpectrumConfig {
    /// FFT window size (must be power of 2)
    /// 32 = 16 coarse bins, enough for three jitter axes
    pub fft_size: usize,

    /// Temporal smoothing of bin magnitudes (0 = none, towards 1 = sluggish)
    pub smoothing: f32,

    /// Decibel level mapped to byte 0
    pub min_decibels: f32,

    /// Decibel level mapped to byte 255
    pub max_decibels: f32,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            fft_size: 32,
            smoothing: 0.95,
            min_decibels: -70.0,
            max_decibels: -10.0,
        }
    }
}

impl SpectrumConfig {
    /// Number of output bins
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if self.fft_size < 2 || !self.fft_size.is_power_of_two() {
            return Err(format!(
                "FFT size must be a power of 2 and at least 2, got {}",
                self.fft_size
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(format!(
                "Smoothing must be in [0, 1), got {}",
                self.smoothing
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            ));
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;

    /// Sample rate used for synthesized signals (Hz)
    pub const SYNTH_SAMPLE_RATE_HZ: usize = 44100;
}
