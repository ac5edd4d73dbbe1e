//! Headless driver configuration.

/// Frame loop settings for the headless driver
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Frames to simulate
    pub frames: usize,

    /// Frame rate (FPS), sets how many audio samples feed each tick
    pub fps: u32,

    /// Log a report every this many frames (0 = only at the end)
    pub report_every: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            fps: 60,
            report_every: 0,
        }
    }
}

impl DriverConfig {
    /// Audio samples consumed per frame at `sample_rate_hz`
    pub fn samples_per_frame(&self, sample_rate_hz: u32) -> usize {
        (sample_rate_hz as f32 / self.fps.max(1) as f32).ceil() as usize
    }

    /// Simulated duration (seconds)
    pub fn duration_secs(&self) -> f32 {
        self.frames as f32 / self.fps.max(1) as f32
    }

    /// Whether a report is due after `frame` (zero-based)
    pub fn report_due(&self, frame: usize) -> bool {
        self.report_every > 0 && (frame + 1) % self.report_every == 0
    }
}
