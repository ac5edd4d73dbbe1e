//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::error::FloaterError;
use crate::params::{Dimensions, DriverConfig, FloaterConfig, JitterMapping, SegmentSpec};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "floater")]
#[command(about = "Generative line designs: drifting anchors joined by connector curves", long_about = None)]
pub struct Args {
    /// Active dimensions: 2 or 3
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub dimensions: usize,

    /// Field width (field units)
    #[arg(long, value_name = "UNITS", default_value_t = 800.0)]
    pub field_width: f32,

    /// Field height, also used as depth (field units)
    #[arg(long, value_name = "UNITS", default_value_t = 800.0)]
    pub field_height: f32,

    /// Anchors placed at start
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    pub anchors: usize,

    /// Line between two anchors, e.g. "01" or "10-12" (repeatable)
    #[arg(long = "line", value_name = "PAIR", default_values = ["01", "12"])]
    pub lines: Vec<String>,

    /// Relationship between two lines, e.g. "01" (repeatable)
    #[arg(long = "relationship", value_name = "PAIR", default_values = ["01"])]
    pub relationships: Vec<String>,

    /// Segments: one count for all relationships, or one per relationship ("4/16")
    #[arg(long, value_name = "COUNTS", default_value = "10", value_parser = parse_segments)]
    pub segments: SegmentSpec,

    /// Largest per-axis anchor speed (field units per frame)
    #[arg(long, value_name = "UNITS", default_value_t = 1.0)]
    pub max_speed: f32,

    /// Spectrum bin offset per anchor (0 = all anchors jitter together)
    #[arg(long, value_name = "BINS", default_value_t = 0)]
    pub jitter_stride: usize,

    /// RNG seed for reproducible placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Jitter source: synth, silent, or a path to a WAV file
    #[arg(long, value_name = "SOURCE", default_value = "synth")]
    pub source: String,

    /// Frames to simulate
    #[arg(long, value_name = "COUNT", default_value_t = 600)]
    pub frames: usize,

    /// Frame rate (FPS)
    #[arg(long, value_name = "FPS", default_value_t = 60)]
    pub fps: u32,

    /// Log a report every N frames (0 = only at the end)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub report_every: usize,

    /// Change the anchor count at a frame, e.g. "120:5" (repeatable)
    #[arg(long = "retarget", value_name = "FRAME:COUNT", value_parser = parse_retarget)]
    pub retargets: Vec<(usize, usize)>,
}

/// Where the jitter signal comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SourceKind {
    Synth,
    Silent,
    Wav(PathBuf),
}

impl Args {
    /// Build the floater configuration from command-line arguments
    pub fn floater_config(&self) -> Result<FloaterConfig, FloaterError> {
        Ok(FloaterConfig {
            dimensions: Dimensions::try_from(self.dimensions)?,
            field_width: self.field_width,
            field_height: self.field_height,
            anchors: self.anchors,
            lines_between: self.lines.clone(),
            segments: self.segments.clone(),
            relationships_between: self.relationships.clone(),
            max_speed: self.max_speed,
            jitter: JitterMapping {
                anchor_stride: self.jitter_stride,
                ..Default::default()
            },
            seed: self.seed,
        })
    }

    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            frames: self.frames,
            fps: self.fps,
            report_every: self.report_every,
        }
    }

    /// Parse jitter source from command-line arguments
    pub fn source_kind(&self) -> SourceKind {
        match self.source.to_lowercase().as_str() {
            "synth" => SourceKind::Synth,
            "silent" | "silence" | "none" => SourceKind::Silent,
            _ => SourceKind::Wav(PathBuf::from(&self.source)),
        }
    }

    /// Anchor count to switch to at `frame`, if any (last entry wins)
    pub fn retarget_at(&self, frame: usize) -> Option<usize> {
        self.retargets
            .iter()
            .rev()
            .find(|(at, _)| *at == frame)
            .map(|(_, count)| *count)
    }
}

/// "10" → shared count, "4/16/8" → one count per relationship
fn parse_segments(text: &str) -> Result<SegmentSpec, String> {
    let counts = text
        .split('/')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid segment count '{}': {}", part, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match counts[..] {
        [count] => Ok(SegmentSpec::Shared(count)),
        _ => Ok(SegmentSpec::PerRelationship(counts)),
    }
}

fn parse_retarget(text: &str) -> Result<(usize, usize), String> {
    let (frame, count) = text
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:COUNT, got '{}'", text))?;
    let frame = frame
        .trim()
        .parse()
        .map_err(|e| format!("invalid frame '{}': {}", frame, e))?;
    let count = count
        .trim()
        .parse()
        .map_err(|e| format!("invalid anchor count '{}': {}", count, e))?;
    Ok((frame, count))
}
