//! Floater - generative line designs
//!
//! Anchors drift through a bounded field, nudged by the spectrum of a sound
//! source; lines between them and the connector fans of related lines are
//! recomputed every frame. This binary runs the animation headless and
//! prints the resulting structure.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use floater::audio::{JitterFeed, Silence, SignalSource, WavSource};
use floater::cli::{Args, SourceKind};
use floater::error::FloaterError;
use floater::floater::Floater;
use floater::mesh::FloaterMesh;
use floater::params::{audio_constants, SpectrumConfig};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args
        .floater_config()
        .context("Invalid floater configuration")?;
    let driver = args.driver_config();

    let mut floater = Floater::new(config).context("Failed to build floater")?;
    let mut mesh = FloaterMesh::new(&floater);

    let source = open_source(&args.source_kind())?;
    let samples_per_frame = driver.samples_per_frame(source.sample_rate());
    let mut feed = JitterFeed::new(source, SpectrumConfig::default(), samples_per_frame)
        .context("Failed to start jitter feed")?;

    info!(
        "Running {} frames ({:.1}s at {} FPS, {} samples per frame)",
        driver.frames,
        driver.duration_secs(),
        driver.fps,
        samples_per_frame
    );

    for frame in 0..driver.frames {
        if let Some(target) = args.retarget_at(frame) {
            let cascade = floater
                .reconcile_anchor_count(target)
                .with_context(|| format!("Failed to retarget to {} anchors", target))?;
            info!(
                "Frame {}: {} anchors ({} anchors, {} lines, {} relationships removed)",
                frame,
                target,
                cascade.anchors.len(),
                cascade.lines.len(),
                cascade.relationships.len()
            );
        }

        let signal = feed.next_frame();
        match floater.tick(Some(signal)) {
            Ok(()) => {}
            Err(err @ FloaterError::SignalTooShort { .. }) => {
                warn!("Frame {}: {}; moving without jitter", frame, err);
                floater.tick(None)?;
            }
            Err(err) => return Err(err.into()),
        }

        if mesh.update(&floater) {
            debug!(
                "Frame {}: mesh rebuilt ({} anchor vertices, {} connector vertices)",
                frame,
                mesh.anchor_lines.len(),
                mesh.connector_lines.len()
            );
        }

        if driver.report_due(frame) {
            info!("Frame {}:\n{}", frame + 1, floater);
        }
    }

    println!("{}", floater);
    println!(
        "Mesh: {} anchor vertices ({} bytes), {} connector vertices ({} bytes)",
        mesh.anchor_lines.len(),
        mesh.anchor_bytes().len(),
        mesh.connector_lines.len(),
        mesh.connector_bytes().len()
    );
    Ok(())
}

/// Open the requested jitter source
fn open_source(kind: &SourceKind) -> Result<Box<dyn SignalSource>> {
    match kind {
        SourceKind::Silent => Ok(Box::new(Silence::new(
            audio_constants::SYNTH_SAMPLE_RATE_HZ as u32,
        ))),
        SourceKind::Wav(path) => {
            let source = WavSource::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(source))
        }
        SourceKind::Synth => open_synth(),
    }
}

#[cfg(feature = "synth")]
fn open_synth() -> Result<Box<dyn SignalSource>> {
    let source = floater::audio::SynthSource::new(audio_constants::SYNTH_SAMPLE_RATE_HZ)
        .context("Failed to start synthesizer")?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "synth"))]
fn open_synth() -> Result<Box<dyn SignalSource>> {
    anyhow::bail!("Built without the \"synth\" feature; use --source silent or a WAV path")
}
