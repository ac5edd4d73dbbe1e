//! Floater library - generative line designs from drifting anchors

pub mod audio;
pub mod cli;
pub mod error;
pub mod floater;
pub mod mesh;
pub mod params;
