//! Spectrum visualization
//!
//! `sampler` turns raw frequency captures into normalized bar magnitudes,
//! `engine` animates bar geometry frame by frame, `theme` maps bars to
//! colors.

mod engine;
mod sampler;
mod theme;

pub use engine::{BarGeometry, BarState, Visualizer, VisualizerConfig};
pub use sampler::sample;
pub use theme::{hsv_to_rgb, Rgb, Theme};
