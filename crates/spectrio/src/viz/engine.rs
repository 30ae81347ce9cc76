//! Bar animation engine
//!
//! Holds per-bar animation state (smoothed height, decaying peak marker)
//! and turns a magnitude vector into drawable geometry once per frame.
//! The engine never blocks and never touches the session; hosts drive
//! `tick` from their render schedule.

use crate::config::{prefs, viz as cfg};
use crate::prefs::PrefStore;
use crate::viz::theme::{Rgb, Theme};

/// Tunable parameters of the bar animation
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    pub bar_count: usize,
    pub sensitivity: f32,
    pub theme: Theme,
    pub smoothing_factor: f32,
    pub peak_hold_frames: u32,
    pub peak_decay_per_frame: f32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            bar_count: cfg::DEFAULT_BAR_COUNT,
            sensitivity: prefs::DEFAULT_SENSITIVITY,
            theme: Theme::default(),
            smoothing_factor: cfg::DEFAULT_SMOOTHING,
            peak_hold_frames: cfg::DEFAULT_PEAK_HOLD_FRAMES,
            peak_decay_per_frame: cfg::DEFAULT_PEAK_DECAY,
        }
    }
}

impl VisualizerConfig {
    /// Defaults overlaid with the user's stored sensitivity and theme
    pub fn from_prefs(store: &dyn PrefStore) -> Self {
        let sensitivity = store
            .get_float(prefs::SENSITIVITY_KEY, prefs::DEFAULT_SENSITIVITY)
            .clamp(cfg::MIN_SENSITIVITY, cfg::MAX_SENSITIVITY);
        let theme = Theme::from_name(&store.get_string(prefs::THEME_KEY, prefs::DEFAULT_THEME));
        Self {
            sensitivity,
            theme,
            ..Self::default()
        }
    }
}

/// Animation state of one bar
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BarState {
    /// Smoothed height in pixels
    pub smoothed: f32,
    /// Height of the decaying peak marker
    pub peak: f32,
    /// Frames left before the peak starts decaying
    pub hold_remaining: u32,
}

/// Drawable output for one bar in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub index: usize,
    /// Bar height in pixels, measured up from the viewport bottom
    pub height: f32,
    /// Hue assigned to this bar on the theme's color wheel
    pub hue: f32,
    pub bottom_color: Rgb,
    pub top_color: Rgb,
    /// Height of the peak marker, when far enough above the bar to be visible
    pub peak: Option<f32>,
}

pub struct Visualizer {
    config: VisualizerConfig,
    bars: Vec<BarState>,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        let bars = vec![BarState::default(); config.bar_count];
        Self { config, bars }
    }

    pub fn with_defaults() -> Self {
        Self::new(VisualizerConfig::default())
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Per-bar animation state, newest frame
    pub fn bars(&self) -> &[BarState] {
        &self.bars
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.config.sensitivity = sensitivity.clamp(cfg::MIN_SENSITIVITY, cfg::MAX_SENSITIVITY);
    }

    /// Unknown names select the default theme
    pub fn set_theme(&mut self, name: &str) {
        self.config.theme = Theme::from_name(name);
    }

    pub fn cycle_theme(&mut self) -> Theme {
        self.config.theme = self.config.theme.next();
        self.config.theme
    }

    /// Drop all animation state; the next frame starts from silence
    pub fn reset(&mut self) {
        for bar in &mut self.bars {
            *bar = BarState::default();
        }
    }

    /// Advance the animation one frame and emit geometry.
    ///
    /// Magnitude vectors shorter than the bar count are zero-padded. A
    /// non-positive viewport produces no geometry and leaves the animation
    /// untouched.
    pub fn tick(&mut self, magnitudes: &[f32], viewport_height: f32) -> Vec<BarGeometry> {
        if viewport_height <= 0.0 {
            return Vec::new();
        }

        let max_height = (viewport_height - cfg::BOTTOM_PADDING).max(0.0);
        let weight = self.config.smoothing_factor;
        let hue_step = 360.0 / self.config.bar_count as f32;
        let mut out = Vec::with_capacity(self.config.bar_count);

        for (i, bar) in self.bars.iter_mut().enumerate() {
            let magnitude = magnitudes.get(i).copied().unwrap_or(0.0);
            let target =
                magnitude * self.config.sensitivity * viewport_height * cfg::HEIGHT_SCALE;
            bar.smoothed = (bar.smoothed * weight + target * (1.0 - weight)).min(max_height);

            // Peak bookkeeping runs even for bars too small to draw, so
            // markers keep falling while the spectrum is quiet.
            if bar.smoothed > bar.peak {
                bar.peak = bar.smoothed;
                bar.hold_remaining = self.config.peak_hold_frames;
            } else if bar.hold_remaining > 0 {
                bar.hold_remaining -= 1;
            } else {
                bar.peak = (bar.peak - self.config.peak_decay_per_frame).max(0.0);
            }

            if bar.smoothed < cfg::MIN_BAR_HEIGHT {
                continue;
            }

            let hue = (self.config.theme.base_hue() + i as f32 * hue_step) % 360.0;
            let (bottom_color, top_color) = self.config.theme.gradient(hue);
            let peak = (bar.peak > bar.smoothed + cfg::PEAK_MARKER_THICKNESS).then_some(bar.peak);
            out.push(BarGeometry {
                index: i,
                height: bar.smoothed,
                hue,
                bottom_color,
                top_color,
                peak,
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPrefStore;

    const VIEWPORT: f32 = 100.0;

    fn small_viz() -> Visualizer {
        Visualizer::new(VisualizerConfig {
            bar_count: 4,
            sensitivity: 1.0,
            smoothing_factor: 0.5,
            peak_hold_frames: 2,
            peak_decay_per_frame: 3.0,
            ..VisualizerConfig::default()
        })
    }

    #[test]
    fn silence_converges_to_no_geometry() {
        let mut viz = small_viz();
        viz.tick(&[1.0, 1.0, 1.0, 1.0], VIEWPORT);

        // Feed zeros until the exponential decay passes below the draw
        // threshold; with factor 0.5 that is a handful of frames.
        let mut frames = 0;
        loop {
            let out = viz.tick(&[0.0; 4], VIEWPORT);
            frames += 1;
            if out.is_empty() {
                break;
            }
            assert!(frames < 64, "bars never decayed to silence");
        }
        for bar in viz.bars() {
            assert!(bar.smoothed < 1.0);
        }
    }

    #[test]
    fn smoothing_lies_between_previous_and_target() {
        let mut viz = small_viz();
        viz.tick(&[0.5, 0.0, 0.0, 0.0], VIEWPORT);
        let prev = viz.bars()[0].smoothed;

        let target = 1.0 * 1.0 * VIEWPORT * 0.8;
        let out = viz.tick(&[1.0, 0.0, 0.0, 0.0], VIEWPORT);
        let now = out[0].height;
        assert!(now > prev && now < target, "{prev} < {now} < {target}");
    }

    #[test]
    fn heights_clamp_to_viewport_minus_padding() {
        let mut viz = Visualizer::new(VisualizerConfig {
            bar_count: 1,
            sensitivity: 2.0,
            smoothing_factor: 0.0,
            ..VisualizerConfig::default()
        });
        // target = 1.0 * 2.0 * 100 * 0.8 = 160, far past the viewport
        let out = viz.tick(&[1.0], VIEWPORT);
        assert_eq!(out[0].height, VIEWPORT - 4.0);
    }

    #[test]
    fn peak_holds_then_decays_exactly_and_stops_at_zero() {
        let mut viz = small_viz();
        viz.tick(&[1.0, 0.0, 0.0, 0.0], VIEWPORT);
        let peak = viz.bars()[0].peak;
        assert_eq!(peak, viz.bars()[0].smoothed);

        // Drop the input low enough that smoothed falls below the peak but
        // keeps the bar alive; two hold frames pass without decay.
        viz.tick(&[0.1, 0.0, 0.0, 0.0], VIEWPORT);
        assert_eq!(viz.bars()[0].peak, peak);
        viz.tick(&[0.1, 0.0, 0.0, 0.0], VIEWPORT);
        assert_eq!(viz.bars()[0].peak, peak);

        // Then exactly peak_decay_per_frame per frame
        viz.tick(&[0.1, 0.0, 0.0, 0.0], VIEWPORT);
        assert!((viz.bars()[0].peak - (peak - 3.0)).abs() < 1e-4);

        // And never below zero
        for _ in 0..100 {
            viz.tick(&[0.0; 4], VIEWPORT);
        }
        assert_eq!(viz.bars()[0].peak, 0.0);
    }

    #[test]
    fn peak_marker_appears_only_above_bar_top() {
        let mut viz = small_viz();
        let out = viz.tick(&[1.0, 0.0, 0.0, 0.0], VIEWPORT);
        // Fresh peak equals the bar height, so no marker yet
        assert_eq!(out[0].peak, None);

        let out = viz.tick(&[0.05, 0.0, 0.0, 0.0], VIEWPORT);
        let bar = viz.bars()[0];
        assert!(bar.peak > bar.smoothed + 2.0);
        assert_eq!(out[0].peak, Some(bar.peak));
    }

    #[test]
    fn short_magnitude_vectors_are_zero_padded() {
        let mut viz = small_viz();
        let out = viz.tick(&[1.0], VIEWPORT);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].index, 0);
        for bar in &viz.bars()[1..] {
            assert_eq!(bar.smoothed, 0.0);
        }
    }

    #[test]
    fn non_positive_viewport_is_a_no_op() {
        let mut viz = small_viz();
        viz.tick(&[1.0; 4], VIEWPORT);
        let before = viz.bars().to_vec();

        assert!(viz.tick(&[1.0; 4], 0.0).is_empty());
        assert!(viz.tick(&[1.0; 4], -50.0).is_empty());
        assert_eq!(viz.bars(), &before[..]);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut viz = small_viz();
        viz.tick(&[1.0; 4], VIEWPORT);
        viz.reset();
        assert!(viz.bars().iter().all(|b| *b == BarState::default()));

        // Idempotent
        viz.reset();
        assert!(viz.bars().iter().all(|b| *b == BarState::default()));
    }

    #[test]
    fn hues_spread_across_the_wheel_from_the_theme_base() {
        let mut viz = Visualizer::new(VisualizerConfig {
            bar_count: 4,
            theme: Theme::Ocean,
            smoothing_factor: 0.0,
            ..VisualizerConfig::default()
        });
        let out = viz.tick(&[1.0; 4], VIEWPORT);
        let hues: Vec<f32> = out.iter().map(|b| b.hue).collect();
        assert_eq!(hues, [200.0, 290.0, 20.0, 110.0]);
    }

    #[test]
    fn sensitivity_setter_clamps() {
        let mut viz = small_viz();
        viz.set_sensitivity(5.0);
        assert_eq!(viz.config().sensitivity, 2.0);
        viz.set_sensitivity(0.0);
        assert_eq!(viz.config().sensitivity, 0.1);
    }

    #[test]
    fn config_from_prefs_applies_clamps_and_theme_fallback() {
        let store = MemoryPrefStore::new();
        store.set_float("visualizer_sensitivity", 9.0);
        store.set_string("visualizer_theme", "NoSuchTheme");
        let config = VisualizerConfig::from_prefs(&store);
        assert_eq!(config.sensitivity, 2.0);
        assert_eq!(config.theme, Theme::Rainbow);

        let empty = MemoryPrefStore::new();
        let config = VisualizerConfig::from_prefs(&empty);
        assert_eq!(config.sensitivity, 1.2);
        assert_eq!(config.theme, Theme::Rainbow);
    }
}
