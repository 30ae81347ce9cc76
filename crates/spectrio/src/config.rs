//! Configuration constants for the spectrio engine

/// Bar visualization geometry and dynamics
pub mod viz {
    /// Default number of spectrum bars
    pub const DEFAULT_BAR_COUNT: usize = 32;

    /// Fraction of the viewport a full-scale bar may reach
    pub const HEIGHT_SCALE: f32 = 0.8;

    /// Pixels reserved at the bottom of the viewport
    pub const BOTTOM_PADDING: f32 = 4.0;

    /// Bars shorter than this are not drawn
    pub const MIN_BAR_HEIGHT: f32 = 1.0;

    /// Peak markers are drawn only this far above the bar top
    pub const PEAK_MARKER_THICKNESS: f32 = 2.0;

    /// Exponential smoothing factor (weight of the previous frame, 0.0-1.0)
    pub const DEFAULT_SMOOTHING: f32 = 0.6;

    /// Frames a peak marker holds before decaying
    pub const DEFAULT_PEAK_HOLD_FRAMES: u32 = 24;

    /// Pixels a peak marker falls per frame once the hold elapses
    pub const DEFAULT_PEAK_DECAY: f32 = 3.0;

    /// Sensitivity clamp bounds
    pub const MIN_SENSITIVITY: f32 = 0.1;
    pub const MAX_SENSITIVITY: f32 = 2.0;
}

/// Preference keys and their defaults
pub mod prefs {
    pub const SENSITIVITY_KEY: &str = "visualizer_sensitivity";
    pub const DEFAULT_SENSITIVITY: f32 = 1.2;

    pub const THEME_KEY: &str = "visualizer_theme";
    pub const DEFAULT_THEME: &str = "Rainbow";

    /// Most-recently-played station id
    pub const LAST_STATION_KEY: &str = "last_station";
}

/// Session thread timing
pub mod session {
    /// Command poll period of the session thread; also the cadence of
    /// sleep-timer and capture-forwarding checks (milliseconds)
    pub const TICK_MS: u64 = 100;

    /// Depth of the bounded command channel into the session thread
    pub const COMMAND_QUEUE_DEPTH: usize = 16;
}

/// Spectrum capture delivery
pub mod capture {
    /// Capture sources publish at the device maximum rate divided by this,
    /// bounding processing cost. Delivery stays lossy latest-only.
    pub const RATE_DIVISOR: u32 = 2;
}
