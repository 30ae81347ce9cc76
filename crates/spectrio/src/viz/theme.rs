//! Color themes for the spectrum bars
//!
//! A theme fixes the base hue of the bar color wheel and which gradient tier
//! (normal or intense) the bars render with. Unknown theme names degrade to
//! the default instead of failing.

use std::fmt;

/// Solid RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Rainbow,
    Fire,
    Ocean,
    Forest,
    Sunset,
}

impl Theme {
    /// Cycling order for `next`
    pub const ALL: [Theme; 5] = [
        Theme::Rainbow,
        Theme::Fire,
        Theme::Ocean,
        Theme::Forest,
        Theme::Sunset,
    ];

    /// Parse a stored theme name; unrecognized names fall back to the default
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Rainbow => "Rainbow",
            Theme::Fire => "Fire",
            Theme::Ocean => "Ocean",
            Theme::Forest => "Forest",
            Theme::Sunset => "Sunset",
        }
    }

    /// Hue offset of bar 0 on the color wheel
    pub fn base_hue(&self) -> f32 {
        match self {
            Theme::Rainbow | Theme::Fire => 0.0,
            Theme::Ocean => 200.0,
            Theme::Forest => 120.0,
            Theme::Sunset => 300.0,
        }
    }

    /// Fire renders the full-saturation tier. Keyed off the theme itself:
    /// Rainbow shares base hue 0 but renders the normal tier.
    fn is_intense(&self) -> bool {
        matches!(self, Theme::Fire)
    }

    pub fn next(&self) -> Self {
        let pos = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Bottom and top colors of a bar's vertical gradient at the given hue
    pub fn gradient(&self, hue: f32) -> (Rgb, Rgb) {
        if self.is_intense() {
            (hsv_to_rgb(hue, 1.0, 0.7), hsv_to_rgb(hue, 1.0, 1.0))
        } else {
            (hsv_to_rgb(hue, 0.9, 0.55), hsv_to_rgb(hue, 0.75, 0.95))
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Standard HSV to RGB conversion; hue in degrees, s/v in `[0, 1]`
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb {
        r: ((r + m) * 255.0).round() as u8,
        g: ((g + m) * 255.0).round() as u8,
        b: ((b + m) * 255.0).round() as u8,
    }
}
