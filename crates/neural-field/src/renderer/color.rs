use serde::{Deserialize, Serialize};

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with the given alpha, clamped to 0.0 - 1.0.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            channel8(self.r),
            channel8(self.g),
            channel8(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    // Default palette: warm amber on a dark hero background.
    pub const NODE: Self = Self::new(230.0 / 255.0, 190.0 / 255.0, 120.0 / 255.0, 1.0);
    pub const LINK: Self = Self::new(210.0 / 255.0, 160.0 / 255.0, 80.0 / 255.0, 1.0);
    pub const POINTER_LINK: Self = Self::new(235.0 / 255.0, 185.0 / 255.0, 100.0 / 255.0, 1.0);
    pub const CURSOR: Self = Self::new(230.0 / 255.0, 175.0 / 255.0, 90.0 / 255.0, 1.0);
}

fn channel8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
