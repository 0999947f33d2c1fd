//! Fixed fill palette and CSS color conversion.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use serde::{Serialize, Serializer};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical lowercase `#rrggbb`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scale every channel toward black by `factor` in `[0, 1]`.
    #[must_use]
    pub fn darken(self, factor: f64) -> Self {
        let keep = (1.0 - factor).clamp(0.0, 1.0);
        Self { r: scale_channel(self.r, keep), g: scale_channel(self.g, keep), b: scale_channel(self.b, keep) }
    }

    /// RGBA bytes with full opacity.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_channel(c: u8, keep: f64) -> u8 {
    (f64::from(c) * keep).round() as u8
}

// ── Palette ─────────────────────────────────────────────────────

pub const HAZARD_FILL: Color = Color::rgb(0xd9, 0x4b, 0x4b);
pub const MARKER_FILL: Color = Color::rgb(0x8d, 0x6e, 0x63);
pub const UNIT_ASSIGNED_FILL: Color = Color::rgb(0x4c, 0xaf, 0x50);
pub const UNIT_MOVED_FILL: Color = Color::rgb(0x21, 0x96, 0xf3);
pub const UNIT_MESSAGED_FILL: Color = Color::rgb(0xff, 0x98, 0x00);
pub const UNIT_WRONG_FILL: Color = Color::rgb(0x9c, 0x27, 0xb0);
pub const UNIT_DEFAULT_FILL: Color = Color::rgb(0x9e, 0x9e, 0x9e);

pub const BACKGROUND: Color = Color::rgb(0xff, 0xff, 0xff);
pub const GRID_LINE: Color = Color::rgb(0xdd, 0xdd, 0xdd);
pub const LABEL_TEXT: Color = Color::rgb(0x1f, 0x1a, 0x17);
