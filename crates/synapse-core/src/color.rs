//! Color representation with WCAG contrast calculations and CSS output.

use serde::{Deserialize, Serialize};

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse a hex color string (e.g., "#6B46C1" or "6b46c1").
    ///
    /// Supports 6-character RGB and 8-character RGBA formats.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHex);
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| ColorParseError::InvalidHex)
        };

        match hex.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ColorParseError::InvalidLength),
        }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// 8-bit channel values (r, g, b).
    #[must_use]
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        )
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// CSS color value: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            return self.to_hex();
        }
        let (r, g, b) = self.to_rgb8();
        // Two decimals is enough for alpha and keeps "0.1" as written in token files.
        let alpha = (self.a * 100.0).round() / 100.0;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }

    /// Calculate relative luminance per WCAG 2.1.
    ///
    /// See: <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
    #[must_use]
    pub fn relative_luminance(&self) -> f32 {
        let r = Self::linearize(self.r);
        let g = Self::linearize(self.g);
        let b = Self::linearize(self.b);

        0.0722f32.mul_add(b, 0.2126f32.mul_add(r, 0.7152 * g))
    }

    /// Calculate contrast ratio between two colors per WCAG 2.1.
    ///
    /// Returns a value between 1.0 (no contrast) and 21.0 (maximum contrast).
    #[must_use]
    pub fn contrast_ratio(&self, other: &Self) -> f32 {
        let l1 = self.relative_luminance();
        let l2 = other.relative_luminance();

        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

        (lighter + 0.05) / (darker + 0.05)
    }

    /// Linearize sRGB component for luminance calculation.
    fn linearize(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Invalid hex characters
    InvalidHex,
    /// Invalid string length
    InvalidLength,
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex => write!(f, "invalid hex characters"),
            Self::InvalidLength => write!(f, "invalid hex string length (expected 6 or 8)"),
        }
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_color_new_clamps_values() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_color_from_hex_brand_purple() {
        let c = Color::from_hex("#6B46C1").unwrap();
        assert_eq!(c.to_rgb8(), (0x6b, 0x46, 0xc1));
        assert_eq!(c, Color::from_rgb8(107, 70, 193));
        assert_eq!(c.to_hex(), "#6b46c1");
    }

    #[test]
    fn test_color_from_hex_with_alpha() {
        let c = Color::from_hex("ff000080").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.a - 0.502).abs() < 0.01);
        assert_eq!(c.to_hex(), "#ff0000");
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert_eq!(
            Color::from_hex("#gg0000"),
            Err(ColorParseError::InvalidHex)
        );
        assert_eq!(Color::from_hex("#ff"), Err(ColorParseError::InvalidLength));
        assert_eq!(Color::from_hex("invalid"), Err(ColorParseError::InvalidLength));
        assert_eq!(Color::from_hex("#ééé"), Err(ColorParseError::InvalidHex));
    }

    #[test]
    fn test_color_to_css() {
        assert_eq!(Color::WHITE.to_css(), "#ffffff");
        let shadow = Color::from_rgb8(107, 70, 193).with_alpha(0.1);
        assert_eq!(shadow.to_css(), "rgba(107, 70, 193, 0.1)");
        assert_eq!(Color::TRANSPARENT.to_css(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn test_color_contrast_ratio_black_white() {
        let ratio = Color::BLACK.contrast_ratio(&Color::WHITE);
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_accent_on_white_meets_wcag_aa() {
        // White label on the neural purple highlight row.
        let purple = Color::from_hex("#6B46C1").unwrap();
        assert!(purple.contrast_ratio(&Color::WHITE) >= 4.5);
    }

    #[test]
    fn test_color_parse_error_display() {
        assert_eq!(
            ColorParseError::InvalidHex.to_string(),
            "invalid hex characters"
        );
        assert_eq!(
            ColorParseError::InvalidLength.to_string(),
            "invalid hex string length (expected 6 or 8)"
        );
    }

    proptest! {
        #[test]
        fn prop_rgb8_hex_roundtrip(r: u8, g: u8, b: u8) {
            let c = Color::from_rgb8(r, g, b);
            let parsed = Color::from_hex(&c.to_hex()).unwrap();
            prop_assert_eq!(parsed.to_rgb8(), (r, g, b));
        }

        #[test]
        fn prop_contrast_ratio_symmetric(a in 0.0f32..1.0, b in 0.0f32..1.0) {
            let c1 = Color::rgb(a, a, a);
            let c2 = Color::rgb(b, b, b);
            prop_assert_eq!(c1.contrast_ratio(&c2), c2.contrast_ratio(&c1));
        }
    }
}
