//! Design tokens for the neural theme.
//!
//! Tokens are referenced by name, the same names the stylesheet exposes as
//! utility classes (`neural-purple` becomes `.bg-neural-purple`, and so on).

use crate::animation::{Easing, Interpolate, Iterations, KeyframeTrack};
use crate::geometry::{Point, Rect};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the accent color used for selection and focus.
pub const ACCENT: &str = "neural-purple";

// =============================================================================
// Neutrals
// =============================================================================

/// Gray scale used for surfaces, borders and body text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neutrals {
    /// Surface background
    pub white: Color,
    /// Hovered rows
    pub gray_100: Color,
    /// Panel borders
    pub gray_200: Color,
    /// Control borders
    pub gray_300: Color,
    /// Secondary glyphs
    pub gray_500: Color,
    /// Body text
    pub gray_700: Color,
    /// Emphasized text
    pub gray_800: Color,
}

impl Default for Neutrals {
    fn default() -> Self {
        Self {
            white: Color::WHITE,
            gray_100: Color::from_rgb8(0xF3, 0xF4, 0xF6),
            gray_200: Color::from_rgb8(0xE5, 0xE7, 0xEB),
            gray_300: Color::from_rgb8(0xD1, 0xD5, 0xDB),
            gray_500: Color::from_rgb8(0x6B, 0x72, 0x80),
            gray_700: Color::from_rgb8(0x37, 0x41, 0x51),
            gray_800: Color::from_rgb8(0x1F, 0x29, 0x37),
        }
    }
}

// =============================================================================
// Fonts and shadows
// =============================================================================

/// Ordered font family fallback list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontStack(pub Vec<String>);

impl FontStack {
    /// Create a stack from family names, most preferred first.
    #[must_use]
    pub fn new<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(families.into_iter().map(Into::into).collect())
    }

    /// CSS `font-family` value; names containing spaces are quoted.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|family| {
                if family.contains(' ') {
                    format!("\"{family}\"")
                } else {
                    family.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A drop shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowToken {
    /// Horizontal offset in pixels
    pub offset_x: f32,
    /// Vertical offset in pixels
    pub offset_y: f32,
    /// Blur radius in pixels
    pub blur: f32,
    /// Spread radius in pixels
    #[serde(default)]
    pub spread: f32,
    /// Shadow color including opacity
    pub color: Color,
}

impl ShadowToken {
    /// CSS `box-shadow` value. The spread is omitted when zero.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut parts = vec![px(self.offset_x), px(self.offset_y), px(self.blur)];
        if self.spread != 0.0 {
            parts.push(px(self.spread));
        }
        parts.push(self.color.to_css());
        parts.join(" ")
    }
}

/// Format a length: bare `0`, otherwise pixels.
pub(crate) fn px(value: f32) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}px")
    }
}

// =============================================================================
// Animations
// =============================================================================

/// Style properties a keyframe can set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameStyle {
    /// Vertical translation in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f32>,
    /// Opacity, 0.0 to 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl FrameStyle {
    /// CSS declarations for this frame, without braces.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut decls = Vec::new();
        if let Some(y) = self.translate_y {
            decls.push(format!("transform: translateY({})", px(y)));
        }
        if let Some(opacity) = self.opacity {
            decls.push(format!("opacity: {opacity}"));
        }
        decls.join("; ")
    }
}

fn lerp_opt(from: Option<f32>, to: Option<f32>, t: f64) -> Option<f32> {
    match (from, to) {
        (Some(a), Some(b)) => Some(f32::interpolate(&a, &b, t)),
        (a, b) => a.or(b),
    }
}

impl Interpolate for FrameStyle {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            translate_y: lerp_opt(from.translate_y, to.translate_y, t),
            opacity: lerp_opt(from.opacity, to.opacity, t),
        }
    }
}

/// One `@keyframes` selector: a frame applied at one or more offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeStop {
    /// Offsets as fractions of the cycle, 0.0 to 1.0
    pub offsets: Vec<f64>,
    /// Properties at those offsets
    pub frame: FrameStyle,
}

impl KeyframeStop {
    /// Offsets as CSS percentages, rounded to six decimals so that a
    /// percentage read from a token file comes back out unchanged.
    #[must_use]
    pub fn percents(&self) -> Vec<f64> {
        self.offsets
            .iter()
            .map(|o| (o * 100.0 * 1e6).round() / 1e6)
            .collect()
    }
}

/// A named `@keyframes` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyframeSet {
    /// Stops in declaration order
    pub stops: Vec<KeyframeStop>,
}

impl KeyframeSet {
    /// Add a stop.
    #[must_use]
    pub fn stop(mut self, offsets: &[f64], frame: FrameStyle) -> Self {
        self.stops.push(KeyframeStop {
            offsets: offsets.to_vec(),
            frame,
        });
        self
    }

    /// Flatten into a sampled track, one keyframe per offset.
    #[must_use]
    pub fn track(&self) -> KeyframeTrack<FrameStyle> {
        let mut track = KeyframeTrack::new();
        for stop in &self.stops {
            for &offset in &stop.offsets {
                track = track.with(offset, stop.frame);
            }
        }
        track
    }
}

/// A named animation referencing a keyframe set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationToken {
    /// Name of the keyframe set
    pub keyframes: String,
    /// Length of one cycle in milliseconds
    pub duration_ms: u32,
    /// Timing function
    #[serde(default)]
    pub easing: Easing,
    /// Cycle count
    #[serde(default)]
    pub iterations: Iterations,
}

impl AnimationToken {
    /// CSS `animation` shorthand.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "{} {}s {} {}",
            self.keyframes,
            f64::from(self.duration_ms) / 1000.0,
            self.easing.to_css(),
            self.iterations.to_css()
        )
    }

    /// Progress within the current cycle after `elapsed_ms`.
    #[must_use]
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        self.iterations
            .cycle_progress(elapsed_ms, f64::from(self.duration_ms))
    }
}

// =============================================================================
// Patterns and clip shapes
// =============================================================================

/// Repeating dot background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPattern {
    /// One radial-gradient layer per dot color
    pub dots: Vec<Color>,
    /// Dot radius in pixels
    pub dot_radius: f32,
    /// Tile edge length in pixels
    pub tile: f32,
}

impl BackgroundPattern {
    /// CSS `background-image` value.
    #[must_use]
    pub fn image_css(&self) -> String {
        let radius = px(self.dot_radius);
        self.dots
            .iter()
            .map(|color| format!("radial-gradient({} {radius}, transparent {radius})", color.to_css()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// CSS `background-size` value.
    #[must_use]
    pub fn size_css(&self) -> String {
        let tile = px(self.tile);
        format!("{tile} {tile}")
    }
}

/// Polygon clip path in fractions of the clipped box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipShape {
    /// Vertices as (x, y) fractions, 0.0 to 1.0
    pub vertices: Vec<(f32, f32)>,
}

impl ClipShape {
    /// Pointy-top hexagon.
    #[must_use]
    pub fn hexagon() -> Self {
        Self {
            vertices: vec![
                (0.5, 0.0),
                (1.0, 0.25),
                (1.0, 0.75),
                (0.5, 1.0),
                (0.0, 0.75),
                (0.0, 0.25),
            ],
        }
    }

    /// Vertices resolved against a concrete box.
    #[must_use]
    pub fn points(&self, rect: Rect) -> Vec<Point> {
        self.vertices
            .iter()
            .map(|&(fx, fy)| rect.at_fraction(fx, fy))
            .collect()
    }

    /// CSS `clip-path` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        let coords = self
            .vertices
            .iter()
            .map(|&(fx, fy)| format!("{}% {}%", fx * 100.0, fy * 100.0))
            .collect::<Vec<_>>()
            .join(", ");
        format!("polygon({coords})")
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Complete token set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Named brand colors
    pub colors: BTreeMap<String, Color>,
    /// Gray scale
    #[serde(default)]
    pub neutrals: Neutrals,
    /// Named font stacks
    pub fonts: BTreeMap<String, FontStack>,
    /// Named shadows
    pub shadows: BTreeMap<String, ShadowToken>,
    /// Named animations
    pub animations: BTreeMap<String, AnimationToken>,
    /// Named keyframe sets
    pub keyframes: BTreeMap<String, KeyframeSet>,
    /// Named background patterns
    pub patterns: BTreeMap<String, BackgroundPattern>,
    /// Named clip shapes
    pub clips: BTreeMap<String, ClipShape>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neural()
    }
}

impl Theme {
    /// The built-in neural theme.
    #[must_use]
    pub fn neural() -> Self {
        let purple = Color::from_rgb8(0x6B, 0x46, 0xC1);
        let lavender = Color::from_rgb8(0x9F, 0x7A, 0xEA);

        let colors = [
            ("neural-purple", purple),
            ("tech-lavender", lavender),
            ("success-gold", Color::from_rgb8(0xF6, 0xE0, 0x5E)),
            ("smart-black", Color::from_rgb8(0x2D, 0x37, 0x48)),
            ("focus-blue", Color::from_rgb8(0x42, 0x99, 0xE1)),
            ("growth-green", Color::from_rgb8(0x48, 0xBB, 0x78)),
            ("energy-orange", Color::from_rgb8(0xED, 0x89, 0x36)),
            ("alert-red", Color::from_rgb8(0xE5, 0x3E, 0x3E)),
        ];

        let fonts = [
            (
                "sans",
                FontStack::new(["Inter", "system-ui", "-apple-system", "sans-serif"]),
            ),
            (
                "display",
                FontStack::new([
                    "SF Pro Display",
                    "Inter",
                    "system-ui",
                    "-apple-system",
                    "sans-serif",
                ]),
            ),
        ];

        let neural_shadow = ShadowToken {
            offset_x: 0.0,
            offset_y: 4.0,
            blur: 6.0,
            spread: 0.0,
            color: purple.with_alpha(0.1),
        };

        let animations = [
            (
                "float",
                AnimationToken {
                    keyframes: "float".to_string(),
                    duration_ms: 3000,
                    easing: Easing::EaseInOut,
                    iterations: Iterations::Infinite,
                },
            ),
            (
                "pulse",
                AnimationToken {
                    keyframes: "pulse".to_string(),
                    duration_ms: 2000,
                    easing: Easing::CubicBezier {
                        x1: 0.4,
                        y1: 0.0,
                        x2: 0.6,
                        y2: 1.0,
                    },
                    iterations: Iterations::Infinite,
                },
            ),
        ];

        let keyframes = [
            (
                "float",
                KeyframeSet::default()
                    .stop(
                        &[0.0, 1.0],
                        FrameStyle {
                            translate_y: Some(0.0),
                            opacity: None,
                        },
                    )
                    .stop(
                        &[0.5],
                        FrameStyle {
                            translate_y: Some(-10.0),
                            opacity: None,
                        },
                    ),
            ),
            (
                "pulse",
                KeyframeSet::default()
                    .stop(
                        &[0.0, 1.0],
                        FrameStyle {
                            translate_y: None,
                            opacity: Some(1.0),
                        },
                    )
                    .stop(
                        &[0.5],
                        FrameStyle {
                            translate_y: None,
                            opacity: Some(0.5),
                        },
                    ),
            ),
        ];

        let neural_pattern = BackgroundPattern {
            dots: vec![purple, lavender],
            dot_radius: 1.0,
            tile: 40.0,
        };

        Self {
            name: "neural".to_string(),
            colors: named(colors),
            neutrals: Neutrals::default(),
            fonts: named(fonts),
            shadows: named([("neural", neural_shadow)]),
            animations: named(animations),
            keyframes: named(keyframes),
            patterns: named([("neural", neural_pattern)]),
            clips: named([("hexagon", ClipShape::hexagon())]),
        }
    }

    /// Look up a brand color by name.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// The accent color, falling back to the built-in purple if a token file
    /// has overridden it away.
    #[must_use]
    pub fn accent(&self) -> Color {
        self.color(ACCENT)
            .unwrap_or_else(|| Color::from_rgb8(0x6B, 0x46, 0xC1))
    }

    /// Look up a font stack by name.
    #[must_use]
    pub fn font(&self, name: &str) -> Option<&FontStack> {
        self.fonts.get(name)
    }

    /// Frame of a named animation after `elapsed_ms`.
    ///
    /// Returns `None` when the animation or its keyframe set is unknown.
    #[must_use]
    pub fn sample_animation(&self, name: &str, elapsed_ms: f64) -> Option<FrameStyle> {
        let animation = self.animations.get(name)?;
        let set = self.keyframes.get(&animation.keyframes)?;
        set.track()
            .sample(animation.progress_at(elapsed_ms), animation.easing)
    }
}

fn named<T, const N: usize>(entries: [(&str, T); N]) -> BTreeMap<String, T> {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
