//! Easing curves and keyframe tracks.
//!
//! Curves follow CSS timing-function semantics so that a track sampled here
//! matches what a browser would render for the same `@keyframes` block.

use crate::geometry::Point;
use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Easing
// =============================================================================

/// Timing function applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// CSS `ease`, `cubic-bezier(0.25, 0.1, 0.25, 1)`
    #[default]
    Ease,
    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// Arbitrary cubic Bézier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier {
        /// First control point x, within [0, 1]
        x1: f64,
        /// First control point y
        y1: f64,
        /// Second control point x, within [0, 1]
        x2: f64,
        /// Second control point y
        y2: f64,
    },
}

impl Easing {
    /// Control points of the curve, `None` for linear.
    #[must_use]
    pub const fn control_points(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            Self::Linear => None,
            Self::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Self::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Self::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Self::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Self::CubicBezier { x1, y1, x2, y2 } => Some((x1, y1, x2, y2)),
        }
    }

    /// Apply the curve to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = solve_bezier_parameter(x1, x2, t);
                bezier_component(y1, y2, s)
            }
        }
    }

    /// CSS representation.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Ease => "ease".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::EaseInOut => "ease-in-out".to_string(),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// One coordinate of a unit cubic Bézier at parameter `s`.
fn bezier_component(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_derivative(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find `s` such that the curve's x coordinate equals `x`.
///
/// Newton's method first, bisection when the slope vanishes.
fn solve_bezier_parameter(x1: f64, x2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier_component(x1, x2, s) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let slope = bezier_derivative(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier_component(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

/// Error returned when a timing function string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EasingParseError(pub String);

impl fmt::Display for EasingParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timing function: {}", self.0)
    }
}

impl std::error::Error for EasingParseError {}

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "ease-in" => return Ok(Self::EaseIn),
            "ease-out" => return Ok(Self::EaseOut),
            "ease-in-out" => return Ok(Self::EaseInOut),
            _ => {}
        }

        let err = || EasingParseError(trimmed.to_string());
        let args = trimmed
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let values = args
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| err())?;
        let [x1, y1, x2, y2] = values[..] else {
            return Err(err());
        };
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(err());
        }
        Ok(Self::CubicBezier { x1, y1, x2, y2 })
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_css()
    }
}

impl TryFrom<String> for Easing {
    type Error = EasingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Iterations
// =============================================================================

/// How many times an animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Iterations {
    /// Run the given number of cycles, then hold the final frame
    Count(u32),
    /// Loop forever
    Infinite,
}

impl Default for Iterations {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl Iterations {
    /// CSS `animation-iteration-count` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Count(n) => n.to_string(),
            Self::Infinite => "infinite".to_string(),
        }
    }

    /// Progress within the current cycle after `elapsed` time of a cycle
    /// lasting `duration`.
    ///
    /// Finite animations hold at 1.0 once every cycle has run. A non-finite
    /// `elapsed` or `duration` reads as the end of the animation.
    #[must_use]
    pub fn cycle_progress(self, elapsed: f64, duration: f64) -> f64 {
        if !duration.is_finite() || duration <= 0.0 || !elapsed.is_finite() {
            return 1.0;
        }
        let cycles = elapsed.max(0.0) / duration;
        match self {
            Self::Infinite => cycles.fract(),
            Self::Count(n) if cycles >= f64::from(n) => 1.0,
            Self::Count(_) => cycles.fract(),
        }
    }
}

// =============================================================================
// Keyframes
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (to - from).mul_add(t, *from)
    }
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (*to - *from).mul_add(t as Self, *from)
    }
}

impl Interpolate for Point {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self::new(
            f32::interpolate(&from.x, &to.x, t),
            f32::interpolate(&from.y, &to.y, t),
        )
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self::new(
            f32::interpolate(&from.r, &to.r, t),
            f32::interpolate(&from.g, &to.g, t),
            f32::interpolate(&from.b, &to.b, t),
            f32::interpolate(&from.a, &to.a, t),
        )
    }
}

/// A value pinned at a normalized offset of the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Offset within the cycle, 0.0 to 1.0
    pub offset: f64,
    /// Value at this offset
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Create a keyframe, clamping the offset into [0, 1].
    #[must_use]
    pub fn new(offset: f64, value: T) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            value,
        }
    }
}

/// Keyframes ordered by offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack<T> {
    keyframes: Vec<Keyframe<T>>,
}

impl<T> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }
}

impl<T: Clone + Interpolate> KeyframeTrack<T> {
    /// Create an empty track.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyframe, keeping the track sorted. Equal offsets keep
    /// insertion order.
    pub fn add(&mut self, keyframe: Keyframe<T>) {
        let idx = self
            .keyframes
            .partition_point(|k| k.offset <= keyframe.offset);
        self.keyframes.insert(idx, keyframe);
    }

    /// Builder form of [`KeyframeTrack::add`].
    #[must_use]
    pub fn with(mut self, offset: f64, value: T) -> Self {
        self.add(Keyframe::new(offset, value));
        self
    }

    /// Keyframes in offset order.
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    /// Check if the track has no keyframes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Value at `progress` (0.0 to 1.0) with `easing` applied per segment,
    /// as CSS applies the timing function between adjacent keyframes.
    ///
    /// Before the first keyframe the first value holds; after the last the
    /// last value holds. A NaN `progress` yields the first value. Returns
    /// `None` for an empty track.
    #[must_use]
    pub fn sample(&self, progress: f64, easing: Easing) -> Option<T> {
        let first = self.keyframes.first()?;
        if progress.is_nan() {
            return Some(first.value.clone());
        }
        let progress = progress.clamp(0.0, 1.0);
        if progress <= first.offset {
            return Some(first.value.clone());
        }

        let next_idx = self.keyframes.partition_point(|k| k.offset <= progress);
        let Some(next) = self.keyframes.get(next_idx) else {
            return self.keyframes.last().map(|k| k.value.clone());
        };
        let prev = &self.keyframes[next_idx.checked_sub(1)?];

        let span = next.offset - prev.offset;
        let local = if span > 0.0 {
            (progress - prev.offset) / span
        } else {
            1.0
        };
        Some(T::interpolate(&prev.value, &next.value, easing.apply(local)))
    }
}
