//! Token document types as written in YAML or TOML files.
//!
//! Documents are partial: every section is optional and entries are merged
//! by name over a base [`Theme`], replacing tokens of the same name and
//! adding new ones.

use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use synapse_core::{
    AnimationToken, BackgroundPattern, Color, Easing, FontStack, FrameStyle, Iterations,
    KeyframeSet, KeyframeStop, ShadowToken, Theme,
};

/// A design-token file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDocument {
    /// Theme name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hex colors by name
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    /// Font family lists by name
    #[serde(default)]
    pub fonts: BTreeMap<String, Vec<String>>,
    /// Shadows by name
    #[serde(default)]
    pub shadows: BTreeMap<String, ShadowSpec>,
    /// Animations by name
    #[serde(default)]
    pub animations: BTreeMap<String, AnimationSpec>,
    /// Keyframe sets by name
    #[serde(default)]
    pub keyframes: BTreeMap<String, Vec<StopSpec>>,
    /// Dot patterns by name
    #[serde(default)]
    pub patterns: BTreeMap<String, PatternSpec>,
}

/// Shadow entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowSpec {
    /// Horizontal offset in pixels
    #[serde(default)]
    pub offset_x: f32,
    /// Vertical offset in pixels
    #[serde(default)]
    pub offset_y: f32,
    /// Blur radius in pixels
    #[serde(default)]
    pub blur: f32,
    /// Spread radius in pixels
    #[serde(default)]
    pub spread: f32,
    /// Hex color
    pub color: String,
    /// Opacity applied to the color
    #[serde(default = "full_opacity")]
    pub opacity: f32,
}

const fn full_opacity() -> f32 {
    1.0
}

/// Animation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    /// Keyframe set name
    pub keyframes: String,
    /// Cycle length in milliseconds
    pub duration_ms: u32,
    /// CSS timing function, `ease` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    /// Cycle count or `infinite`, one cycle when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<IterationsSpec>,
}

/// Iteration count as written: a number or a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IterationsSpec {
    /// Finite count
    Count(u32),
    /// Keyword, only `infinite` is accepted
    Keyword(String),
}

/// One keyframe selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSpec {
    /// Offsets in percent
    pub at: Vec<f64>,
    /// Vertical translation in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f32>,
    /// Opacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

/// Dot pattern entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Hex colors, one gradient layer each
    pub dots: Vec<String>,
    /// Dot radius in pixels
    pub dot_radius: f32,
    /// Tile edge length in pixels
    pub tile: f32,
}

fn parse_color(name: &str, value: &str) -> Result<Color, TokenError> {
    Color::from_hex(value).map_err(|source| TokenError::InvalidColor {
        name: name.to_string(),
        value: value.to_string(),
        source,
    })
}

impl TokenDocument {
    /// Parse a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, TokenError> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, TokenError> {
        Ok(toml::from_str(source)?)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, TokenError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, TokenError> {
        Ok(toml::to_string(self)?)
    }

    /// Describe every mergeable token of a theme.
    ///
    /// Gray neutrals and clip shapes are fixed and not exported.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let colors = theme
            .colors
            .iter()
            .map(|(name, color)| (name.clone(), color.to_hex()))
            .collect();

        let fonts = theme
            .fonts
            .iter()
            .map(|(name, stack)| (name.clone(), stack.0.clone()))
            .collect();

        let shadows = theme
            .shadows
            .iter()
            .map(|(name, shadow)| {
                let spec = ShadowSpec {
                    offset_x: shadow.offset_x,
                    offset_y: shadow.offset_y,
                    blur: shadow.blur,
                    spread: shadow.spread,
                    color: shadow.color.to_hex(),
                    opacity: shadow.color.a,
                };
                (name.clone(), spec)
            })
            .collect();

        let animations = theme
            .animations
            .iter()
            .map(|(name, animation)| {
                let iterations = match animation.iterations {
                    Iterations::Count(n) => IterationsSpec::Count(n),
                    Iterations::Infinite => IterationsSpec::Keyword("infinite".to_string()),
                };
                let spec = AnimationSpec {
                    keyframes: animation.keyframes.clone(),
                    duration_ms: animation.duration_ms,
                    easing: Some(animation.easing.to_css()),
                    iterations: Some(iterations),
                };
                (name.clone(), spec)
            })
            .collect();

        let keyframes = theme
            .keyframes
            .iter()
            .map(|(name, set)| {
                let stops = set
                    .stops
                    .iter()
                    .map(|stop| StopSpec {
                        at: stop.percents(),
                        translate_y: stop.frame.translate_y,
                        opacity: stop.frame.opacity,
                    })
                    .collect();
                (name.clone(), stops)
            })
            .collect();

        let patterns = theme
            .patterns
            .iter()
            .map(|(name, pattern)| {
                let spec = PatternSpec {
                    dots: pattern.dots.iter().map(Color::to_hex).collect(),
                    dot_radius: pattern.dot_radius,
                    tile: pattern.tile,
                };
                (name.clone(), spec)
            })
            .collect();

        Self {
            name: Some(theme.name.clone()),
            colors,
            fonts,
            shadows,
            animations,
            keyframes,
            patterns,
        }
    }

    /// Merge this document over `base`.
    ///
    /// Every value is validated; animations must reference a keyframe set
    /// present after the merge.
    pub fn apply(&self, mut base: Theme) -> Result<Theme, TokenError> {
        if let Some(name) = &self.name {
            base.name.clone_from(name);
        }

        for (name, value) in &self.colors {
            base.colors.insert(name.clone(), parse_color(name, value)?);
        }

        for (name, families) in &self.fonts {
            base.fonts
                .insert(name.clone(), FontStack::new(families.iter().cloned()));
        }

        for (name, spec) in &self.shadows {
            let color = parse_color(name, &spec.color)?.with_alpha(spec.opacity);
            let shadow = ShadowToken {
                offset_x: spec.offset_x,
                offset_y: spec.offset_y,
                blur: spec.blur,
                spread: spec.spread,
                color,
            };
            base.shadows.insert(name.clone(), shadow);
        }

        for (name, stops) in &self.keyframes {
            base.keyframes
                .insert(name.clone(), keyframe_set(name, stops)?);
        }

        for (name, spec) in &self.animations {
            base.animations
                .insert(name.clone(), animation_token(name, spec)?);
        }

        for (name, spec) in &self.patterns {
            let dots = spec
                .dots
                .iter()
                .map(|dot| parse_color(name, dot))
                .collect::<Result<Vec<_>, _>>()?;
            let pattern = BackgroundPattern {
                dots,
                dot_radius: spec.dot_radius,
                tile: spec.tile,
            };
            base.patterns.insert(name.clone(), pattern);
        }

        for (name, animation) in &base.animations {
            if !base.keyframes.contains_key(&animation.keyframes) {
                return Err(TokenError::UnknownKeyframes {
                    animation: name.clone(),
                    keyframes: animation.keyframes.clone(),
                });
            }
        }

        log::debug!(
            "applied token document: {} colors, {} fonts, {} animations, {} keyframe sets",
            self.colors.len(),
            self.fonts.len(),
            self.animations.len(),
            self.keyframes.len()
        );
        Ok(base)
    }
}

fn keyframe_set(name: &str, stops: &[StopSpec]) -> Result<KeyframeSet, TokenError> {
    let stops = stops
        .iter()
        .map(|stop| -> Result<KeyframeStop, TokenError> {
            let offsets = stop
                .at
                .iter()
                .map(|&percent| {
                    if (0.0..=100.0).contains(&percent) {
                        Ok(percent / 100.0)
                    } else {
                        Err(TokenError::InvalidOffset {
                            keyframes: name.to_string(),
                            offset: percent,
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(KeyframeStop {
                offsets,
                frame: FrameStyle {
                    translate_y: stop.translate_y,
                    opacity: stop.opacity,
                },
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(KeyframeSet { stops })
}

fn animation_token(name: &str, spec: &AnimationSpec) -> Result<AnimationToken, TokenError> {
    let easing = match &spec.easing {
        Some(css) => css
            .parse::<Easing>()
            .map_err(|source| TokenError::InvalidEasing {
                animation: name.to_string(),
                source,
            })?,
        None => Easing::default(),
    };

    let iterations = match &spec.iterations {
        None => Iterations::default(),
        Some(IterationsSpec::Count(n)) => Iterations::Count(*n),
        Some(IterationsSpec::Keyword(k)) if k == "infinite" => Iterations::Infinite,
        Some(IterationsSpec::Keyword(k)) => {
            return Err(TokenError::InvalidIterations {
                animation: name.to_string(),
                value: k.clone(),
            })
        }
    };

    Ok(AnimationToken {
        keyframes: spec.keyframes.clone(),
        duration_ms: spec.duration_ms,
        easing,
        iterations,
    })
}
