//! CSS utility classes generated from a [`Theme`].
//!
//! ```
//! use synapse_core::{Stylesheet, Theme};
//!
//! let sheet = Stylesheet::from_theme(&Theme::neural());
//! let rule = sheet.rule(".bg-neural-purple").expect("brand color class");
//! assert_eq!(rule.declaration("background-color"), Some("#6b46c1"));
//! ```

use crate::theme::Theme;
use std::fmt;

/// One selector with its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Selector, including the leading dot
    pub selector: String,
    /// `(property, value)` pairs in output order
    pub declarations: Vec<(String, String)>,
}

impl Rule {
    fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    fn decl(mut self, property: &str, value: impl Into<String>) -> Self {
        self.declarations.push((property.to_string(), value.into()));
        self
    }

    /// Value of a declared property.
    #[must_use]
    pub fn declaration(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for (property, value) in &self.declarations {
            write!(f, " {property}: {value};")?;
        }
        write!(f, " }}")
    }
}

/// A rendered `@keyframes` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframesBlock {
    /// Keyframe set name
    pub name: String,
    /// `(selector, declarations)` per stop, e.g. `("0%, 100%", "opacity: 1")`
    pub stops: Vec<(String, String)>,
}

impl fmt::Display for KeyframesBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@keyframes {} {{", self.name)?;
        for (selector, body) in &self.stops {
            writeln!(f, "  {selector} {{ {body}; }}")?;
        }
        write!(f, "}}")
    }
}

/// Utility classes for every token in a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    rules: Vec<Rule>,
    keyframes: Vec<KeyframesBlock>,
}

impl Stylesheet {
    /// Generate the stylesheet. Output order is stable: tokens are visited
    /// by category, then by name.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let mut rules = Vec::new();

        for (name, color) in &theme.colors {
            let css = color.to_css();
            rules.push(Rule::new(format!(".bg-{name}")).decl("background-color", css.clone()));
            rules.push(Rule::new(format!(".text-{name}")).decl("color", css.clone()));
            rules.push(Rule::new(format!(".border-{name}")).decl("border-color", css));
        }

        for (name, stack) in &theme.fonts {
            rules.push(Rule::new(format!(".font-{name}")).decl("font-family", stack.to_css()));
        }

        for (name, shadow) in &theme.shadows {
            rules.push(Rule::new(format!(".shadow-{name}")).decl("box-shadow", shadow.to_css()));
        }

        for (name, animation) in &theme.animations {
            rules.push(Rule::new(format!(".animate-{name}")).decl("animation", animation.to_css()));
        }

        for (name, pattern) in &theme.patterns {
            rules.push(
                Rule::new(format!(".bg-{name}-pattern")).decl("background-image", pattern.image_css()),
            );
            rules.push(Rule::new(format!(".bg-{name}")).decl("background-size", pattern.size_css()));
        }

        for (name, clip) in &theme.clips {
            rules.push(Rule::new(format!(".clip-{name}")).decl("clip-path", clip.to_css()));
        }

        let keyframes = theme
            .keyframes
            .iter()
            .map(|(name, set)| KeyframesBlock {
                name: name.clone(),
                stops: set
                    .stops
                    .iter()
                    .map(|stop| {
                        let selector = stop
                            .percents()
                            .iter()
                            .map(|p| format!("{p}%"))
                            .collect::<Vec<_>>()
                            .join(", ");
                        (selector, stop.frame.to_css())
                    })
                    .collect(),
            })
            .collect();

        log::debug!(
            "generated {} utility rules for theme '{}'",
            rules.len(),
            theme.name
        );
        Self { rules, keyframes }
    }

    /// Find a rule by selector.
    #[must_use]
    pub fn rule(&self, selector: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.selector == selector)
    }

    /// All utility rules.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Find a keyframes block by name.
    #[must_use]
    pub fn keyframes(&self, name: &str) -> Option<&KeyframesBlock> {
        self.keyframes.iter().find(|k| k.name == name)
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.keyframes {
            writeln!(f, "{block}")?;
        }
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{FrameStyle, KeyframeSet};

    #[test]
    fn test_color_classes() {
        let sheet = Stylesheet::from_theme(&Theme::neural());
        assert_eq!(
            sheet.rule(".text-growth-green").unwrap().declaration("color"),
            Some("#48bb78")
        );
        assert_eq!(
            sheet
                .rule(".border-neural-purple")
                .unwrap()
                .declaration("border-color"),
            Some("#6b46c1")
        );
    }

    #[test]
    fn test_font_and_shadow_classes() {
        let sheet = Stylesheet::from_theme(&Theme::neural());
        assert_eq!(
            sheet.rule(".font-sans").unwrap().declaration("font-family"),
            Some("Inter, system-ui, -apple-system, sans-serif")
        );
        assert_eq!(
            sheet.rule(".shadow-neural").unwrap().to_string(),
            ".shadow-neural { box-shadow: 0 4px 6px rgba(107, 70, 193, 0.1); }"
        );
    }

    #[test]
    fn test_animation_classes() {
        let sheet = Stylesheet::from_theme(&Theme::neural());
        assert_eq!(
            sheet.rule(".animate-float").unwrap().declaration("animation"),
            Some("float 3s ease-in-out infinite")
        );
        assert!(sheet.rule(".animate-pulse").is_some());
    }

    #[test]
    fn test_keyframes_block() {
        let sheet = Stylesheet::from_theme(&Theme::neural());
        let float = sheet.keyframes("float").unwrap();
        assert_eq!(
            float.to_string(),
            "@keyframes float {\n  0%, 100% { transform: translateY(0); }\n  50% { transform: translateY(-10px); }\n}"
        );
        let pulse = sheet.keyframes("pulse").unwrap();
        assert_eq!(pulse.stops[1], ("50%".to_string(), "opacity: 0.5".to_string()));
    }

    #[test]
    fn test_keyframe_selectors_print_clean_percents() {
        let mut theme = Theme::neural();
        theme.keyframes.insert(
            "blink".to_string(),
            KeyframeSet::default().stop(
                &[0.07, 0.333],
                FrameStyle {
                    opacity: Some(0.0),
                    ..FrameStyle::default()
                },
            ),
        );
        let sheet = Stylesheet::from_theme(&theme);
        assert_eq!(sheet.keyframes("blink").unwrap().stops[0].0, "7%, 33.3%");
    }

    #[test]
    fn test_pattern_and_clip_classes() {
        let sheet = Stylesheet::from_theme(&Theme::neural());
        assert_eq!(
            sheet.rule(".bg-neural").unwrap().declaration("background-size"),
            Some("40px 40px")
        );
        assert!(sheet
            .rule(".bg-neural-pattern")
            .unwrap()
            .declaration("background-image")
            .unwrap()
            .starts_with("radial-gradient(#6b46c1 1px"));
        assert_eq!(
            sheet.rule(".clip-hexagon").unwrap().declaration("clip-path"),
            Some("polygon(50% 0%, 100% 25%, 100% 75%, 50% 100%, 0% 75%, 0% 25%)")
        );
    }

    #[test]
    fn test_display_lists_everything() {
        let theme = Theme::neural();
        let sheet = Stylesheet::from_theme(&theme);
        let css = sheet.to_string();
        assert!(css.starts_with("@keyframes float {"));
        assert_eq!(css.lines().filter(|l| l.starts_with('.')).count(), sheet.rules().len());
        // 3 classes per color, 2 fonts, 1 shadow, 2 animations, 2 pattern classes, 1 clip
        assert_eq!(sheet.rules().len(), 8 * 3 + 2 + 1 + 2 + 2 + 1);
    }

    #[test]
    fn test_empty_theme_renders_nothing() {
        let mut theme = Theme::neural();
        theme.colors.clear();
        theme.fonts.clear();
        theme.shadows.clear();
        theme.animations.clear();
        theme.keyframes.clear();
        theme.patterns.clear();
        theme.clips.clear();
        assert_eq!(Stylesheet::from_theme(&theme).to_string(), "");
    }
}
