//! Error types for token files.

use std::path::PathBuf;
use synapse_core::{ColorParseError, EasingParseError};
use thiserror::Error;

/// Errors that can occur while reading or applying a token file.
#[derive(Debug, Error)]
pub enum TokenError {
    /// YAML syntax or shape error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML syntax or shape error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML output failed.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A color token is not a valid hex color.
    #[error("invalid color '{value}' for token '{name}': {source}")]
    InvalidColor {
        /// Token name
        name: String,
        /// Offending value
        value: String,
        /// Parse failure
        source: ColorParseError,
    },

    /// An animation names a keyframe set that does not exist.
    #[error("animation '{animation}' references unknown keyframes '{keyframes}'")]
    UnknownKeyframes {
        /// Animation name
        animation: String,
        /// Missing keyframe set
        keyframes: String,
    },

    /// An animation's timing function cannot be parsed.
    #[error("invalid easing for animation '{animation}': {source}")]
    InvalidEasing {
        /// Animation name
        animation: String,
        /// Parse failure
        source: EasingParseError,
    },

    /// An iteration count is neither a number nor `infinite`.
    #[error("invalid iteration count '{value}' for animation '{animation}'")]
    InvalidIterations {
        /// Animation name
        animation: String,
        /// Offending value
        value: String,
    },

    /// A keyframe offset lies outside 0-100%.
    #[error("keyframe offset {offset}% in '{keyframes}' is outside 0-100%")]
    InvalidOffset {
        /// Keyframe set name
        keyframes: String,
        /// Offending offset in percent
        offset: f64,
    },

    /// The file extension names no known format.
    #[error("unsupported token file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Reading the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = TokenError::UnknownKeyframes {
            animation: "spin-slow".to_string(),
            keyframes: "spin".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "animation 'spin-slow' references unknown keyframes 'spin'"
        );

        let err = TokenError::InvalidOffset {
            keyframes: "float".to_string(),
            offset: 120.0,
        };
        assert_eq!(
            err.to_string(),
            "keyframe offset 120% in 'float' is outside 0-100%"
        );

        let err = TokenError::UnsupportedFormat(PathBuf::from("theme.json"));
        assert_eq!(err.to_string(), "unsupported token file: theme.json");
    }

    #[test]
    fn test_color_error_has_source() {
        use std::error::Error as _;
        let err = TokenError::InvalidColor {
            name: "neural-purple".to_string(),
            value: "#zz".to_string(),
            source: ColorParseError::InvalidLength,
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid color '#zz' for token 'neural-purple'"));
    }
}
