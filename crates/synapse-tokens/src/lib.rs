//! Design-token files for Synapse UI themes.
//!
//! Token files are YAML or TOML documents merged over the built-in neural
//! theme:
//!
//! ```
//! let theme = synapse_tokens::load_yaml("colors:\n  ink: '#111827'\n").unwrap();
//! assert!(theme.color("ink").is_some());
//! assert!(theme.color("neural-purple").is_some());
//! ```

mod document;
mod error;

pub use document::{AnimationSpec, IterationsSpec, PatternSpec, ShadowSpec, StopSpec, TokenDocument};
pub use error::TokenError;

use std::path::Path;
use synapse_core::Theme;

/// Load a YAML token document over the neural theme.
pub fn load_yaml(source: &str) -> Result<Theme, TokenError> {
    TokenDocument::from_yaml(source)?.apply(Theme::neural())
}

/// Load a TOML token document over the neural theme.
pub fn load_toml(source: &str) -> Result<Theme, TokenError> {
    TokenDocument::from_toml(source)?.apply(Theme::neural())
}

/// Load a token file, choosing the format from its extension
/// (`.yaml`, `.yml` or `.toml`).
pub fn load_path(path: impl AsRef<Path>) -> Result<Theme, TokenError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> Result<Theme, TokenError> = match extension.as_deref() {
        Some("yaml" | "yml") => load_yaml,
        Some("toml") => load_toml,
        _ => return Err(TokenError::UnsupportedFormat(path.to_path_buf())),
    };

    let source = std::fs::read_to_string(path)?;
    log::debug!("loading design tokens from {}", path.display());
    parse(&source)
}
