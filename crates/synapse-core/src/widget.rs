//! Widget trait and related types.
//!
//! This module defines the core `Widget` trait and supporting types for building
//! UI components in Synapse.
//!
//! # Widget Lifecycle
//!
//! 1. **Mount**: acquire shared resources (pointer subscriptions)
//! 2. **Measure**: compute intrinsic size given constraints
//! 3. **Layout**: position self within allocated bounds
//! 4. **Paint**: generate draw commands for rendering
//! 5. **Unmount**: release everything acquired on mount
//!
//! # Examples
//!
//! ```
//! use synapse_core::TypeId;
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{CornerRadius, Point, Rect, Size};
use crate::pointer::PointerHub;
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Message emitted by a widget in response to an event.
pub type WidgetMessage = Box<dyn Any + Send>;

/// Core widget trait that all UI elements implement.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Position the widget within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events.
    fn event(&mut self, event: &Event) -> Option<WidgetMessage>;

    /// Called when the widget enters the tree.
    ///
    /// Widgets that observe interactions outside their own bounds subscribe
    /// to `hub` here.
    fn mount(&mut self, hub: &PointerHub) {
        let _ = hub;
    }

    /// Called when the widget leaves the tree. Must release everything
    /// acquired in [`Widget::mount`].
    fn unmount(&mut self) {}

    /// Check if this widget is interactive (can receive events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle with rounded corners.
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color);

    /// Draw a stroked rectangle with rounded corners.
    fn stroke_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color, width: f32);

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Draw an open polyline.
    fn draw_path(&mut self, points: &[Point], color: Color, width: f32);

    /// Fill a polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Color);
}

/// Text style for rendering.
///
/// # Examples
///
/// ```
/// use synapse_core::{Color, FontWeight, TextStyle};
///
/// let style = TextStyle {
///     size: 14.0,
///     color: Color::from_hex("#374151").expect("valid hex"),
///     weight: FontWeight::Medium,
///     ..TextStyle::default()
/// };
/// assert!(style.family.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Font style
    pub style: FontStyle,
    /// Font family list in CSS form, `None` for the backend default
    pub family: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            family: None,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    /// Light (300)
    Light,
    /// Normal (400)
    Normal,
    /// Medium (500)
    Medium,
    /// Semibold (600)
    Semibold,
    /// Bold (700)
    Bold,
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    /// Normal style
    Normal,
    /// Italic style
    Italic,
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button
    Button,
    /// Combo box / dropdown select
    ComboBox,
    /// List box shown by a combo box
    ListBox,
    /// Option within a list box
    Option,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id() {
        assert_eq!(TypeId::of::<u32>(), TypeId::of::<u32>());
        assert_ne!(TypeId::of::<u32>(), TypeId::of::<String>());
    }

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.size, 16.0);
        assert_eq!(style.weight, FontWeight::Normal);
        assert_eq!(style.style, FontStyle::Normal);
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.family, None);
    }

    #[test]
    fn test_accessible_role_default() {
        assert_eq!(AccessibleRole::default(), AccessibleRole::Generic);
    }

    #[test]
    fn test_layout_result_default() {
        assert_eq!(LayoutResult::default().size, Size::ZERO);
    }
}
