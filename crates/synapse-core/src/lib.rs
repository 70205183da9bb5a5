//! Core types and traits for the Synapse UI toolkit.
//!
//! This crate provides foundational types used throughout Synapse:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Events and the window-wide [`PointerHub`]
//! - Design tokens: [`Theme`] and the generated [`Stylesheet`]

pub mod animation;
mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
pub mod pointer;
pub mod stylesheet;
pub mod theme;
pub mod widget;

pub use animation::{Easing, EasingParseError, Interpolate, Iterations, Keyframe, KeyframeTrack};
pub use canvas::{BoxStyle, DrawCommand, RecordingCanvas, StrokeStyle};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use event::{Event, MouseButton, PointerId, PointerType};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use pointer::{ListenerId, PointerHub, PointerPress, Subscription};
pub use stylesheet::Stylesheet;
pub use theme::{
    AnimationToken, BackgroundPattern, ClipShape, FontStack, FrameStyle, KeyframeSet,
    KeyframeStop, Neutrals, ShadowToken, Theme,
};
pub use widget::{
    AccessibleRole, Canvas, FontStyle, FontWeight, LayoutResult, TextStyle, TypeId, Widget,
    WidgetMessage,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Re-exports work together
    // ==========================================================================

    #[test]
    fn test_theme_colors_parse_back_from_hex() {
        let theme = Theme::neural();
        for (name, color) in &theme.colors {
            let parsed = Color::from_hex(&color.to_hex()).unwrap();
            assert_eq!(parsed.to_rgb8(), color.to_rgb8(), "{name}");
        }
    }

    #[test]
    fn test_accent_readable_on_white() {
        let theme = Theme::neural();
        // White labels on the accent row must clear WCAG AA for body text.
        assert!(theme.accent().contrast_ratio(&Color::WHITE) >= 4.5);
    }

    #[test]
    fn test_hexagon_fills_via_canvas() {
        let mut canvas = RecordingCanvas::new();
        let points = ClipShape::hexagon().points(Rect::new(0.0, 0.0, 40.0, 40.0));
        canvas.fill_polygon(&points, Theme::neural().accent().with_alpha(0.1));
        assert!(matches!(
            &canvas.commands()[0],
            DrawCommand::Path { points, closed: true, .. } if points.len() == 6
        ));
    }

    #[test]
    fn test_hub_and_widget_lifecycle_compose() {
        struct Sensor {
            subscription: Option<Subscription>,
        }

        impl Widget for Sensor {
            fn type_id(&self) -> TypeId {
                TypeId::of::<Self>()
            }
            fn measure(&self, constraints: Constraints) -> Size {
                constraints.constrain(Size::ZERO)
            }
            fn layout(&mut self, bounds: Rect) -> LayoutResult {
                LayoutResult { size: bounds.size() }
            }
            fn paint(&self, _canvas: &mut dyn Canvas) {}
            fn event(&mut self, _event: &Event) -> Option<WidgetMessage> {
                None
            }
            fn mount(&mut self, hub: &PointerHub) {
                self.subscription = Some(hub.subscribe(|_| {}));
            }
            fn unmount(&mut self) {
                self.subscription = None;
            }
        }

        let hub = PointerHub::new();
        let mut sensor = Sensor { subscription: None };
        sensor.mount(&hub);
        assert_eq!(hub.listener_count(), 1);
        sensor.unmount();
        assert_eq!(hub.listener_count(), 0);
    }
}
