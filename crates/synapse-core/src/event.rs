//! Input events for widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Pointer down (unified mouse/touch/pen)
    PointerDown {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
        /// Button (for mouse pointers)
        button: Option<MouseButton>,
    },
    /// Widget gained focus
    FocusIn,
    /// Widget lost focus
    FocusOut,
    /// Window resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

/// Pointer identifier for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    /// Create a new pointer ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Type of pointer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerType {
    /// Mouse pointer
    #[default]
    Mouse,
    /// Touch pointer
    Touch,
    /// Pen/stylus pointer
    Pen,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

impl Event {
    /// Left-button mouse press at a position.
    #[must_use]
    pub const fn click(position: Point) -> Self {
        Self::MouseDown {
            position,
            button: MouseButton::Left,
        }
    }

    /// Touch press at a position.
    #[must_use]
    pub const fn touch(position: Point) -> Self {
        Self::PointerDown {
            pointer_id: PointerId(0),
            pointer_type: PointerType::Touch,
            position,
            button: None,
        }
    }

    /// Position of a primary press (left mouse button, touch or pen contact).
    ///
    /// Secondary mouse buttons do not count as presses.
    #[must_use]
    pub const fn press_position(&self) -> Option<Point> {
        match self {
            Self::MouseDown {
                position,
                button: MouseButton::Left,
            }
            | Self::PointerDown {
                position,
                button: None | Some(MouseButton::Left),
                ..
            } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_position_primary_only() {
        let pos = Point::new(4.0, 2.0);
        assert_eq!(Event::click(pos).press_position(), Some(pos));
        assert_eq!(Event::touch(pos).press_position(), Some(pos));
        let right = Event::MouseDown {
            position: pos,
            button: MouseButton::Right,
        };
        assert_eq!(right.press_position(), None);
        let up = Event::MouseUp {
            position: pos,
            button: MouseButton::Left,
        };
        assert_eq!(up.press_position(), None);
    }

    #[test]
    fn test_pointer_defaults() {
        assert_eq!(PointerType::default(), PointerType::Mouse);
        assert_eq!(PointerId::new(3), PointerId(3));
    }
}
