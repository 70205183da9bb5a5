//! Draw commands and a recording canvas.

use crate::widget::{Canvas, TextStyle};
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

/// Fill and/or stroke of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color
    pub fill: Option<Color>,
    /// Outline
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Fill only.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Stroke only.
    #[must_use]
    pub const fn stroke(color: Color, width: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(StrokeStyle { color, width }),
        }
    }
}

/// A single recorded paint operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Rectangle, optionally rounded
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },
    /// Text run
    Text {
        /// Text content
        content: String,
        /// Position of the top-left of the run
        position: Point,
        /// Text style
        style: TextStyle,
    },
    /// Polyline or polygon
    Path {
        /// Vertices
        points: Vec<Point>,
        /// Closed and filled when true
        closed: bool,
        /// Stroke or fill color
        color: Color,
        /// Stroke width, zero for fills
        width: f32,
    },
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Used by tests to verify what was painted and by backends that replay
/// commands later.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text runs in paint order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Fill color of the filled rectangle drawn directly before the first
    /// text run with the given content.
    ///
    /// Widgets paint a row background and then its label, so this is the
    /// background the label sits on.
    #[must_use]
    pub fn background_of(&self, text: &str) -> Option<Color> {
        let idx = self.commands.iter().position(
            |cmd| matches!(cmd, DrawCommand::Text { content, .. } if content == text),
        )?;
        self.commands[..idx].iter().rev().find_map(|cmd| match cmd {
            DrawCommand::Rect {
                style: BoxStyle {
                    fill: Some(color), ..
                },
                ..
            } => Some(*color),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius,
            style: BoxStyle::fill(color),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color, width: f32) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius,
            style: BoxStyle::stroke(color, width),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn draw_path(&mut self, points: &[Point], color: Color, width: f32) {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            closed: false,
            color,
            width,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            closed: true,
            color,
            width: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_new_is_empty() {
        let canvas = RecordingCanvas::new();
        assert!(canvas.commands().is_empty());
        assert_eq!(canvas.command_count(), 0);
    }

    #[test]
    fn test_recording_canvas_records_in_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), CornerRadius::ZERO, Color::WHITE);
        canvas.draw_text("A", Point::ORIGIN, &TextStyle::default());
        canvas.draw_path(&[Point::ORIGIN, Point::new(1.0, 1.0)], Color::BLACK, 1.0);

        assert_eq!(canvas.command_count(), 3);
        assert!(matches!(canvas.commands()[0], DrawCommand::Rect { .. }));
        assert!(matches!(canvas.commands()[1], DrawCommand::Text { .. }));
        assert!(matches!(
            canvas.commands()[2],
            DrawCommand::Path { closed: false, .. }
        ));
    }

    #[test]
    fn test_recording_canvas_polygon_is_closed() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_polygon(&[Point::ORIGIN, Point::new(1.0, 0.0), Point::new(0.0, 1.0)], Color::BLACK);
        assert!(matches!(
            canvas.commands()[0],
            DrawCommand::Path { closed: true, width, .. } if width == 0.0
        ));
    }

    #[test]
    fn test_texts_and_background_of() {
        let mut canvas = RecordingCanvas::new();
        let purple = Color::from_rgb8(107, 70, 193);
        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), CornerRadius::ZERO, Color::WHITE);
        canvas.draw_text("Mathematics", Point::ORIGIN, &TextStyle::default());
        canvas.stroke_rect(Rect::new(0.0, 10.0, 10.0, 10.0), CornerRadius::ZERO, Color::BLACK, 1.0);
        canvas.fill_rect(Rect::new(0.0, 10.0, 10.0, 10.0), CornerRadius::ZERO, purple);
        canvas.draw_text("Science", Point::ORIGIN, &TextStyle::default());

        assert_eq!(canvas.texts(), vec!["Mathematics", "Science"]);
        assert_eq!(canvas.background_of("Mathematics"), Some(Color::WHITE));
        assert_eq!(canvas.background_of("Science"), Some(purple));
        assert_eq!(canvas.background_of("History"), None);
    }

    #[test]
    fn test_clear_drops_commands() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_text("x", Point::ORIGIN, &TextStyle::default());
        assert_eq!(canvas.command_count(), 1);
        canvas.clear();
        assert_eq!(canvas.command_count(), 0);
    }
}
