//! Stand-alone dropdown trigger button.
//!
//! The button owns no open state. Callers pass `is_open` purely for styling:
//! the chevron flips and the focus ring (if the style has one) is drawn.

use serde::{Deserialize, Serialize};
use synapse_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle, WidgetMessage},
    Canvas, Color, Constraints, CornerRadius, Event, Point, Rect, Size, Theme, TypeId, Widget,
};

/// Callback invoked when the button is pressed.
pub type ClickCallback = Box<dyn Fn() + Send + Sync>;

/// Message emitted when the button is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownButtonClicked;

/// Visual parameters of a dropdown trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownButtonStyle {
    /// Surface color
    pub background: Color,
    /// Border color
    pub border: Color,
    /// Border width in pixels
    pub border_width: f32,
    /// Corner radius
    pub radius: CornerRadius,
    /// Horizontal padding
    pub padding_x: f32,
    /// Vertical padding
    pub padding_y: f32,
    /// Gap between label and chevron
    pub gap: f32,
    /// Label style
    pub text: TextStyle,
    /// Chevron stroke color
    pub chevron_color: Color,
    /// Chevron box edge length
    pub chevron_size: f32,
    /// Ring drawn around the trigger while open
    pub focus_ring: Option<Color>,
}

impl DropdownButtonStyle {
    /// Pill-shaped trigger with an accent border.
    #[must_use]
    pub fn pill(theme: &Theme) -> Self {
        let accent = theme.accent();
        Self {
            background: theme.neutrals.white,
            border: accent,
            border_width: 2.0,
            radius: CornerRadius::uniform(9999.0),
            padding_x: 32.0,
            padding_y: 16.0,
            gap: 12.0,
            text: TextStyle {
                size: 20.0,
                color: theme.neutrals.gray_800,
                weight: FontWeight::Semibold,
                family: theme.font("sans").map(|f| f.to_css()),
                ..TextStyle::default()
            },
            chevron_color: accent,
            chevron_size: 32.0,
            focus_ring: None,
        }
    }

    /// Compact rectangular trigger used inside form rows.
    #[must_use]
    pub fn compact(theme: &Theme) -> Self {
        Self {
            background: theme.neutrals.white,
            border: theme.neutrals.gray_300,
            border_width: 1.0,
            radius: CornerRadius::uniform(6.0),
            padding_x: 16.0,
            padding_y: 8.0,
            gap: 12.0,
            text: TextStyle {
                size: 14.0,
                color: theme.neutrals.gray_700,
                weight: FontWeight::Medium,
                family: theme.font("sans").map(|f| f.to_css()),
                ..TextStyle::default()
            },
            chevron_color: theme.neutrals.gray_500,
            chevron_size: 16.0,
            focus_ring: Some(theme.accent()),
        }
    }

    fn line_height(&self) -> f32 {
        self.text.size * 1.4
    }

    /// Height of a trigger using this style.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.padding_y.mul_add(2.0, self.line_height())
    }
}

impl Default for DropdownButtonStyle {
    fn default() -> Self {
        Self::pill(&Theme::neural())
    }
}

/// Chevron vertices inside `area`, pointing up or down.
pub(crate) fn chevron_points(area: Rect, pointing_up: bool) -> [Point; 3] {
    let (edge, tip) = if pointing_up { (0.65, 0.35) } else { (0.35, 0.65) };
    [
        area.at_fraction(0.2, edge),
        area.at_fraction(0.5, tip),
        area.at_fraction(0.8, edge),
    ]
}

/// Trigger button with a label and a chevron.
pub struct DropdownButton {
    label: String,
    is_open: bool,
    on_click: Option<ClickCallback>,
    style: DropdownButtonStyle,
    test_id_value: Option<String>,
    accessible_name_value: Option<String>,
    bounds: Rect,
}

impl DropdownButton {
    /// Create a closed button with the pill style.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_open: false,
            on_click: None,
            style: DropdownButtonStyle::default(),
            test_id_value: None,
            accessible_name_value: None,
            bounds: Rect::default(),
        }
    }

    /// Set the open styling flag.
    #[must_use]
    pub const fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    /// Set the click callback.
    #[must_use]
    pub fn on_click<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Replace the style.
    #[must_use]
    pub fn with_style(mut self, style: DropdownButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Current label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Open styling flag.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Current style.
    #[must_use]
    pub const fn style(&self) -> &DropdownButtonStyle {
        &self.style
    }

    fn estimate_text_width(&self) -> f32 {
        self.label.chars().count() as f32 * self.style.text.size * 0.6
    }

    /// Chevron box, right-aligned and vertically centered.
    fn chevron_area(&self) -> Rect {
        let size = self.style.chevron_size;
        Rect::new(
            self.bounds.right() - self.style.padding_x - size,
            self.bounds.y + (self.bounds.height - size) / 2.0,
            size,
            size,
        )
    }

    /// Paint with an explicit open flag. Used by owners whose open state
    /// lives outside the button.
    pub(crate) fn paint_as(&self, canvas: &mut dyn Canvas, is_open: bool) {
        let style = &self.style;

        if is_open {
            if let Some(ring) = style.focus_ring {
                canvas.stroke_rect(self.bounds.inset(-2.0), style.radius, ring, 1.0);
            }
        }

        canvas.fill_rect(self.bounds, style.radius, style.background);
        if style.border_width > 0.0 {
            canvas.stroke_rect(self.bounds, style.radius, style.border, style.border_width);
        }

        let text_pos = Point::new(
            self.bounds.x + style.padding_x,
            self.bounds.y + (self.bounds.height - style.text.size) / 2.0,
        );
        canvas.draw_text(&self.label, text_pos, &style.text);

        canvas.draw_path(
            &chevron_points(self.chevron_area(), is_open),
            style.chevron_color,
            1.5,
        );
    }
}

impl std::fmt::Debug for DropdownButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownButton")
            .field("label", &self.label)
            .field("is_open", &self.is_open)
            .field("has_on_click", &self.on_click.is_some())
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Widget for DropdownButton {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let style = &self.style;
        let width = style.padding_x.mul_add(2.0, self.estimate_text_width())
            + style.gap
            + style.chevron_size;
        let height = style.height().max(style.padding_y.mul_add(2.0, style.chevron_size));
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.paint_as(canvas, self.is_open);
    }

    fn event(&mut self, event: &Event) -> Option<WidgetMessage> {
        let position = event.press_position()?;
        if !self.bounds.contains_point(&position) {
            return None;
        }
        if let Some(on_click) = &self.on_click {
            on_click();
        }
        Some(Box::new(DropdownButtonClicked))
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value
            .as_deref()
            .or(Some(self.label.as_str()))
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
