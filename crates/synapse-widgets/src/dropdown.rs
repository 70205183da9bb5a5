//! Single-select dropdown that closes on outside presses.
//!
//! The selected value belongs to the host: the dropdown only reports the value
//! the user picked through its `on_change` callback and waits for the host to
//! push it back with [`Dropdown::set_value`]. Visibility of the option list is
//! the dropdown's own state.
//!
//! While mounted, the dropdown holds a [`Subscription`] on the window's
//! [`PointerHub`]. A press outside the trigger and the open list closes it.

use crate::dropdown_button::{DropdownButton, DropdownButtonStyle};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use synapse_core::{
    widget::{AccessibleRole, LayoutResult, TextStyle, WidgetMessage},
    Canvas, Color, Constraints, CornerRadius, Event, Point, PointerHub, Rect, Size, Subscription,
    Theme, TypeId, Widget,
};

/// Callback receiving the value the user picked.
pub type ChangeCallback = Box<dyn Fn(&str) + Send + Sync>;

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Value reported on selection
    pub value: String,
    /// Display label
    pub label: String,
}

impl DropdownOption {
    /// Create a new option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Message emitted when an option is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownSelected {
    /// Value of the activated option
    pub value: String,
    /// Index of the activated option
    pub index: usize,
}

/// WCAG AA contrast for body text.
const MIN_LABEL_CONTRAST: f32 = 4.5;

/// Visual parameters of a dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownStyle {
    /// Trigger appearance
    pub trigger: DropdownButtonStyle,
    /// List panel surface
    pub list_background: Color,
    /// List panel border
    pub list_border: Color,
    /// List panel corners
    pub list_radius: CornerRadius,
    /// Space between trigger and list
    pub list_gap: f32,
    /// Padding above the first and below the last row
    pub list_padding_y: f32,
    /// Left inset of row labels
    pub item_padding_x: f32,
    /// Row label style
    pub item_text: TextStyle,
    /// Row background for the selected value
    pub selected_background: Color,
    /// Row label color for the selected value
    pub selected_text: Color,
    /// Row background under the pointer
    pub hover_background: Color,
}

impl DropdownStyle {
    /// Derive a style from theme tokens. Selection uses the accent color,
    /// with white labels unless the accent is too light for them.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let trigger = DropdownButtonStyle::compact(theme);
        let item_text = trigger.text.clone();
        let accent = theme.accent();
        let selected_text =
            if accent.contrast_ratio(&theme.neutrals.white) >= MIN_LABEL_CONTRAST {
                theme.neutrals.white
            } else {
                theme.neutrals.gray_800
            };
        Self {
            trigger,
            list_background: theme.neutrals.white,
            list_border: theme.neutrals.gray_200,
            list_radius: CornerRadius::uniform(6.0),
            list_gap: 4.0,
            list_padding_y: 4.0,
            item_padding_x: 16.0,
            item_text,
            selected_background: accent,
            selected_text,
            hover_background: theme.neutrals.gray_100,
        }
    }
}

impl Default for DropdownStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::neural())
    }
}

/// Open flag and rendered region, shared with the outside-press listener.
#[derive(Debug, Default)]
struct Disclosure {
    open: bool,
    trigger: Rect,
    list: Rect,
}

impl Disclosure {
    /// Whether a point hits the trigger or, while open, the list.
    fn contains(&self, point: &Point) -> bool {
        self.trigger.contains_point(point) || (self.open && self.list.contains_point(point))
    }
}

/// Dropdown widget.
pub struct Dropdown {
    value: String,
    options: Vec<DropdownOption>,
    on_change: Option<ChangeCallback>,
    style: DropdownStyle,
    min_width: f32,
    item_height: f32,
    trigger: DropdownButton,
    disclosure: Arc<Mutex<Disclosure>>,
    subscription: Option<Subscription>,
    hovered_item: Option<usize>,
    test_id_value: Option<String>,
    accessible_name_value: Option<String>,
}

impl Dropdown {
    /// Create a closed dropdown showing `value`.
    #[must_use]
    pub fn new(value: impl Into<String>, options: impl IntoIterator<Item = DropdownOption>) -> Self {
        let style = DropdownStyle::default();
        let mut dropdown = Self {
            value: value.into(),
            options: options.into_iter().collect(),
            on_change: None,
            trigger: DropdownButton::new("").with_style(style.trigger.clone()),
            style,
            min_width: 150.0,
            item_height: 36.0,
            disclosure: Arc::new(Mutex::new(Disclosure::default())),
            subscription: None,
            hovered_item: None,
            test_id_value: None,
            accessible_name_value: None,
        };
        dropdown.sync_label();
        dropdown
    }

    /// Set the selection callback.
    #[must_use]
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Replace the style.
    #[must_use]
    pub fn with_style(mut self, style: DropdownStyle) -> Self {
        let bounds = self.state().trigger;
        self.trigger = DropdownButton::new(self.selected_label()).with_style(style.trigger.clone());
        self.trigger.layout(bounds);
        self.style = style;
        self.sync_region();
        self
    }

    /// Set minimum trigger width.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(50.0);
        self
    }

    /// Set option row height.
    #[must_use]
    pub fn item_height(mut self, height: f32) -> Self {
        self.item_height = height.max(20.0);
        self.sync_region();
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

    fn state(&self) -> MutexGuard<'_, Disclosure> {
        self.disclosure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Label of the first option whose value equals the current value, or
    /// `""` when none does.
    #[must_use]
    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.value == self.value)
            .map_or("", |o| o.label.as_str())
    }

    /// Check if the option list is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state().open
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Options in display order.
    #[must_use]
    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    /// Current style.
    #[must_use]
    pub const fn style(&self) -> &DropdownStyle {
        &self.style
    }

    /// Check whether the outside-press listener is registered.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Accept a new value from the host. Open state is unaffected.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.sync_label();
    }

    /// Replace the options. Open state is unaffected.
    pub fn set_options(&mut self, options: impl IntoIterator<Item = DropdownOption>) {
        self.options = options.into_iter().collect();
        self.hovered_item = None;
        self.sync_label();
        self.sync_region();
    }

    /// Flip the open flag, as a trigger press does.
    pub fn toggle(&mut self) {
        let mut state = self.state();
        state.open = !state.open;
        log::debug!(
            "dropdown {}",
            if state.open { "opened" } else { "closed" }
        );
        drop(state);
        self.hovered_item = None;
    }

    /// Close the list without reporting a selection.
    pub fn close(&mut self) {
        let mut state = self.state();
        if state.open {
            state.open = false;
            log::debug!("dropdown closed");
        }
        drop(state);
        self.hovered_item = None;
    }

    /// Activate the option at `index`: report its value to `on_change` once,
    /// then close.
    ///
    /// Returns `None` and changes nothing when `index` is out of range.
    pub fn activate(&mut self, index: usize) -> Option<DropdownSelected> {
        let Some(option) = self.options.get(index) else {
            log::trace!(
                "ignoring activation of option {index} of {}",
                self.options.len()
            );
            return None;
        };
        let selected = DropdownSelected {
            value: option.value.clone(),
            index,
        };

        log::debug!("dropdown option {index} ({}) activated", selected.value);
        if let Some(on_change) = &self.on_change {
            on_change(&selected.value);
        }
        self.close();
        Some(selected)
    }

    fn sync_label(&mut self) {
        let label = self.selected_label().to_string();
        self.trigger.set_label(label);
    }

    fn list_height(&self) -> f32 {
        if self.options.is_empty() {
            return 0.0;
        }
        (self.options.len() as f32).mul_add(self.item_height, self.style.list_padding_y * 2.0)
    }

    fn sync_region(&mut self) {
        let height = self.list_height();
        let gap = self.style.list_gap;
        let mut state = self.state();
        state.list = state.trigger.below(gap, height);
    }

    fn row_rect(list: Rect, index: usize, item_height: f32, padding_y: f32) -> Rect {
        Rect::new(
            list.x,
            (index as f32).mul_add(item_height, list.y + padding_y),
            list.width,
            item_height,
        )
    }

    /// Option row under `point`, if the list is open.
    fn row_at(&self, point: &Point) -> Option<usize> {
        let state = self.state();
        if !state.open || !state.list.contains_point(point) {
            return None;
        }
        let list = state.list;
        drop(state);
        (0..self.options.len()).find(|&i| {
            Self::row_rect(list, i, self.item_height, self.style.list_padding_y)
                .contains_point(point)
        })
    }
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("value", &self.value)
            .field("options", &self.options)
            .field("open", &self.is_open())
            .field("mounted", &self.is_mounted())
            .field("has_on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

impl Widget for Dropdown {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let trigger = self.trigger.measure(Constraints::unbounded());
        let width = trigger.width.max(self.min_width);
        constraints.constrain(Size::new(width, trigger.height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.trigger.layout(bounds);
        self.state().trigger = bounds;
        self.sync_region();
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let (open, list) = {
            let state = self.state();
            (state.open, state.list)
        };

        self.trigger.paint_as(canvas, open);
        if !open {
            return;
        }

        let style = &self.style;
        canvas.fill_rect(list, style.list_radius, style.list_background);
        canvas.stroke_rect(list, style.list_radius, style.list_border, 1.0);

        for (i, option) in self.options.iter().enumerate() {
            let row = Self::row_rect(list, i, self.item_height, style.list_padding_y);
            let selected = option.value == self.value;

            let background = if selected {
                style.selected_background
            } else if Some(i) == self.hovered_item {
                style.hover_background
            } else {
                style.list_background
            };
            canvas.fill_rect(row, CornerRadius::ZERO, background);

            let text_style = TextStyle {
                color: if selected {
                    style.selected_text
                } else {
                    style.item_text.color
                },
                ..style.item_text.clone()
            };
            let text_pos = Point::new(
                row.x + style.item_padding_x,
                row.y + (self.item_height - text_style.size) / 2.0,
            );
            canvas.draw_text(&option.label, text_pos, &text_style);
        }
    }

    fn event(&mut self, event: &Event) -> Option<WidgetMessage> {
        if let Event::MouseMove { position } = event {
            self.hovered_item = self.row_at(position);
            return None;
        }

        if self.trigger.event(event).is_some() {
            self.toggle();
            return None;
        }

        // Presses outside the rendered region are handled by the hub listener.
        let position = event.press_position()?;
        let index = self.row_at(&position)?;
        self.activate(index)
            .map(|selected| Box::new(selected) as WidgetMessage)
    }

    fn mount(&mut self, hub: &PointerHub) {
        let disclosure = Arc::clone(&self.disclosure);
        let subscription = hub.subscribe(move |press| {
            let mut state = disclosure.lock().unwrap_or_else(PoisonError::into_inner);
            if state.open && !state.contains(&press.position) {
                state.open = false;
                log::debug!(
                    "dropdown closed by outside press at ({}, {})",
                    press.position.x,
                    press.position.y
                );
            }
        });
        log::debug!("dropdown mounted as pointer listener {}", subscription.id().0);
        // Replacing an earlier subscription drops it, so remounting never
        // leaves a second listener behind.
        self.subscription = Some(subscription);
    }

    fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            log::debug!("dropdown unmounted, releasing listener {}", subscription.id().0);
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ComboBox
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.state().trigger
    }
}
