//! Test harness for Synapse widgets.
//!
//! The harness plays the role of the window: it owns the [`PointerHub`],
//! mounts the root widget on creation and unmounts it on drop, and routes
//! every simulated event first to the hub's global listeners and then to the
//! widget itself.

use std::collections::VecDeque;
use synapse_core::{
    Constraints, Event, MouseButton, Point, PointerHub, RecordingCanvas, Rect, Widget,
    WidgetMessage,
};

/// Test harness for interacting with a mounted widget.
pub struct Harness {
    /// Root widget being tested
    root: Box<dyn Widget>,
    /// Window-wide pointer listeners
    hub: PointerHub,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Current viewport
    viewport: Rect,
    /// Messages emitted by the root
    messages: Vec<WidgetMessage>,
    /// Whether the root is mounted
    mounted: bool,
}

impl Harness {
    /// Mount `root` in a 1280x720 viewport.
    pub fn new(root: impl Widget + 'static) -> Self {
        let mut harness = Self {
            root: Box::new(root),
            hub: PointerHub::new(),
            event_queue: VecDeque::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
            messages: Vec::new(),
            mounted: false,
        };
        harness.mount();
        harness.relayout();
        harness
    }

    /// Set the viewport size and lay the root out again.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    fn relayout(&mut self) {
        let size = self
            .root
            .measure(Constraints::loose(self.viewport.size()));
        self.root.layout(Rect::from_size(size));
    }

    // === Lifecycle ===

    /// Mount the root if it is not mounted.
    pub fn mount(&mut self) -> &mut Self {
        if !self.mounted {
            self.root.mount(&self.hub);
            self.mounted = true;
            log::trace!("harness mounted root");
        }
        self
    }

    /// Unmount the root if it is mounted.
    pub fn unmount(&mut self) -> &mut Self {
        if self.mounted {
            self.root.unmount();
            self.mounted = false;
            log::trace!("harness unmounted root");
        }
        self
    }

    /// Check whether the root is mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    // === Event Simulation ===

    /// Simulate a left click at a position.
    pub fn click_at(&mut self, position: Point) -> &mut Self {
        self.event_queue.push_back(Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Simulate a press with any mouse button.
    pub fn pointer_down(&mut self, position: Point, button: MouseButton) -> &mut Self {
        self.event_queue
            .push_back(Event::MouseDown { position, button });
        self.process_events();
        self
    }

    /// Simulate a touch contact.
    pub fn touch_at(&mut self, position: Point) -> &mut Self {
        self.event_queue.push_back(Event::touch(position));
        self.process_events();
        self
    }

    /// Simulate moving the pointer.
    pub fn hover(&mut self, position: Point) -> &mut Self {
        self.event_queue.push_back(Event::MouseMove { position });
        self.process_events();
        self
    }

    /// Click the center of the root if its test ID matches.
    pub fn click(&mut self, test_id: &str) -> &mut Self {
        if self.exists(test_id) {
            let center = self.root.bounds().center();
            self.click_at(center);
        }
        self
    }

    /// Click the bottom-right corner of the viewport, away from the root.
    pub fn click_outside(&mut self) -> &mut Self {
        let corner = Point::new(self.viewport.right() - 1.0, self.viewport.bottom() - 1.0);
        self.click_at(corner)
    }

    // === Queries ===

    /// Check if the root carries the test ID.
    #[must_use]
    pub fn exists(&self, test_id: &str) -> bool {
        self.root.test_id() == Some(test_id)
    }

    /// Root widget.
    #[must_use]
    pub fn root(&self) -> &dyn Widget {
        &*self.root
    }

    /// Pointer hub the root is mounted on.
    #[must_use]
    pub const fn hub(&self) -> &PointerHub {
        &self.hub
    }

    /// Number of live global pointer listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.hub.listener_count()
    }

    /// Paint the root into a fresh recording canvas.
    #[must_use]
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    /// Text runs the root currently paints.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.paint().texts().into_iter().map(str::to_string).collect()
    }

    /// Number of messages collected so far.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Drain collected messages of type `T`. Other messages are kept.
    pub fn take_messages<T: 'static>(&mut self) -> Vec<T> {
        let mut taken = Vec::new();
        let mut kept = Vec::new();
        for msg in self.messages.drain(..) {
            match msg.downcast::<T>() {
                Ok(m) => taken.push(*m),
                Err(other) => kept.push(other),
            }
        }
        self.messages = kept;
        taken
    }

    // === Assertions ===

    /// Assert that the root paints the given text.
    ///
    /// # Panics
    ///
    /// Panics if no text run matches.
    pub fn assert_text_shown(&self, text: &str) -> &Self {
        let texts = self.texts();
        assert!(
            texts.iter().any(|t| t == text),
            "Expected '{text}' to be painted, got {texts:?}"
        );
        self
    }

    /// Assert that the root does not paint the given text.
    ///
    /// # Panics
    ///
    /// Panics if a text run matches.
    pub fn assert_text_hidden(&self, text: &str) -> &Self {
        let texts = self.texts();
        assert!(
            !texts.iter().any(|t| t == text),
            "Expected '{text}' not to be painted, got {texts:?}"
        );
        self
    }

    /// Assert the number of live global listeners.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_listener_count(&self, expected: usize) -> &Self {
        let actual = self.listener_count();
        assert_eq!(
            actual, expected,
            "Expected {expected} pointer listeners but found {actual}"
        );
        self
    }

    // === Internal ===

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            let notified = self.hub.dispatch(&event);
            if notified > 0 {
                log::trace!("{notified} global listeners saw {event:?}");
            }
            if let Some(msg) = self.root.event(&event) {
                self.messages.push(msg);
            }
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use synapse_core::{widget::LayoutResult, Canvas, Size, Subscription, TextStyle, TypeId};

    #[derive(Debug, PartialEq)]
    struct Pressed(Point);

    /// Reports presses on itself and counts every press it hears globally.
    struct Sensor {
        bounds: Rect,
        heard: Arc<AtomicUsize>,
        subscription: Option<Subscription>,
    }

    impl Sensor {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let heard = Arc::new(AtomicUsize::new(0));
            let sensor = Self {
                bounds: Rect::default(),
                heard: Arc::clone(&heard),
                subscription: None,
            };
            (sensor, heard)
        }
    }

    impl Widget for Sensor {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }
        fn measure(&self, c: Constraints) -> Size {
            c.constrain(Size::new(100.0, 50.0))
        }
        fn layout(&mut self, b: Rect) -> LayoutResult {
            self.bounds = b;
            LayoutResult { size: b.size() }
        }
        fn paint(&self, canvas: &mut dyn Canvas) {
            canvas.draw_text("sensor", self.bounds.origin(), &TextStyle::default());
        }
        fn event(&mut self, event: &Event) -> Option<WidgetMessage> {
            let position = event.press_position()?;
            self.bounds
                .contains_point(&position)
                .then(|| Box::new(Pressed(position)) as WidgetMessage)
        }
        fn mount(&mut self, hub: &PointerHub) {
            let heard = Arc::clone(&self.heard);
            self.subscription = Some(hub.subscribe(move |_| {
                heard.fetch_add(1, Ordering::SeqCst);
            }));
        }
        fn unmount(&mut self) {
            self.subscription = None;
        }
        fn test_id(&self) -> Option<&str> {
            Some("sensor")
        }
        fn bounds(&self) -> Rect {
            self.bounds
        }
    }

    #[test]
    fn test_new_mounts_and_lays_out() {
        let (sensor, _) = Sensor::new();
        let harness = Harness::new(sensor);
        assert!(harness.is_mounted());
        assert_eq!(harness.listener_count(), 1);
        assert_eq!(harness.root().bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_click_routes_to_hub_and_root() {
        let (sensor, heard) = Sensor::new();
        let mut harness = Harness::new(sensor);
        harness.click("sensor");

        assert_eq!(heard.load(Ordering::SeqCst), 1);
        assert_eq!(
            harness.take_messages::<Pressed>(),
            vec![Pressed(Point::new(50.0, 25.0))]
        );
        assert_eq!(harness.message_count(), 0);
    }

    #[test]
    fn test_click_unknown_test_id_does_nothing() {
        let (sensor, heard) = Sensor::new();
        let mut harness = Harness::new(sensor);
        harness.click("missing");
        assert_eq!(heard.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_click_outside_reaches_hub_only() {
        let (sensor, heard) = Sensor::new();
        let mut harness = Harness::new(sensor);
        harness.click_outside();
        assert_eq!(heard.load(Ordering::SeqCst), 1);
        assert_eq!(harness.message_count(), 0);
    }

    #[test]
    fn test_hover_is_not_a_press() {
        let (sensor, heard) = Sensor::new();
        let mut harness = Harness::new(sensor);
        harness.hover(Point::new(10.0, 10.0));
        assert_eq!(heard.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_take_messages_keeps_other_types() {
        let (sensor, _) = Sensor::new();
        let mut harness = Harness::new(sensor);
        harness.touch_at(Point::new(5.0, 5.0));
        assert!(harness.take_messages::<String>().is_empty());
        assert_eq!(harness.message_count(), 1);
    }

    #[test]
    fn test_unmount_and_remount() {
        let (sensor, _) = Sensor::new();
        let mut harness = Harness::new(sensor);
        harness.unmount().unmount();
        harness.assert_listener_count(0);
        harness.mount().mount();
        harness.assert_listener_count(1);
    }

    #[test]
    fn test_drop_unmounts() {
        let (sensor, _) = Sensor::new();
        let harness = Harness::new(sensor);
        let hub = harness.hub().clone();
        drop(harness);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_viewport_relayout() {
        let (sensor, _) = Sensor::new();
        let harness = Harness::new(sensor).viewport(60.0, 20.0);
        assert_eq!(harness.root().bounds().size(), Size::new(60.0, 20.0));
    }

    #[test]
    fn test_text_assertions() {
        let (sensor, _) = Sensor::new();
        let mut harness = Harness::new(sensor);
        harness
            .pointer_down(Point::new(1.0, 1.0), MouseButton::Right)
            .assert_text_shown("sensor")
            .assert_text_hidden("other");
        assert_eq!(harness.texts(), vec!["sensor".to_string()]);
    }
}
