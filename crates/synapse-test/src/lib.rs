//! Testing harness for Synapse UI widgets.
//!
//! ```
//! use synapse_test::Harness;
//! # use synapse_core::{widget::LayoutResult, Canvas, Constraints, Event, Rect, Size, TypeId, Widget, WidgetMessage};
//! # struct Blank;
//! # impl Widget for Blank {
//! #     fn type_id(&self) -> TypeId { TypeId::of::<Self>() }
//! #     fn measure(&self, c: Constraints) -> Size { c.constrain(Size::new(10.0, 10.0)) }
//! #     fn layout(&mut self, b: Rect) -> LayoutResult { LayoutResult { size: b.size() } }
//! #     fn paint(&self, _: &mut dyn Canvas) {}
//! #     fn event(&mut self, _: &Event) -> Option<WidgetMessage> { None }
//! # }
//!
//! let mut harness = Harness::new(Blank);
//! harness.click_outside();
//! harness.assert_listener_count(0);
//! ```

mod harness;

pub use harness::Harness;
