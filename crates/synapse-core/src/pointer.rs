//! Global pointer-down listeners with scoped subscriptions.
//!
//! Widgets that need to react to presses anywhere in the window (closing a
//! popup on an outside click, for example) subscribe to a [`PointerHub`]
//! when they mount. The returned [`Subscription`] removes the listener when
//! it is dropped, so a listener never outlives the widget that
//! owns the guard.
//!
//! ```
//! use synapse_core::{Event, Point, PointerHub};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let hub = PointerHub::new();
//! let presses = Arc::new(AtomicUsize::new(0));
//! let seen = Arc::clone(&presses);
//!
//! let sub = hub.subscribe(move |_press| {
//!     seen.fetch_add(1, Ordering::SeqCst);
//! });
//! hub.dispatch(&Event::click(Point::new(5.0, 5.0)));
//! assert_eq!(presses.load(Ordering::SeqCst), 1);
//!
//! drop(sub);
//! assert_eq!(hub.listener_count(), 0);
//! ```

use crate::event::{Event, MouseButton};
use crate::geometry::Point;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// A pointer press as seen by global listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    /// Press position in window coordinates
    pub position: Point,
    /// Mouse button, `None` for touch and pen contacts
    pub button: Option<MouseButton>,
}

impl PointerPress {
    /// Extract the press from an event, if it is a pointer-down.
    #[must_use]
    pub const fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::MouseDown { position, button } => Some(Self {
                position: *position,
                button: Some(*button),
            }),
            Event::PointerDown {
                position, button, ..
            } => Some(Self {
                position: *position,
                button: *button,
            }),
            _ => None,
        }
    }
}

/// Callback invoked for every pointer press while subscribed.
///
/// Listeners run while the hub is locked and must not call back into it.
pub type PointerListener = Box<dyn FnMut(&PointerPress) + Send>;

/// Identifier of one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, PointerListener)>,
}

impl Registry {
    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }
}

/// Window-wide registry of pointer-down listeners.
///
/// Cloning the hub yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    registry: Arc<Mutex<Registry>>,
}

impl PointerHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a listener. It stays registered until the returned guard is
    /// dropped.
    #[must_use = "dropping the subscription unregisters the listener immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PointerPress) + Send + 'static,
    {
        let mut registry = self.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        log::trace!(
            "pointer listener {} subscribed ({} active)",
            id.0,
            registry.listeners.len()
        );

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver an event to every listener if it is a pointer-down.
    ///
    /// Listeners are called in subscription order. Returns how many were
    /// notified; non-press events notify nobody.
    pub fn dispatch(&self, event: &Event) -> usize {
        let Some(press) = PointerPress::from_event(event) else {
            return 0;
        };
        let mut registry = self.lock();
        for (_, listener) in &mut registry.listeners {
            listener(&press);
        }
        registry.listeners.len()
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.lock();
        f.debug_struct("PointerHub")
            .field("next_id", &registry.next_id)
            .field("listener_count", &registry.listeners.len())
            .finish()
    }
}

/// Guard for a registered listener; unregisters on drop.
///
/// Holds only a weak handle, so a subscription never keeps a hub alive.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Identifier of the underlying registration.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
        if registry.remove(self.id) {
            log::trace!(
                "pointer listener {} released ({} active)",
                self.id.0,
                registry.listeners.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut(&PointerPress) + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        (count, move |_: &PointerPress| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
    }

    // =========================================================================
    // PointerPress
    // =========================================================================

    #[test]
    fn test_press_from_mouse_down() {
        let press = PointerPress::from_event(&Event::click(Point::new(1.0, 2.0))).unwrap();
        assert_eq!(press.position, Point::new(1.0, 2.0));
        assert_eq!(press.button, Some(MouseButton::Left));
    }

    #[test]
    fn test_press_from_touch() {
        let press = PointerPress::from_event(&Event::touch(Point::new(3.0, 4.0))).unwrap();
        assert_eq!(press.button, None);
    }

    #[test]
    fn test_press_ignores_other_events() {
        assert!(PointerPress::from_event(&Event::FocusOut).is_none());
        assert!(PointerPress::from_event(&Event::MouseMove {
            position: Point::ORIGIN
        })
        .is_none());
    }

    // =========================================================================
    // Subscribe / dispatch / release
    // =========================================================================

    #[test]
    fn test_subscribe_and_dispatch() {
        let hub = PointerHub::new();
        let (count, listener) = counter();
        let _sub = hub.subscribe(listener);

        assert_eq!(hub.dispatch(&Event::click(Point::ORIGIN)), 1);
        assert_eq!(hub.dispatch(&Event::touch(Point::ORIGIN)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dispatch_non_press_notifies_nobody() {
        let hub = PointerHub::new();
        let (count, listener) = counter();
        let _sub = hub.subscribe(listener);

        assert_eq!(hub.dispatch(&Event::FocusIn), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_releases_listener() {
        let hub = PointerHub::new();
        let (count, listener) = counter();
        let sub = hub.subscribe(listener);
        assert_eq!(hub.listener_count(), 1);

        drop(sub);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(&Event::click(Point::ORIGIN));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listeners_are_additive() {
        let hub = PointerHub::new();
        let (a, la) = counter();
        let (b, lb) = counter();
        let sub_a = hub.subscribe(la);
        let _sub_b = hub.subscribe(lb);
        assert_eq!(hub.listener_count(), 2);

        drop(sub_a);
        hub.dispatch(&Event::click(Point::ORIGIN));
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let hub = PointerHub::new();
        let (_, la) = counter();
        let (_, lb) = counter();
        let a = hub.subscribe(la);
        let b = hub.subscribe(lb);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = PointerHub::new();
        let (_, listener) = counter();
        let sub = hub.subscribe(listener);
        drop(hub);
        drop(sub);
    }

    #[test]
    fn test_clone_shares_registry() {
        let hub = PointerHub::new();
        let other = hub.clone();
        let (_, listener) = counter();
        let _sub = other.subscribe(listener);
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_debug_reports_count() {
        let hub = PointerHub::new();
        let (_, listener) = counter();
        let _sub = hub.subscribe(listener);
        assert!(format!("{hub:?}").contains("listener_count: 1"));
    }
}
