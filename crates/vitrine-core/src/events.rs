//! In-page publish/subscribe.
//!
//! Mutation handlers never call the count refresher or the icon pulse
//! directly; they publish `StorefrontEvent::CartUpdated` and whoever
//! subscribed reacts. Delivery is synchronous, in subscription order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Events published on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorefrontEvent {
    /// A cart mutation succeeded on the server. No payload.
    CartUpdated,
}

impl StorefrontEvent {
    /// Canonical DOM event name.
    pub fn name(&self) -> &'static str {
        match self {
            StorefrontEvent::CartUpdated => "carrinhoUpdated",
        }
    }
}

impl fmt::Display for StorefrontEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Handler = Rc<dyn Fn(StorefrontEvent)>;

#[derive(Default)]
struct Subscribers {
    entries: Vec<(StorefrontEvent, Handler)>,
}

/// Single-threaded event bus. Clones share subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Rc<RefCell<Subscribers>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.borrow().entries.len())
            .finish()
    }
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`.
    pub fn subscribe(
        &self,
        event: StorefrontEvent,
        handler: impl Fn(StorefrontEvent) + 'static,
    ) {
        self.subscribers
            .borrow_mut()
            .entries
            .push((event, Rc::new(handler)));
    }

    /// Deliver `event` to its subscribers and return how many were called.
    ///
    /// Handlers may subscribe or publish re-entrantly; a subscription added
    /// during delivery first sees the next publish.
    pub fn publish(&self, event: StorefrontEvent) -> usize {
        let handlers: Vec<Handler> = self
            .subscribers
            .borrow()
            .entries
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, h)| Rc::clone(h))
            .collect();

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_publish_reaches_subscribers_in_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["count", "pulse"] {
            let log = Rc::clone(&log);
            bus.subscribe(StorefrontEvent::CartUpdated, move |_| {
                log.borrow_mut().push(tag)
            });
        }

        assert_eq!(bus.publish(StorefrontEvent::CartUpdated), 2);
        assert_eq!(*log.borrow(), vec!["count", "pulse"]);
    }

    #[test]
    fn test_reentrant_subscribe_during_publish() {
        let bus = EventBus::new();
        let inner = bus.clone();
        bus.subscribe(StorefrontEvent::CartUpdated, move |_| {
            inner.subscribe(StorefrontEvent::CartUpdated, |_| {});
        });

        assert_eq!(bus.publish(StorefrontEvent::CartUpdated), 1);
        assert_eq!(bus.publish(StorefrontEvent::CartUpdated), 2);
    }

    #[test]
    fn test_event_name() {
        assert_eq!(StorefrontEvent::CartUpdated.name(), "carrinhoUpdated");
    }
}
