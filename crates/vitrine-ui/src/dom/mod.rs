//! The DOM surface the storefront components need.
//!
//! Components never touch `web_sys` directly. They see the page through
//! [`Document`] and [`Element`], implemented by `web` in the browser and by
//! the in-memory `memory` backend everywhere else.

use std::cell::Cell;
use std::rc::Rc;

pub mod memory;
mod selector;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryDocument, MemoryElement};
pub use selector::{Selector, SelectorError};

/// Shared handle to an element.
pub type ElementRef = Rc<dyn Element>;

/// Listener attached with [`Element::add_listener`].
pub type Listener = Rc<dyn Fn(&DomEvent)>;

/// DOM events the components listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Submit,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
            EventKind::Submit => "submit",
        }
    }
}

/// An event as seen by a listener.
#[derive(Debug)]
pub struct DomEvent {
    kind: EventKind,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl DomEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// A page element.
///
/// Setters never fail: an operation the underlying node does not support
/// (e.g. `set_value` on a `<span>`) is ignored, as it is in the browser.
pub trait Element {
    fn tag_name(&self) -> String;

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Replace the whole class list.
    fn set_class_name(&self, class_name: &str);

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);

    /// Current value of a form control.
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);

    /// This element or its nearest ancestor matching `selector`.
    fn closest(&self, selector: &str) -> Option<ElementRef>;
    /// First descendant matching `selector`.
    fn query(&self, selector: &str) -> Option<ElementRef>;
    fn parent(&self) -> Option<ElementRef>;
    /// Create a `<tag class="class_name">` and append it as last child.
    fn append_child(&self, tag: &str, class_name: &str) -> Option<ElementRef>;
    /// Detach this element from the page.
    fn remove(&self);

    fn add_listener(&self, kind: EventKind, listener: Listener);
    /// Dispatch a synthetic event. Returns `false` if a listener prevented
    /// the default action.
    fn dispatch(&self, kind: EventKind) -> bool;

    /// Native constraint validation. Elements that are not forms are valid.
    fn check_validity(&self) -> bool;
}

/// The page.
pub trait Document {
    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<ElementRef>;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.query_all(selector).into_iter().next()
    }

    fn by_id(&self, id: &str) -> Option<ElementRef>;

    /// Dispatch a payload-less custom event on the document itself.
    fn dispatch_custom(&self, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_flags() {
        let event = DomEvent::new(EventKind::Submit);
        assert!(!event.default_prevented());
        event.prevent_default();
        event.stop_propagation();
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
        assert_eq!(event.kind().as_str(), "submit");
    }
}
