//! Cart mutation handlers and the count refresher.
//!
//! Every mutation follows the same shape: disable the control and show a
//! spinner, call the endpoint, reconcile the page from the envelope (or roll
//! back), then restore the control.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use vitrine_core::Money;

use crate::runtime::Runtime;

pub(crate) mod add;
pub(crate) mod count;
pub(crate) mod remove;
pub(crate) mod update;

/// How a mutation handler invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    /// The server applied the mutation.
    Applied,
    /// The server answered `success: false`.
    Rejected,
    /// No usable envelope came back.
    Failed,
    /// Nothing was sent: the control carried no id, or the same key was
    /// already in flight.
    Skipped,
    /// The user declined the confirmation.
    Cancelled,
}

/// Per-key guard against double submission, active only when
/// `mutations.exclusive` is set.
pub(crate) struct InFlight {
    exclusive: bool,
    keys: Rc<RefCell<HashSet<String>>>,
}

impl InFlight {
    pub fn new(exclusive: bool) -> Self {
        Self {
            exclusive,
            keys: Rc::default(),
        }
    }

    /// Claim `key` until the returned guard is dropped. `None` when the key
    /// is already claimed.
    pub fn acquire(&self, key: String) -> Option<InFlightGuard> {
        if !self.exclusive {
            return Some(InFlightGuard {
                key: None,
                keys: Rc::clone(&self.keys),
            });
        }
        if !self.keys.borrow_mut().insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            key: Some(key),
            keys: Rc::clone(&self.keys),
        })
    }
}

pub(crate) struct InFlightGuard {
    key: Option<String>,
    keys: Rc<RefCell<HashSet<String>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.keys.borrow_mut().remove(&key);
        }
    }
}

/// Write a new total into the cart total element, if the page has one.
pub(crate) fn show_total(rt: &Runtime, total: Money) {
    if let Some(element) = rt.document.query(&rt.selectors().cart_total) {
        element.set_text(&total.display());
    }
}

fn spinner_markup(label: Option<&str>) -> String {
    match label {
        Some(label) => format!(
            r#"<span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span> {}"#,
            label
        ),
        None => r#"<span class="spinner-border spinner-border-sm" role="status"></span>"#.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard_is_released_on_drop() {
        let in_flight = InFlight::new(true);
        let guard = in_flight.acquire("item:7".to_string()).unwrap();
        assert!(in_flight.acquire("item:7".to_string()).is_none());
        assert!(in_flight.acquire("item:8".to_string()).is_some());
        drop(guard);
        assert!(in_flight.acquire("item:7".to_string()).is_some());
    }

    #[test]
    fn test_in_flight_disabled_never_blocks() {
        let in_flight = InFlight::new(false);
        let _a = in_flight.acquire("item:7".to_string()).unwrap();
        assert!(in_flight.acquire("item:7".to_string()).is_some());
    }

    #[test]
    fn test_spinner_markup() {
        assert!(spinner_markup(Some("Adicionando...")).ends_with("</span> Adicionando..."));
        assert!(!spinner_markup(None).contains("aria-hidden"));
    }
}
