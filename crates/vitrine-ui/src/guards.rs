//! Confirmation links and client-side form validation.

use std::rc::Rc;

use crate::dom::{DomEvent, EventKind};
use crate::runtime::Runtime;

const CONFIRM_ATTRIBUTE: &str = "data-confirm";
const VALIDATED: &str = "was-validated";

/// Clicks on confirm-guarded elements go through only if the user accepts
/// the element's `data-confirm` text.
pub(crate) fn bind_confirmations(rt: &Rc<Runtime>) -> usize {
    let elements = rt.document.query_all(&rt.selectors().confirm);
    for element in &elements {
        let prompt = Rc::clone(&rt.platform.prompt);
        let target = Rc::clone(element);
        element.add_listener(
            EventKind::Click,
            Rc::new(move |event: &DomEvent| {
                let message = target.attribute(CONFIRM_ATTRIBUTE).unwrap_or_default();
                if !prompt.confirm(&message) {
                    event.prevent_default();
                }
            }),
        );
    }
    elements.len()
}

/// Invalid forms do not submit. Either way the form is marked validated so
/// the toolkit shows field feedback.
pub(crate) fn bind_validation(rt: &Rc<Runtime>) -> usize {
    let forms = rt.document.query_all(&rt.selectors().validated_form);
    for form in &forms {
        let target = Rc::clone(form);
        form.add_listener(
            EventKind::Submit,
            Rc::new(move |event: &DomEvent| {
                if !target.check_validity() {
                    event.prevent_default();
                    event.stop_propagation();
                }
                target.add_class(VALIDATED);
            }),
        );
    }
    forms.len()
}
