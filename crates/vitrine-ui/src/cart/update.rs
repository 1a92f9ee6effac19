//! Quantity inputs of the cart page.

use std::rc::Rc;

use vitrine_core::{CartItemId, Quantity, StorefrontEvent};
use vitrine_data::MutationOutcome;

use super::{show_total, MutationStatus};
use crate::dom::{DomEvent, ElementRef, EventKind};
use crate::runtime::Runtime;
use crate::toast::{self, Severity};

const OLD_VALUE: &str = "data-old-value";

/// Wire every cart quantity input. Inputs rendered without `data-old-value`
/// get their current value cached there so a failed update can revert.
pub(crate) fn bind(rt: &Rc<Runtime>) -> usize {
    let inputs = rt.document.query_all(&rt.selectors().cart_quantity);
    for input in &inputs {
        if input.attribute(OLD_VALUE).is_none() {
            input.set_attribute(OLD_VALUE, &input.value());
        }

        let rt = Rc::clone(rt);
        let target = Rc::clone(input);
        input.add_listener(
            EventKind::Change,
            Rc::new(move |_: &DomEvent| {
                let task_rt = Rc::clone(&rt);
                let target = Rc::clone(&target);
                rt.spawn(async move {
                    update_quantity(&task_rt, target).await;
                });
            }),
        );
    }
    inputs.len()
}

fn revert(input: &ElementRef) {
    if let Some(old) = input.attribute(OLD_VALUE) {
        input.set_value(&old);
    }
}

pub(crate) async fn update_quantity(rt: &Rc<Runtime>, input: ElementRef) -> MutationStatus {
    let log = rt.logger_for("update_quantity");
    let messages = rt.messages();

    let Some(item) = input
        .attribute("data-cart-item-id")
        .and_then(|raw| CartItemId::parse(&raw))
    else {
        log.warn("cart quantity input without data-cart-item-id");
        return MutationStatus::Skipped;
    };
    let quantity = Quantity::from_input(&input.value());

    let Some(_guard) = rt.in_flight.acquire(format!("item:{}", item)) else {
        log.debug_builder("update already in flight")
            .field("item", item.as_str())
            .emit();
        revert(&input);
        return MutationStatus::Skipped;
    };

    input.set_disabled(true);
    let spinner = input
        .parent()
        .and_then(|parent| parent.append_child("span", "spinner-border spinner-border-sm ms-2"));

    let status = match rt.api.update_quantity(&item, quantity).await {
        Ok(MutationOutcome::Applied { total, .. }) => {
            rt.bus.publish(StorefrontEvent::CartUpdated);
            if let Some(total) = total {
                show_total(rt, total);
            }
            let value = quantity.to_string();
            input.set_value(&value);
            input.set_attribute(OLD_VALUE, &value);
            MutationStatus::Applied
        }
        Ok(MutationOutcome::Rejected { message }) => {
            let text = message.as_deref().unwrap_or(&messages.update_failed);
            toast::show(rt, Severity::Danger, text);
            revert(&input);
            MutationStatus::Rejected
        }
        Err(e) => {
            log.error_builder("quantity update failed")
                .field("item", item.as_str())
                .field("error", e.to_string())
                .emit();
            toast::show(rt, Severity::Danger, &messages.connection_failed);
            revert(&input);
            MutationStatus::Failed
        }
    };

    input.set_disabled(false);
    if let Some(spinner) = spinner {
        spinner.remove();
    }
    status
}
