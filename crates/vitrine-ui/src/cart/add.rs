//! Add-to-cart button.

use std::rc::Rc;

use vitrine_core::{ProductId, Quantity, StorefrontEvent};
use vitrine_data::MutationOutcome;

use super::{spinner_markup, MutationStatus};
use crate::dom::{DomEvent, ElementRef, EventKind};
use crate::runtime::Runtime;
use crate::toast::{self, Severity};

/// Wire every add-to-cart button. Returns how many were wired.
pub(crate) fn bind(rt: &Rc<Runtime>) -> usize {
    let buttons = rt.document.query_all(&rt.selectors().add_to_cart);
    for button in &buttons {
        let rt = Rc::clone(rt);
        let target = Rc::clone(button);
        button.add_listener(
            EventKind::Click,
            Rc::new(move |event: &DomEvent| {
                event.prevent_default();
                let task_rt = Rc::clone(&rt);
                let target = Rc::clone(&target);
                rt.spawn(async move {
                    add_to_cart(&task_rt, target).await;
                });
            }),
        );
    }
    buttons.len()
}

/// Quantity from the input next to the button, 1 when there is none.
fn quantity_for(rt: &Runtime, button: &ElementRef) -> Quantity {
    let selectors = rt.selectors();
    button
        .closest(&selectors.product_actions)
        .and_then(|actions| actions.query(&selectors.quantity_input))
        .map(|input| Quantity::from_input(&input.value()))
        .unwrap_or(Quantity::ONE)
}

pub(crate) async fn add_to_cart(rt: &Rc<Runtime>, button: ElementRef) -> MutationStatus {
    let log = rt.logger_for("add_to_cart");
    let messages = rt.messages();

    let Some(product) = button
        .attribute("data-product-id")
        .and_then(|raw| ProductId::parse(&raw))
    else {
        log.warn("add-to-cart button without data-product-id");
        return MutationStatus::Skipped;
    };
    let quantity = quantity_for(rt, &button);

    let Some(_guard) = rt.in_flight.acquire(format!("product:{}", product)) else {
        log.debug_builder("add already in flight")
            .field("product", product.as_str())
            .emit();
        return MutationStatus::Skipped;
    };

    let original_label = button.inner_html();
    button.set_inner_html(&spinner_markup(Some(&messages.adding_label)));
    button.set_disabled(true);

    let status = match rt.api.add_item(&product, quantity).await {
        Ok(MutationOutcome::Applied { message, .. }) => {
            log.info_builder("item added")
                .field("product", product.as_str())
                .field("quantity", quantity.to_string())
                .emit();
            let text = message.as_deref().unwrap_or(&messages.add_succeeded);
            toast::show(rt, Severity::Success, text);
            rt.bus.publish(StorefrontEvent::CartUpdated);
            MutationStatus::Applied
        }
        Ok(MutationOutcome::Rejected { message }) => {
            let text = message.as_deref().unwrap_or(&messages.add_failed);
            toast::show(rt, Severity::Danger, text);
            MutationStatus::Rejected
        }
        Err(e) => {
            log.error_builder("add to cart failed")
                .field("product", product.as_str())
                .field("error", e.to_string())
                .emit();
            toast::show(rt, Severity::Danger, &messages.connection_failed);
            MutationStatus::Failed
        }
    };

    button.set_inner_html(&original_label);
    button.set_disabled(false);
    status
}
