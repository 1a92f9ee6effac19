//! Remove buttons of the cart page.

use std::rc::Rc;

use vitrine_core::{CartItemId, StorefrontEvent};
use vitrine_data::MutationOutcome;

use super::{show_total, spinner_markup, MutationStatus};
use crate::dom::{DomEvent, ElementRef, EventKind};
use crate::runtime::Runtime;
use crate::toast::{self, Severity};

pub(crate) fn bind(rt: &Rc<Runtime>) -> usize {
    let buttons = rt.document.query_all(&rt.selectors().remove_item);
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
                    remove_item(&task_rt, target).await;
                });
            }),
        );
    }
    buttons.len()
}

/// Ask for confirmation, then remove the line item behind `button`.
///
/// On success the enclosing row leaves the page. On any failure the row
/// stays and the button gets its label back so the user can retry.
pub(crate) async fn remove_item(rt: &Rc<Runtime>, button: ElementRef) -> MutationStatus {
    let log = rt.logger_for("remove_item");
    let messages = rt.messages();

    if !rt.platform.prompt.confirm(&messages.remove_confirm) {
        log.debug("removal declined");
        return MutationStatus::Cancelled;
    }

    let Some(item) = button
        .attribute("data-cart-item-id")
        .and_then(|raw| CartItemId::parse(&raw))
    else {
        log.warn("remove button without data-cart-item-id");
        return MutationStatus::Skipped;
    };

    let Some(_guard) = rt.in_flight.acquire(format!("item:{}", item)) else {
        log.debug_builder("removal already in flight")
            .field("item", item.as_str())
            .emit();
        return MutationStatus::Skipped;
    };

    let original_label = button.inner_html();
    button.set_inner_html(&spinner_markup(None));
    button.set_disabled(true);

    let restore = |button: &ElementRef| {
        button.set_inner_html(&original_label);
        button.set_disabled(false);
    };

    match rt.api.remove_item(&item).await {
        Ok(MutationOutcome::Applied { message, total }) => {
            let text = message.as_deref().unwrap_or(&messages.remove_succeeded);
            toast::show(rt, Severity::Success, text);
            rt.bus.publish(StorefrontEvent::CartUpdated);
            match button.closest(&rt.selectors().cart_row) {
                Some(row) => row.remove(),
                None => restore(&button),
            }
            if let Some(total) = total {
                show_total(rt, total);
            }
            MutationStatus::Applied
        }
        Ok(MutationOutcome::Rejected { message }) => {
            let text = message.as_deref().unwrap_or(&messages.remove_failed);
            toast::show(rt, Severity::Danger, text);
            restore(&button);
            MutationStatus::Rejected
        }
        Err(e) => {
            log.error_builder("item removal failed")
                .field("item", item.as_str())
                .field("error", e.to_string())
                .emit();
            toast::show(rt, Severity::Danger, &messages.connection_failed);
            restore(&button);
            MutationStatus::Failed
        }
    }
}
