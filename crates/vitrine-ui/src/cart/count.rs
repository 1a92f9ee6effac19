//! Cart count badge and cart icon pulse.

use std::rc::Rc;

use crate::runtime::Runtime;

const HIDDEN: &str = "d-none";
const PULSE: &str = "pulse";

/// Fetch the cart count and update the badge. The badge is hidden when the
/// cart is empty. Failures are logged and leave the badge untouched.
pub(crate) async fn refresh_count(rt: &Rc<Runtime>) -> Option<u64> {
    let log = rt.logger_for("cart_count");

    let count = match rt.api.count().await {
        Ok(count) => count,
        Err(e) => {
            log.error_builder("cart count refresh failed")
                .field("error", e.to_string())
                .emit();
            return None;
        }
    };

    match rt.document.by_id(&rt.selectors().cart_count_id) {
        Some(badge) => {
            badge.set_text(&count.to_string());
            if count > 0 {
                badge.remove_class(HIDDEN);
            } else {
                badge.add_class(HIDDEN);
            }
        }
        None => log.debug("no cart count badge on page"),
    }
    Some(count)
}

/// Spawn a count refresh.
pub(crate) fn schedule_refresh(rt: &Rc<Runtime>) {
    let task_rt = Rc::clone(rt);
    rt.spawn(async move {
        refresh_count(&task_rt).await;
    });
}

/// Briefly add `pulse` to the cart icon. Returns `false` if there is no icon.
pub(crate) fn pulse_icon(rt: &Rc<Runtime>) -> bool {
    let Some(icon) = rt.document.query(&rt.selectors().cart_icon) else {
        return false;
    };
    icon.add_class(PULSE);

    let delay = rt.config.timings.pulse();
    let task_rt = Rc::clone(rt);
    rt.spawn(async move {
        task_rt.platform.timer.sleep(delay).await;
        icon.remove_class(PULSE);
    });
    true
}
