//! Notification presenter.
//!
//! One toast element is shared by every notification. Showing a message
//! while another is visible replaces it and restarts the auto-hide window.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::dom::ElementRef;
use crate::runtime::Runtime;

/// Toast header colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Severity::Success),
            "danger" | "error" => Ok(Severity::Danger),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

#[derive(Clone)]
struct ToastInstance {
    root: ElementRef,
    header: ElementRef,
    body: ElementRef,
}

/// State of the shared toast.
#[derive(Default)]
pub(crate) struct NotificationPresenter {
    instance: RefCell<Option<ToastInstance>>,
    generation: Cell<u64>,
}

impl NotificationPresenter {
    fn instance(&self, rt: &Runtime) -> Option<ToastInstance> {
        if let Some(instance) = self.instance.borrow().as_ref() {
            return Some(instance.clone());
        }

        let selectors = rt.selectors();
        let root = rt.document.by_id(&selectors.toast_id)?;
        let header = root.query(&selectors.toast_header)?;
        let body = root.query(&selectors.toast_body)?;
        let instance = ToastInstance { root, header, body };
        *self.instance.borrow_mut() = Some(instance.clone());
        Some(instance)
    }
}

/// Show `message` with a `severity`-coloured header. Returns `false` when the
/// page has no toast markup.
pub(crate) fn show(rt: &Rc<Runtime>, severity: Severity, message: &str) -> bool {
    show_styled(rt, severity.as_str(), message)
}

/// Show `message` with a free-form kind, as page scripts pass it.
///
/// Known severities (including `error`) are normalised. Any other class-safe
/// word becomes the header's `bg-<kind>`, so Bootstrap colours such as
/// `primary` or `dark` work. Anything else is shown as `info`.
pub(crate) fn show_kind(rt: &Rc<Runtime>, kind: &str, message: &str) -> bool {
    if let Ok(severity) = kind.parse::<Severity>() {
        return show(rt, severity, message);
    }

    let kind = kind.trim();
    if is_class_token(kind) {
        return show_styled(rt, kind, message);
    }

    rt.logger_for("toast")
        .warn_builder("unusable toast kind, showing as info")
        .field("kind", kind)
        .emit();
    show(rt, Severity::Info, message)
}

fn is_class_token(kind: &str) -> bool {
    !kind.is_empty()
        && kind
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn show_styled(rt: &Rc<Runtime>, style: &str, message: &str) -> bool {
    let Some(toast) = rt.toast.instance(rt) else {
        rt.logger_for("toast")
            .warn_builder("toast markup missing, notification dropped")
            .field("severity", style)
            .field("message", message)
            .emit();
        return false;
    };

    let header_class = rt.selectors().toast_header.trim_start_matches('.');
    toast
        .header
        .set_class_name(&format!("{} bg-{} text-white", header_class, style));
    toast.body.set_text(message);
    toast.root.remove_class("hide");
    toast.root.add_class("show");

    let generation = rt.toast.generation.get().wrapping_add(1);
    rt.toast.generation.set(generation);

    let delay = rt.config.timings.toast_autohide();
    let task_rt = Rc::clone(rt);
    rt.spawn(async move {
        task_rt.platform.timer.sleep(delay).await;
        if task_rt.toast.generation.get() == generation {
            toast.root.remove_class("show");
            toast.root.add_class("hide");
        }
    });
    true
}
