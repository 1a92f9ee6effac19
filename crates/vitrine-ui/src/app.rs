//! Storefront wiring.

use std::rc::{Rc, Weak};

use vitrine_core::{EventBus, StorefrontConfig, StorefrontEvent};
use vitrine_data::Transport;
use vitrine_observability::{ConsoleSink, LogSink};

use crate::cart::{self, count};
use crate::dom::Document;
use crate::platform::Platform;
use crate::runtime::Runtime;
use crate::toast::{self, Severity};
use crate::{gallery, guards, stepper};

/// Number of elements each component wired at start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    pub gallery_thumbs: usize,
    pub quantity_buttons: usize,
    pub add_buttons: usize,
    pub cart_quantities: usize,
    pub remove_buttons: usize,
    pub confirmations: usize,
    pub validated_forms: usize,
}

/// A running storefront: every component wired to one page.
pub struct Storefront {
    runtime: Rc<Runtime>,
    bindings: Bindings,
}

impl Storefront {
    pub fn builder(
        document: Rc<dyn Document>,
        transport: Rc<dyn Transport>,
        platform: Platform,
    ) -> StorefrontBuilder {
        StorefrontBuilder {
            config: StorefrontConfig::default(),
            document,
            transport,
            platform,
            sink: Rc::new(ConsoleSink),
        }
    }

    pub fn bindings(&self) -> Bindings {
        self.bindings
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.runtime.config
    }

    /// The in-page bus. Subscribers see every successful cart mutation.
    pub fn bus(&self) -> &EventBus {
        &self.runtime.bus
    }

    /// Refresh the cart count badge in the background.
    pub fn update_cart_count(&self) {
        count::schedule_refresh(&self.runtime);
    }

    /// Show a notification. Returns `false` if the page has no toast markup.
    pub fn show_toast(&self, severity: Severity, message: &str) -> bool {
        toast::show(&self.runtime, severity, message)
    }

    /// Show a notification with a kind given as text, as page scripts do.
    /// Unknown Bootstrap colours are passed through to the header class.
    pub fn show_toast_kind(&self, kind: &str, message: &str) -> bool {
        toast::show_kind(&self.runtime, kind, message)
    }

    /// Pulse the cart icon. Returns `false` if the page has no cart icon.
    pub fn pulse_cart_icon(&self) -> bool {
        count::pulse_icon(&self.runtime)
    }
}

pub struct StorefrontBuilder {
    config: StorefrontConfig,
    document: Rc<dyn Document>,
    transport: Rc<dyn Transport>,
    platform: Platform,
    sink: Rc<dyn LogSink>,
}

impl StorefrontBuilder {
    pub fn config(mut self, config: StorefrontConfig) -> Self {
        self.config = config;
        self
    }

    pub fn log_sink(mut self, sink: Rc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Wire every component to the page and schedule the first count refresh.
    pub fn start(self) -> Storefront {
        let runtime = Rc::new(Runtime::new(
            self.config,
            self.document,
            self.transport,
            self.platform,
            self.sink,
        ));

        let weak: Weak<Runtime> = Rc::downgrade(&runtime);
        runtime
            .bus
            .subscribe(StorefrontEvent::CartUpdated, move |_| {
                let Some(rt) = weak.upgrade() else {
                    return;
                };
                count::schedule_refresh(&rt);
                count::pulse_icon(&rt);
                rt.document.dispatch_custom(&rt.config.events.cart_updated);
            });

        let bindings = Bindings {
            gallery_thumbs: gallery::bind(&runtime),
            quantity_buttons: stepper::bind(&runtime),
            add_buttons: cart::add::bind(&runtime),
            cart_quantities: cart::update::bind(&runtime),
            remove_buttons: cart::remove::bind(&runtime),
            confirmations: guards::bind_confirmations(&runtime),
            validated_forms: guards::bind_validation(&runtime),
        };

        runtime
            .logger_for("storefront")
            .info_builder("storefront started")
            .field_i64("gallery_thumbs", bindings.gallery_thumbs as i64)
            .field_i64("quantity_buttons", bindings.quantity_buttons as i64)
            .field_i64("add_buttons", bindings.add_buttons as i64)
            .field_i64("cart_quantities", bindings.cart_quantities as i64)
            .field_i64("remove_buttons", bindings.remove_buttons as i64)
            .field_i64("confirmations", bindings.confirmations as i64)
            .field_i64("validated_forms", bindings.validated_forms as i64)
            .field_bool("exclusive_mutations", runtime.config.mutations.exclusive)
            .emit();

        count::schedule_refresh(&runtime);

        Storefront { runtime, bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, EventKind, MemoryElement};
    use std::cell::Cell;
    use crate::runtime::harness::Harness;
    use serde_json::json;
    use vitrine_data::Method;

    struct Page {
        badge: MemoryElement,
        icon: MemoryElement,
        toast_body: MemoryElement,
        add: MemoryElement,
        minus: MemoryElement,
        cart_input: MemoryElement,
        remove: MemoryElement,
        row: MemoryElement,
        total: MemoryElement,
    }

    /// A page with the header badge, a product block and one cart row.
    fn page(h: &Harness) -> Page {
        let doc = &h.doc;
        let icon = doc.append(MemoryElement::new("i").with_class("bi bi-cart cart-icon"));
        let badge = doc.append(
            MemoryElement::new("span")
                .with_id("cart-count")
                .with_class("badge d-none")
                .with_text("0"),
        );
        let toast = doc.append(MemoryElement::new("div").with_id("toastCarrinho").with_class("toast"));
        toast.append(MemoryElement::new("div").with_class("toast-header"));
        let toast_body = toast.append(MemoryElement::new("div").with_class("toast-body"));

        let actions = doc.append(MemoryElement::new("div").with_class("product-actions"));
        actions
            .append(MemoryElement::new("div").with_class("input-group"))
            .append(
                MemoryElement::new("input")
                    .with_class("quantidade-input")
                    .with_value("2"),
            );
        let add = actions.append(
            MemoryElement::new("button")
                .with_class("btn-add-to-cart")
                .with_attr("data-product-id", "42")
                .with_text("Adicionar"),
        );

        let row = doc.append(MemoryElement::new("tr").with_class("cart-item"));
        let group = row.append(MemoryElement::new("td").with_class("input-group"));
        let minus = group.append(MemoryElement::new("button").with_class("btn-quantidade btn-minus"));
        let cart_input = group.append(
            MemoryElement::new("input")
                .with_class("quantidade-input cart-item-quantity")
                .with_attr("data-cart-item-id", "7")
                .with_value("3"),
        );
        let remove = row.append(
            MemoryElement::new("button")
                .with_class("btn-remove-cart-item")
                .with_attr("data-cart-item-id", "7"),
        );
        let total = doc.append(MemoryElement::new("strong").with_class("cart-total"));

        Page {
            badge,
            icon,
            toast_body,
            add,
            minus,
            cart_input,
            remove,
            row,
            total,
        }
    }

    fn start(h: &Harness) -> Storefront {
        Storefront::builder(h.doc.clone(), h.transport.clone(), h.platform())
            .config(h.config.clone())
            .log_sink(h.sink.clone())
            .start()
    }

    fn reply_count(h: &Harness, count: u64) {
        h.transport
            .reply_json(Method::Get, "/api/carrinho/count", 200, json!({ "count": count }));
    }

    #[test]
    fn test_start_wires_everything_and_loads_count() {
        let mut h = Harness::new();
        let p = page(&h);
        reply_count(&h, 2);

        let storefront = start(&h);
        h.settle();

        assert_eq!(
            storefront.bindings(),
            Bindings {
                gallery_thumbs: 0,
                quantity_buttons: 1,
                add_buttons: 1,
                cart_quantities: 1,
                remove_buttons: 1,
                confirmations: 0,
                validated_forms: 0,
            }
        );
        assert_eq!(p.badge.text(), "2");
        assert!(!p.badge.has_class("d-none"));
        assert_eq!(p.cart_input.attribute("data-old-value").as_deref(), Some("3"));
    }

    #[test]
    fn test_add_refreshes_badge_pulses_and_dispatches_dom_event() {
        let mut h = Harness::new();
        let p = page(&h);
        reply_count(&h, 0);
        let storefront = start(&h);
        h.settle();
        assert!(p.badge.has_class("d-none"));

        h.transport.reply_json(
            Method::Post,
            "/adicionar-carrinho/42",
            200,
            json!({"success": true, "message": "Added"}),
        );
        reply_count(&h, 1);
        p.add.click();
        h.settle();

        assert_eq!(p.toast_body.text(), "Added");
        assert_eq!(p.badge.text(), "1");
        assert!(!p.badge.has_class("d-none"));
        assert!(p.icon.has_class("pulse"));
        assert_eq!(h.doc.custom_events(), vec!["carrinhoUpdated"]);
        assert_eq!(h.transport.requests_to("/api/carrinho/count").len(), 2);

        h.advance_ms(1000);
        assert!(!p.icon.has_class("pulse"));
        drop(storefront);
    }

    #[test]
    fn test_stepper_change_on_cart_page_updates_item() {
        let mut h = Harness::new();
        let p = page(&h);
        reply_count(&h, 1);
        let _storefront = start(&h);
        h.settle();

        h.transport.reply_json(
            Method::Post,
            "/atualizar-carrinho/7",
            200,
            json!({"success": true, "total": 39.8}),
        );
        reply_count(&h, 1);
        p.minus.click();
        h.settle();

        assert_eq!(p.cart_input.value(), "2");
        assert_eq!(p.cart_input.attribute("data-old-value").as_deref(), Some("2"));
        assert_eq!(p.total.text(), "R$ 39.80");
        let update = &h.transport.requests_to("/atualizar-carrinho/7")[0];
        assert_eq!(update.body_text().as_deref(), Some(r#"{"quantidade":2}"#));
    }

    #[test]
    fn test_remove_flow_through_click() {
        let mut h = Harness::new();
        let p = page(&h);
        reply_count(&h, 1);
        let _storefront = start(&h);
        h.settle();

        h.transport.reply_json(
            Method::Post,
            "/remover-carrinho/7",
            200,
            json!({"success": true, "message": "Item removido do carrinho", "total": 0}),
        );
        reply_count(&h, 0);
        p.remove.click();
        h.settle();

        assert!(!p.row.is_attached());
        assert_eq!(p.total.text(), "R$ 0.00");
        assert!(p.badge.has_class("d-none"));
    }

    #[test]
    fn test_public_api() {
        let mut h = Harness::new();
        let p = page(&h);
        reply_count(&h, 0);
        let storefront = start(&h);
        h.settle();

        assert!(storefront.show_toast(Severity::Warning, "Atenção"));
        assert_eq!(p.toast_body.text(), "Atenção");
        assert!(storefront.show_toast_kind("dark", "Cupom aplicado"));
        assert_eq!(p.toast_body.text(), "Cupom aplicado");
        assert!(storefront.pulse_cart_icon());
        assert!(p.icon.has_class("pulse"));

        reply_count(&h, 4);
        storefront.update_cart_count();
        h.settle();
        assert_eq!(p.badge.text(), "4");
        assert_eq!(storefront.config().timings.pulse_ms, 1000);
    }

    #[test]
    fn test_bus_subscribers_see_mutations() {
        let mut h = Harness::new();
        let p = page(&h);
        reply_count(&h, 0);
        let storefront = start(&h);
        h.settle();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        storefront
            .bus()
            .subscribe(StorefrontEvent::CartUpdated, move |_| counter.set(counter.get() + 1));

        h.transport.reply_json(
            Method::Post,
            "/adicionar-carrinho/42",
            500,
            json!({"success": false, "message": "Produto indisponível"}),
        );
        p.add.fire(EventKind::Click);
        h.settle();

        assert_eq!(p.toast_body.text(), "Produto indisponível");
        assert_eq!(seen.get(), 0);
        assert!(h.doc.custom_events().is_empty());
        assert_eq!(h.transport.requests_to("/api/carrinho/count").len(), 1);
    }
}
