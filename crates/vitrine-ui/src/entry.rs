//! WebAssembly entry point and the functions exported to page scripts.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;

use vitrine_core::StorefrontConfig;
use vitrine_data::BrowserTransport;
use vitrine_observability::StructuredLogger;

use crate::dom::web::WebDocument;
use crate::dom::Document;
use crate::{Platform, Storefront};

const CONFIG_ELEMENT_ID: &str = "vitrine-config";

thread_local! {
    static STOREFRONT: RefCell<Option<Storefront>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(mount);
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref());
    } else {
        mount();
    }
}

fn mount() {
    let Some(document) = WebDocument::current() else {
        return;
    };
    let config = page_config(&document);

    let storefront = Storefront::builder(
        Rc::new(document),
        Rc::new(BrowserTransport),
        Platform::browser(),
    )
    .config(config)
    .start();

    STOREFRONT.with(|slot| *slot.borrow_mut() = Some(storefront));
}

/// Configuration embedded in the page as
/// `<script type="application/json" id="vitrine-config">`, defaults otherwise.
fn page_config(document: &WebDocument) -> StorefrontConfig {
    let Some(element) = document.by_id(CONFIG_ELEMENT_ID) else {
        return StorefrontConfig::default();
    };
    match StorefrontConfig::from_json_str(&element.text()) {
        Ok(config) => config,
        Err(e) => {
            StructuredLogger::default()
                .with_component("storefront")
                .warn_builder("ignoring invalid page configuration")
                .field("error", e.to_string())
                .emit();
            StorefrontConfig::default()
        }
    }
}

fn with_storefront(f: impl FnOnce(&Storefront)) {
    STOREFRONT.with(|slot| {
        if let Some(storefront) = slot.borrow().as_ref() {
            f(storefront);
        }
    });
}

#[wasm_bindgen(js_name = updateCartCount)]
pub fn update_cart_count() {
    with_storefront(Storefront::update_cart_count);
}

#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(kind: &str, message: &str) {
    with_storefront(|storefront| {
        storefront.show_toast_kind(kind, message);
    });
}

#[wasm_bindgen(js_name = pulseCartIcon)]
pub fn pulse_cart_icon() {
    with_storefront(|storefront| {
        storefront.pulse_cart_icon();
    });
}
