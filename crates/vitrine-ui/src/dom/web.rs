//! `web_sys` backend.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlFormElement, HtmlInputElement};

use super::{Document, DomEvent, Element, ElementRef, EventKind, Listener};

/// A live page element.
#[derive(Clone)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self(element)
    }

    fn handle(element: web_sys::Element) -> ElementRef {
        Rc::new(Self(element))
    }
}

impl Element for WebElement {
    fn tag_name(&self) -> String {
        self.0.tag_name().to_ascii_lowercase()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.set_class_name(class_name);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        // anchors report their resolved URL through the property
        if name == "href" {
            if let Some(anchor) = self.0.dyn_ref::<web_sys::HtmlAnchorElement>() {
                let href = anchor.href();
                return (!href.is_empty()).then_some(href);
            }
        }
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn value(&self) -> String {
        match self.0.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.value(),
            None => self.0.get_attribute("value").unwrap_or_default(),
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn is_disabled(&self) -> bool {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return input.disabled();
        }
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            return button.disabled();
        }
        self.0.has_attribute("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    fn closest(&self, selector: &str) -> Option<ElementRef> {
        self.0.closest(selector).ok().flatten().map(Self::handle)
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.0.query_selector(selector).ok().flatten().map(Self::handle)
    }

    fn parent(&self) -> Option<ElementRef> {
        self.0.parent_element().map(Self::handle)
    }

    fn append_child(&self, tag: &str, class_name: &str) -> Option<ElementRef> {
        let document = self.0.owner_document()?;
        let child = document.create_element(tag).ok()?;
        child.set_class_name(class_name);
        self.0.append_child(&child).ok()?;
        Some(Self::handle(child))
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let dom_event = DomEvent::new(kind);
            listener(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
            if dom_event.propagation_stopped() {
                event.stop_propagation();
            }
        });
        let _ = self
            .0
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref());
        // listeners live as long as the page
        closure.forget();
    }

    fn dispatch(&self, kind: EventKind) -> bool {
        match web_sys::Event::new(kind.as_str()) {
            Ok(event) => self.0.dispatch_event(&event).unwrap_or(true),
            Err(_) => true,
        }
    }

    fn check_validity(&self) -> bool {
        self.0
            .dyn_ref::<HtmlFormElement>()
            .map(|form| form.check_validity())
            .unwrap_or(true)
    }
}

/// The live page.
#[derive(Clone)]
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self(document)
    }

    /// The window's document, if running in a page.
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self)
    }
}

impl Document for WebDocument {
    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        let Ok(nodes) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement::handle)
            .collect()
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.0
            .query_selector(selector)
            .ok()
            .flatten()
            .map(WebElement::handle)
    }

    fn by_id(&self, id: &str) -> Option<ElementRef> {
        self.0.get_element_by_id(id).map(WebElement::handle)
    }

    fn dispatch_custom(&self, name: &str) {
        if let Ok(event) = web_sys::Event::new(name) {
            let _ = self.0.dispatch_event(&event);
        }
    }
}
