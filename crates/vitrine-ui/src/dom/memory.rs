//! In-memory document for headless hosts and tests.
//!
//! Markup passed to `set_inner_html` is stored verbatim and not parsed into
//! child nodes. Events do not bubble; a synthetic event reaches the listeners
//! of its target only.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{Document, DomEvent, Element, ElementRef, EventKind, Listener, Selector};

struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    content: String,
    value: String,
    disabled: bool,
    valid: bool,
    children: Vec<Rc<Node>>,
    parent: Weak<Node>,
    listeners: Vec<(EventKind, Listener)>,
}

struct Node {
    data: RefCell<NodeData>,
}

/// An element of a [`MemoryDocument`]. Clones are handles to the same node.
#[derive(Clone)]
pub struct MemoryElement(Rc<Node>);

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.data.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &data.tag)
            .field("classes", &data.classes)
            .field("attributes", &data.attributes)
            .finish()
    }
}

impl MemoryElement {
    /// A detached `<tag>` element.
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(Node {
            data: RefCell::new(NodeData {
                tag: tag.to_ascii_lowercase(),
                classes: Vec::new(),
                attributes: BTreeMap::new(),
                content: String::new(),
                value: String::new(),
                disabled: false,
                valid: true,
                children: Vec::new(),
                parent: Weak::new(),
                listeners: Vec::new(),
            }),
        }))
    }

    /// Add one or more whitespace-separated classes.
    pub fn with_class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.0.data.borrow_mut().content = text.to_string();
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.0.data.borrow_mut().value = value.to_string();
        self
    }

    /// Make `check_validity` fail, as a form with an unmet constraint would.
    pub fn invalid(self) -> Self {
        self.0.data.borrow_mut().valid = false;
        self
    }

    /// Append `child` as last child and return it.
    pub fn append(&self, child: MemoryElement) -> MemoryElement {
        child.detach();
        child.0.data.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.data.borrow_mut().children.push(Rc::clone(&child.0));
        child
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0
            .data
            .borrow()
            .children
            .iter()
            .map(|c| MemoryElement(Rc::clone(c)))
            .collect()
    }

    /// Class list, in insertion order.
    pub fn classes(&self) -> Vec<String> {
        self.0.data.borrow().classes.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.0.data.borrow().parent.upgrade().is_some()
    }

    pub fn same_node(&self, other: &MemoryElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.0
            .data
            .borrow()
            .listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    /// Dispatch `kind` and hand back the event for inspection.
    pub fn fire(&self, kind: EventKind) -> DomEvent {
        let listeners: Vec<Listener> = self
            .0
            .data
            .borrow()
            .listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| Rc::clone(l))
            .collect();

        let event = DomEvent::new(kind);
        for listener in listeners {
            listener(&event);
        }
        event
    }

    pub fn click(&self) -> DomEvent {
        self.fire(EventKind::Click)
    }

    /// Type-erased handle.
    pub fn handle(&self) -> ElementRef {
        Rc::new(self.clone())
    }

    fn detach(&self) {
        let parent = self.0.data.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent
                .data
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(c, &self.0));
        }
        self.0.data.borrow_mut().parent = Weak::new();
    }

    fn matches(&self, selector: &Selector) -> bool {
        let data = self.0.data.borrow();
        selector.matches(
            &data.tag,
            |class| data.classes.iter().any(|c| c == class),
            |name| attribute_of(&data, name),
        )
    }

    fn descendants(&self) -> Vec<MemoryElement> {
        let mut out = Vec::new();
        collect_descendants(&self.0, &mut out);
        out
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryElement> {
        match Selector::parse(selector) {
            Ok(selector) => self
                .descendants()
                .into_iter()
                .filter(|e| e.matches(&selector))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn collect_descendants(node: &Rc<Node>, out: &mut Vec<MemoryElement>) {
    for child in node.data.borrow().children.iter() {
        out.push(MemoryElement(Rc::clone(child)));
        collect_descendants(child, out);
    }
}

fn attribute_of(data: &NodeData, name: &str) -> Option<String> {
    if name == "class" {
        return (!data.classes.is_empty()).then(|| data.classes.join(" "));
    }
    data.attributes.get(name).cloned()
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

impl Element for MemoryElement {
    fn tag_name(&self) -> String {
        self.0.data.borrow().tag.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.data.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.data.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.data.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_class_name(&self, class_name: &str) {
        let mut classes: Vec<String> = Vec::new();
        for class in class_name.split_whitespace() {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
        self.0.data.borrow_mut().classes = classes;
    }

    fn attribute(&self, name: &str) -> Option<String> {
        attribute_of(&self.0.data.borrow(), name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(value);
        } else {
            self.0
                .data
                .borrow_mut()
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self) -> String {
        strip_tags(&self.0.data.borrow().content)
    }

    fn set_text(&self, text: &str) {
        self.0.data.borrow_mut().content = text.to_string();
    }

    fn inner_html(&self) -> String {
        self.0.data.borrow().content.clone()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.data.borrow_mut().content = html.to_string();
    }

    fn value(&self) -> String {
        self.0.data.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.0.data.borrow_mut().value = value.to_string();
    }

    fn is_disabled(&self) -> bool {
        self.0.data.borrow().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.data.borrow_mut().disabled = disabled;
    }

    fn closest(&self, selector: &str) -> Option<ElementRef> {
        let selector = Selector::parse(selector).ok()?;
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if element.matches(&selector) {
                return Some(element.handle());
            }
            current = element.0.data.borrow().parent.upgrade().map(MemoryElement);
        }
        None
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.query_all(selector).first().map(MemoryElement::handle)
    }

    fn parent(&self) -> Option<ElementRef> {
        let parent = self.0.data.borrow().parent.upgrade()?;
        Some(MemoryElement(parent).handle())
    }

    fn append_child(&self, tag: &str, class_name: &str) -> Option<ElementRef> {
        let child = self.append(MemoryElement::new(tag).with_class(class_name));
        Some(child.handle())
    }

    fn remove(&self) {
        self.detach();
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) {
        self.0.data.borrow_mut().listeners.push((kind, listener));
    }

    fn dispatch(&self, kind: EventKind) -> bool {
        !self.fire(kind).default_prevented()
    }

    fn check_validity(&self) -> bool {
        self.0.data.borrow().valid
    }
}

/// In-memory page rooted at a `<body>` element.
pub struct MemoryDocument {
    body: MemoryElement,
    custom_events: RefCell<Vec<String>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            body: MemoryElement::new("body"),
            custom_events: RefCell::new(Vec::new()),
        }
    }

    pub fn body(&self) -> &MemoryElement {
        &self.body
    }

    /// Append `child` to the body and return it.
    pub fn append(&self, child: MemoryElement) -> MemoryElement {
        self.body.append(child)
    }

    /// Concrete handles for all elements matching `selector`.
    pub fn select(&self, selector: &str) -> Vec<MemoryElement> {
        self.body.query_all(selector)
    }

    /// Names of custom events dispatched on the document, oldest first.
    pub fn custom_events(&self) -> Vec<String> {
        self.custom_events.borrow().clone()
    }
}

impl Document for MemoryDocument {
    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        self.select(selector).iter().map(MemoryElement::handle).collect()
    }

    fn by_id(&self, id: &str) -> Option<ElementRef> {
        self.body
            .descendants()
            .into_iter()
            .find(|e| e.attribute("id").as_deref() == Some(id))
            .map(|e| e.handle())
    }

    fn dispatch_custom(&self, name: &str) {
        self.custom_events.borrow_mut().push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn cart_page() -> (MemoryDocument, MemoryElement, MemoryElement) {
        let doc = MemoryDocument::new();
        let row = doc.append(
            MemoryElement::new("div")
                .with_class("cart-item")
                .with_attr("data-cart-item-id", "7"),
        );
        let cell = row.append(MemoryElement::new("td"));
        let button = cell.append(
            MemoryElement::new("button")
                .with_class("btn btn-remove-cart-item")
                .with_text("Remover"),
        );
        (doc, row, button)
    }

    #[test]
    fn test_query_in_document_order() {
        let doc = MemoryDocument::new();
        doc.append(MemoryElement::new("a").with_class("thumb").with_id("first"));
        let wrapper = doc.append(MemoryElement::new("div"));
        wrapper.append(MemoryElement::new("a").with_class("thumb").with_id("second"));

        let ids: Vec<_> = doc
            .query_all(".thumb")
            .iter()
            .filter_map(|e| e.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert!(doc.by_id("second").is_some());
        assert!(doc.by_id("third").is_none());
    }

    #[test]
    fn test_closest_includes_self_and_ancestors() {
        let (_doc, row, button) = cart_page();
        let found = button.closest(".cart-item").unwrap();
        assert_eq!(found.attribute("data-cart-item-id").as_deref(), Some("7"));
        assert!(button.closest(".btn").is_some());
        assert!(row.closest(".btn").is_none());
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let (doc, row, button) = cart_page();
        row.remove();
        assert!(!row.is_attached());
        assert!(doc.query(".btn-remove-cart-item").is_none());
        // the detached subtree is still intact
        assert!(button.closest(".cart-item").is_some());
    }

    #[test]
    fn test_class_name_reset() {
        let header = MemoryElement::new("div").with_class("toast-header bg-danger text-white");
        header.set_class_name("toast-header bg-success text-white");
        assert_eq!(header.classes(), vec!["toast-header", "bg-success", "text-white"]);
        assert_eq!(
            header.attribute("class").as_deref(),
            Some("toast-header bg-success text-white")
        );
    }

    #[test]
    fn test_text_strips_markup() {
        let button = MemoryElement::new("button");
        button.set_inner_html(r#"<span class="spinner-border"></span> Adicionando..."#);
        assert_eq!(button.text().trim(), "Adicionando...");
    }

    #[test]
    fn test_dispatch_reports_prevented_default() {
        let link = MemoryElement::new("a");
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        link.add_listener(
            EventKind::Click,
            Rc::new(move |event: &DomEvent| {
                seen.set(seen.get() + 1);
                event.prevent_default();
            }),
        );

        assert!(!link.dispatch(EventKind::Click));
        assert!(link.dispatch(EventKind::Change));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_listener_may_add_listeners() {
        let input = MemoryElement::new("input");
        let handle = input.clone();
        input.add_listener(
            EventKind::Change,
            Rc::new(move |_: &DomEvent| {
                handle.add_listener(EventKind::Change, Rc::new(|_: &DomEvent| {}));
            }),
        );
        input.fire(EventKind::Change);
        assert_eq!(input.listener_count(EventKind::Change), 2);
    }

    #[test]
    fn test_append_child_and_custom_events() {
        let doc = MemoryDocument::new();
        let cell = doc.append(MemoryElement::new("td"));
        let spinner = cell
            .append_child("span", "spinner-border spinner-border-sm ms-2")
            .unwrap();
        assert!(spinner.has_class("ms-2"));
        assert_eq!(doc.select(".spinner-border").len(), 1);
        spinner.remove();
        assert!(doc.select(".spinner-border").is_empty());

        doc.dispatch_custom("carrinhoUpdated");
        assert_eq!(doc.custom_events(), vec!["carrinhoUpdated"]);
    }
}
