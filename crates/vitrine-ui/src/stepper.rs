//! Quantity stepper buttons.

use std::rc::Rc;

use vitrine_core::{Quantity, Step};

use crate::dom::{DomEvent, ElementRef, EventKind};
use crate::runtime::Runtime;

pub(crate) fn bind(rt: &Rc<Runtime>) -> usize {
    let buttons = rt.document.query_all(&rt.selectors().quantity_button);
    for button in &buttons {
        let rt = Rc::clone(rt);
        let target = Rc::clone(button);
        button.add_listener(
            EventKind::Click,
            Rc::new(move |event: &DomEvent| {
                event.prevent_default();
                step(&rt, &target);
            }),
        );
    }
    buttons.len()
}

/// Apply the button's step to its input, write the result back and notify
/// listeners with a `change` event.
pub(crate) fn step(rt: &Runtime, button: &ElementRef) -> Option<Quantity> {
    let selectors = rt.selectors();
    let direction = if button.has_class(&selectors.decrement_class) {
        Step::Decrement
    } else if button.has_class(&selectors.increment_class) {
        Step::Increment
    } else {
        rt.logger_for("stepper")
            .debug("quantity button has no direction class");
        return None;
    };

    let Some(input) = button
        .closest(&selectors.quantity_group)
        .and_then(|group| group.query(&selectors.quantity_input))
    else {
        rt.logger_for("stepper").debug("quantity button outside an input group");
        return None;
    };

    let next = Quantity::step(&input.value(), direction);
    input.set_value(&next.to_string());
    input.dispatch(EventKind::Change);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryElement};
    use crate::runtime::harness::Harness;
    use std::cell::Cell;

    struct Stepper {
        minus: MemoryElement,
        plus: MemoryElement,
        input: MemoryElement,
    }

    fn stepper(h: &Harness, value: &str) -> Stepper {
        let group = h
            .doc
            .append(MemoryElement::new("div").with_class("input-group"));
        let minus = group.append(
            MemoryElement::new("button").with_class("btn btn-quantidade btn-minus"),
        );
        let input = group.append(
            MemoryElement::new("input")
                .with_class("form-control quantidade-input")
                .with_value(value),
        );
        let plus = group.append(
            MemoryElement::new("button").with_class("btn btn-quantidade btn-plus"),
        );
        Stepper { minus, plus, input }
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let h = Harness::new();
        let s = stepper(&h, "3");
        let rt = h.runtime();
        assert_eq!(bind(&rt), 2);

        s.minus.click();
        s.minus.click();
        assert_eq!(s.input.value(), "1");
        s.minus.click();
        assert_eq!(s.input.value(), "1");
    }

    #[test]
    fn test_increment_has_no_ceiling() {
        let h = Harness::new();
        let s = stepper(&h, "99");
        let rt = h.runtime();
        bind(&rt);

        s.plus.click();
        assert_eq!(s.input.value(), "100");
    }

    #[test]
    fn test_lenient_parse() {
        let h = Harness::new();
        let s = stepper(&h, "abc");
        let rt = h.runtime();

        assert_eq!(step(&rt, &s.plus.handle()), Quantity::new(1));
        s.input.set_value("4 unidades");
        assert_eq!(step(&rt, &s.minus.handle()), Quantity::new(3));
    }

    #[test]
    fn test_click_prevents_default_and_dispatches_change() {
        let h = Harness::new();
        let s = stepper(&h, "2");
        let changes = Rc::new(Cell::new(0));
        let seen = Rc::clone(&changes);
        s.input.add_listener(
            EventKind::Change,
            Rc::new(move |_: &DomEvent| seen.set(seen.get() + 1)),
        );
        let rt = h.runtime();
        bind(&rt);

        assert!(s.plus.click().default_prevented());
        // a decrement at 1 still writes back and notifies
        s.input.set_value("1");
        s.minus.click();
        assert_eq!(changes.get(), 2);
    }

    #[test]
    fn test_button_without_direction_is_ignored() {
        let h = Harness::new();
        let s = stepper(&h, "2");
        let odd = MemoryElement::new("button").with_class("btn-quantidade");
        let rt = h.runtime();
        assert_eq!(step(&rt, &odd.handle()), None);
        assert_eq!(s.input.value(), "2");
    }
}
