//! Product image gallery.

use std::rc::Rc;

use crate::dom::{DomEvent, ElementRef, EventKind};
use crate::runtime::Runtime;

const ACTIVE: &str = "active";
const FADE_OUT: &str = "fade-out";
const FADE_IN: &str = "fade-in";

/// Wire the thumbnails to the main image. Nothing is wired unless the page
/// has both.
pub(crate) fn bind(rt: &Rc<Runtime>) -> usize {
    let selectors = rt.selectors();
    let thumbs = rt.document.query_all(&selectors.gallery_thumb);
    let Some(main) = rt.document.query(&selectors.gallery_main) else {
        return 0;
    };
    if thumbs.is_empty() {
        return 0;
    }

    let thumbs = Rc::new(thumbs);
    for thumb in thumbs.iter() {
        let rt = Rc::clone(rt);
        let all = Rc::clone(&thumbs);
        let clicked = Rc::clone(thumb);
        let main = Rc::clone(&main);
        thumb.add_listener(
            EventKind::Click,
            Rc::new(move |event: &DomEvent| {
                event.prevent_default();
                select(&rt, &all, &clicked, &main);
            }),
        );
    }
    thumbs.len()
}

fn image_url(thumb: &ElementRef) -> Option<String> {
    thumb
        .attribute("href")
        .filter(|url| !url.is_empty())
        .or_else(|| thumb.attribute("data-image"))
        .filter(|url| !url.is_empty())
}

/// Make `thumb` the active thumbnail and fade its image into `main`.
pub(crate) fn select(rt: &Rc<Runtime>, thumbs: &[ElementRef], thumb: &ElementRef, main: &ElementRef) {
    if let Some(url) = image_url(thumb) {
        main.add_class(FADE_OUT);

        let task_rt = Rc::clone(rt);
        let main = Rc::clone(main);
        rt.spawn(async move {
            let timings = &task_rt.config.timings;
            task_rt.platform.timer.sleep(timings.fade_out()).await;
            main.set_attribute("src", &url);
            main.remove_class(FADE_OUT);
            main.add_class(FADE_IN);

            task_rt.platform.timer.sleep(timings.fade_in()).await;
            main.remove_class(FADE_IN);
        });
    }

    for other in thumbs {
        other.remove_class(ACTIVE);
    }
    thumb.add_class(ACTIVE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryElement};
    use crate::runtime::harness::Harness;

    struct Gallery {
        main: MemoryElement,
        thumbs: Vec<MemoryElement>,
    }

    fn gallery(h: &Harness) -> Gallery {
        let main = h.doc.append(
            MemoryElement::new("img")
                .with_class("img-fluid produto-img-principal")
                .with_attr("src", "/static/img/a.jpg"),
        );
        let thumbs = vec![
            h.doc.append(
                MemoryElement::new("a")
                    .with_class("produto-thumb active")
                    .with_attr("href", "/static/img/a.jpg"),
            ),
            h.doc.append(
                MemoryElement::new("img")
                    .with_class("produto-thumb")
                    .with_attr("data-image", "/static/img/b.jpg"),
            ),
            h.doc.append(MemoryElement::new("img").with_class("produto-thumb")),
        ];
        Gallery { main, thumbs }
    }

    #[test]
    fn test_click_fades_and_swaps_image() {
        let mut h = Harness::new();
        let g = gallery(&h);
        let rt = h.runtime();
        assert_eq!(bind(&rt), 3);

        assert!(g.thumbs[1].click().default_prevented());
        h.settle();
        assert!(g.main.has_class("fade-out"));
        assert_eq!(g.main.attribute("src").as_deref(), Some("/static/img/a.jpg"));

        h.advance_ms(200);
        assert_eq!(g.main.attribute("src").as_deref(), Some("/static/img/b.jpg"));
        assert!(!g.main.has_class("fade-out"));
        assert!(g.main.has_class("fade-in"));

        h.advance_ms(299);
        assert!(g.main.has_class("fade-in"));
        h.advance_ms(1);
        assert!(!g.main.has_class("fade-in"));
    }

    #[test]
    fn test_only_clicked_thumb_is_active() {
        let mut h = Harness::new();
        let g = gallery(&h);
        let rt = h.runtime();
        bind(&rt);

        g.thumbs[1].click();
        h.settle();
        let active: Vec<bool> = g.thumbs.iter().map(|t| t.has_class("active")).collect();
        assert_eq!(active, vec![false, true, false]);
    }

    #[test]
    fn test_thumb_without_url_only_activates() {
        let mut h = Harness::new();
        let g = gallery(&h);
        let rt = h.runtime();
        bind(&rt);

        g.thumbs[2].click();
        h.settle();
        assert!(g.thumbs[2].has_class("active"));
        assert!(!g.main.has_class("fade-out"));
        assert_eq!(h.timer.pending(), 0);
    }

    #[test]
    fn test_href_wins_over_data_image() {
        let thumb = MemoryElement::new("a")
            .with_attr("href", "/x.jpg")
            .with_attr("data-image", "/y.jpg");
        assert_eq!(image_url(&thumb.handle()).as_deref(), Some("/x.jpg"));
    }

    #[test]
    fn test_nothing_wired_without_main_image() {
        let h = Harness::new();
        let thumb = h
            .doc
            .append(MemoryElement::new("a").with_class("produto-thumb"));
        let rt = h.runtime();
        assert_eq!(bind(&rt), 0);
        assert_eq!(thumb.listener_count(EventKind::Click), 0);
    }
}
