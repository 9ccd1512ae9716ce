use crate::core::{ScrollSample, StageRect};
use crate::handles::Listener;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Listen for clicks on every element matching `selector`.
pub fn add_click_listeners(
    document: &web::Document,
    selector: &str,
    handler: impl Fn(&web::Element, web::Event) + Clone + 'static,
) -> Vec<Listener> {
    let mut out = Vec::new();
    for el in query_all(document, selector) {
        let el_cb = el.clone();
        let handler = handler.clone();
        match Listener::new(&el, "click", move |ev| handler(&el_cb, ev)) {
            Ok(l) => out.push(l),
            Err(e) => log::warn!("[dom] {}: {:?}", selector, e),
        }
    }
    out
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Viewport-relative rectangle of the element with `id`, or `None` when it
/// is not mounted.
pub fn element_rect(document: &web::Document, id: &str) -> Option<StageRect> {
    let el = document.get_element_by_id(id)?;
    let r = el.get_bounding_client_rect();
    Some(StageRect::new(r.left(), r.top(), r.width(), r.height()))
}

pub fn scroll_sample(window: &web::Window) -> ScrollSample {
    ScrollSample {
        scroll_y: window.scroll_y().unwrap_or(0.0),
        viewport_height: window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
    }
}

pub fn smooth_scroll_to(window: &web::Window, top: f64) {
    let opts = web::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    _ = el.class_list().toggle_with_force(class, on);
}

pub fn set_style(el: &web::HtmlElement, prop: &str, value: &str) {
    _ = el.style().set_property(prop, value);
}
