use crate::constants::*;
use crate::core::constants::SCHEDULING_URL;
use crate::core::ThemeState;
use crate::dom;
use crate::handles::Listener;
use crate::nav::{self, SharedNavbar};
use crate::theme;
use crate::workflow;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_clicks(
    document: &web::Document,
    navbar: &SharedNavbar,
    theme_state: Rc<RefCell<ThemeState>>,
) -> Vec<Listener> {
    let mut listeners = Vec::new();

    let nb = navbar.clone();
    listeners.extend(dom::add_click_listeners(
        document,
        NAV_LINK_SELECTOR,
        move |el, ev| {
            let Some(id) = el.get_attribute(NAV_LINK_ATTR) else {
                return;
            };
            ev.prevent_default();
            nav::select(&nb, &id);
        },
    ));

    listeners.extend(dom::add_click_listeners(
        document,
        STEP_BUTTON_SELECTOR,
        |el, ev| {
            ev.prevent_default();
            ev.stop_propagation();
            match el
                .get_attribute(STEP_BUTTON_ATTR)
                .and_then(|v| v.parse::<u8>().ok())
            {
                Some(n) => workflow::scroll_to_step(n),
                None => log::warn!("[workflow] step button without a valid {}", STEP_BUTTON_ATTR),
            }
        },
    ));

    let doc = document.clone();
    listeners.extend(dom::add_click_listeners(
        document,
        THEME_TOGGLE_SELECTOR,
        move |_el, _ev| theme::toggle(&doc, &mut theme_state.borrow_mut()),
    ));

    listeners.extend(dom::add_click_listeners(
        document,
        BOOK_CALL_SELECTOR,
        |_el, ev| {
            ev.prevent_default();
            if let Some(w) = web::window() {
                if let Err(e) = w.open_with_url_and_target(SCHEDULING_URL, "_blank") {
                    log::warn!("[nav] could not open scheduler: {:?}", e);
                }
            }
        },
    ));

    listeners
}
