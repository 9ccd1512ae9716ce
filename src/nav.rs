use crate::constants::*;
use crate::core::constants::{NAV_REVEAL_DELAY_MS, NAV_SCROLL_OFFSET_PX};
use crate::core::nav::apply;
use crate::core::stage::scroll_target_for;
use crate::core::{NavState, NavView, NAV_SECTIONS};
use crate::dom;
use crate::handles::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

struct DomNavView {
    navbar: Option<web::Element>,
    links: Vec<(String, web::Element)>,
}

impl DomNavView {
    fn collect(document: &web::Document) -> Self {
        let links = dom::query_all(document, NAV_LINK_SELECTOR)
            .into_iter()
            .filter_map(|el| el.get_attribute(NAV_LINK_ATTR).map(|id| (id, el)))
            .collect();
        Self {
            navbar: document.get_element_by_id(NAVBAR_ID),
            links,
        }
    }
}

impl NavView for DomNavView {
    fn set_scrolled(&mut self, scrolled: bool) {
        if let Some(nav) = &self.navbar {
            dom::set_class(nav, CLASS_SCROLLED, scrolled);
        }
    }

    fn set_active(&mut self, id: Option<&'static str>) {
        for (link_id, el) in &self.links {
            let on = id == Some(link_id.as_str());
            dom::set_class(el, CLASS_ACTIVE, on);
            if on {
                _ = el.set_attribute("aria-current", "true");
            } else {
                _ = el.remove_attribute("aria-current");
            }
        }
    }
}

pub struct Navbar {
    state: NavState,
    view: DomNavView,
    reveal: Option<Timeout>,
}

pub type SharedNavbar = Rc<RefCell<Navbar>>;

impl Navbar {
    pub fn mount(document: &web::Document) -> SharedNavbar {
        let navbar = Rc::new(RefCell::new(Self {
            state: NavState::new(),
            view: DomNavView::collect(document),
            reveal: None,
        }));

        // Entrance animation
        let nav_el = document.get_element_by_id(NAVBAR_ID);
        match Timeout::schedule(NAV_REVEAL_DELAY_MS, move || {
            if let Some(el) = nav_el {
                dom::set_class(&el, CLASS_VISIBLE, true);
            }
        }) {
            Ok(t) => navbar.borrow_mut().reveal = Some(t),
            Err(e) => log::warn!("[nav] reveal timer: {:?}", e),
        }
        navbar
    }

    pub fn teardown(&mut self) {
        self.reveal = None;
    }
}

pub fn on_scroll(navbar: &SharedNavbar) {
    let Some(window) = web::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let sample = dom::scroll_sample(&window);
    let mut n = navbar.borrow_mut();
    let Navbar { state, view, .. } = &mut *n;
    if let Some(update) = state.on_scroll(sample, |id| dom::element_rect(&document, id)) {
        log::debug!("[nav] active={:?} scrolled={}", update.active, update.scrolled);
        apply(view, &update);
    }
}

/// Nav link clicked: scroll to the section and light its link right away.
pub fn select(navbar: &SharedNavbar, section_id: &str) {
    let Some(section) = NAV_SECTIONS.iter().find(|s| s.id == section_id) else {
        log::warn!("[nav] unknown section {}", section_id);
        return;
    };
    if let (Some(window), Some(document)) = (web::window(), dom::window_document()) {
        if let Some(rect) = dom::element_rect(&document, section.id) {
            let page_y = window.page_y_offset().unwrap_or(0.0);
            dom::smooth_scroll_to(
                &window,
                scroll_target_for(rect.top, page_y, NAV_SCROLL_OFFSET_PX),
            );
        }
    }
    let mut n = navbar.borrow_mut();
    let Navbar { state, view, .. } = &mut *n;
    if let Some(update) = state.select(section.id) {
        log::info!("[nav] {} selected", section.label);
        apply(view, &update);
    }
}
