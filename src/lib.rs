#![cfg(target_arch = "wasm32")]
use crate::core::{SiteConfig, NAV_SECTIONS};
use anyhow::anyhow;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod constants;
mod contact;
mod core;
mod dom;
mod events;
mod handles;
mod nav;
mod particles;
mod theme;
mod workflow;

/// Everything installed on the page. Dropping it (via [`Site::teardown`])
/// removes listeners first so no handler runs while the rest is released.
struct Site {
    listeners: Vec<handles::Listener>,
    navbar: nav::SharedNavbar,
    workflow: Option<workflow::SharedWorkflow>,
    contact: Option<contact::SharedContact>,
    particles: particles::SharedParticles,
}

impl Site {
    fn teardown(self) {
        let Site {
            listeners,
            navbar,
            workflow,
            contact,
            particles,
        } = self;
        drop(listeners);
        navbar.borrow_mut().teardown();
        if let Some(wf) = workflow {
            let mut wf = wf.borrow_mut();
            log::info!("[workflow] unmount at step {:?}", wf.current_step());
            wf.teardown();
        }
        if let Some(c) = contact {
            c.borrow_mut().teardown();
        }
        particles.borrow_mut().teardown();
    }
}

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

fn read_config(document: &web::Document) -> SiteConfig {
    let body = document.body();
    SiteConfig::from_attrs(|name| body.as_ref().and_then(|b| b.get_attribute(name)))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("agentic-site-web starting");

    if let Err(e) = mount() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn mount() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    // Re-entry (hot reload) replaces the previous installation
    unmount();

    let config = read_config(&document);
    log::info!(
        "[config] endpoint={} cue_volume={:.2} forced_theme={:?}",
        config.contact_endpoint,
        config.cue_volume,
        config.forced_theme
    );

    let theme_state = Rc::new(RefCell::new(theme::init(&document, config.forced_theme)));
    let particles = particles::ParticleLayer::new(document.clone());
    let navbar = nav::Navbar::mount(&document);

    let workflow = document.get_element_by_id("workflow").map(|_| {
        workflow::Workflow::new(
            particles.clone(),
            config.cue_volume,
            window.scroll_y().unwrap_or(0.0),
        )
    });
    if workflow.is_none() {
        log::warn!("[workflow] section not found; stage tracking disabled");
    }

    let mut listeners = Vec::new();
    listeners.push(events::wire_scroll(
        &window,
        navbar.clone(),
        workflow.clone(),
    )?);
    listeners.extend(events::wire_clicks(&document, &navbar, theme_state));

    let contact = match contact::mount(&document, config.contact_endpoint.clone()) {
        Some((c, l)) => {
            listeners.extend(l);
            Some(c)
        }
        None => {
            log::warn!("[contact] #{} not found", constants::CONTACT_FORM_ID);
            None
        }
    };

    // Initial navbar state without waiting for the first scroll
    nav::on_scroll(&navbar);

    log::info!(
        "mounted: {} listeners, {} nav sections",
        listeners.len(),
        NAV_SECTIONS.len()
    );
    SITE.with(|s| {
        *s.borrow_mut() = Some(Site {
            listeners,
            navbar,
            workflow,
            contact,
            particles,
        })
    });
    Ok(())
}

/// Remove every listener, cancel pending timers and clear live particles.
#[wasm_bindgen]
pub fn unmount() {
    if let Some(site) = SITE.with(|s| s.borrow_mut().take()) {
        site.teardown();
        log::info!("agentic-site-web unmounted");
    }
}

/// Number of particle bursts currently alive.
#[wasm_bindgen]
pub fn active_particle_bursts() -> usize {
    SITE.with(|s| {
        s.borrow()
            .as_ref()
            .map(|site| site.particles.borrow().active_emitters())
            .unwrap_or(0)
    })
}
