use crate::constants::*;
use crate::core::constants::PARTICLE_LIFETIME_MS;
use crate::core::particles::Emitter;
use crate::core::{EmitterId, EmitterRegistry};
use crate::dom;
use crate::handles::{FrameLoop, Timeout};
use fnv::FnvHashMap;
use glam::Vec2;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedParticles = Rc<RefCell<ParticleLayer>>;

/// DOM-backed renderer for particle bursts.
///
/// Each burst is a set of fixed-position divs appended to `<body>`, moved by
/// an animation-frame loop and removed when its lifetime ends. Completion is
/// reported twice over: the frame loop expires bursts it sees finish, and a
/// per-burst timer covers tabs where animation frames are throttled.
pub struct ParticleLayer {
    document: web::Document,
    registry: EmitterRegistry,
    nodes: FnvHashMap<EmitterId, Vec<web::HtmlElement>>,
    timers: FnvHashMap<EmitterId, Timeout>,
    frame: Option<FrameLoop>,
    rng: StdRng,
    epoch: Instant,
}

impl ParticleLayer {
    pub fn new(document: web::Document) -> SharedParticles {
        let layer = Rc::new(RefCell::new(Self {
            document,
            registry: EmitterRegistry::new(),
            nodes: FnvHashMap::default(),
            timers: FnvHashMap::default(),
            frame: None,
            rng: StdRng::from_entropy(),
            epoch: Instant::now(),
        }));
        let weak = Rc::downgrade(&layer);
        layer.borrow_mut().frame = Some(FrameLoop::new(move || tick(&weak)));
        layer
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    pub fn active_emitters(&self) -> usize {
        self.registry.len()
    }

    /// Release a finished burst: drop it from the registry and the DOM.
    fn finish(&mut self, id: EmitterId) {
        if self.registry.complete(id) {
            log::debug!("[particles] burst {} complete", id);
        }
        self.remove_nodes(id);
        self.timers.remove(&id);
    }

    fn remove_nodes(&mut self, id: EmitterId) {
        if let Some(nodes) = self.nodes.remove(&id) {
            for n in nodes {
                n.remove();
            }
        }
    }

    fn render(&self, emitter: &Emitter, now_ms: f64) {
        let Some(nodes) = self.nodes.get(&emitter.id) else {
            return;
        };
        let t = emitter.progress(now_ms);
        for (node, p) in nodes.iter().zip(&emitter.particles) {
            let f = p.frame_at(emitter.anchor, t);
            dom::set_style(node, "left", &format!("{:.1}px", f.position.x));
            dom::set_style(node, "top", &format!("{:.1}px", f.position.y));
            dom::set_style(node, "opacity", &format!("{:.3}", f.opacity));
        }
    }

    fn create_nodes(&self, emitter: &Emitter) -> Vec<web::HtmlElement> {
        let Some(body) = self.document.body() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(emitter.particles.len());
        for p in &emitter.particles {
            let Some(el) = self
                .document
                .create_element("div")
                .ok()
                .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
            else {
                continue;
            };
            el.set_class_name(PARTICLE_CLASS);
            let size = format!("{:.1}px", p.size);
            for (prop, value) in [
                ("position", "fixed"),
                ("pointer-events", "none"),
                ("z-index", PARTICLE_Z_INDEX),
                ("border-radius", "9999px"),
                ("background-color", PARTICLE_COLOR),
                ("box-shadow", PARTICLE_SHADOW),
                ("width", size.as_str()),
                ("height", size.as_str()),
            ] {
                dom::set_style(&el, prop, value);
            }
            if body.append_child(&el).is_ok() {
                out.push(el);
            }
        }
        out
    }

    /// Remove every burst and stop the loop. Used on unmount.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.frame = None;
        let ids: Vec<EmitterId> = self.nodes.keys().copied().collect();
        for id in ids {
            self.remove_nodes(id);
        }
        self.registry.clear();
    }
}

/// Spawn one burst centred at `at` (viewport coordinates).
pub fn emit(layer: &SharedParticles, at: Vec2) {
    let mut l = layer.borrow_mut();
    let now = l.now_ms();
    let ParticleLayer { registry, rng, .. } = &mut *l;
    let id = registry.spawn(at, now, rng);
    let Some(emitter) = l.registry.get(id).cloned() else {
        return;
    };
    let nodes = l.create_nodes(&emitter);
    l.nodes.insert(id, nodes);
    l.render(&emitter, now);

    let weak = Rc::downgrade(layer);
    match Timeout::schedule(PARTICLE_LIFETIME_MS, move || {
        if let Some(layer) = weak.upgrade() {
            layer.borrow_mut().finish(id);
        }
    }) {
        Ok(t) => {
            l.timers.insert(id, t);
        }
        Err(e) => log::warn!("[particles] lifetime timer for burst {}: {:?}", id, e),
    }
    if let Some(frame) = &l.frame {
        frame.ensure_running();
    }
    log::info!(
        "[particles] burst {} at ({:.0}, {:.0}), {} live",
        id,
        at.x,
        at.y,
        l.registry.len()
    );
}

fn tick(layer: &Weak<RefCell<ParticleLayer>>) -> bool {
    let Some(layer) = layer.upgrade() else {
        return false;
    };
    let mut l = layer.borrow_mut();
    let now = l.now_ms();
    for id in l.registry.expire(now) {
        l.remove_nodes(id);
        l.timers.remove(&id);
    }
    for emitter in l.registry.iter() {
        l.render(emitter, now);
    }
    !l.registry.is_empty()
}
