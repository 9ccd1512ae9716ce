use crate::audio::CuePlayer;
use crate::constants::{CLASS_PULSE, STEP_CHEVRON_SELECTOR};
use crate::core::constants::{CENTER_TOLERANCE_PX, SCROLL_COOLDOWN_MS, STEP_SCROLL_OFFSET_PX};
use crate::core::stage::{scroll_target_for, workflow_step_id};
use crate::core::{
    dispatch, ActivationRule, CueError, GateDecision, ScrollGate, StageEffects, StageTracker,
    WORKFLOW_STEPS,
};
use crate::dom;
use crate::handles::Timeout;
use crate::particles::{self, SharedParticles};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Scroll-synced state of the "How We Work" diagram.
pub struct Workflow {
    tracker: StageTracker<u8>,
    gate: ScrollGate,
    cue: CuePlayer,
    particles: SharedParticles,
    cooldown: Option<Timeout>,
}

pub type SharedWorkflow = Rc<RefCell<Workflow>>;

impl Workflow {
    pub fn new(particles: SharedParticles, cue_volume: f32, scroll_y: f64) -> SharedWorkflow {
        let steps = WORKFLOW_STEPS.iter().map(|s| s.number).collect();
        let tracker = StageTracker::new(
            steps,
            ActivationRule::CenterBand {
                tolerance: CENTER_TOLERANCE_PX,
            },
        )
        .with_scroll_y(scroll_y);
        Rc::new(RefCell::new(Self {
            tracker,
            gate: ScrollGate::default(),
            cue: CuePlayer::new(cue_volume),
            particles,
            cooldown: None,
        }))
    }

    pub fn current_step(&self) -> Option<u8> {
        self.tracker.current().copied()
    }

    pub fn teardown(&mut self) {
        self.cooldown = None;
        self.gate.reset();
        self.cue.close();
    }
}

struct DomEffects<'a> {
    document: &'a web::Document,
    cue: &'a mut CuePlayer,
    particles: &'a SharedParticles,
}

impl StageEffects<u8> for DomEffects<'_> {
    fn highlight(&mut self, step: &u8, _index: usize) {
        for n in WORKFLOW_STEPS.iter().map(|s| s.number) {
            let Some(row) = self.document.get_element_by_id(&workflow_step_id(n)) else {
                continue;
            };
            if let Ok(Some(chevron)) = row.query_selector(STEP_CHEVRON_SELECTOR) {
                dom::set_class(&chevron, CLASS_PULSE, n == *step);
            }
        }
    }

    fn play_cue(&mut self) -> Result<(), CueError> {
        self.cue.play()
    }

    fn emit_particles(&mut self, step: &u8, at: Vec2) {
        log::info!("[workflow] particles for step {}", step);
        particles::emit(self.particles, at);
    }
}

/// Scroll listener entry point. Samples immediately when the gate is free,
/// otherwise folds the event into the trailing sample.
pub fn on_scroll(workflow: &SharedWorkflow) {
    let decision = workflow.borrow_mut().gate.request();
    if decision == GateDecision::Run {
        run_sample(workflow);
        schedule_release(workflow);
    }
}

fn schedule_release(workflow: &SharedWorkflow) {
    let wf = workflow.clone();
    let timer = Timeout::schedule(SCROLL_COOLDOWN_MS, move || {
        let rerun = wf.borrow_mut().gate.release();
        if rerun {
            run_sample(&wf);
            schedule_release(&wf);
        }
    });
    let mut w = workflow.borrow_mut();
    match timer {
        Ok(t) => w.cooldown = Some(t),
        Err(e) => {
            log::warn!("[workflow] cool-down timer: {:?}", e);
            w.gate.reset();
        }
    }
}

fn run_sample(workflow: &SharedWorkflow) {
    let Some(window) = web::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let sample = dom::scroll_sample(&window);

    let mut w = workflow.borrow_mut();
    let crossings = w.tracker.sample(sample, |n| {
        let rect = dom::element_rect(&document, &workflow_step_id(*n));
        if rect.is_none() {
            log::debug!("[workflow] step {} not mounted", n);
        }
        rect
    });
    for c in &crossings {
        let title = WORKFLOW_STEPS
            .get(c.index)
            .map(|s| s.title)
            .unwrap_or("?");
        log::debug!(
            "[workflow] step {} ({}) crossed centre scrolling {:?}",
            c.key,
            title,
            c.direction
        );
    }
    if crossings.is_empty() {
        return;
    }

    let Workflow { cue, particles, .. } = &mut *w;
    let mut effects = DomEffects {
        document: &document,
        cue,
        particles,
    };
    dispatch(&crossings, &mut effects);
}

/// Smooth-scroll so step `number` sits just below the navbar.
pub fn scroll_to_step(number: u8) {
    let Some(window) = web::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let id = workflow_step_id(number);
    let Some(rect) = dom::element_rect(&document, &id) else {
        log::error!("[workflow] cannot find {}", id);
        return;
    };
    let page_y = window.page_y_offset().unwrap_or(0.0);
    dom::smooth_scroll_to(
        &window,
        scroll_target_for(rect.top, page_y, STEP_SCROLL_OFFSET_PX),
    );
}
