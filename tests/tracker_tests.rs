// Host-side tests for stage tracking and the scroll gate.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core"]
mod site_core {
    pub mod constants;
    pub mod stage;
    pub mod tracker;
    pub mod gate;
}

use glam::Vec2;
use rand::prelude::*;
use site_core::constants::CENTER_TOLERANCE_PX;
use site_core::gate::{GateDecision, ScrollGate};
use site_core::stage::StageRect;
use site_core::tracker::*;

const VIEWPORT_H: f64 = 800.0;
const STAGE_COUNT: u8 = 5;

// Stage n (1-based) sits at document y = 1000 + 600 * (n - 1), 100px tall.
// Its centre is in the band while scroll_y is strictly inside
// (600 + 600 * (n - 1), 700 + 600 * (n - 1)).
fn doc_top(n: u8) -> f64 {
    1000.0 + 600.0 * (n as f64 - 1.0)
}

fn layout(scroll_y: f64) -> impl Fn(&u8) -> Option<StageRect> {
    move |n| Some(StageRect::new(100.0, doc_top(*n) - scroll_y, 200.0, 100.0))
}

fn centre_tracker() -> StageTracker<u8> {
    StageTracker::new(
        (1..=STAGE_COUNT).collect(),
        ActivationRule::CenterBand {
            tolerance: CENTER_TOLERANCE_PX,
        },
    )
}

fn sample_at(scroll_y: f64) -> ScrollSample {
    ScrollSample {
        scroll_y,
        viewport_height: VIEWPORT_H,
    }
}

#[derive(Default)]
struct Recorder {
    highlights: Vec<u8>,
    cues: usize,
    particles: Vec<(u8, Vec2)>,
    fail_cue: bool,
}

impl StageEffects<u8> for Recorder {
    fn highlight(&mut self, key: &u8, _index: usize) {
        self.highlights.push(*key);
    }

    fn play_cue(&mut self) -> Result<(), CueError> {
        self.cues += 1;
        if self.fail_cue {
            Err(CueError::Playback("autoplay blocked".into()))
        } else {
            Ok(())
        }
    }

    fn emit_particles(&mut self, key: &u8, at: Vec2) {
        self.particles.push((*key, at));
    }
}

fn run(tracker: &mut StageTracker<u8>, fx: &mut Recorder, positions: impl IntoIterator<Item = f64>) -> Vec<Crossing<u8>> {
    let mut all = Vec::new();
    for y in positions {
        let crossings = tracker.sample(sample_at(y), layout(y));
        dispatch(&crossings, fx);
        all.extend(crossings);
    }
    all
}

#[test]
fn center_band_is_strict() {
    let rule = ActivationRule::CenterBand { tolerance: 50.0 };
    // centre exactly 50px off is outside
    assert!(!rule.is_active(&StageRect::new(0.0, 300.0, 10.0, 100.0), VIEWPORT_H));
    assert!(rule.is_active(&StageRect::new(0.0, 301.0, 10.0, 100.0), VIEWPORT_H));
    assert!(rule.is_active(&StageRect::new(0.0, 350.0, 10.0, 100.0), VIEWPORT_H));
    assert!(!rule.is_active(&StageRect::new(0.0, 400.0, 10.0, 100.0), VIEWPORT_H));
}

#[test]
fn contains_point_is_half_open() {
    let rule = ActivationRule::ContainsPoint { offset: 100.0 };
    assert!(rule.is_active(&StageRect::new(0.0, 100.0, 10.0, 50.0), VIEWPORT_H));
    assert!(rule.is_active(&StageRect::new(0.0, -500.0, 10.0, 601.0), VIEWPORT_H));
    assert!(!rule.is_active(&StageRect::new(0.0, -500.0, 10.0, 600.0), VIEWPORT_H));
    assert!(!rule.is_active(&StageRect::new(0.0, 101.0, 10.0, 50.0), VIEWPORT_H));
}

#[test]
fn downward_scroll_emits_particles_for_every_stage_in_order() {
    let mut tracker = centre_tracker();
    let mut fx = Recorder::default();
    let crossings = run(&mut tracker, &mut fx, (0..=400).map(|i| i as f64 * 10.0));

    let keys: Vec<u8> = crossings.iter().map(|c| c.key).collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5]);
    assert!(crossings.iter().all(|c| c.direction == ScrollDirection::Down));
    assert_eq!(fx.highlights, vec![1, 2, 3, 4, 5]);
    assert_eq!(fx.cues, 5);
    let emitted: Vec<u8> = fx.particles.iter().map(|(k, _)| *k).collect();
    assert_eq!(emitted, vec![1, 2, 3, 4, 5]);
    assert_eq!(tracker.current(), Some(&5));
}

#[test]
fn particles_are_anchored_at_stage_centre() {
    let mut tracker = centre_tracker();
    let mut fx = Recorder::default();
    run(&mut tracker, &mut fx, [0.0, 650.0]);
    assert_eq!(fx.particles.len(), 1);
    let (key, at) = fx.particles[0];
    assert_eq!(key, 1);
    // left 100 + width/2, top (1000 - 650) + height/2
    assert_eq!(at, Vec2::new(200.0, 400.0));
}

#[test]
fn upward_scroll_plays_cues_without_particles() {
    let mut tracker = centre_tracker().with_scroll_y(4000.0);
    let mut fx = Recorder::default();
    let crossings = run(&mut tracker, &mut fx, (0..=400).rev().map(|i| i as f64 * 10.0));

    let keys: Vec<u8> = crossings.iter().map(|c| c.key).collect();
    assert_eq!(keys, vec![5, 4, 3, 2, 1]);
    assert!(crossings.iter().all(|c| c.direction == ScrollDirection::Up));
    assert_eq!(fx.highlights, vec![5, 4, 3, 2, 1]);
    assert_eq!(fx.cues, 5);
    assert!(fx.particles.is_empty());
}

#[test]
fn no_refire_while_continuously_active() {
    let mut tracker = centre_tracker();
    let mut fx = Recorder::default();
    let crossings = run(&mut tracker, &mut fx, [610.0, 620.0, 650.0, 640.0, 690.0]);
    assert_eq!(crossings.len(), 1);
    assert_eq!(fx.cues, 1);
    assert!(tracker.is_active(&1));
}

#[test]
fn refires_after_leaving_and_reentering() {
    let mut tracker = centre_tracker();
    let mut fx = Recorder::default();
    let crossings = run(&mut tracker, &mut fx, [0.0, 650.0, 660.0, 800.0, 650.0]);
    assert_eq!(crossings.len(), 2);
    assert_eq!(crossings[0].direction, ScrollDirection::Down);
    assert_eq!(crossings[1].direction, ScrollDirection::Up);
    assert_eq!(fx.cues, 2);
    // only the downward crossing emitted
    assert_eq!(fx.particles.len(), 1);
}

#[test]
fn unchanged_position_is_not_downward() {
    assert_eq!(ScrollDirection::between(100.0, 100.0), ScrollDirection::Up);
    assert_eq!(ScrollDirection::between(100.0, 100.5), ScrollDirection::Down);

    let mut tracker = centre_tracker().with_scroll_y(650.0);
    let mut fx = Recorder::default();
    run(&mut tracker, &mut fx, [650.0]);
    assert_eq!(fx.cues, 1);
    assert!(fx.particles.is_empty());
}

#[test]
fn missing_geometry_skips_stage_until_mounted() {
    let mut tracker = centre_tracker();
    let mut fx = Recorder::default();

    let unmounted = |n: &u8| if *n == 1 { None } else { layout(650.0)(n) };
    let first = tracker.sample(sample_at(650.0), unmounted);
    dispatch(&first, &mut fx);
    assert!(first.is_empty());
    assert!(!tracker.is_active(&1));

    let second = tracker.sample(sample_at(655.0), layout(655.0));
    dispatch(&second, &mut fx);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].key, 1);
    assert_eq!(fx.particles.len(), 1);
}

#[test]
fn simultaneous_crossings_highlight_first_in_document_order() {
    let mut tracker = StageTracker::new(
        vec!["a", "b", "c"],
        ActivationRule::CenterBand { tolerance: 50.0 },
    );
    // a and c overlap the centre, b is far away
    let geometry = |k: &&str| match *k {
        "a" => Some(StageRect::new(0.0, 340.0, 10.0, 100.0)),
        "b" => Some(StageRect::new(0.0, 2000.0, 10.0, 100.0)),
        _ => Some(StageRect::new(0.0, 360.0, 10.0, 100.0)),
    };
    let crossings = tracker.sample(sample_at(10.0), geometry);
    let keys: Vec<&str> = crossings.iter().map(|c| c.key).collect();
    assert_eq!(keys, vec!["a", "c"]);
    assert_eq!(tracker.current(), Some(&"a"));
    assert_eq!(tracker.active_count(), 2);

    struct Highlights(Vec<&'static str>, usize);
    impl StageEffects<&'static str> for Highlights {
        fn highlight(&mut self, key: &&'static str, _index: usize) {
            self.0.push(*key);
        }
        fn play_cue(&mut self) -> Result<(), CueError> {
            self.1 += 1;
            Ok(())
        }
    }
    let mut fx = Highlights(Vec::new(), 0);
    dispatch(&crossings, &mut fx);
    assert_eq!(fx.0, vec!["a"]);
    assert_eq!(fx.1, 2);
}

#[test]
fn failing_cue_does_not_block_particles() {
    let mut tracker = centre_tracker();
    let mut fx = Recorder {
        fail_cue: true,
        ..Default::default()
    };
    run(&mut tracker, &mut fx, [0.0, 650.0, 1250.0]);
    assert_eq!(fx.cues, 2);
    assert_eq!(fx.highlights, vec![1, 2]);
    assert_eq!(fx.particles.len(), 2);
}

#[test]
fn random_walks_fire_once_per_active_interval() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut tracker = centre_tracker();
        let mut fx = Recorder::default();
        let mut y = 0.0_f64;
        let mut prev_active = [false; STAGE_COUNT as usize];
        let mut expected = 0usize;
        let mut got = 0usize;

        for _ in 0..400 {
            y = (y + rng.gen_range(-80.0..120.0)).clamp(0.0, 4000.0);
            let crossings = tracker.sample(sample_at(y), layout(y));
            dispatch(&crossings, &mut fx);
            got += crossings.len();

            for n in 1..=STAGE_COUNT {
                let lo = 600.0 + 600.0 * (n as f64 - 1.0);
                let active = y > lo && y < lo + 100.0;
                let slot = &mut prev_active[(n - 1) as usize];
                if active && !*slot {
                    expected += 1;
                }
                *slot = active;
            }
        }
        assert_eq!(got, expected);
        assert_eq!(fx.cues, expected);
    }
}

#[test]
fn gate_admits_one_sample_and_coalesces_the_rest() {
    let mut gate = ScrollGate::default();
    assert_eq!(gate.request(), GateDecision::Run);
    for _ in 0..10 {
        assert_eq!(gate.request(), GateDecision::Coalesced);
    }
    assert!(gate.has_pending());
    // trailing sample runs once, then the gate frees up
    assert!(gate.release());
    assert!(gate.is_busy());
    assert!(!gate.release());
    assert!(!gate.is_busy());
    assert_eq!(gate.request(), GateDecision::Run);
}

#[test]
fn gate_reset_clears_pending_work() {
    let mut gate = ScrollGate::default();
    gate.request();
    gate.request();
    gate.reset();
    assert!(!gate.is_busy());
    assert!(!gate.has_pending());
}

#[test]
fn bursts_of_scroll_events_do_not_double_count() {
    // Each burst lands inside one stage's band; coalesced events only move
    // the pending position, so each stage still crosses exactly once.
    let mut tracker = centre_tracker();
    let mut gate = ScrollGate::default();
    let mut fx = Recorder::default();
    let mut latest = 0.0;

    for n in 1..=STAGE_COUNT {
        let base = doc_top(n) - 400.0;
        for step in 0..20 {
            latest = base + step as f64;
            if gate.request() == GateDecision::Run {
                let c = tracker.sample(sample_at(latest), layout(latest));
                dispatch(&c, &mut fx);
            }
        }
        // cool-down elapses
        while gate.release() {
            let c = tracker.sample(sample_at(latest), layout(latest));
            dispatch(&c, &mut fx);
        }
    }
    assert_eq!(fx.cues, STAGE_COUNT as usize);
    assert_eq!(fx.highlights, vec![1, 2, 3, 4, 5]);
}
