// Host-side tests for particle bursts and the emitter registry.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core"]
mod site_core {
    pub mod constants;
    pub mod stage;
    pub mod tracker;
    pub mod particles;
}

use glam::Vec2;
use rand::prelude::*;
use site_core::constants::*;
use site_core::particles::*;
use site_core::stage::StageRect;
use site_core::tracker::*;

#[test]
fn burst_has_fixed_size_and_bounded_trajectories() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut registry = EmitterRegistry::new();
    let id = registry.spawn(Vec2::new(300.0, 200.0), 0.0, &mut rng);
    let emitter = registry.get(id).unwrap();
    assert_eq!(emitter.particles.len(), PARTICLE_COUNT);

    for p in &emitter.particles {
        assert!(p.size >= 6.0 && p.size <= 14.0, "size {}", p.size);
        assert!(p.start.x >= -15.0 && p.start.x < 15.0);
        assert!(p.start.y >= -5.0 && p.start.y < 5.0);
        assert!(p.velocity.x >= -0.5 && p.velocity.x < 0.5);
        assert!(p.velocity.y >= 8.0 && p.velocity.y <= 10.0);
    }
}

#[test]
fn particles_in_a_burst_differ() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut registry = EmitterRegistry::new();
    let id = registry.spawn(Vec2::ZERO, 0.0, &mut rng);
    let ps = &registry.get(id).unwrap().particles;
    assert!(ps.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn frame_starts_at_offset_and_falls_with_ease_in() {
    let p = Particle {
        size: 10.0,
        start: Vec2::new(4.0, -2.0),
        velocity: Vec2::new(0.2, 9.0),
    };
    let anchor = Vec2::new(100.0, 50.0);

    let f0 = p.frame_at(anchor, 0.0);
    assert_eq!(f0.position, Vec2::new(104.0, 48.0));
    assert!((f0.opacity - PARTICLE_START_OPACITY).abs() < 1e-6);

    let half = p.frame_at(anchor, 0.5);
    // quadratic ease-in covers a quarter of the travel at half time
    assert!((half.position.y - (48.0 + 900.0 * 0.25)).abs() < 1e-3);
    assert!((half.opacity - 0.4).abs() < 1e-6);

    let end = p.frame_at(anchor, 1.0);
    assert!((end.position.x - 124.0).abs() < 1e-3);
    assert!((end.position.y - 948.0).abs() < 1e-3);
    assert_eq!(end.opacity, 0.0);

    // clamped past the end
    assert_eq!(p.frame_at(anchor, 3.0), end);
}

#[test]
fn emitter_progress_and_expiry() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut registry = EmitterRegistry::new();
    let id = registry.spawn(Vec2::ZERO, 1000.0, &mut rng);
    let e = registry.get(id).unwrap().clone();

    assert_eq!(e.progress(500.0), 0.0);
    assert_eq!(e.progress(1000.0), 0.0);
    assert!((e.progress(1000.0 + PARTICLE_LIFETIME_MS as f64 / 2.0) - 0.5).abs() < 1e-6);
    assert_eq!(e.progress(10_000.0), 1.0);
    assert!(!e.is_expired(1000.0 + PARTICLE_LIFETIME_MS as f64 - 1.0));
    assert!(e.is_expired(1000.0 + PARTICLE_LIFETIME_MS as f64));
}

#[test]
fn complete_removes_once() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut registry = EmitterRegistry::new();
    let a = registry.spawn(Vec2::ZERO, 0.0, &mut rng);
    let b = registry.spawn(Vec2::ONE, 0.0, &mut rng);
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);

    assert!(registry.complete(a));
    assert!(!registry.complete(a));
    assert_eq!(registry.len(), 1);
    assert!(registry.get(b).is_some());
}

#[test]
fn expire_only_drops_finished_bursts() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut registry = EmitterRegistry::new();
    let old = registry.spawn(Vec2::ZERO, 0.0, &mut rng);
    let young = registry.spawn(Vec2::ZERO, 1500.0, &mut rng);

    let gone = registry.expire(PARTICLE_LIFETIME_MS as f64);
    assert_eq!(gone, vec![old]);
    assert_eq!(registry.len(), 1);
    assert!(registry.get(young).is_some());

    let gone = registry.expire(1500.0 + PARTICLE_LIFETIME_MS as f64);
    assert_eq!(gone, vec![young]);
    assert!(registry.is_empty());
}

// Emitter sink that spawns into a registry, the way the web layer does.
struct Spawner<'a> {
    registry: &'a mut EmitterRegistry,
    rng: StdRng,
    now_ms: f64,
}

impl StageEffects<u8> for Spawner<'_> {
    fn highlight(&mut self, _key: &u8, _index: usize) {}

    fn emit_particles(&mut self, _key: &u8, at: Vec2) {
        self.registry.spawn(at, self.now_ms, &mut self.rng);
    }
}

#[test]
fn downward_scroll_bursts_all_drain_to_empty() {
    let mut registry = EmitterRegistry::new();
    let mut tracker = StageTracker::new(
        (1..=5u8).collect(),
        ActivationRule::CenterBand {
            tolerance: CENTER_TOLERANCE_PX,
        },
    );
    let mut now = 0.0;
    let mut y = 0.0;
    let mut spawned = Vec::new();

    while y <= 4000.0 {
        let geometry = |n: &u8| {
            let top = 1000.0 + 600.0 * (*n as f64 - 1.0) - y;
            Some(StageRect::new(0.0, top, 50.0, 100.0))
        };
        let crossings = tracker.sample(
            ScrollSample {
                scroll_y: y,
                viewport_height: 800.0,
            },
            geometry,
        );
        let before = registry.len();
        let mut fx = Spawner {
            registry: &mut registry,
            rng: StdRng::seed_from_u64(y as u64),
            now_ms: now,
        };
        dispatch(&crossings, &mut fx);
        if registry.len() > before {
            spawned.extend(crossings.iter().map(|c| c.index));
        }
        registry.expire(now);
        y += 10.0;
        now += 16.0;
    }

    assert_eq!(spawned, vec![0, 1, 2, 3, 4]);
    registry.expire(now + PARTICLE_LIFETIME_MS as f64);
    assert!(registry.is_empty());
}
