//! Particle bursts ("water drops") and the registry of live emitters.
//!
//! A burst is a fixed batch of particles with independent random
//! trajectories. The registry only tracks which bursts are alive; the web
//! layer draws them and reports completion when the lifetime timer fires.

use super::constants::*;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub size: f32,
    /// Offset from the burst anchor at t = 0.
    pub start: Vec2,
    /// Travel per lifetime, in velocity units (see `PARTICLE_TRAVEL_SCALE`).
    pub velocity: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFrame {
    /// Absolute screen position (top-left of the particle box).
    pub position: Vec2,
    pub opacity: f32,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            size: rng.gen::<f32>() * PARTICLE_SIZE_SPAN_PX + PARTICLE_SIZE_MIN_PX,
            start: Vec2::new(
                (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD_X_PX,
                (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD_Y_PX,
            ),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * PARTICLE_DRIFT_X_SPAN,
                rng.gen::<f32>() * PARTICLE_FALL_SPAN + PARTICLE_FALL_MIN,
            ),
        }
    }

    /// Position and opacity at normalized time `t` in \[0, 1\] (clamped).
    /// Motion eases in (quadratic); opacity fades linearly to zero.
    pub fn frame_at(&self, anchor: Vec2, t: f32) -> ParticleFrame {
        let t = t.clamp(0.0, 1.0);
        let eased = t * t;
        let travel = self.velocity * PARTICLE_TRAVEL_SCALE * eased;
        ParticleFrame {
            position: anchor + self.start + travel,
            opacity: PARTICLE_START_OPACITY * (1.0 - t),
        }
    }
}

pub type EmitterId = u64;

#[derive(Clone, Debug)]
pub struct Emitter {
    pub id: EmitterId,
    pub anchor: Vec2,
    pub particles: Vec<Particle>,
    pub born_ms: f64,
}

impl Emitter {
    /// Normalized age in \[0, 1\].
    pub fn progress(&self, now_ms: f64) -> f32 {
        let age = (now_ms - self.born_ms).max(0.0);
        (age / PARTICLE_LIFETIME_MS as f64).min(1.0) as f32
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.born_ms >= PARTICLE_LIFETIME_MS as f64
    }
}

/// Live particle bursts, owned by the workflow section for the page lifetime.
#[derive(Debug, Default)]
pub struct EmitterRegistry {
    emitters: Vec<Emitter>,
    next_id: EmitterId,
}

impl EmitterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a burst of `PARTICLE_COUNT` particles at `anchor`.
    pub fn spawn<R: Rng + ?Sized>(&mut self, anchor: Vec2, now_ms: f64, rng: &mut R) -> EmitterId {
        let id = self.next_id;
        self.next_id += 1;
        let particles = (0..PARTICLE_COUNT).map(|_| Particle::random(rng)).collect();
        self.emitters.push(Emitter {
            id,
            anchor,
            particles,
            born_ms: now_ms,
        });
        id
    }

    /// Completion callback for one burst. Returns `false` if it was already
    /// gone.
    pub fn complete(&mut self, id: EmitterId) -> bool {
        let before = self.emitters.len();
        self.emitters.retain(|e| e.id != id);
        self.emitters.len() != before
    }

    /// Drop every burst whose lifetime has elapsed and return their ids.
    pub fn expire(&mut self, now_ms: f64) -> Vec<EmitterId> {
        let mut expired = Vec::new();
        self.emitters.retain(|e| {
            if e.is_expired(now_ms) {
                expired.push(e.id);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn get(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Emitter> {
        self.emitters.iter()
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    pub fn clear(&mut self) {
        self.emitters.clear();
    }
}
