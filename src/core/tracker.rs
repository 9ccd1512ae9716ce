//! Scroll-synchronized stage tracking.
//!
//! A [`StageTracker`] is fed one scroll sample at a time. For each sample it
//! recomputes which stages satisfy its [`ActivationRule`], diffs that set
//! against the previous sample and reports every stage that newly entered as
//! a [`Crossing`]. A stage therefore crosses once per continuous stay in the
//! active set; it has to leave before it can cross again.
//!
//! Side effects are not performed here. [`dispatch`] hands crossings to a
//! [`StageEffects`] implementation, which keeps the detection logic free of
//! any rendering or audio surface.

use super::stage::StageRect;
use fnv::FnvHashSet;
use glam::Vec2;
use smallvec::SmallVec;
use std::hash::Hash;
use thiserror::Error;

/// When a stage counts as active for a given viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActivationRule {
    /// Stage centre lies strictly within `tolerance` px of the viewport centre.
    CenterBand { tolerance: f64 },
    /// Stage span contains the point `offset` px below the viewport top.
    ContainsPoint { offset: f64 },
}

impl ActivationRule {
    pub fn is_active(&self, rect: &StageRect, viewport_height: f64) -> bool {
        match *self {
            ActivationRule::CenterBand { tolerance } => {
                (rect.center_y() - viewport_height / 2.0).abs() < tolerance
            }
            ActivationRule::ContainsPoint { offset } => {
                offset >= rect.top && offset < rect.bottom()
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Only a strictly larger offset counts as downward.
    #[inline]
    pub fn between(prev_y: f64, cur_y: f64) -> Self {
        if cur_y > prev_y {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub viewport_height: f64,
}

/// A stage that was inactive on the previous sample and is active now.
#[derive(Clone, Debug, PartialEq)]
pub struct Crossing<K> {
    pub key: K,
    /// Position in document order.
    pub index: usize,
    /// Centre of the stage's rectangle at sample time.
    pub anchor: Vec2,
    pub direction: ScrollDirection,
}

pub type Crossings<K> = SmallVec<[Crossing<K>; 4]>;

pub struct StageTracker<K> {
    stages: Vec<K>,
    rule: ActivationRule,
    active: FnvHashSet<K>,
    last_scroll_y: f64,
    current: Option<K>,
}

impl<K: Clone + Eq + Hash> StageTracker<K> {
    pub fn new(stages: Vec<K>, rule: ActivationRule) -> Self {
        Self {
            stages,
            rule,
            active: FnvHashSet::default(),
            last_scroll_y: 0.0,
            current: None,
        }
    }

    /// Seed the previous scroll offset so the first sample after mount gets
    /// a meaningful direction.
    pub fn with_scroll_y(mut self, scroll_y: f64) -> Self {
        self.last_scroll_y = scroll_y;
        self
    }

    /// Process one scroll sample and return the stages that newly crossed,
    /// in document order.
    ///
    /// `geometry` returns the live rectangle for a stage, or `None` when the
    /// element is not mounted; such stages are treated as inactive for this
    /// sample only.
    pub fn sample<F>(&mut self, sample: ScrollSample, mut geometry: F) -> Crossings<K>
    where
        F: FnMut(&K) -> Option<StageRect>,
    {
        let direction = ScrollDirection::between(self.last_scroll_y, sample.scroll_y);
        let mut next_active = FnvHashSet::default();
        let mut crossings = Crossings::new();

        for (index, key) in self.stages.iter().enumerate() {
            let Some(rect) = geometry(key) else {
                continue;
            };
            if !self.rule.is_active(&rect, sample.viewport_height) {
                continue;
            }
            next_active.insert(key.clone());
            if !self.active.contains(key) {
                crossings.push(Crossing {
                    key: key.clone(),
                    index,
                    anchor: rect.center(),
                    direction,
                });
            }
        }

        // Several stages crossing together: the first in document order wins.
        if let Some(first) = crossings.first() {
            self.current = Some(first.key.clone());
        }
        self.active = next_active;
        self.last_scroll_y = sample.scroll_y;
        crossings
    }

    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    pub fn set_current(&mut self, key: Option<K>) {
        self.current = key;
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active.contains(key)
    }

    /// First active stage in document order.
    pub fn first_active(&self) -> Option<&K> {
        self.stages.iter().find(|k| self.active.contains(*k))
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }

    pub fn stages(&self) -> &[K] {
        &self.stages
    }
}

#[derive(Debug, Error)]
pub enum CueError {
    #[error("audio context unavailable: {0}")]
    Unavailable(String),
    #[error("cue playback failed: {0}")]
    Playback(String),
}

/// Side effects attached to a stage crossing.
///
/// Only `highlight` is mandatory; trackers that need no sound or particles
/// keep the default no-ops.
pub trait StageEffects<K> {
    fn highlight(&mut self, key: &K, index: usize);

    fn play_cue(&mut self) -> Result<(), CueError> {
        Ok(())
    }

    fn emit_particles(&mut self, _key: &K, _at: Vec2) {}
}

/// Run side effects for one sample's crossings, in order: highlight (first
/// crossing only), cue, then particles when scrolling down. A failing cue is
/// logged and does not stop the remaining effects.
pub fn dispatch<K, E>(crossings: &[Crossing<K>], effects: &mut E)
where
    E: StageEffects<K> + ?Sized,
{
    for (i, crossing) in crossings.iter().enumerate() {
        if i == 0 {
            effects.highlight(&crossing.key, crossing.index);
        }
        if let Err(e) = effects.play_cue() {
            log::warn!("[audio] cue for stage #{} failed: {}", crossing.index, e);
        }
        if crossing.direction == ScrollDirection::Down {
            effects.emit_particles(&crossing.key, crossing.anchor);
        }
    }
}
