//! Navbar state: scrolled styling and the active section link.

use super::constants::{NAV_CLEAR_ABOVE_PX, NAV_PROBE_OFFSET_PX};
use super::stage::{StageRect, NAV_SECTIONS};
use super::tracker::{ActivationRule, ScrollSample, StageTracker};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavUpdate {
    pub scrolled: bool,
    pub active: Option<&'static str>,
}

pub struct NavState {
    tracker: StageTracker<&'static str>,
    scrolled: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavState {
    pub fn new() -> Self {
        let ids = NAV_SECTIONS.iter().map(|s| s.id).collect();
        Self {
            tracker: StageTracker::new(
                ids,
                ActivationRule::ContainsPoint {
                    offset: NAV_PROBE_OFFSET_PX,
                },
            ),
            scrolled: false,
        }
    }

    /// Feed a scroll sample. Returns the new state only when something
    /// visible changed.
    ///
    /// The first section containing the probe point becomes active. Between
    /// sections the previous link stays lit; near the top of the page none is.
    pub fn on_scroll<F>(&mut self, sample: ScrollSample, geometry: F) -> Option<NavUpdate>
    where
        F: FnMut(&&'static str) -> Option<StageRect>,
    {
        let before = self.snapshot();
        self.scrolled = sample.scroll_y > 0.0;
        self.tracker.sample(sample, geometry);

        let next = if sample.scroll_y < NAV_CLEAR_ABOVE_PX {
            None
        } else {
            self.tracker
                .first_active()
                .copied()
                .or_else(|| self.tracker.current().copied())
        };
        self.tracker.set_current(next);

        let after = self.snapshot();
        (after != before).then_some(after)
    }

    /// A nav link was clicked; light it immediately.
    pub fn select(&mut self, id: &'static str) -> Option<NavUpdate> {
        let before = self.snapshot();
        self.tracker.set_current(Some(id));
        let after = self.snapshot();
        (after != before).then_some(after)
    }

    pub fn active(&self) -> Option<&'static str> {
        self.tracker.current().copied()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    fn snapshot(&self) -> NavUpdate {
        NavUpdate {
            scrolled: self.scrolled,
            active: self.active(),
        }
    }
}

/// Applies a [`NavUpdate`] to whatever renders the navbar.
pub trait NavView {
    fn set_scrolled(&mut self, scrolled: bool);
    fn set_active(&mut self, id: Option<&'static str>);
}

pub fn apply<V: NavView + ?Sized>(view: &mut V, update: &NavUpdate) {
    view.set_scrolled(update.scrolled);
    view.set_active(update.active);
}
