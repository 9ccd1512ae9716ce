/// Admission control for scroll samples.
///
/// At most one sample is in flight. Scroll events that arrive while the gate
/// is busy are folded into a single trailing sample, run when the cool-down
/// ends, so the final resting position is always observed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollGate {
    busy: bool,
    pending: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Caller runs a sample now and schedules [`ScrollGate::release`].
    Run,
    /// Folded into the trailing sample.
    Coalesced,
}

impl ScrollGate {
    pub fn request(&mut self) -> GateDecision {
        if self.busy {
            self.pending = true;
            GateDecision::Coalesced
        } else {
            self.busy = true;
            GateDecision::Run
        }
    }

    /// End of cool-down. Returns `true` when a coalesced sample must run now;
    /// the gate then stays busy and the caller schedules another release.
    pub fn release(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            true
        } else {
            self.busy = false;
            false
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Forget any in-flight state, e.g. after teardown cancelled the timer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
