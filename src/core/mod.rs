pub mod config;
pub mod constants;
pub mod contact;
pub mod gate;
pub mod nav;
pub mod particles;
pub mod stage;
pub mod theme;
pub mod tracker;

pub use config::SiteConfig;
pub use contact::{ContactError, ContactForm, Field, SubmitStatus, SubmitTicket};
pub use gate::{GateDecision, ScrollGate};
pub use nav::{NavState, NavView};
pub use particles::{EmitterId, EmitterRegistry};
pub use stage::{StageRect, NAV_SECTIONS, WORKFLOW_STEPS};
pub use theme::{Theme, ThemeState};
pub use tracker::{
    dispatch, ActivationRule, CueError, ScrollSample, StageEffects, StageTracker,
};
