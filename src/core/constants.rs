// Shared behavioural tuning constants for the landing page.

// Stage tracking
pub const CENTER_TOLERANCE_PX: f64 = 50.0; // half-width of the "centred" band around viewport middle
pub const NAV_PROBE_OFFSET_PX: f64 = 100.0; // navbar height; probe point below viewport top
pub const NAV_CLEAR_ABOVE_PX: f64 = 100.0; // no active nav link while scroll_y is above this
pub const SCROLL_COOLDOWN_MS: i32 = 100; // min gap between two scroll samples

// Workflow step navigation
pub const STEP_SCROLL_OFFSET_PX: f64 = -100.0; // leave room for the fixed navbar

// Nav link navigation: the section top lands on the nav probe point
pub const NAV_SCROLL_OFFSET_PX: f64 = -NAV_PROBE_OFFSET_PX;

// Particles
pub const PARTICLE_COUNT: usize = 10;
pub const PARTICLE_LIFETIME_MS: i32 = 1875;
pub const PARTICLE_SIZE_MIN_PX: f32 = 6.0;
pub const PARTICLE_SIZE_SPAN_PX: f32 = 8.0;
pub const PARTICLE_SPREAD_X_PX: f32 = 30.0; // shower-head width
pub const PARTICLE_SPREAD_Y_PX: f32 = 10.0;
pub const PARTICLE_DRIFT_X_SPAN: f32 = 1.0;
pub const PARTICLE_FALL_MIN: f32 = 8.0;
pub const PARTICLE_FALL_SPAN: f32 = 2.0;
pub const PARTICLE_TRAVEL_SCALE: f32 = 100.0; // velocity units -> px over one lifetime
pub const PARTICLE_START_OPACITY: f32 = 0.8;

// Water-drop cue (two short falling tones)
pub const CUE_DROP_START_HZ: f32 = 800.0;
pub const CUE_DROP_END_HZ: f32 = 400.0;
pub const CUE_DROP_SWEEP_SEC: f64 = 0.1;
pub const CUE_DROP_LEN_SEC: f64 = 0.3;
pub const CUE_PLOP_DELAY_SEC: f64 = 0.05;
pub const CUE_PLOP_START_HZ: f32 = 600.0;
pub const CUE_PLOP_END_HZ: f32 = 250.0;
pub const CUE_PLOP_SWEEP_SEC: f64 = 0.05;
pub const CUE_PLOP_LEN_SEC: f64 = 0.15;
pub const CUE_DEFAULT_VOLUME: f32 = 0.15;

// Contact form
pub const CONTACT_ENDPOINT: &str = "/api/contact";
pub const FORM_RESET_DELAY_MS: i32 = 5000;
pub const CONTACT_SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent to Jimmy.";
pub const CONTACT_ERROR_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again or email directly.";

// Navbar
pub const NAV_REVEAL_DELAY_MS: i32 = 200;

// Theme
pub const THEME_STORAGE_KEY: &str = "theme";

// Outbound links
pub const SCHEDULING_URL: &str = "https://calendly.com/jimmy-agenticpersonnel/30min?month=2025-09";
