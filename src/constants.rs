// Element ids, attributes and class names the page markup exposes to the
// front-end. Behavioural tuning lives in `core/constants.rs`.

// Navbar
pub const NAVBAR_ID: &str = "navbar";
pub const NAV_LINK_SELECTOR: &str = "a[data-nav-link]";
pub const NAV_LINK_ATTR: &str = "data-nav-link"; // value: section id
pub const CLASS_SCROLLED: &str = "scrolled";
pub const CLASS_VISIBLE: &str = "visible";
pub const CLASS_ACTIVE: &str = "active";

// Workflow section
pub const STEP_BUTTON_SELECTOR: &str = "[data-step-target]";
pub const STEP_BUTTON_ATTR: &str = "data-step-target"; // value: step number
pub const STEP_CHEVRON_SELECTOR: &str = "[data-step-chevron]";
pub const CLASS_PULSE: &str = "animate-pulse";

// Particles
pub const PARTICLE_COLOR: &str = "#4e8ad3";
pub const PARTICLE_SHADOW: &str = "0 2px 4px rgba(78, 138, 211, 0.5)";
pub const PARTICLE_Z_INDEX: &str = "9999";
pub const PARTICLE_CLASS: &str = "water-drop";

// Contact
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONTACT_STATUS_ID: &str = "contact-status";
pub const CONTACT_SUBMIT_SELECTOR: &str = "button[type=submit]";
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_SUCCESS: &str = "success";
pub const CLASS_ERROR: &str = "error";

// Chrome
pub const THEME_TOGGLE_SELECTOR: &str = "[data-theme-toggle]";
pub const BOOK_CALL_SELECTOR: &str = "[data-book-call]";
pub const THEME_ATTR: &str = "data-theme";
