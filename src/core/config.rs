//! Runtime site configuration.
//!
//! Defaults come from `constants`; the page may override a few of them with
//! `data-*` attributes on `<body>`. Lookup is injected so this stays
//! independent of the DOM.

use super::constants::{CONTACT_ENDPOINT, CUE_DEFAULT_VOLUME};
use super::theme::Theme;

pub const ATTR_CONTACT_ENDPOINT: &str = "data-contact-endpoint";
pub const ATTR_CUE_VOLUME: &str = "data-cue-volume";
pub const ATTR_FORCED_THEME: &str = "data-forced-theme";

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub contact_endpoint: String,
    /// Peak gain of the crossing cue, 0 mutes it.
    pub cue_volume: f32,
    pub forced_theme: Option<Theme>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_endpoint: CONTACT_ENDPOINT.to_string(),
            cue_volume: CUE_DEFAULT_VOLUME,
            forced_theme: Some(Theme::Dark),
        }
    }
}

impl SiteConfig {
    /// Build from an attribute lookup. Invalid values keep the default and
    /// log a warning.
    pub fn from_attrs<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(endpoint) = lookup(ATTR_CONTACT_ENDPOINT) {
            let endpoint = endpoint.trim();
            if endpoint.is_empty() {
                log::warn!("[config] empty {}, using {}", ATTR_CONTACT_ENDPOINT, cfg.contact_endpoint);
            } else {
                cfg.contact_endpoint = endpoint.to_string();
            }
        }

        if let Some(raw) = lookup(ATTR_CUE_VOLUME) {
            match raw.trim().parse::<f32>() {
                Ok(v) if v.is_finite() && (0.0..=1.0).contains(&v) => cfg.cue_volume = v,
                _ => log::warn!("[config] invalid {}={:?}, using {}", ATTR_CUE_VOLUME, raw, cfg.cue_volume),
            }
        }

        if let Some(raw) = lookup(ATTR_FORCED_THEME) {
            if raw.trim().eq_ignore_ascii_case("none") {
                cfg.forced_theme = None;
            } else if let Some(theme) = Theme::parse(&raw) {
                cfg.forced_theme = Some(theme);
            } else {
                log::warn!("[config] invalid {}={:?}, keeping default", ATTR_FORCED_THEME, raw);
            }
        }

        cfg
    }
}
