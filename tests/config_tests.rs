// Host-side tests for page-level configuration.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core"]
mod site_core {
    pub mod constants;
    pub mod theme;
    pub mod config;
}

use site_core::config::*;
use site_core::constants::*;
use site_core::theme::*;
use std::collections::HashMap;

#[test]
fn config_defaults_without_attributes() {
    let cfg = SiteConfig::from_attrs(|_| None);
    assert_eq!(cfg, SiteConfig::default());
    assert_eq!(cfg.contact_endpoint, CONTACT_ENDPOINT);
    assert_eq!(cfg.forced_theme, Some(Theme::Dark));
}

#[test]
fn config_reads_overrides_and_rejects_bad_values() {
    let attrs: HashMap<&str, &str> = [
        (ATTR_CONTACT_ENDPOINT, "/v2/contact"),
        (ATTR_CUE_VOLUME, "0.4"),
        (ATTR_FORCED_THEME, "none"),
    ]
    .into_iter()
    .collect();
    let cfg = SiteConfig::from_attrs(|k| attrs.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.contact_endpoint, "/v2/contact");
    assert!((cfg.cue_volume - 0.4).abs() < 1e-6);
    assert_eq!(cfg.forced_theme, None);

    let bad: HashMap<&str, &str> = [
        (ATTR_CONTACT_ENDPOINT, "  "),
        (ATTR_CUE_VOLUME, "loud"),
        (ATTR_FORCED_THEME, "neon"),
    ]
    .into_iter()
    .collect();
    let cfg = SiteConfig::from_attrs(|k| bad.get(k).map(|v| v.to_string()));
    assert_eq!(cfg, SiteConfig::default());

    let muted = SiteConfig::from_attrs(|k| (k == ATTR_CUE_VOLUME).then(|| "0".to_string()));
    assert_eq!(muted.cue_volume, 0.0);
}
