use crate::constants::THEME_ATTR;
use crate::core::constants::THEME_STORAGE_KEY;
use crate::core::{Theme, ThemeState};
use web_sys as web;

fn storage() -> Option<web::Storage> {
    web::window()?.local_storage().ok().flatten()
}

fn apply(document: &web::Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        _ = root.set_attribute(THEME_ATTR, theme.as_str());
    }
}

/// Resolve the theme from storage (or the forced setting) and apply it.
pub fn init(document: &web::Document, forced: Option<Theme>) -> ThemeState {
    let stored = storage().and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    let state = ThemeState::resolve(stored.as_deref(), forced);
    apply(document, state.current());
    log::info!(
        "[theme] {}{}",
        state.current().as_str(),
        if state.is_forced() { " (forced)" } else { "" }
    );
    state
}

pub fn toggle(document: &web::Document, state: &mut ThemeState) {
    let Some(next) = state.toggle() else {
        log::debug!("[theme] forced, toggle ignored");
        return;
    };
    apply(document, next);
    if let Some(s) = storage() {
        if let Err(e) = s.set_item(THEME_STORAGE_KEY, next.as_str()) {
            log::warn!("[theme] could not persist: {:?}", e);
        }
    }
}
