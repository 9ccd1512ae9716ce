#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Resolves the effective theme from the forced setting and storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeState {
    current: Theme,
    forced: Option<Theme>,
}

impl ThemeState {
    /// A forced theme wins over whatever was stored; unknown stored values
    /// fall back to the default.
    pub fn resolve(stored: Option<&str>, forced: Option<Theme>) -> Self {
        let current = forced
            .or_else(|| stored.and_then(Theme::parse))
            .unwrap_or_default();
        Self { current, forced }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn is_forced(&self) -> bool {
        self.forced.is_some()
    }

    /// Flip between dark and light. Returns the theme to persist, or `None`
    /// when a forced theme makes toggling a no-op.
    pub fn toggle(&mut self) -> Option<Theme> {
        if self.is_forced() {
            return None;
        }
        self.current = self.current.toggled();
        Some(self.current)
    }
}
