use std::fmt;

use crate::platform::{PreferenceStore, StorageError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Theme that follows whatever the root attribute currently says.
    /// Only an exact `"light"` flips to dark; anything else lands on light.
    pub fn toggled_from_attr(current: Option<&str>) -> Self {
        if current == Some(Self::Light.as_str()) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Toggle glyph shown while this theme is active.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "\u{1F319}",
            Self::Dark => "\u{2600}\u{FE0F}",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one persisted preference: which theme the reader picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePreference {
    key: String,
    theme: Theme,
}

impl ThemePreference {
    pub fn new(key: impl Into<String>, theme: Theme) -> Self {
        Self {
            key: key.into(),
            theme,
        }
    }

    /// Reads `key` from `store`. Absent or unrecognized values fall back to
    /// [`Theme::Light`].
    pub fn load(store: &dyn PreferenceStore, key: &str) -> Self {
        let theme = store
            .get(key)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default();
        Self::new(key, theme)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn persist(&self, store: &mut dyn PreferenceStore) -> Result<(), StorageError> {
        store.set(&self.key, self.theme.as_str())
    }
}
