use serde::Serialize;
use std::{cell::RefCell, collections::HashMap};

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
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

    pub fn from_str(value: &str) -> Option<Self> {
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

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Passer au theme sombre",
            Self::Dark => "Passer au theme clair",
        }
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "◐",
            Self::Dark => "◑",
        }
    }
}

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

pub fn read_stored_theme(store: &dyn PreferenceStore) -> Option<Theme> {
    let value = store.get(THEME_KEY)?;
    Theme::from_str(value.trim())
}

pub fn resolve_theme(store: &dyn PreferenceStore, system_prefers_dark: bool) -> Theme {
    read_stored_theme(store).unwrap_or(if system_prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    })
}

pub fn persist_theme(store: &dyn PreferenceStore, theme: Theme) {
    store.set(THEME_KEY, theme.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_wins_over_system_preference() {
        let store = MemoryStore::default();
        persist_theme(&store, Theme::Light);

        assert_eq!(resolve_theme(&store, true), Theme::Light);
    }

    #[test]
    fn system_preference_is_the_fallback() {
        let store = MemoryStore::default();
        assert_eq!(resolve_theme(&store, true), Theme::Dark);
        assert_eq!(resolve_theme(&store, false), Theme::Light);

        store.set(THEME_KEY, "sepia");
        assert_eq!(resolve_theme(&store, true), Theme::Dark);
    }

    #[test]
    fn toggling_flips_label_and_pressed_state() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert!(Theme::Dark.pressed());
        assert!(!Theme::Light.pressed());
        assert_ne!(Theme::Light.toggle_label(), Theme::Dark.toggle_label());
    }
}
