//! Accessibility preferences and the key-value stores that persist them.
//!
//! Storage is best effort. A store that cannot be read behaves as if empty and
//! a failed write is logged and otherwise ignored; the in-memory value is what
//! the UI uses either way.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const TEXT_SIZE_KEY: &str = "textSize";
pub const CONTRAST_MODE_KEY: &str = "contrastMode";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage is unavailable")]
    Unavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).set(key, value)
    }
}

/// Preferences kept in a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "could not read preferences");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // A corrupt file is replaced rather than blocking every later write
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stand-in when there is nowhere to persist to.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
        Err(PreferenceError::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSize::Small => "small",
            TextSize::Medium => "medium",
            TextSize::Large => "large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "small" => Some(TextSize::Small),
            "medium" => Some(TextSize::Medium),
            "large" => Some(TextSize::Large),
            _ => None,
        }
    }

    pub fn all() -> Vec<TextSize> {
        vec![TextSize::Small, TextSize::Medium, TextSize::Large]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextSize::Small => "Small",
            TextSize::Medium => "Medium",
            TextSize::Large => "Large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastMode {
    #[default]
    Normal,
    High,
}

impl ContrastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContrastMode::Normal => "normal",
            ContrastMode::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(ContrastMode::Normal),
            "high" => Some(ContrastMode::High),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ContrastMode::Normal => ContrastMode::High,
            ContrastMode::High => ContrastMode::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessibilityPreferences {
    pub text_size: TextSize,
    pub contrast_mode: ContrastMode,
}

/// Current accessibility preferences plus the store they are written through.
pub struct AccessibilityState<S: PreferenceStore> {
    preferences: AccessibilityPreferences,
    store: S,
}

impl<S: PreferenceStore> AccessibilityState<S> {
    /// Start from defaults and apply whatever the store remembers.
    pub fn load(store: S) -> Self {
        let mut preferences = AccessibilityPreferences::default();

        if let Some(size) = store.get(TEXT_SIZE_KEY).as_deref().and_then(TextSize::from_str) {
            preferences.text_size = size;
        }
        if let Some(mode) = store
            .get(CONTRAST_MODE_KEY)
            .as_deref()
            .and_then(ContrastMode::from_str)
        {
            preferences.contrast_mode = mode;
        }

        debug!(?preferences, "accessibility preferences loaded");
        Self { preferences, store }
    }

    pub fn preferences(&self) -> AccessibilityPreferences {
        self.preferences
    }

    pub fn text_size(&self) -> TextSize {
        self.preferences.text_size
    }

    pub fn contrast_mode(&self) -> ContrastMode {
        self.preferences.contrast_mode
    }

    pub fn is_high_contrast(&self) -> bool {
        self.preferences.contrast_mode == ContrastMode::High
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_text_size(&mut self, size: TextSize) {
        self.preferences.text_size = size;
        self.persist(TEXT_SIZE_KEY, size.as_str());
    }

    pub fn set_contrast_mode(&mut self, mode: ContrastMode) {
        self.preferences.contrast_mode = mode;
        self.persist(CONTRAST_MODE_KEY, mode.as_str());
    }

    pub fn toggle_contrast_mode(&mut self) {
        self.set_contrast_mode(self.preferences.contrast_mode.toggled());
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            debug!(key, value, error = %e, "preference not persisted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_store_is_empty() {
        let state = AccessibilityState::load(MemoryStore::new());
        assert_eq!(state.text_size(), TextSize::Medium);
        assert_eq!(state.contrast_mode(), ContrastMode::Normal);
    }

    #[test]
    fn test_stored_values_override_defaults() {
        let mut store = MemoryStore::new();
        store.set(TEXT_SIZE_KEY, "large").unwrap();
        store.set(CONTRAST_MODE_KEY, "high").unwrap();

        let state = AccessibilityState::load(store);
        assert_eq!(state.text_size(), TextSize::Large);
        assert!(state.is_high_contrast());
    }

    #[test]
    fn test_unrecognised_values_keep_defaults() {
        let mut store = MemoryStore::new();
        store.set(TEXT_SIZE_KEY, "huge").unwrap();
        store.set(CONTRAST_MODE_KEY, "inverted").unwrap();

        let state = AccessibilityState::load(store);
        assert_eq!(state.preferences(), AccessibilityPreferences::default());
    }

    #[test]
    fn test_set_text_size_persists() {
        let mut state = AccessibilityState::load(MemoryStore::new());
        state.set_text_size(TextSize::Small);
        assert_eq!(state.text_size(), TextSize::Small);
        assert_eq!(state.store().get(TEXT_SIZE_KEY).as_deref(), Some("small"));
    }

    #[test]
    fn test_toggle_contrast_twice_restores_mode_and_stored_value() {
        let mut state = AccessibilityState::load(MemoryStore::new());
        state.set_contrast_mode(ContrastMode::Normal);
        let original = state.store().get(CONTRAST_MODE_KEY);

        state.toggle_contrast_mode();
        assert_eq!(state.contrast_mode(), ContrastMode::High);
        assert_eq!(state.store().get(CONTRAST_MODE_KEY).as_deref(), Some("high"));

        state.toggle_contrast_mode();
        assert_eq!(state.contrast_mode(), ContrastMode::Normal);
        assert_eq!(state.store().get(CONTRAST_MODE_KEY), original);
    }

    #[test]
    fn test_unavailable_store_is_silent() {
        let mut state = AccessibilityState::load(UnavailableStore);
        state.set_text_size(TextSize::Large);
        state.toggle_contrast_mode();
        assert_eq!(state.text_size(), TextSize::Large);
        assert_eq!(state.contrast_mode(), ContrastMode::High);
    }

    #[test]
    fn test_file_store_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut state = AccessibilityState::load(JsonFileStore::new(&path));
        state.set_text_size(TextSize::Large);
        state.set_contrast_mode(ContrastMode::High);

        let reloaded = AccessibilityState::load(JsonFileStore::new(&path));
        assert_eq!(reloaded.text_size(), TextSize::Large);
        assert_eq!(reloaded.contrast_mode(), ContrastMode::High);
    }

    #[test]
    fn test_file_store_treats_corrupt_file_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get(TEXT_SIZE_KEY), None);

        store.set(TEXT_SIZE_KEY, "small").unwrap();
        assert_eq!(store.get(TEXT_SIZE_KEY).as_deref(), Some("small"));
    }

    #[test]
    fn test_boxed_store() {
        let store: Box<dyn PreferenceStore + Send> = Box::new(MemoryStore::new());
        let mut state = AccessibilityState::load(store);
        state.set_text_size(TextSize::Small);
        assert_eq!(state.store().get(TEXT_SIZE_KEY).as_deref(), Some("small"));
    }
}
