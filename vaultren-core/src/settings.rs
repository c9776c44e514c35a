use crate::selector::parse_tag_list;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Which selection mode is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Folder,
    Tags,
    RegExp,
}

impl ViewType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Tags => "tags",
            Self::RegExp => "regexp",
        }
    }
}

impl std::str::FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "folder" => Ok(Self::Folder),
            "tags" => Ok(Self::Tags),
            "regexp" => Ok(Self::RegExp),
            _ => Err(format!("Invalid view type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegExpState {
    pub reg_exp: String,
    /// One single-character string per flag, validated only when compiled
    pub flags: Vec<String>,
}

/// The persisted settings document.
///
/// Every mode keeps its own parameters, so switching `view_type` back and
/// forth never loses what was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub folder_name: String,
    pub existing_symbol: String,
    pub replace_pattern: String,
    pub tags: Vec<String>,
    pub reg_exp_state: RegExpState,
    pub view_type: ViewType,
}

impl Settings {
    /// Overlay a stored document on the defaults. Missing keys and explicit
    /// `null`s keep the default; nested objects merge key by key.
    pub fn merge_over_defaults(stored: Value) -> Result<Self, serde_json::Error> {
        let mut merged = serde_json::to_value(Self::default())?;
        overlay(&mut merged, stored);
        serde_json::from_value(merged)
    }
}

fn overlay(base: &mut Value, stored: Value) {
    match (base, stored) {
        (_, Value::Null) => {},
        (Value::Object(base), Value::Object(stored)) => {
            for (key, value) in stored {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None if !value.is_null() => {
                        base.insert(key, value);
                    },
                    None => {},
                }
            }
        },
        (slot, value) => *slot = value,
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings document at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the settings document lives
pub trait SettingsStore {
    /// The raw stored document, or `None` when nothing was saved yet
    fn load(&self) -> Result<Option<Value>, SettingsError>;
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
    /// Where the document lives, for error messages
    fn location(&self) -> PathBuf;
}

/// Settings kept as pretty-printed JSON on disk
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store for a vault's `.vaultren` directory
    pub fn in_dir(vaultren_dir: &Path) -> Self {
        Self::new(vaultren_dir.join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parse_error(&self, source: serde_json::Error) -> SettingsError {
        SettingsError::Parse {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    fn location(&self) -> PathBuf {
        self.path.clone()
    }

    fn load(&self) -> Result<Option<Value>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let value = serde_json::from_reader(BufReader::new(file)).map_err(|e| self.parse_error(e))?;
        tracing::debug!(path = %self.path.display(), "loaded settings");
        Ok(Some(value))
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), settings)
            .map_err(|e| self.parse_error(e))?;

        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}

/// In-memory store, for embedders that persist elsewhere and for tests
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    document: RefCell<Option<Value>>,
}

impl MemorySettingsStore {
    pub fn new(document: Option<Value>) -> Self {
        Self {
            document: RefCell::new(document),
        }
    }

    pub fn document(&self) -> Option<Value> {
        self.document.borrow().clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn location(&self) -> PathBuf {
        PathBuf::from("<memory>")
    }

    fn load(&self) -> Result<Option<Value>, SettingsError> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let value = serde_json::to_value(settings).map_err(|source| SettingsError::Parse {
            path: self.location(),
            source,
        })?;
        *self.document.borrow_mut() = Some(value);
        Ok(())
    }
}

/// Owns the mutable settings and persists after every change.
///
/// Computation never sees this type: callers take a [`Settings`] snapshot and
/// hand it to the pure selection and planning functions.
#[derive(Debug)]
pub struct SettingsState<S: SettingsStore> {
    store: S,
    settings: Settings,
}

impl<S: SettingsStore> SettingsState<S> {
    pub fn load(store: S) -> Result<Self, SettingsError> {
        let settings = match store.load()? {
            Some(stored) => {
                Settings::merge_over_defaults(stored).map_err(|source| SettingsError::Parse {
                    path: store.location(),
                    source,
                })?
            },
            None => Settings::default(),
        };
        Ok(Self { store, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> Settings {
        self.settings.clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply a change and persist it before returning
    pub fn update<F>(&mut self, change: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        change(&mut self.settings);
        self.store.save(&self.settings)
    }

    pub fn set_view_type(&mut self, view_type: ViewType) -> Result<(), SettingsError> {
        self.update(|s| s.view_type = view_type)
    }

    pub fn set_folder_name(&mut self, folder: &str) -> Result<(), SettingsError> {
        self.update(|s| s.folder_name = folder.to_string())
    }

    /// Store tags typed as a comma-separated list
    pub fn set_tags_input(&mut self, input: &str) -> Result<(), SettingsError> {
        let tags = parse_tag_list(input);
        self.update(|s| s.tags = tags)
    }

    pub fn set_reg_exp(&mut self, source: &str) -> Result<(), SettingsError> {
        self.update(|s| s.reg_exp_state.reg_exp = source.to_string())
    }

    /// Store flags typed as a compact string such as `"gi"`. Validation is
    /// left to the pattern compiler so a bad flag is reported, not dropped.
    pub fn set_flags_input(&mut self, input: &str) -> Result<(), SettingsError> {
        let mut flags: Vec<String> = Vec::new();
        for ch in input.chars().filter(|c| !c.is_whitespace()) {
            let entry = ch.to_string();
            if !flags.contains(&entry) {
                flags.push(entry);
            }
        }
        self.update(|s| s.reg_exp_state.flags = flags)
    }

    pub fn set_existing_symbol(&mut self, symbol: &str) -> Result<(), SettingsError> {
        self.update(|s| s.existing_symbol = symbol.to_string())
    }

    pub fn set_replace_pattern(&mut self, pattern: &str) -> Result<(), SettingsError> {
        self.update(|s| s.replace_pattern = pattern.to_string())
    }
}
