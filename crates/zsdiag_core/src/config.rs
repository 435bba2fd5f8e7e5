//! Configuration.
//!
//! Settings come from a `.zsdiag.jsonc`/`.zsdiag.json` file found by walking up
//! from a directory, optionally overlaid with settings pushed by the editor.

use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DiagError;
use crate::normalize::{DEFAULT_SETTINGS_HINT, DEFAULT_TEMP_BUFFER};

/// Configuration for compiling and reporting diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiagConfig {
    /// Directory containing the `zscript` compiler binary.
    #[serde(default)]
    pub installation_folder: Option<PathBuf>,

    /// Log the raw compiler output of every run.
    #[serde(default)]
    pub print_compiler_output: bool,

    /// File name the compiler uses for its throwaway buffer.
    #[serde(default = "default_temp_buffer_name")]
    pub temp_buffer_name: String,

    /// Source tag for diagnostics. Defaults to the compiler executable name.
    #[serde(default)]
    pub source: Option<String>,

    /// Named in the message of diagnostics that point into the temp buffer.
    #[serde(default = "default_settings_hint")]
    pub settings_hint: String,

    /// Arguments passed to the compiler before `-input <file>`.
    #[serde(default = "default_compiler_args")]
    pub compiler_args: Vec<String>,

    /// Delay before validating after an edit.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Directory containing the configuration file, for relative paths.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_temp_buffer_name() -> String {
    DEFAULT_TEMP_BUFFER.to_string()
}

fn default_settings_hint() -> String {
    DEFAULT_SETTINGS_HINT.to_string()
}

fn default_compiler_args() -> Vec<String> {
    vec!["-unlinked".to_string()]
}

fn default_debounce_ms() -> u64 {
    300
}

impl DiagConfig {
    /// Config file names, in lookup order.
    pub const CONFIG_FILES: [&'static str; 2] = [".zsdiag.jsonc", ".zsdiag.json"];

    /// Creates a configuration with every default.
    pub fn new() -> Self {
        Self {
            installation_folder: None,
            print_compiler_output: false,
            temp_buffer_name: default_temp_buffer_name(),
            source: None,
            settings_hint: default_settings_hint(),
            compiler_args: default_compiler_args(),
            debounce_ms: default_debounce_ms(),
            base_dir: None,
        }
    }

    /// Finds the nearest config file at or above `start`.
    pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
        start.as_ref().ancestors().find_map(|dir| {
            Self::CONFIG_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DiagError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| DiagError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON (comments and trailing commas allowed).
    pub fn from_json(json: &str) -> Result<Self, DiagError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| DiagError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| DiagError::config(format!("Invalid config: {}", e)))
    }

    /// Overlays editor settings (the `zscript` section) onto this configuration.
    ///
    /// Unknown keys and `null` values are ignored; editors send both.
    pub fn merge_settings(&mut self, settings: &serde_json::Value) -> Result<(), DiagError> {
        let Some(overrides) = settings.as_object() else {
            debug!("Ignoring non-object settings: {}", settings);
            return Ok(());
        };

        let mut merged = match serde_json::to_value(&*self) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => return Err(DiagError::internal("Config did not serialize to an object")),
            Err(e) => return Err(DiagError::internal(e.to_string())),
        };

        for (key, value) in overrides {
            if value.is_null() {
                continue;
            }
            if merged.contains_key(key) {
                merged.insert(key.clone(), value.clone());
            } else {
                debug!("Ignoring unknown setting: {}", key);
            }
        }

        let mut updated: DiagConfig = serde_json::from_value(serde_json::Value::Object(merged))
            .map_err(|e| DiagError::config(format!("Invalid settings: {}", e)))?;
        updated.base_dir = self.base_dir.take();
        *self = updated;
        Ok(())
    }

    /// The installation folder, resolved against the config file's directory.
    pub fn resolved_installation_folder(&self) -> Option<PathBuf> {
        let folder = self.installation_folder.as_ref()?;
        match &self.base_dir {
            Some(base) if folder.is_relative() => Some(base.join(folder)),
            _ => Some(folder.clone()),
        }
    }

    /// Parser settings, using `default_source` when no source tag is configured.
    pub fn parser_config(&self, default_source: &str) -> ParserConfig {
        ParserConfig {
            temp_buffer_name: self.temp_buffer_name.clone(),
            settings_hint: self.settings_hint.clone(),
            source: self
                .source
                .clone()
                .unwrap_or_else(|| default_source.to_string()),
        }
    }
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings the diagnostic parser needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Sentinel file name of the temp buffer.
    pub temp_buffer_name: String,
    /// Named in temp-buffer banners.
    pub settings_hint: String,
    /// Source tag for every diagnostic.
    pub source: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            temp_buffer_name: default_temp_buffer_name(),
            settings_hint: default_settings_hint(),
            source: "zscript".to_string(),
        }
    }
}
