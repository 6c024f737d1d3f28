//! Exporter settings management
//!
//! Settings hold the document style applied to exports and the directory
//! layout the collector expects. They live in a pretty-printed JSON file;
//! missing fields fall back to defaults.

use crate::Result;
use report_model::{CollectorOptions, DocumentStyleConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used when settings are stored in a config directory
pub const SETTINGS_FILE_NAME: &str = "report-settings.json";

/// Main settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExporterSettings {
    /// Page, margin and typography policy for exported documents
    pub style: DocumentStyleConfig,
    /// Category directory layout
    pub collector: CollectorOptions,
}

/// Settings manager for loading, saving, and updating exporter settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: ExporterSettings,
}

impl SettingsManager {
    /// Create a settings manager for `config_dir/report-settings.json`
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self::from_file(config_dir.as_ref().join(SETTINGS_FILE_NAME))
    }

    /// Create a settings manager for an explicit settings file
    pub fn from_file(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: ExporterSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or use defaults if the file doesn't exist
    ///
    /// An unparseable file is logged and replaced by defaults in memory.
    pub fn load(&mut self) -> Result<&ExporterSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<ExporterSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.settings_path.display(),
                        "Failed to parse settings file, using defaults: {}",
                        e
                    );
                    self.current = ExporterSettings::default();
                }
            }
        } else {
            tracing::debug!(path = %self.settings_path.display(), "No settings file, using defaults");
            self.current = ExporterSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        crate::write_atomic(&self.settings_path, content.as_bytes())
    }

    /// Get current settings
    pub fn current(&self) -> &ExporterSettings {
        &self.current
    }

    /// Replace settings after validating the style
    pub fn update(&mut self, settings: ExporterSettings) -> Result<&ExporterSettings> {
        settings.style.validate()?;
        self.current = settings;
        Ok(&self.current)
    }

    /// Reset settings to defaults
    pub fn reset(&mut self) -> &ExporterSettings {
        self.current = ExporterSettings::default();
        &self.current
    }
}
