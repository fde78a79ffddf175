pub mod store;

pub use store::{
    ConfigEntry, ConfigError, ConfigSection, ConfigStore, LookupValue, ParseWarning, SkipReason,
    ValueSource,
};

use crate::models::RunSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Default name of the driver settings file.
pub const SETTINGS_FILE_NAME: &str = "grade-gate.yaml";

/// Loads and saves the YAML driver settings file.
///
/// The grade file itself is read by [`ConfigStore`]; this only covers where
/// to find it and how the driver logs.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_path: Utf8PathBuf,
}

impl SettingsManager {
    /// Create a manager for the settings file at `settings_path`.
    pub fn new<P: AsRef<Utf8Path>>(settings_path: P) -> Self {
        Self {
            settings_path: settings_path.as_ref().to_path_buf(),
        }
    }

    /// Load the settings file.
    ///
    /// # Returns
    /// The loaded RunSettings, or defaults if the file doesn't exist
    pub fn load(&self) -> Result<RunSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(RunSettings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: RunSettings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the settings file, creating its parent directory if needed.
    pub fn save(&self, settings: &RunSettings) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create settings directory: {}", parent))?;
            }
        }

        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new(SETTINGS_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_settings_manager() -> (SettingsManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = SettingsManager::new(dir.join("nested").join(SETTINGS_FILE_NAME));
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let (manager, _temp_dir) = create_test_settings_manager();

        let settings = manager.load().unwrap();
        assert_eq!(settings, RunSettings::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let (manager, _temp_dir) = create_test_settings_manager();

        let settings = RunSettings {
            grade_file: "bands.ini".to_string(),
            debug_mode: true,
            default_scores: vec![1, 2, 3],
            ..RunSettings::default()
        };
        manager.save(&settings).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let (manager, _temp_dir) = create_test_settings_manager();
        fs::create_dir_all(manager.settings_path().parent().unwrap()).unwrap();
        fs::write(manager.settings_path(), "Default Scores: [one, two").unwrap();

        assert!(manager.load().is_err());
    }
}
