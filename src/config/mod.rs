use crate::models::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Settings file name inside the configuration directory
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Configuration manager for loading and saving `settings.yaml`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the specified configuration directory.
    ///
    /// The directory is not created until settings are saved.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();

        Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            config_dir,
        }
    }

    /// ConfigManager for the platform config directory
    /// (`~/.config/trinity-shaders` on Linux).
    pub fn from_default_location() -> Result<Self> {
        let base = dirs::config_dir().context("Could not determine the user config directory")?;
        let base = Utf8PathBuf::try_from(base).context("User config directory is not UTF-8")?;
        Ok(Self::new(base.join(crate::APP_NAME)))
    }

    /// Load the settings file.
    ///
    /// # Returns
    /// The loaded Settings, or defaults if the file doesn't exist
    pub fn load_settings(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(Settings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: Settings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::debug!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the settings file, creating the configuration directory if needed.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).with_context(|| {
                format!("Failed to create config directory: {}", self.config_dir)
            })?;
        }

        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(config_path.join("trinity-shaders"));
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = manager.load_settings().unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!manager.config_dir().exists());
    }

    #[test]
    fn test_save_creates_directory() {
        let (manager, _temp_dir) = create_test_config_manager();

        manager.save_settings(&Settings::default()).unwrap();
        assert!(manager.settings_path().exists());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::create_dir_all(manager.config_dir()).unwrap();
        fs::write(manager.settings_path(), "Max Packs: [not a number\n").unwrap();

        assert!(manager.load_settings().is_err());
    }
}
