use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::config_dir;
use crate::constants::PREFERENCES_FILE_NAME;

/// Session preferences kept between runs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Template id selected last
    #[serde(default)]
    pub current_template: Option<String>,
}

/// Manages preference storage on disk
pub struct Storage {
    pub preferences: Preferences,
    dir: PathBuf,
}

impl Storage {
    /// Open the default config directory
    pub fn new() -> Self {
        Storage::open(config_dir())
    }

    /// Open `dir`; missing or unreadable preferences fall back to defaults
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let preferences = load_preferences(&dir.join(PREFERENCES_FILE_NAME)).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Using default preferences");
            Preferences::default()
        });
        Storage { preferences, dir }
    }

    pub fn current_template(&self) -> Option<&str> {
        self.preferences.current_template.as_deref()
    }

    /// Remember `id` as the selected template and persist it
    pub fn set_current_template(&mut self, id: &str) -> Result<()> {
        if self.current_template() == Some(id) {
            return Ok(());
        }
        self.preferences.current_template = Some(id.to_string());
        self.save()
    }

    /// Ensure config directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("creating config directory {}", self.dir.display()))?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(PREFERENCES_FILE_NAME);
        let content = serde_yaml::to_string(&self.preferences)?;
        fs::write(&path, content)
            .with_context(|| format!("writing preferences to {}", path.display()))?;
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

fn load_preferences(path: &Path) -> Result<Preferences> {
    if !path.exists() {
        return Ok(Preferences::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_persists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("state");

        let mut storage = Storage::open(&dir);
        assert_eq!(storage.current_template(), None);
        storage.set_current_template("users").unwrap();

        let reopened = Storage::open(&dir);
        assert_eq!(reopened.current_template(), Some("users"));
    }

    #[test]
    fn test_corrupt_preferences_fall_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join(PREFERENCES_FILE_NAME), "current_template: [").unwrap();

        let storage = Storage::open(temp_dir.path());
        assert_eq!(storage.preferences, Preferences::default());
    }
}
