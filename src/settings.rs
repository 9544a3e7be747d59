use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::CatalogKind;

/// Remembered between runs: the last catalog files the user confirmed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub container_file: Option<PathBuf>,
    #[serde(default)]
    pub soft_goods_file: Option<PathBuf>,
}

impl Settings {
    /// Get the default settings file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("preference_cards")
            .join("settings.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from `path`, or defaults if it is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => {
                        log::debug!("Loaded settings from {}", path.display());
                        return settings;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse settings file, using defaults: {}", e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read settings file, using defaults: {}", e);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn remembered(&self, kind: CatalogKind) -> Option<&Path> {
        match kind {
            CatalogKind::Container => self.container_file.as_deref(),
            CatalogKind::SoftGoods => self.soft_goods_file.as_deref(),
        }
    }

    /// Records a confirmed pair of catalog files
    pub fn remember(&mut self, container: &Path, soft_goods: &Path) {
        self.container_file = Some(container.to_path_buf());
        self.soft_goods_file = Some(soft_goods.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_saved_files_are_remembered() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf").join("settings.json");
        let mut settings = Settings::default();
        settings.remember(Path::new("/data/containers.xlsx"), Path::new("/data/soft.xlsx"));

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);

        assert_eq!(
            loaded.remembered(CatalogKind::Container),
            Some(Path::new("/data/containers.xlsx"))
        );
        assert_eq!(
            loaded.remembered(CatalogKind::SoftGoods),
            Some(Path::new("/data/soft.xlsx"))
        );
    }
}
