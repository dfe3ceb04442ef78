use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::selector::{DEFAULT_MAX_CHAPTER, DEFAULT_WINDOW_SIZE, VerseWindowSelector};

const API_BASE: &str = "https://cdn.jsdelivr.net/gh/fawazahmed0/quran-api@1/editions";

/// Where one edition is fetched from and how it is labelled on screen
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EditionSource {
    pub label: String,
    pub url: String,
}

impl EditionSource {
    pub fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }

    /// An edition hosted by the Quran API, e.g. `eng-abdelhaleem`
    pub fn from_api(label: &str, edition: &str) -> Self {
        Self::new(label, &format!("{}/{}.min.json", API_BASE, edition))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub original: EditionSource,
    pub translation_a: EditionSource,
    pub translation_b: EditionSource,
    pub max_chapter: u32,
    pub window_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            original: EditionSource::from_api("Arabic", "ara-quranacademy"),
            translation_a: EditionSource::from_api("English Translation", "eng-abdelhaleem"),
            translation_b: EditionSource::from_api("Malayalam Translation", "mal-abdulhameedmada"),
            max_chapter: DEFAULT_MAX_CHAPTER,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    /// Falls back to defaults when the file is absent
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {:?}: {}", config_path, e))?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    pub fn selector(&self) -> VerseWindowSelector {
        VerseWindowSelector::new(self.max_chapter, self.window_size)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("ayat").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.max_chapter, 114);
        assert!(config.translation_a.url.ends_with("/eng-abdelhaleem.min.json"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::new();
        config.translation_b = EditionSource::from_api("French Translation", "fra-muhammadhamidul");
        config.window_size = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.selector().window_size(), 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"max_chapter": 2}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.max_chapter, 2);
        assert_eq!(config.original, Config::new().original);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
