//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for catalog settings.
//! Settings are stored in TOML format in the platform-specific config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use romshelf_shared::DEFAULT_CACHE_FILE;

use crate::library::{DataDirProvider, FilterConfig};

const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
///
/// Contains all user-configurable settings organized into sections.
/// Serialized to/from TOML format for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where ROMs are searched for and cached
    #[serde(default)]
    pub library: LibraryConfig,
    /// Search tuning
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Library location settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Directory scanned for ROMs (default: unset, the caller decides)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_location: Option<PathBuf>,
    /// Cache file name, relative to the data directory (default: roms.bin)
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
}

fn default_cache_file() -> String {
    DEFAULT_CACHE_FILE.to_string()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            search_location: None,
            cache_file: default_cache_file(),
        }
    }
}

impl Config {
    /// Full path of the catalog cache inside the provider's data directory.
    ///
    /// An absolute `cache_file` is used as is.
    pub fn cache_path(&self, provider: &dyn DataDirProvider) -> Option<PathBuf> {
        let file = Path::new(&self.library.cache_file);
        if file.is_absolute() {
            return Some(file.to_path_buf());
        }
        provider.data_dir().map(|dir| dir.join(file))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io.romshelf", "", "romshelf")
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\romshelf\config`
/// On macOS: `~/Library/Application Support/io.romshelf.romshelf`
/// On Linux: `~/.config/romshelf`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the platform-specific data directory, home of the catalog cache.
///
/// Returns `None` if the home directory cannot be determined.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path of `config.toml` in the configuration directory.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from an explicit path, falling back to defaults.
pub fn load_from(path: &Path) -> Config {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Config::default();
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Saves the configuration to an explicit path, creating parent directories.
pub fn save_to(config: &Config, path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config).map_err(std::io::Error::other)?;
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FixedDir(Option<PathBuf>);

    impl DataDirProvider for FixedDir {
        fn data_dir(&self) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.library.search_location, None);
        assert_eq!(config.library.cache_file, "roms.bin");
        assert_eq!(config.filter.min_score, 35);
        assert_eq!(config.filter.limit_base, 10);
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_partial_filter() {
        let toml_str = r#"
[filter]
min_score = 50
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.filter.min_score, 50);
        assert_eq!(config.filter.limit_base, 10); // default
        assert_eq!(config.library.cache_file, "roms.bin");
    }

    #[test]
    fn test_config_deserialize_library() {
        let toml_str = r#"
[library]
search_location = "/mnt/sd/switch"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.library.search_location,
            Some(PathBuf::from("/mnt/sd/switch"))
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.library.search_location = Some(PathBuf::from("/roms"));
        config.filter.limit_base = 20;
        save_to(&config, &path).unwrap();

        assert_eq!(load_from(&path), config);
    }

    #[test]
    fn test_load_from_missing_or_invalid_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_from(&dir.path().join("absent.toml")), Config::default());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[filter\nmin_score = ").unwrap();
        assert_eq!(load_from(&bad), Config::default());
    }

    #[test]
    fn test_config_path_is_in_config_dir() {
        // Only checkable where a home directory exists
        if let (Some(dir), Some(path)) = (config_dir(), config_path()) {
            assert_eq!(path, dir.join("config.toml"));
        }
    }

    #[test]
    fn test_cache_path() {
        let config = Config::default();
        let provider = FixedDir(Some(PathBuf::from("/data")));
        assert_eq!(
            config.cache_path(&provider),
            Some(PathBuf::from("/data/roms.bin"))
        );
        assert_eq!(config.cache_path(&FixedDir(None)), None);
    }
}
