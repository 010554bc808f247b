//! Per-invocation state shared by every command.

use anyhow::{Context, Result};
use romshelf_core::Config;
use romshelf_core::app::config;
use romshelf_core::library::{DataDirProvider, FormatReader, RefreshOutcome, RomCatalog, refresh};
use std::path::{Path, PathBuf};

/// Data directory provider for the command-line front end.
pub struct LauncherDataDirProvider;

impl DataDirProvider for LauncherDataDirProvider {
    fn data_dir(&self) -> Option<PathBuf> {
        config::data_dir()
    }
}

/// Resolved configuration for one run of the binary.
pub struct LibraryContext {
    pub config: Config,
    /// Where `config` was read from and where `romshelf config` writes to
    pub config_path: Option<PathBuf>,
    pub cache_path: PathBuf,
    pub reader: FormatReader,
}

impl LibraryContext {
    pub fn new(config: Config, config_path: Option<PathBuf>, cache_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            cache_path,
            reader: FormatReader::default(),
        }
    }

    /// Load the config file and work out where the cache lives.
    ///
    /// `config_file` and `cache_file` override the platform defaults.
    pub fn load(config_file: Option<PathBuf>, cache_file: Option<PathBuf>) -> Result<Self> {
        let config_path = config_file.or_else(config::config_path);
        let config = config_path
            .as_deref()
            .map(config::load_from)
            .unwrap_or_default();

        let cache_path = match cache_file {
            Some(path) => path,
            None => config
                .cache_path(&LauncherDataDirProvider)
                .context("Could not determine a data directory for the catalog cache")?,
        };

        tracing::debug!("Config: {:?}, cache: {}", config_path, cache_path.display());
        Ok(Self::new(config, config_path, cache_path))
    }

    /// Directory to scan: `dir`, else the configured search location, else
    /// the working directory.
    pub fn search_dir(&self, dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.config.library.search_location {
            return Ok(dir.clone());
        }
        std::env::current_dir().context("Failed to read the current directory")
    }

    /// Build the catalog, from the cache when `use_cache` is set and the
    /// cache is usable, otherwise by scanning `search_dir`.
    pub fn open_catalog(&self, search_dir: &Path, use_cache: bool) -> (RomCatalog, RefreshOutcome) {
        let mut catalog = RomCatalog::with_config(self.config.filter);
        let outcome = refresh(
            &mut catalog,
            &self.reader,
            search_dir,
            &self.cache_path,
            use_cache,
        );
        (catalog, outcome)
    }
}
