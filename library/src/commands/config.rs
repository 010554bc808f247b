//! Config command - show or change settings

use anyhow::{Context, Result};
use clap::Args;
use romshelf_core::Config;
use romshelf_core::app::config;
use std::path::PathBuf;

use crate::context::LibraryContext;

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Set the directory scanned for ROMs
    #[arg(long)]
    pub search_location: Option<PathBuf>,

    /// Set the minimum match score (0-100) for search results
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,

    /// Set the base of the result limit (`max(1, base - query length)`)
    #[arg(long)]
    pub limit_base: Option<usize>,

    /// Only print the config file path
    #[arg(long)]
    pub path: bool,
}

impl ConfigArgs {
    fn has_changes(&self) -> bool {
        self.search_location.is_some() || self.min_score.is_some() || self.limit_base.is_some()
    }

    /// Apply the requested changes to `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.search_location {
            config.library.search_location = Some(dir.clone());
        }
        if let Some(score) = self.min_score {
            config.filter.min_score = score;
        }
        if let Some(base) = self.limit_base {
            config.filter.limit_base = base;
        }
    }
}

/// Execute the config command
pub fn execute(ctx: &LibraryContext, args: ConfigArgs) -> Result<()> {
    let path = ctx
        .config_path
        .clone()
        .context("Could not determine the config directory")?;

    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = ctx.config.clone();
    if args.has_changes() {
        args.apply(&mut config);
        config::save_to(&config, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Saved config to {}", path.display());
    }

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&config)?);
    println!("# catalog cache: {}", ctx.cache_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes() {
        let args = ConfigArgs {
            search_location: Some(PathBuf::from("/roms")),
            min_score: Some(50),
            limit_base: None,
            path: false,
        };
        assert!(args.has_changes());

        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.library.search_location, Some(PathBuf::from("/roms")));
        assert_eq!(config.filter.min_score, 50);
        assert_eq!(config.filter.limit_base, 10);
    }
}
