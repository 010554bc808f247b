//! Data directory abstraction for platform-specific paths

use std::path::PathBuf;

/// Trait for providing platform-specific data directory paths.
///
/// The catalog cache lives in this directory. Front ends supply their own
/// implementation so that core code never reaches for global state, and
/// tests can point it at a temporary directory.
///
/// # Example
///
/// ```rust,ignore
/// use romshelf_core::library::DataDirProvider;
/// use std::path::PathBuf;
///
/// struct LauncherDataDir;
///
/// impl DataDirProvider for LauncherDataDir {
///     fn data_dir(&self) -> Option<PathBuf> {
///         romshelf_core::app::config::data_dir()
///     }
/// }
/// ```
pub trait DataDirProvider: Send + Sync {
    /// Returns the platform-specific data directory path.
    ///
    /// Returns `None` if the home directory cannot be determined or the
    /// platform doesn't support data directories.
    fn data_dir(&self) -> Option<PathBuf>;
}
