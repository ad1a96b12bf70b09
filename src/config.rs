//! Runtime configuration for locating the todo store.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding the store file location.
pub const STORE_FILE_ENV: &str = "TICKBOX_FILE";

const DEFAULT_DIR: &str = ".tickbox";
const DEFAULT_FILE: &str = "todos.json";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No explicit path was given and the home directory is unknown.
    #[error("cannot determine the home directory; pass --file or set {STORE_FILE_ENV}")]
    NoHomeDirectory,

    /// The resolved path is not valid UTF-8.
    #[error("store path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    /// The store directory could not be created.
    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Location of the JSON store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    path: Utf8PathBuf,
}

impl StoreConfig {
    /// Creates a configuration for an explicit path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the store path from the explicit flag, then
    /// [`STORE_FILE_ENV`], then `~/.tickbox/todos.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no source yields a usable UTF-8 path.
    pub fn resolve(flag: Option<Utf8PathBuf>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(STORE_FILE_ENV).ok();
        Self::resolve_from(flag, from_env, dirs::home_dir())
    }

    /// Resolves the store path from already-gathered sources.
    ///
    /// Empty strings count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] when every source is empty
    /// and [`ConfigError::NonUtf8Path`] when the home directory is not UTF-8.
    pub fn resolve_from(
        flag: Option<Utf8PathBuf>,
        from_env: Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = flag.filter(|path| !path.as_str().is_empty()) {
            return Ok(Self::new(path));
        }
        if let Some(path) = from_env.filter(|value| !value.trim().is_empty()) {
            return Ok(Self::new(path));
        }
        let home = home.ok_or(ConfigError::NoHomeDirectory)?;
        let home = Utf8PathBuf::from_path_buf(home).map_err(ConfigError::NonUtf8Path)?;
        Ok(Self::new(home.join(DEFAULT_DIR).join(DEFAULT_FILE)))
    }

    /// Returns the store file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Consumes the configuration, returning the store file path.
    #[must_use]
    pub fn into_path(self) -> Utf8PathBuf {
        self.path
    }

    /// Creates the directory containing the store file if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CreateDir`] when the directory cannot be
    /// created.
    pub fn ensure_parent_dir(&self) -> Result<(), ConfigError> {
        let Some(parent) = self.path.parent().filter(|dir| !dir.as_str().is_empty()) else {
            return Ok(());
        };
        Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|source| {
            ConfigError::CreateDir {
                path: parent.to_owned(),
                source,
            }
        })
    }
}
