//! Runtime configuration
//!
//! Settings arrive from command-line flags and the environment; there is
//! no configuration file. A [`Config`] bundles where the project snapshot
//! lives with how the report is rendered.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::experiment::ExperimentStore;
use crate::report::ReportOptions;
use crate::{Error, Result};

/// Storage location used when none is given.
pub const DEFAULT_STORAGE_URL: &str = ".replicate/storage";

/// Environment variable consulted for the storage location.
pub const STORAGE_URL_ENV: &str = "TRUENO_DIFF_STORAGE_URL";

/// Parsed storage location.
///
/// Only local storage can be read by this crate. Remote schemes are
/// recognized so that they fail with a clear message rather than being
/// mistaken for relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageUrl {
    /// Local directory.
    Local(PathBuf),
}

impl StorageUrl {
    /// Root directory of a local storage.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Local(path) => path,
        }
    }

    /// Materialize the project snapshot behind this URL.
    ///
    /// # Errors
    ///
    /// See [`ExperimentStore::load_dir`].
    pub fn open(&self) -> Result<ExperimentStore> {
        ExperimentStore::load_dir(self.path())
    }
}

impl FromStr for StorageUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidInput("storage URL must not be empty".to_string()));
        }
        match s.split_once("://") {
            None => Ok(Self::Local(PathBuf::from(s))),
            Some(("file", path)) if !path.is_empty() => Ok(Self::Local(PathBuf::from(path))),
            Some(_) => Err(Error::UnsupportedStorage(s.to_string())),
        }
    }
}

/// Complete settings for one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    storage: StorageUrl,
    report: ReportOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageUrl::Local(PathBuf::from(DEFAULT_STORAGE_URL)),
            report: ReportOptions::default(),
        }
    }
}

impl Config {
    /// Create a builder starting from defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            config: Self::default(),
        }
    }

    /// Get the storage location.
    #[must_use]
    pub const fn storage(&self) -> &StorageUrl {
        &self.storage
    }

    /// Get the report options.
    #[must_use]
    pub const fn report(&self) -> &ReportOptions {
        &self.report
    }
}

/// Builder for `Config`.
#[derive(Debug)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage location.
    #[must_use]
    pub fn storage(mut self, storage: StorageUrl) -> Self {
        self.config.storage = storage;
        self
    }

    /// Set the report options.
    #[must_use]
    pub const fn report(mut self, report: ReportOptions) -> Self {
        self.config.report = report;
        self
    }

    /// Build the `Config`.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
