//! Persisted connection parameters.
//!
//! The configuration lives in `<home>/.mycli/config.json` as indented JSON
//! holding exactly the fields of [`ConnectionParameters`]. The secret key is
//! stored in plain text.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ConnectionParameters;
use crate::TRACING_TARGET_STORE;

/// Directory under the user's home that holds the configuration.
pub const CONFIG_DIR_NAME: &str = ".mycli";

/// Configuration file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The user's home directory could not be determined.
    #[error("cannot determine the home directory for the configuration file")]
    HomeDirUnavailable,

    /// No configuration file exists at the path.
    #[error("no saved configuration at {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not a valid configuration.
    #[error("configuration at {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The parameters could not be encoded.
    #[error("cannot encode configuration: {0}")]
    Encode(#[source] serde_json::Error),

    /// Reading, writing or creating directories failed.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads and writes [`ConnectionParameters`] at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store for an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `<home>/.mycli/config.json`.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeDirUnavailable)?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Uses `path` when given, the default location otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, StoreError> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_path().map(Self::new),
        }
    }

    /// Returns the file path.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads parameters from the file.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when the file is absent,
    /// [`StoreError::Malformed`] when it does not decode.
    pub fn load(&self) -> Result<ConnectionParameters, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let params = serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            path = %self.path.display(),
            "Configuration loaded"
        );

        Ok(params)
    }

    /// Writes parameters to the file, replacing any previous content and
    /// creating missing parent directories.
    pub fn save(&self, params: &ConnectionParameters) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_config_dir(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut json = serde_json::to_string_pretty(params).map_err(StoreError::Encode)?;
        json.push('\n');

        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(
            target: TRACING_TARGET_STORE,
            path = %self.path.display(),
            "Configuration saved"
        );

        Ok(())
    }
}

/// Creates `dir` and its parents, `rwxr-xr-x` on Unix.
fn create_config_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(dir)
}
