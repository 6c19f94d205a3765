//! Filesystem key source.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::SeDhcpv6Config;
use crate::domain::errors::AuthError;
use crate::ports::outbound::KeySource;

/// Reads PEM documents from files.
///
/// Relative names resolve against the base directory when one is set;
/// absolute names are used as-is.
#[derive(Debug, Clone, Default)]
pub struct FileKeySource {
    base_dir: Option<PathBuf>,
}

impl FileKeySource {
    /// Resolve names against the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve names against `dir`.
    pub fn with_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    /// Use the `key_directory` of a Secure DHCPv6 configuration.
    pub fn from_config(config: &SeDhcpv6Config) -> Self {
        Self {
            base_dir: config.key_directory.clone(),
        }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl KeySource for FileKeySource {
    fn read_pem(&self, name: &str) -> Result<String, AuthError> {
        let path = self.resolve(name);
        let pem = fs::read_to_string(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to read key file");
            AuthError::Io {
                source_name: name.to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!(path = %path.display(), "Read key file");
        Ok(pem)
    }
}
