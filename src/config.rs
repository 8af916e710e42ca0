//! Validation settings.
//!
//! Settings are an explicit value handed to validation calls rather than a
//! process-wide singleton. They can be read from a JSON file; keys that are
//! not present take their defaults.
//!
//! ```json
//! { "maxDepth": 8, "strictFields": false }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ConfigurationResult};

/// Locations searched by [`ValidationConfig::discover`], in order.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["./cmdb.json", "/etc/cmdb/cmdb.json"];

/// Settings that tune schema and record validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Maximum nesting depth of attributes; root attributes are at depth 1
    pub max_depth: usize,
    /// Reject record fields that match no attribute
    pub strict_fields: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            strict_fields: true,
        }
    }
}

impl ValidationConfig {
    /// Load settings from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigurationResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigurationError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load settings from the first of [`DEFAULT_CONFIG_PATHS`] that exists.
    pub fn discover() -> ConfigurationResult<Self> {
        Self::discover_in(DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from))
    }

    /// Load settings from the first existing path in `candidates`.
    pub fn discover_in<I>(candidates: I) -> ConfigurationResult<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut searched = Vec::new();
        for candidate in candidates {
            if candidate.is_file() {
                return Self::from_file(candidate);
            }
            searched.push(candidate.display().to_string());
        }

        Err(ConfigurationError::NotFound {
            searched: searched.join(", "),
        })
    }

    /// Like [`discover`](Self::discover), but uses defaults when no file exists.
    ///
    /// A file that exists but cannot be read, parsed or accepted is still an
    /// error.
    pub fn discover_or_default() -> ConfigurationResult<Self> {
        Self::discover_in_or_default(DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from))
    }

    /// Like [`discover_in`](Self::discover_in), but uses defaults when none of
    /// `candidates` exists.
    pub fn discover_in_or_default<I>(candidates: I) -> ConfigurationResult<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        match Self::discover_in(candidates) {
            Err(ConfigurationError::NotFound { searched }) => {
                info!("No configuration in {}, using defaults", searched);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Check the settings for consistency.
    pub fn validate(&self) -> ConfigurationResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigurationError::Invalid {
                message: "maxDepth must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
