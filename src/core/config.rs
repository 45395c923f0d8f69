//! Engine configuration.
//!
//! The engine itself has very few knobs: only rule-set validation is
//! configurable. Tools can build an [`EngineConfig`] in code or load it
//! from a TOML file:
//!
//! ```toml
//! [validation]
//! reject_duplicate_clauses = true
//! warn_unbounded = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for [`EngineConfig`].
    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options for rule-set validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Fail validation when a prerequisite group lists the same clause twice.
    pub reject_duplicate_clauses: bool,

    /// Record a warning for numeric clauses with neither bound set.
    ///
    /// Such clauses always pass, which is rarely what the author meant.
    pub warn_unbounded: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            reject_duplicate_clauses: false,
            warn_unbounded: true,
        }
    }
}

impl ValidationOptions {
    /// Reject duplicate clauses within a group.
    #[must_use]
    pub fn reject_duplicates(mut self) -> Self {
        self.reject_duplicate_clauses = true;
        self
    }

    /// Do not warn about unbounded numeric clauses.
    #[must_use]
    pub fn allow_unbounded(mut self) -> Self {
        self.warn_unbounded = false;
        self
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule-set validation options.
    pub validation: ValidationOptions,
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the validation options.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationOptions) -> Self {
        self.validation = validation;
        self
    }

    /// Parse configuration from TOML text.
    ///
    /// Missing tables and keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or has
    /// the wrong shape.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }
}
