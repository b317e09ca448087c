//! Configuration for result-set materialization.
//!
//! The engine fixes how column identifiers compare; this crate exposes that
//! rule together with a few rendering knobs so the result layer does not hard
//! code them.
//!
//! Quick examples
//!
//! Default configuration (exact name matching, 10 preview rows):
//! ```
//! use mdbe_common::ResultConfig;
//! let cfg = ResultConfig::default();
//! assert_eq!(cfg.preview_rows, 10);
//! ```
//!
//! Case-insensitive name lookup with `NULL` rendered explicitly in CSV:
//! ```
//! use mdbe_common::{IdentifierCase, ResultConfig};
//! let cfg = ResultConfig::builder()
//!     .identifier_case(IdentifierCase::Insensitive)
//!     .csv_null("NULL")
//!     .build();
//! assert_eq!(cfg.csv_null, "NULL");
//! ```

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of rows rendered by table `Display` implementations.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// How column names compare when resolving a name to an ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCase {
    /// Names must match byte for byte.
    #[default]
    Sensitive,
    /// Names match after ASCII lower-casing.
    Insensitive,
}

impl IdentifierCase {
    /// Normalize a column name into its lookup key.
    #[must_use]
    pub fn normalize<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Sensitive => Cow::Borrowed(name),
            Self::Insensitive if name.bytes().any(|b| b.is_ascii_uppercase()) => {
                Cow::Owned(name.to_ascii_lowercase())
            }
            Self::Insensitive => Cow::Borrowed(name),
        }
    }
}

/// Result-layer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultConfig {
    /// Rule used by name→ordinal resolution.
    pub identifier_case: IdentifierCase,
    /// Rows shown by `Display` before the middle of a table is elided.
    pub preview_rows: usize,
    /// Text written for NULL cells in CSV exports.
    pub csv_null: String,
}

impl Default for ResultConfig {
    fn default() -> Self {
        Self {
            identifier_case: IdentifierCase::Sensitive,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            csv_null: String::new(),
        }
    }
}

impl ResultConfig {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> ResultConfigBuilder {
        ResultConfigBuilder::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and
    /// `ConfigError::Invalid` if the parsed values fail validation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!("Loaded result config: {:?}", config);
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// same errors as [`ResultConfig::from_json_str`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Check that the configuration values are usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `preview_rows` is below 2 (the
    /// preview shows a head and a tail).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview_rows < 2 {
            return Err(ConfigError::invalid(format!(
                "preview_rows must be at least 2, got {}",
                self.preview_rows
            )));
        }
        Ok(())
    }

    /// Normalize a column name according to `identifier_case`.
    #[must_use]
    pub fn normalize_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        self.identifier_case.normalize(name)
    }
}

/// Builder for [`ResultConfig`].
#[derive(Debug, Clone, Default)]
pub struct ResultConfigBuilder {
    /// Configuration under construction.
    config: ResultConfig,
}

impl ResultConfigBuilder {
    /// Set the identifier comparison rule.
    #[must_use]
    pub const fn identifier_case(mut self, case: IdentifierCase) -> Self {
        self.config.identifier_case = case;
        self
    }

    /// Set the number of preview rows. Values below 2 are raised to 2.
    #[must_use]
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.config.preview_rows = rows.max(2);
        self
    }

    /// Set the CSV rendering of NULL cells.
    #[must_use]
    pub fn csv_null(mut self, text: impl Into<String>) -> Self {
        self.config.csv_null = text.into();
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> ResultConfig {
        self.config
    }
}
