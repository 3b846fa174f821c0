//! Binder configuration types.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default multipart buffering limit, in megabytes.
pub const DEFAULT_MULTIPART_LIMIT_MB: u64 = 32;

/// Default maximum number of parts accepted in one multipart body.
pub const DEFAULT_MAX_MULTIPART_PARTS: usize = 1000;

/// Configuration for a request binder.
///
/// # Example
///
/// ```
/// use reqbind_config::BinderConfig;
///
/// let config = BinderConfig::default();
/// assert_eq!(config.multipart_limit_mb, 32);
/// assert_eq!(config.multipart_limit_bytes(), 32 << 20);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct BinderConfig {
    /// Maximum size of a multipart body, in megabytes (2^20 bytes).
    pub multipart_limit_mb: u64,

    /// Maximum number of parts (files and text fields) in a multipart body.
    pub max_multipart_parts: usize,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            multipart_limit_mb: DEFAULT_MULTIPART_LIMIT_MB,
            max_multipart_parts: DEFAULT_MAX_MULTIPART_PARTS,
        }
    }
}

impl BinderConfig {
    /// Creates a configuration with the given multipart limit in megabytes.
    #[must_use]
    pub fn with_multipart_limit_mb(limit_mb: u64) -> Self {
        Self {
            multipart_limit_mb: limit_mb,
            ..Self::default()
        }
    }

    /// The multipart limit in bytes (`limit_mb × 2^20`), saturating.
    #[must_use]
    pub fn multipart_limit_bytes(&self) -> u64 {
        self.multipart_limit_mb.saturating_mul(1 << 20)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the multipart limit or the part
    /// count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.multipart_limit_mb == 0 {
            return Err(ConfigError::invalid_value(
                "multipart_limit_mb",
                "must be greater than zero",
            ));
        }
        if self.max_multipart_parts == 0 {
            return Err(ConfigError::invalid_value(
                "max_multipart_parts",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
