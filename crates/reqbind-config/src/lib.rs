//! Typed configuration for the reqbind request binder.
//!
//! The binder itself needs very little configuration, but what it does need
//! (how much multipart data a single request may buffer) is an operational
//! setting that belongs in deployment config rather than in code:
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Example
//!
//! ```no_run
//! use reqbind_config::ConfigLoader;
//!
//! # fn main() -> Result<(), reqbind_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("reqbind.toml")?
//!     .with_env_prefix("REQBIND")
//!     .load()?;
//!
//! println!("multipart limit: {} MiB", config.multipart_limit_mb);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! multipart_limit_mb = 32
//! max_multipart_parts = 1000
//! ```
//!
//! # Environment Variables
//!
//! With prefix `REQBIND`:
//!
//! - `REQBIND__MULTIPART_LIMIT_MB=64`
//! - `REQBIND__MAX_MULTIPART_PARTS=200`

#![doc(html_root_url = "https://docs.rs/reqbind-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;

pub use config::{BinderConfig, DEFAULT_MAX_MULTIPART_PARTS, DEFAULT_MULTIPART_LIMIT_MB};
pub use error::ConfigError;
pub use loader::ConfigLoader;
