//! # Helpdesk Config
//!
//! Type-safe configuration for locale resolution and translation.
//!
//! Configuration is read from YAML, overridden from the environment,
//! validated, and then shared through a lock-free [`ConfigCache`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod loader;
pub mod settings;
pub mod validation;

pub use cache::ConfigCache;
pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, I18nConfig, LoggingSettings};
