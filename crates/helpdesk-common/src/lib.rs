//! # Helpdesk Common
//!
//! Shared error type, structured logging setup and test helpers used by
//! the help-desk localization crates.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{HelpdeskError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
