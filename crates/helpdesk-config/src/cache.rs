//! Thread-safe configuration caching with arc-swap for lock-free reads.

use crate::settings::Config;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe configuration cache using arc-swap for lock-free reads.
pub struct ConfigCache {
    config: ArcSwap<Config>,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Replaces the configuration if it validates; the old value stays otherwise.
    pub fn update(&self, config: Config) -> Result<(), validator::ValidationErrors> {
        config.validate_all()?;
        self.config.store(Arc::new(config));
        debug!("Configuration cache updated");
        Ok(())
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
