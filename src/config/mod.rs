//! Configuration types for the Flapjack client.
//!
//! # Overview
//!
//! - [`DinerConfig`]: the configuration consumed by [`Diner`](crate::Diner)
//! - [`DinerConfigBuilder`]: a builder for constructing [`DinerConfig`] instances
//! - [`BaseUrl`]: a validated `[scheme://]host[:port]` value
//!
//! The base URL and the request logger are the only configurable values.
//!
//! # Example
//!
//! ```rust
//! use flapjack_diner::{BaseUrl, DinerConfig};
//!
//! let config = DinerConfig::builder()
//!     .base_url(BaseUrl::new("localhost:3081").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().port(), 3081);
//! assert!(config.logger().is_none());
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, Scheme};

use std::sync::Arc;

use crate::clients::RequestLogger;
use crate::error::ConfigError;

/// Configuration for a [`Diner`](crate::Diner) client.
///
/// `DinerConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct DinerConfig {
    base_url: BaseUrl,
    logger: Option<Arc<dyn RequestLogger>>,
}

impl DinerConfig {
    /// Creates a new builder for constructing a `DinerConfig`.
    #[must_use]
    pub fn builder() -> DinerConfigBuilder {
        DinerConfigBuilder::new()
    }

    /// Returns the service base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the request logger, if configured.
    #[must_use]
    pub fn logger(&self) -> Option<&Arc<dyn RequestLogger>> {
        self.logger.as_ref()
    }

    pub(crate) fn set_base_url(&mut self, base_url: BaseUrl) {
        self.base_url = base_url;
    }

    pub(crate) fn set_logger(&mut self, logger: Option<Arc<dyn RequestLogger>>) {
        self.logger = logger;
    }
}

// Verify DinerConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DinerConfig>();
};

/// Builder for constructing [`DinerConfig`] instances.
///
/// `base_url` is required; the logger defaults to `None` (no request tracing).
#[derive(Debug, Default)]
pub struct DinerConfigBuilder {
    base_url: Option<BaseUrl>,
    logger: Option<Arc<dyn RequestLogger>>,
}

impl DinerConfigBuilder {
    /// Creates a new builder with all fields unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service base URL (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the sink that receives request/response trace lines.
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the [`DinerConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<DinerConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(DinerConfig {
            base_url,
            logger: self.logger,
        })
    }
}
