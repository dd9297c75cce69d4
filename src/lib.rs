//! # Flapjack Diner
//!
//! A Rust client for the JSON-API of the Flapjack monitoring notification
//! router.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`DinerConfig`] and [`DinerConfigBuilder`]
//! - A validated [`BaseUrl`] (`[scheme://]host[:port]` with port defaulting)
//! - Create, read, update and delete operations per resource kind (contacts,
//!   media, rules, tags, scheduled maintenances, statistics) on [`Diner`]
//! - Client-side field validation before any request is sent
//! - Singular and bulk (`ext=bulk`) wire shapes chosen by argument count
//! - Structured server errors, also kept as the client's last error
//!
//! ## Quick Start
//!
//! ```rust
//! use flapjack_diner::{BaseUrl, DinerConfig, Scheme};
//!
//! let config = DinerConfig::builder()
//!     .base_url(BaseUrl::new("localhost:3081").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().scheme(), Scheme::Http);
//! assert_eq!(config.base_url().to_string(), "http://localhost:3081");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use flapjack_diner::{BaseUrl, Diner, DinerConfig, DinerError, TracingLogger};
//! use serde_json::json;
//!
//! let config = DinerConfig::builder()
//!     .base_url(BaseUrl::new("localhost:3081")?)
//!     .logger(Arc::new(TracingLogger))
//!     .build()?;
//! let diner = Diner::new(config)?;
//!
//! // Single map: POST /rules with content type application/vnd.api+json
//! let rule = json!({"name": "r1", "contact": "05983623-fcef-42da-af44-ed6990b500fa"});
//! let created = diner.create_rules(vec![rule.as_object().cloned().unwrap()]).await?;
//!
//! // Two ids: GET /rules?filter[]=id:a|b
//! let rules = diner.rules(&[id_a, id_b], None).await?;
//!
//! // Zero ids: rejected locally, nothing is sent
//! assert!(matches!(diner.delete_rules(&[]).await, Err(DinerError::Validation(_))));
//!
//! if let Some(error) = diner.last_error() {
//!     println!("last failure: {error}");
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and the last error live on the client
//! - **Fail-fast validation**: every violation is reported before any I/O
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: transports are async; the default one uses `reqwest`

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{BaseUrl, DinerConfig, DinerConfigBuilder, Scheme};
pub use error::ConfigError;

// Re-export wire-level types
pub use clients::{
    ContentType, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, HttpTransport,
    InvalidHttpRequestError, RequestLogger, TracingLogger, Transport, TransportError,
};

// Re-export the client and its error types
pub use rest::{
    ArgumentError, AttributeMap, Diner, DinerError, ErrorEntry, ServerError, ValidationError,
    Violation,
};
