//! The Flapjack API client.
//!
//! [`Diner`] owns the configuration, the transport and the last-error slot.
//! Every operation runs the same steps:
//!
//! 1. validate the canonical request against the kind's field rules; any
//!    violation returns [`DinerError::Validation`] without sending anything
//! 2. build the request descriptor
//! 3. perform the round trip; transport failures propagate unmodified
//! 4. normalize the response; a non-success status is stored as the last
//!    error and returned as [`DinerError::Server`]

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::clients::{HttpTransport, RequestLogger, Transport, TransportError};
use crate::config::{BaseUrl, DinerConfig};
use crate::rest::arguments::{self, Arg, CanonicalRequest};
use crate::rest::errors::{ArgumentError, DinerError, ValidationError};
use crate::rest::path::ResourceOperation;
use crate::rest::pipeline;
use crate::rest::resources::{ResourceKind, READ_OPTION_RULES};
use crate::rest::response::{self, ServerError};
use crate::rest::validation::{missing_ids, validate, validate_ids, CheckKind, Violation};
use crate::rest::value::AttributeMap;

/// Client for the Flapjack JSON-API.
///
/// `Diner` is `Send + Sync` when its transport is, so one instance can be
/// shared across tasks behind an `Arc`. The last-error slot is then shared by
/// those tasks as well.
///
/// # Example
///
/// ```rust,ignore
/// use flapjack_diner::{BaseUrl, Diner, DinerConfig};
/// use serde_json::json;
///
/// let config = DinerConfig::builder()
///     .base_url(BaseUrl::new("localhost:3081")?)
///     .build()?;
/// let diner = Diner::new(config)?;
///
/// let contact = json!({"name": "Jim Smith", "timezone": "UTC"});
/// let created = diner
///     .create_contacts(vec![contact.as_object().cloned().unwrap()])
///     .await?;
///
/// let rules = diner.rules(&[], None).await?;
/// ```
#[derive(Debug)]
pub struct Diner<T = HttpTransport> {
    config: DinerConfig,
    transport: T,
    last_error: Mutex<Option<ServerError>>,
}

// Verify Diner is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Diner>();
};

impl Diner<HttpTransport> {
    /// Creates a client backed by [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be created.
    pub fn new(config: DinerConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> Diner<T> {
    /// Creates a client that performs round trips through `transport`.
    #[must_use]
    pub fn with_transport(config: DinerConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            last_error: Mutex::new(None),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DinerConfig {
        &self.config
    }

    /// Returns the service base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        self.config.base_url()
    }

    /// Replaces the service base URL.
    pub fn set_base_url(&mut self, base_url: BaseUrl) {
        self.config.set_base_url(base_url);
    }

    /// Returns the request logger, if any.
    #[must_use]
    pub fn logger(&self) -> Option<&Arc<dyn RequestLogger>> {
        self.config.logger()
    }

    /// Replaces (or removes) the request logger.
    pub fn set_logger(&mut self, logger: Option<Arc<dyn RequestLogger>>) {
        self.config.set_logger(logger);
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the most recent server error.
    ///
    /// The slot is overwritten by every server error and is not cleared by
    /// later successful calls; use [`clear_last_error`](Self::clear_last_error).
    #[must_use]
    pub fn last_error(&self) -> Option<ServerError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Empties the last-error slot.
    pub fn clear_last_error(&self) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Creates one resource (one map) or several in a bulk request.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn create(
        &self,
        kind: &ResourceKind,
        maps: Vec<AttributeMap>,
    ) -> Result<Value, DinerError> {
        self.execute(kind, ResourceOperation::Create, CanonicalRequest::create(maps))
            .await
    }

    /// Reads a collection (no ids), one resource (one id) or several by id.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn read(
        &self,
        kind: &ResourceKind,
        ids: &[&str],
        options: Option<AttributeMap>,
    ) -> Result<Value, DinerError> {
        let request = CanonicalRequest::read(owned(ids), options);
        self.execute(kind, ResourceOperation::Read, request).await
    }

    /// Updates resources whose maps each carry their own `id`.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn update(
        &self,
        kind: &ResourceKind,
        maps: Vec<AttributeMap>,
    ) -> Result<bool, DinerError> {
        self.execute(kind, ResourceOperation::Update, CanonicalRequest::update(maps))
            .await
            .map(|_| true)
    }

    /// Updates resources addressed by separately supplied ids.
    ///
    /// A single map is applied to every id; otherwise maps pair with ids.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn update_by_ids(
        &self,
        kind: &ResourceKind,
        ids: &[&str],
        maps: Vec<AttributeMap>,
    ) -> Result<bool, DinerError> {
        let operation = ResourceOperation::Update.method_name(kind.name);
        let request = CanonicalRequest::update_with_ids(&operation, owned(ids), maps)?;
        self.execute(kind, ResourceOperation::Update, request)
            .await
            .map(|_| true)
    }

    /// Deletes one resource or several in a bulk request.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Validation`] without sending anything when `ids`
    /// is empty; otherwise see [`DinerError`].
    pub async fn delete(&self, kind: &ResourceKind, ids: &[&str]) -> Result<bool, DinerError> {
        self.execute(kind, ResourceOperation::Delete, CanonicalRequest::delete(owned(ids)))
            .await
            .map(|_| true)
    }

    /// Performs an operation from positional arguments.
    ///
    /// Ids, attribute maps and options are inferred from the argument shapes;
    /// see [`arguments::normalize`]. Updates and deletes return `true` on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Arguments`] when the call shape does not fit the
    /// operation; otherwise see [`DinerError`].
    pub async fn call(
        &self,
        kind: &ResourceKind,
        operation: ResourceOperation,
        args: Vec<Arg>,
    ) -> Result<Value, DinerError> {
        let request = arguments::normalize(kind.name, operation, args)?;
        let value = self.execute(kind, operation, request).await?;
        Ok(match operation {
            ResourceOperation::Update | ResourceOperation::Delete => Value::Bool(true),
            ResourceOperation::Create | ResourceOperation::Read => value,
        })
    }

    async fn execute(
        &self,
        kind: &ResourceKind,
        operation: ResourceOperation,
        request: CanonicalRequest,
    ) -> Result<Value, DinerError> {
        if !kind.supports(operation) {
            return Err(ArgumentError::UnsupportedOperation {
                resource: kind.name,
                operation: operation.as_str(),
            }
            .into());
        }

        let violations = check(kind, operation, &request);
        if !violations.is_empty() {
            return Err(ValidationError {
                operation: operation.method_name(kind.name),
                violations,
            }
            .into());
        }

        let http_request = pipeline::build_request(kind, operation, &request)?;
        let (status, body) = pipeline::send(
            &self.transport,
            self.config.base_url(),
            self.config.logger(),
            &http_request,
        )
        .await?;

        response::normalize(kind, status, &body).map_err(|error| {
            tracing::warn!(
                resource = kind.name,
                operation = operation.as_str(),
                status = error.status_code,
                "{error}"
            );
            self.record(error.clone());
            DinerError::Server(error)
        })
    }

    fn record(&self, error: ServerError) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
    }
}

/// Runs every field rule that applies to the operation.
fn check(
    kind: &ResourceKind,
    operation: ResourceOperation,
    request: &CanonicalRequest,
) -> Vec<Violation> {
    let options = || validate(std::iter::once(&request.query), READ_OPTION_RULES);
    match operation {
        ResourceOperation::Create | ResourceOperation::Update => {
            let mut violations =
                validate(request.payload_maps(), kind.payload_rules(operation));
            violations.extend(options());
            violations
        }
        ResourceOperation::Read => {
            let mut violations = options();
            violations.extend(validate_ids(&request.ids, CheckKind::String));
            violations
        }
        ResourceOperation::Delete if request.ids.is_empty() => vec![missing_ids(kind.id_check)],
        ResourceOperation::Delete => validate_ids(&request.ids, kind.id_check),
    }
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}
