//! Error taxonomy for webhook redistribution.
//!
//! Routing failures are fatal to the current event and surfaced to the
//! caller; configuration store failures abort the whole pass; sink failures
//! are swallowed at the orchestrator boundary. Per-destination delivery
//! failures are deliberately *not* errors; they are recorded as failed
//! attempts inside the outcome.

use thiserror::Error;

/// Route resolution failure.
///
/// Fatal to the current inbound event: no deliveries are attempted and no
/// outcome is recorded. The caller maps the variants to distinct external
/// responses (not-found vs gone).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No endpoint exists with the requested slug.
    #[error("no endpoint with slug {slug:?}")]
    NotFound {
        /// Slug that failed to resolve.
        slug: String,
    },

    /// The endpoint exists but is inactive.
    #[error("endpoint {slug:?} is inactive")]
    Inactive {
        /// Slug of the inactive endpoint.
        slug: String,
    },
}

impl RoutingError {
    /// Creates a not-found error.
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    /// Creates an inactive-endpoint error.
    pub fn inactive(slug: impl Into<String>) -> Self {
        Self::Inactive { slug: slug.into() }
    }
}

/// Configuration store read failure.
///
/// Distinct from both routing errors and an empty destination set: the
/// redistribution pass cannot proceed without knowing the destination set,
/// so this propagates as a hard failure.
#[derive(Debug, Clone, Error)]
#[error("configuration store error: {message}")]
pub struct StoreError {
    /// Description of the store failure.
    pub message: String,
}

impl StoreError {
    /// Creates a store error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Outcome sink write failure.
///
/// Never propagated to the redistribution caller; the computed outcome is
/// still returned and the failure is only reported to process diagnostics.
#[derive(Debug, Clone, Error)]
#[error("outcome sink error: {message}")]
pub struct SinkError {
    /// Description of the sink failure.
    pub message: String,
}

impl SinkError {
    /// Creates a sink error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Destination URL validation failure.
#[derive(Debug, Clone, Error)]
#[error("invalid destination URL {url:?}: {reason}")]
pub struct InvalidUrl {
    /// The rejected URL text.
    pub url: String,
    /// Why it was rejected.
    pub reason: String,
}
