//! Error types for the redistribution engine.
//!
//! The orchestrator fails only for routing problems and configuration store
//! failures. Per-destination delivery failures never surface here; they are
//! recorded inside the outcome as failed attempts.

use fanout_core::error::{RoutingError, StoreError};
use thiserror::Error;

/// Failure of a whole redistribution pass.
#[derive(Debug, Clone, Error)]
pub enum RedistributeError {
    /// The route could not be resolved (unknown or inactive slug). The
    /// caller maps the inner variants to distinct external responses.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// The configuration store failed; the destination set is unknown, so
    /// the pass cannot proceed. Distinguishable in logs from a route with
    /// zero configured destinations.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RedistributeError {
    /// Whether this is a routing rejection rather than an infrastructure
    /// failure.
    pub const fn is_routing(&self) -> bool {
        matches!(self, Self::Routing(_))
    }
}

/// Failure to construct the HTTP delivery client.
#[derive(Debug, Error)]
#[error("failed to build HTTP delivery client: {0}")]
pub struct ClientBuildError(#[from] pub reqwest::Error);
