//! Domain models and strongly-typed identifiers.
//!
//! Defines endpoints (named inbound routes), destinations (outbound delivery
//! targets), per-destination delivery attempts, and the aggregated
//! redistribution outcome. Newtype ID wrappers prevent mixing identifier
//! kinds at compile time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::InvalidUrl;

/// Strongly-typed endpoint identifier.
///
/// An endpoint is a logical inbound route addressed by slug. The ID follows
/// the endpoint through configuration reads and outcome records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointId(pub Uuid);

impl EndpointId {
    /// Creates a new random endpoint ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EndpointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EndpointId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Strongly-typed destination identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinationId(pub Uuid);

impl DestinationId {
    /// Creates a new random destination ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DestinationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for DestinationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A named inbound route.
///
/// Endpoints are created and edited by the configuration layer outside this
/// repository; the redistribution core only reads them. An inactive endpoint
/// rejects new deliveries but retains its history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Unique identifier for this endpoint.
    pub id: EndpointId,

    /// Unique human-readable route key. Immutable once referenced by
    /// active traffic.
    pub slug: String,

    /// Display name.
    pub name: String,

    /// Whether this endpoint accepts new deliveries.
    pub active: bool,

    /// When this endpoint was created.
    pub created_at: DateTime<Utc>,
}

impl Endpoint {
    /// Creates an active endpoint with the given slug.
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EndpointId::new(),
            slug: slug.into(),
            name: name.into(),
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// Which route a destination belongs to.
///
/// `Default` models destinations with no endpoint binding: they receive
/// events that arrive without a slug. The default route always exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteBinding {
    /// The implicit default route.
    Default,

    /// A concrete endpoint.
    Endpoint(EndpointId),
}

/// An outbound delivery target.
///
/// A destination belongs to exactly one endpoint, or to the default route.
/// Only active destinations are eligible for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Unique identifier for this destination.
    pub id: DestinationId,

    /// Display name, used in outcome records.
    pub name: String,

    /// Absolute URL the webhook payload is POSTed to.
    pub url: Url,

    /// Route this destination is bound to.
    pub binding: RouteBinding,

    /// Whether this destination is eligible for delivery.
    pub active: bool,

    /// Explicit ordering within the route. Lower positions are reported
    /// first in outcome records; delivery itself is concurrent.
    pub position: i32,
}

impl Destination {
    /// Creates an active destination after validating the URL.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUrl`] when the URL is relative, unparseable, or not
    /// http/https.
    pub fn new(
        name: impl Into<String>,
        url: &str,
        binding: RouteBinding,
    ) -> Result<Self, InvalidUrl> {
        let parsed = Url::parse(url)
            .map_err(|e| InvalidUrl { url: url.to_string(), reason: e.to_string() })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        Ok(Self {
            id: DestinationId::new(),
            name: name.into(),
            url: parsed,
            binding,
            active: true,
            position: 0,
        })
    }

    /// Sets the explicit ordering position.
    #[must_use]
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Marks the destination inactive.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// The two optional passthrough values copied from the inbound request.
///
/// Only these indicators are forwarded to destinations; every other inbound
/// header is dropped to prevent header leakage between unrelated systems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSubset {
    /// Originating-system indicator, forwarded as `X-Webhook-Source`.
    pub source: Option<String>,

    /// Event-type indicator, forwarded as `X-Webhook-Event`.
    pub event: Option<String>,
}

impl HeaderSubset {
    /// A subset with neither passthrough value present.
    pub const fn empty() -> Self {
        Self { source: None, event: None }
    }
}

/// Result of one delivery attempt to one destination.
///
/// Exactly one attempt is made per eligible destination per inbound event.
/// Attempts are independent: one destination failing never blocks another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    /// Destination this attempt was made against.
    pub destination_id: DestinationId,

    /// Destination name, denormalized for log readability.
    pub destination_name: String,

    /// URL the payload was sent to.
    pub url: Url,

    /// Whether the delivery counts as successful. HTTP responses below 500
    /// are successes (the destination was reachable and processed the
    /// request); 5xx responses and transport failures are not.
    pub success: bool,

    /// HTTP status code, when the destination responded at all.
    pub status_code: Option<u16>,

    /// Wall-clock duration of the attempt in milliseconds, recorded
    /// regardless of outcome.
    pub response_time_ms: u64,

    /// Human-readable failure description for unsuccessful attempts.
    pub error_message: Option<String>,

    /// When the attempt completed.
    pub timestamp: DateTime<Utc>,
}

/// Aggregated record of one redistribution pass.
///
/// `attempted == successful + failed == attempts.len()` holds by
/// construction. An outcome with zero attempts is a valid terminal state
/// (no destinations configured), distinct from any processing failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedistributionOutcome {
    /// Slug of the resolved route, `None` for the default route.
    pub endpoint_slug: Option<String>,

    /// Number of destinations attempted.
    pub attempted: usize,

    /// Number of successful deliveries.
    pub successful: usize,

    /// Number of failed deliveries.
    pub failed: usize,

    /// Per-destination attempts, in destination-resolver order rather than
    /// completion order, so logs are reproducible regardless of network
    /// timing.
    pub attempts: Vec<DeliveryAttempt>,
}

impl RedistributionOutcome {
    /// Builds an outcome from completed attempts, computing the counts.
    pub fn from_attempts(endpoint_slug: Option<String>, attempts: Vec<DeliveryAttempt>) -> Self {
        let successful = attempts.iter().filter(|a| a.success).count();
        Self {
            endpoint_slug,
            attempted: attempts.len(),
            successful,
            failed: attempts.len() - successful,
            attempts,
        }
    }

    /// Whether every attempted delivery succeeded. True for the
    /// zero-destination outcome.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
