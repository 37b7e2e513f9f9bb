//! Route and destination resolution.
//!
//! Maps an inbound slug (or its absence) to a logical route and produces the
//! ordered set of active destinations for it. Both steps are pure reads
//! against the configuration store.

use fanout_core::{
    error::RoutingError,
    models::{Destination, Endpoint, RouteBinding},
    store::ConfigStore,
};

use crate::error::RedistributeError;

/// A resolved inbound route.
#[derive(Debug, Clone)]
pub enum ResolvedRoute {
    /// The implicit default route, used when no slug is supplied. Always
    /// exists and is never "not found".
    Default,

    /// An active named endpoint.
    Endpoint(Endpoint),
}

impl ResolvedRoute {
    /// The route binding destinations are looked up by.
    pub fn binding(&self) -> RouteBinding {
        match self {
            Self::Default => RouteBinding::Default,
            Self::Endpoint(endpoint) => RouteBinding::Endpoint(endpoint.id),
        }
    }

    /// Slug of the route, `None` for the default route.
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Endpoint(endpoint) => Some(&endpoint.slug),
        }
    }
}

/// Resolves a slug to a route, validating the endpoint's active status.
///
/// An absent slug resolves to the default route. A slug that matches no
/// endpoint fails with [`RoutingError::NotFound`]; an endpoint that exists
/// but is inactive fails with [`RoutingError::Inactive`] so callers can
/// surface a gone/inactive response distinct from not-found.
pub async fn resolve_route(
    store: &dyn ConfigStore,
    slug: Option<&str>,
) -> Result<ResolvedRoute, RedistributeError> {
    let Some(slug) = slug else {
        return Ok(ResolvedRoute::Default);
    };

    let endpoint = store
        .endpoint_by_slug(slug)
        .await?
        .ok_or_else(|| RoutingError::not_found(slug))?;

    if !endpoint.active {
        return Err(RoutingError::inactive(slug).into());
    }

    Ok(ResolvedRoute::Endpoint(endpoint))
}

/// Returns the active destinations for a resolved route.
///
/// The store contract guarantees a stable `(position, id)` order, so two
/// resolutions against unchanged configuration yield the same sequence.
/// An empty set is a valid, non-error result.
pub async fn resolve_destinations(
    store: &dyn ConfigStore,
    route: &ResolvedRoute,
) -> Result<Vec<Destination>, RedistributeError> {
    Ok(store.active_destinations(route.binding()).await?)
}
