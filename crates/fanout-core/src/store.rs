//! Configuration store interface and in-memory implementation.
//!
//! The redistribution core reads endpoint and destination configuration
//! through this narrow interface; mutations happen in a CRUD layer outside
//! this repository. The store is read-mostly and may be read concurrently
//! by many inbound events without coordination from the core.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::StoreError,
    models::{Destination, Endpoint, RouteBinding},
};

/// Read-only view of endpoint and destination configuration.
#[async_trait]
pub trait ConfigStore: Send + Sync + std::fmt::Debug {
    /// Looks up an endpoint by its route slug.
    ///
    /// Returns `Ok(None)` when no endpoint carries the slug; inactive
    /// endpoints are returned as-is and classified by the caller.
    async fn endpoint_by_slug(&self, slug: &str) -> Result<Option<Endpoint>, StoreError>;

    /// Returns the active destinations bound to a route.
    ///
    /// The result contains only `active` destinations, ordered by
    /// `(position, id)`. The ordering must be stable across repeated calls
    /// for unchanged configuration. An empty result is a valid outcome.
    async fn active_destinations(
        &self,
        binding: RouteBinding,
    ) -> Result<Vec<Destination>, StoreError>;
}

/// In-memory configuration store.
///
/// Backs tests and embedded usage without a database. Supports injecting a
/// one-shot read failure to exercise store-error paths.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    endpoints: RwLock<HashMap<String, Endpoint>>,
    destinations: RwLock<Vec<Destination>>,
    read_error: RwLock<Option<String>>,
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an endpoint, keyed by slug.
    pub async fn add_endpoint(&self, endpoint: Endpoint) {
        self.endpoints.write().await.insert(endpoint.slug.clone(), endpoint);
    }

    /// Registers a destination.
    pub async fn add_destination(&self, destination: Destination) {
        self.destinations.write().await.push(destination);
    }

    /// Makes the next read fail with the given message.
    pub async fn inject_read_error(&self, message: impl Into<String>) {
        *self.read_error.write().await = Some(message.into());
    }

    async fn take_injected_error(&self) -> Result<(), StoreError> {
        if let Some(message) = self.read_error.write().await.take() {
            return Err(StoreError::new(message));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn endpoint_by_slug(&self, slug: &str) -> Result<Option<Endpoint>, StoreError> {
        self.take_injected_error().await?;
        Ok(self.endpoints.read().await.get(slug).cloned())
    }

    async fn active_destinations(
        &self,
        binding: RouteBinding,
    ) -> Result<Vec<Destination>, StoreError> {
        self.take_injected_error().await?;

        let mut matched: Vec<Destination> = self
            .destinations
            .read()
            .await
            .iter()
            .filter(|d| d.active && d.binding == binding)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.0.cmp(&b.id.0)));

        Ok(matched)
    }
}
