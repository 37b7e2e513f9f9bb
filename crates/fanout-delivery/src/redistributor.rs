//! Redistribution orchestrator.
//!
//! Composes route resolution, destination resolution, concurrent fan-out,
//! and outcome aggregation into a single terminal pass per inbound event.
//! There are no retries: every eligible destination gets exactly one attempt
//! and the aggregate outcome is handed to the sink best-effort.

use std::sync::Arc;

use bytes::Bytes;
use fanout_core::{
    models::{HeaderSubset, RedistributionOutcome},
    sink::OutcomeSink,
    store::ConfigStore,
};
use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{
    client::{ClientConfig, DeliveryClient},
    error::{ClientBuildError, RedistributeError},
    route::{resolve_destinations, resolve_route},
};

/// Counters for redistribution monitoring.
///
/// Held behind the orchestrator with an explicit lifecycle rather than as
/// ambient module state, so embedding services can snapshot and reset them
/// alongside the orchestrator itself.
#[derive(Debug, Clone, Default)]
pub struct RedistributorStats {
    /// Inbound events that completed a full redistribution pass.
    pub events_processed: u64,
    /// Inbound events rejected at route resolution.
    pub routing_rejected: u64,
    /// Redistribution passes aborted by configuration store failures.
    pub store_failures: u64,
    /// Total per-destination delivery attempts.
    pub attempts_total: u64,
    /// Attempts classified as delivered.
    pub delivered: u64,
    /// Attempts classified as failed.
    pub failed: u64,
}

/// Orchestrates one redistribution pass per inbound webhook event.
///
/// The store is read concurrently by many passes; the sink receives one
/// aggregate record per pass. Cloning is cheap and clones share the stats
/// and the pooled HTTP client.
#[derive(Debug, Clone)]
pub struct Redistributor {
    store: Arc<dyn ConfigStore>,
    sink: Arc<dyn OutcomeSink>,
    client: DeliveryClient,
    stats: Arc<RwLock<RedistributorStats>>,
}

impl Redistributor {
    /// Creates an orchestrator over the given store and sink.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] if the HTTP delivery client cannot be
    /// constructed from `config`.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        sink: Arc<dyn OutcomeSink>,
        config: ClientConfig,
    ) -> Result<Self, ClientBuildError> {
        Ok(Self {
            store,
            sink,
            client: DeliveryClient::new(config)?,
            stats: Arc::new(RwLock::new(RedistributorStats::default())),
        })
    }

    /// Redistributes one inbound event to the destinations of its route.
    ///
    /// Resolution failures terminate the pass before any delivery is
    /// attempted and before anything reaches the sink. Once fan-out starts,
    /// every destination gets an attempt; individual failures are recorded
    /// in the outcome, never raised. All deliveries run concurrently, so
    /// the pass is bounded by roughly one per-destination timeout of
    /// wall-clock time.
    pub async fn redistribute(
        &self,
        slug: Option<&str>,
        payload: Bytes,
        headers: HeaderSubset,
    ) -> Result<RedistributionOutcome, RedistributeError> {
        let route = match resolve_route(self.store.as_ref(), slug).await {
            Ok(route) => route,
            Err(error) => {
                self.record_rejection(&error).await;
                return Err(error);
            },
        };

        let destinations = match resolve_destinations(self.store.as_ref(), &route).await {
            Ok(destinations) => destinations,
            Err(error) => {
                self.record_rejection(&error).await;
                return Err(error);
            },
        };

        debug!(
            slug = route.slug().unwrap_or("<default>"),
            destinations = destinations.len(),
            "fanning out webhook event"
        );

        // join_all preserves input order, so the attempts land in resolver
        // order even though completion order depends on network timing.
        let attempts = join_all(
            destinations
                .iter()
                .map(|destination| self.client.deliver(destination, &payload, &headers)),
        )
        .await;

        let outcome = RedistributionOutcome::from_attempts(
            route.slug().map(str::to_string),
            attempts,
        );

        {
            let mut stats = self.stats.write().await;
            stats.events_processed += 1;
            stats.attempts_total += outcome.attempted as u64;
            stats.delivered += outcome.successful as u64;
            stats.failed += outcome.failed as u64;
        }

        info!(
            slug = outcome.endpoint_slug.as_deref().unwrap_or("<default>"),
            attempted = outcome.attempted,
            successful = outcome.successful,
            failed = outcome.failed,
            "redistribution pass completed"
        );

        if let Err(error) = self.sink.record(&outcome).await {
            // The outcome is already computed; a sink failure must not
            // change it or surface as a delivery failure.
            warn!(error = %error, "failed to record redistribution outcome");
        }

        Ok(outcome)
    }

    /// Returns a snapshot of the orchestrator's counters.
    pub async fn stats(&self) -> RedistributorStats {
        self.stats.read().await.clone()
    }

    async fn record_rejection(&self, error: &RedistributeError) {
        let mut stats = self.stats.write().await;
        if error.is_routing() {
            stats.routing_rejected += 1;
        } else {
            stats.store_failures += 1;
        }
    }
}
