//! Outcome sink interface and built-in implementations.
//!
//! One aggregate outcome record is handed to the sink per inbound event.
//! Recording is fire-and-forget from the orchestrator's point of view:
//! a sink failure must never change an already-computed outcome or be
//! surfaced to the redistribution caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{error::SinkError, models::RedistributionOutcome};

/// Receives one aggregate outcome record per inbound event.
///
/// Implementations should not block redistribution; long-running persistence
/// belongs behind a channel or spawned task inside the implementation.
#[async_trait]
pub trait OutcomeSink: Send + Sync + std::fmt::Debug {
    /// Records a redistribution outcome.
    async fn record(&self, outcome: &RedistributionOutcome) -> Result<(), SinkError>;
}

/// Sink that discards all outcomes.
#[derive(Debug, Default)]
pub struct NoOpSink;

impl NoOpSink {
    /// Creates a new no-op sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutcomeSink for NoOpSink {
    async fn record(&self, _outcome: &RedistributionOutcome) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that emits one structured log line per outcome.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutcomeSink for TracingSink {
    async fn record(&self, outcome: &RedistributionOutcome) -> Result<(), SinkError> {
        info!(
            endpoint_slug = outcome.endpoint_slug.as_deref().unwrap_or("<default>"),
            attempted = outcome.attempted,
            successful = outcome.successful,
            failed = outcome.failed,
            "webhook redistributed"
        );
        Ok(())
    }
}

/// Sink that forwards each outcome to multiple subscribers.
///
/// Subscribers receive the outcome concurrently. A failing subscriber is
/// reported to diagnostics but does not affect the others or the caller.
#[derive(Debug, Clone, Default)]
pub struct MulticastSink {
    subscribers: Vec<Arc<dyn OutcomeSink>>,
}

impl MulticastSink {
    /// Creates a multicast sink with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber.
    pub fn add_subscriber(&mut self, sink: Arc<dyn OutcomeSink>) {
        self.subscribers.push(sink);
    }

    /// Returns the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[async_trait]
impl OutcomeSink for MulticastSink {
    async fn record(&self, outcome: &RedistributionOutcome) -> Result<(), SinkError> {
        let futures = self.subscribers.iter().map(|sink| sink.record(outcome));

        for result in futures::future::join_all(futures).await {
            if let Err(error) = result {
                warn!(error = %error, "outcome sink subscriber failed");
            }
        }

        Ok(())
    }
}
