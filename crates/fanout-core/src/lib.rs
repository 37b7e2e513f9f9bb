//! Core domain models and interfaces for the webhook redistribution engine.
//!
//! Provides strongly-typed domain primitives, the error taxonomy, the
//! configuration store interface consumed by the delivery layer, and the
//! outcome sink interface that delivery results are reported to. The
//! `fanout-delivery` crate builds on these foundations; the surrounding
//! service (HTTP surface, CRUD, auth) lives outside this repository.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod sink;
pub mod store;

pub use error::{InvalidUrl, RoutingError, SinkError, StoreError};
pub use models::{
    DeliveryAttempt, Destination, DestinationId, Endpoint, EndpointId, HeaderSubset,
    RedistributionOutcome, RouteBinding,
};
pub use sink::{MulticastSink, NoOpSink, OutcomeSink, TracingSink};
pub use store::{ConfigStore, InMemoryConfigStore};
