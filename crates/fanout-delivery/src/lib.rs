//! Webhook redistribution engine.
//!
//! Accepts one inbound webhook event at a time and fans it out to the
//! destinations configured for the resolved route, recording one aggregate
//! outcome per event.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   ┌─────────────────────┐   ┌────────────────┐
//! │ Slug Resolver │──▶│ Destination Resolver │──▶│ DeliveryClient │
//! └───────────────┘   └─────────────────────┘   └────────────────┘
//!         ▲                      ▲                  concurrent
//!         │    ConfigStore       │                  fan-out
//!         └──────────┬───────────┘                      │
//!                    │          ┌────────────────┐      ▼
//!                    └──────────│ Redistributor  │◀─ join_all
//!                               └────────────────┘
//!                                       │
//!                                       ▼  best-effort
//!                               ┌────────────────┐
//!                               │  OutcomeSink   │
//!                               └────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - One delivery attempt per eligible destination per inbound event.
//! - Attempts are independent: a failing destination never blocks siblings.
//! - The aggregated attempts list is in destination-resolver order, not
//!   completion order, so outcome records are reproducible.
//! - The orchestrator returns a structured outcome for every event that
//!   routes successfully; delivery-level problems are data, not errors.
//!
//! # Non-guarantees
//!
//! - No retries, no persistent queuing, no cross-event ordering, no
//!   exactly-once delivery. The engine forwards once per destination and
//!   reports what happened.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod redistributor;
pub mod route;

pub use client::{ClientConfig, DeliveryClient};
pub use error::{ClientBuildError, RedistributeError};
pub use redistributor::{Redistributor, RedistributorStats};
pub use route::ResolvedRoute;

/// Default per-destination delivery timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
