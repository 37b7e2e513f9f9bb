//! HTTP delivery executor.
//!
//! Sends one payload to one destination and classifies the result. The
//! client never raises past its own boundary: transport errors (DNS,
//! connection refused, TLS, timeout) become failed attempts with a
//! human-readable message, so one destination's trouble can never abort a
//! sibling delivery.

use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::Utc;
use fanout_core::models::{DeliveryAttempt, Destination, HeaderSubset};
use tracing::{info_span, Instrument};

use crate::error::ClientBuildError;

/// Delivery timestamp header set on every outbound request.
pub const HEADER_TIMESTAMP: &str = "x-fanout-timestamp";

/// Passthrough header carrying the inbound source indicator.
pub const HEADER_SOURCE: &str = "x-webhook-source";

/// Passthrough header carrying the inbound event indicator.
pub const HEADER_EVENT: &str = "x-webhook-event";

/// Configuration for the delivery client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-destination timeout bounding the whole attempt, connection and
    /// response read included.
    pub timeout: Duration,

    /// User-agent marker identifying this relay to destinations.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(crate::DEFAULT_TIMEOUT_MS),
            user_agent: "fanout-redistributor/0.1".to_string(),
        }
    }
}

/// HTTP client for webhook fan-out.
///
/// Wraps a pooled `reqwest::Client` so connections are reused across
/// destinations and across events. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl DeliveryClient {
    /// Creates a delivery client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] if the underlying HTTP client cannot be
    /// configured.
    pub fn new(config: ClientConfig) -> Result<Self, ClientBuildError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Creates a delivery client with default configuration.
    pub fn with_defaults() -> Result<Self, ClientBuildError> {
        Self::new(ClientConfig::default())
    }

    /// Configured per-destination timeout.
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Delivers the payload to one destination and reports what happened.
    ///
    /// POSTs the payload verbatim as a JSON body with the fixed header set:
    /// a delivery timestamp, the user-agent marker, and the two optional
    /// passthrough indicators. No other inbound headers are forwarded.
    ///
    /// Responses with status below 500 count as delivered (the destination
    /// was reachable and processed the request, even a 4xx rejection);
    /// 5xx responses and transport failures count as failed. The attempt's
    /// wall-clock duration is recorded either way.
    pub async fn deliver(
        &self,
        destination: &Destination,
        payload: &Bytes,
        headers: &HeaderSubset,
    ) -> DeliveryAttempt {
        let span = info_span!(
            "destination_delivery",
            destination = %destination.name,
            url = %destination.url,
        );

        async move {
            let started = Instant::now();

            let mut request = self
                .client
                .post(destination.url.clone())
                .header("content-type", "application/json")
                .header(HEADER_TIMESTAMP, Utc::now().to_rfc3339())
                .body(payload.clone());

            if let Some(source) = &headers.source {
                request = request.header(HEADER_SOURCE, source);
            }
            if let Some(event) = &headers.event {
                request = request.header(HEADER_EVENT, event);
            }

            let (success, status_code, error_message) = match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    // Drain the body so the timeout covers the response read
                    // and the pooled connection can be reused.
                    match response.bytes().await {
                        Ok(_) if status < 500 => (true, Some(status), None),
                        Ok(_) => (
                            false,
                            Some(status),
                            Some(format!("destination returned HTTP {status}")),
                        ),
                        Err(e) => (
                            false,
                            Some(status),
                            Some(classify_transport_error(&e, self.config.timeout)),
                        ),
                    }
                },
                Err(e) => (false, None, Some(classify_transport_error(&e, self.config.timeout))),
            };

            let response_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            if success {
                tracing::debug!(status = ?status_code, response_time_ms, "destination delivered");
            } else {
                tracing::warn!(
                    status = ?status_code,
                    response_time_ms,
                    error = error_message.as_deref().unwrap_or(""),
                    "destination delivery failed"
                );
            }

            DeliveryAttempt {
                destination_id: destination.id,
                destination_name: destination.name.clone(),
                url: destination.url.clone(),
                success,
                status_code,
                response_time_ms,
                error_message,
                timestamp: Utc::now(),
            }
        }
        .instrument(span)
        .await
    }
}

/// Converts a transport error into a readable failure message.
fn classify_transport_error(error: &reqwest::Error, timeout: Duration) -> String {
    if error.is_timeout() {
        format!("delivery timed out after {}ms", timeout.as_millis())
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        format!("request failed: {error}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_five_seconds() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn client_builds_with_defaults() {
        assert!(DeliveryClient::with_defaults().is_ok());
    }
}
