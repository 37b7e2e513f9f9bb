//! Property-based tests for outcome aggregation.
//!
//! Validates the core accounting invariant over arbitrary attempt vectors:
//! for any outcome, `attempted == successful + failed == attempts.len()`,
//! and aggregation preserves the order attempts were supplied in.

use chrono::Utc;
use fanout_core::{DeliveryAttempt, DestinationId, RedistributionOutcome};
use proptest::prelude::*;
use url::Url;

/// Strategy for generating realistic delivery attempts.
fn attempt_strategy() -> impl Strategy<Value = DeliveryAttempt> {
    (
        any::<bool>(),
        prop::option::of(100u16..600),
        0u64..10_000,
        "[a-z]{3,12}",
    )
        .prop_map(|(success, status_code, response_time_ms, name)| DeliveryAttempt {
            destination_id: DestinationId::new(),
            destination_name: name.clone(),
            url: Url::parse(&format!("https://{name}.example.com/hook")).unwrap(),
            success,
            status_code,
            response_time_ms,
            error_message: if success { None } else { Some("delivery failed".to_string()) },
            timestamp: Utc::now(),
        })
}

proptest! {
    #[test]
    fn outcome_counts_always_balance(
        attempts in prop::collection::vec(attempt_strategy(), 0..32),
        slug in prop::option::of("[a-z]{1,16}"),
    ) {
        let expected_successful = attempts.iter().filter(|a| a.success).count();
        let expected_total = attempts.len();

        let outcome = RedistributionOutcome::from_attempts(slug, attempts);

        prop_assert_eq!(outcome.attempted, expected_total);
        prop_assert_eq!(outcome.successful, expected_successful);
        prop_assert_eq!(outcome.failed, expected_total - expected_successful);
        prop_assert_eq!(outcome.attempted, outcome.successful + outcome.failed);
        prop_assert_eq!(outcome.attempted, outcome.attempts.len());
    }

    #[test]
    fn aggregation_preserves_attempt_order(
        attempts in prop::collection::vec(attempt_strategy(), 0..32),
    ) {
        let ids: Vec<DestinationId> = attempts.iter().map(|a| a.destination_id).collect();

        let outcome = RedistributionOutcome::from_attempts(None, attempts);

        let aggregated_ids: Vec<DestinationId> =
            outcome.attempts.iter().map(|a| a.destination_id).collect();
        prop_assert_eq!(aggregated_ids, ids);
    }
}
