//! Tests for the in-memory configuration store.
//!
//! Covers active-only filtering, route binding separation, deterministic
//! ordering across repeated reads, and injected read failures.

use fanout_core::{ConfigStore, Destination, Endpoint, InMemoryConfigStore, RouteBinding};

fn destination(name: &str, binding: RouteBinding, position: i32) -> Destination {
    Destination::new(name, &format!("https://{name}.example.com/hook"), binding)
        .expect("valid URL")
        .with_position(position)
}

#[tokio::test]
async fn lookup_by_slug_finds_registered_endpoint() {
    let store = InMemoryConfigStore::new();
    let endpoint = Endpoint::new("orders", "Order events");
    let id = endpoint.id;
    store.add_endpoint(endpoint).await;

    let found = store.endpoint_by_slug("orders").await.unwrap().expect("endpoint exists");
    assert_eq!(found.id, id);
    assert!(found.active);

    assert!(store.endpoint_by_slug("billing").await.unwrap().is_none());
}

#[tokio::test]
async fn inactive_endpoints_are_returned_for_classification() {
    let store = InMemoryConfigStore::new();
    let mut endpoint = Endpoint::new("orders", "Order events");
    endpoint.active = false;
    store.add_endpoint(endpoint).await;

    let found = store.endpoint_by_slug("orders").await.unwrap().expect("endpoint exists");
    assert!(!found.active);
}

#[tokio::test]
async fn only_active_destinations_are_resolved() {
    let store = InMemoryConfigStore::new();
    let endpoint = Endpoint::new("crm", "CRM relay");
    let binding = RouteBinding::Endpoint(endpoint.id);
    store.add_endpoint(endpoint).await;

    store.add_destination(destination("alpha", binding, 0)).await;
    store.add_destination(destination("beta", binding, 1).inactive()).await;

    let resolved = store.active_destinations(binding).await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].name, "alpha");
}

#[tokio::test]
async fn default_route_destinations_are_separate_from_bound_ones() {
    let store = InMemoryConfigStore::new();
    let endpoint = Endpoint::new("crm", "CRM relay");
    let binding = RouteBinding::Endpoint(endpoint.id);
    store.add_endpoint(endpoint).await;

    store.add_destination(destination("bound", binding, 0)).await;
    store.add_destination(destination("unbound", RouteBinding::Default, 0)).await;

    let bound = store.active_destinations(binding).await.unwrap();
    let default = store.active_destinations(RouteBinding::Default).await.unwrap();

    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].name, "bound");
    assert_eq!(default.len(), 1);
    assert_eq!(default[0].name, "unbound");
}

#[tokio::test]
async fn destination_order_is_deterministic_across_reads() {
    let store = InMemoryConfigStore::new();
    store.add_destination(destination("third", RouteBinding::Default, 2)).await;
    store.add_destination(destination("first", RouteBinding::Default, 0)).await;
    store.add_destination(destination("second", RouteBinding::Default, 1)).await;

    let first_read = store.active_destinations(RouteBinding::Default).await.unwrap();
    let second_read = store.active_destinations(RouteBinding::Default).await.unwrap();

    let names: Vec<&str> = first_read.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);

    let ids_first: Vec<_> = first_read.iter().map(|d| d.id).collect();
    let ids_second: Vec<_> = second_read.iter().map(|d| d.id).collect();
    assert_eq!(ids_first, ids_second);
}

#[tokio::test]
async fn empty_destination_set_is_not_an_error() {
    let store = InMemoryConfigStore::new();
    let resolved = store.active_destinations(RouteBinding::Default).await.unwrap();
    assert!(resolved.is_empty());
}

#[tokio::test]
async fn injected_read_error_fails_exactly_one_read() {
    let store = InMemoryConfigStore::new();
    store.add_endpoint(Endpoint::new("orders", "Order events")).await;

    store.inject_read_error("connection refused").await;

    let err = store.endpoint_by_slug("orders").await.expect_err("injected failure");
    assert!(err.to_string().contains("connection refused"));

    // The failure is one-shot; the following read succeeds.
    assert!(store.endpoint_by_slug("orders").await.unwrap().is_some());
}
