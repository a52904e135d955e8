//! Client behaviour against an in-memory service.

mod common;

use centralconfig_client::cancel::until_cancelled;
use centralconfig_client::prelude::*;
use common::{CountingTransport, MemoryService, Reply};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

const BASE: &str = "http://config.test";

fn service() -> Arc<CountingTransport> {
    Arc::new(CountingTransport::new(BASE, Reply::Service(MemoryService::new())))
}

fn client_for(transport: &Arc<CountingTransport>, application: &str) -> ConfigClient {
    ConfigClient::builder()
        .with_service_url(BASE)
        .with_application(application)
        .without_machine_detection()
        .with_transport(Arc::clone(transport))
        .build()
        .unwrap()
}

fn missing_field(err: ClientError) -> String {
    match err {
        ClientError::Configuration(ValidationError::MissingField { field }) => field,
        other => panic!("expected a missing field error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_service_url_fails_every_operation_without_network() {
    let transport = service();
    let client = ConfigClient::builder()
        .with_application("A")
        .without_machine_detection()
        .with_transport(Arc::clone(&transport))
        .build()
        .unwrap();
    let item = ConfigItem::new("A", "n", "v");

    assert_eq!(missing_field(client.get("n").await.unwrap_err()), "service_url");
    assert_eq!(missing_field(client.get_all().await.unwrap_err()), "service_url");
    assert_eq!(missing_field(client.set(&item).await.unwrap_err()), "service_url");
    assert_eq!(missing_field(client.remove(&item).await.unwrap_err()), "service_url");

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_get_requires_application() {
    let transport = service();
    let client = client_for(&transport, "");

    assert_eq!(missing_field(client.get("n").await.unwrap_err()), "application");
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_remove_requires_application_and_name() {
    let transport = service();
    let client = client_for(&transport, "A");

    let no_app = ConfigItem::new("", "n", "");
    assert_eq!(missing_field(client.remove(&no_app).await.unwrap_err()), "application");

    let no_name = ConfigItem::new("A", "", "");
    assert_eq!(missing_field(client.remove(&no_name).await.unwrap_err()), "name");

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_set_requires_application() {
    let transport = service();
    let client = client_for(&transport, "A");

    let err = client.set(&ConfigItem::new("", "n", "v")).await.unwrap_err();
    assert_eq!(missing_field(err), "application");
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_set_then_get_round_trip() {
    let transport = service();
    let client = client_for(&transport, "A");

    let stored = assert_ok!(client.set(&ConfigItem::new("A", "n", "v1")).await);
    assert_eq!(stored.status, 200);
    assert!(stored.data.id.is_some());
    assert!(stored.data.last_updated.is_some());

    let fetched = assert_ok!(client.get("n").await);
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.data.value, "v1");

    // upsert replaces the value in place
    let updated = assert_ok!(client.set(&ConfigItem::new("A", "n", "v2")).await);
    assert_eq!(updated.data.id, stored.data.id);
    assert_eq!(assert_ok!(client.get("n").await).data.value, "v2");

    assert_eq!(
        transport.paths(),
        ["/config/set", "/config/get", "/config/set", "/config/get"]
    );
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let transport = service();
    let client = client_for(&transport, "A");
    let item = ConfigItem::new("A", "n", "v");

    assert_ok!(client.set(&item).await);
    assert_ok!(client.remove(&item).await);
    assert_ok!(client.remove(&item).await);

    let second = assert_ok!(client.remove_with_response(&item).await);
    assert!(second.is_not_found());
}

#[tokio::test]
async fn test_machine_scoped_override() {
    let transport = service();
    let client = client_for(&transport, "A");

    assert_ok!(client.set(&ConfigItem::new("A", "n", "app-wide")).await);
    assert_ok!(client.set(&ConfigItem::new("A", "n", "v2").with_machine("m")).await);

    let on_m = assert_ok!(client.scoped_to("m").get("n").await);
    assert_eq!(on_m.data.value, "v2");

    let elsewhere = assert_ok!(client.scoped_to("other").get("n").await);
    assert_eq!(elsewhere.data.value, "app-wide");

    let unscoped = assert_ok!(client.get("n").await);
    assert_eq!(unscoped.data.value, "app-wide");
}

#[tokio::test]
async fn test_machine_scoped_without_fallback_is_not_found() {
    let transport = service();
    let client = client_for(&transport, "A");

    assert_ok!(client.set(&ConfigItem::new("A", "only", "v").with_machine("m")).await);

    let response = assert_ok!(client.get("only").await);
    assert!(response.is_not_found());
    assert_eq!(response.data, ConfigItem::default());
}

#[tokio::test]
async fn test_detected_machine_scopes_get() {
    let transport = service();
    let client = ConfigClient::builder()
        .with_service_url(BASE)
        .with_application("A")
        .with_machine_name_provider(|| Ok::<_, std::io::Error>("host-1".to_string()))
        .with_transport(Arc::clone(&transport))
        .build()
        .unwrap();

    assert_ok!(client.set(&ConfigItem::new("A", "n", "host value").with_machine("host-1")).await);
    assert_eq!(assert_ok!(client.get("n").await).data.value, "host value");
}

#[tokio::test]
async fn test_get_all_contains_items_of_every_application() {
    let transport = service();
    let client_a = client_for(&transport, "A");
    let client_b = client_for(&transport, "B");

    assert_ok!(client_a.set(&ConfigItem::new("A", "x", "1")).await);
    assert_ok!(client_b.set(&ConfigItem::new("B", "y", "2")).await);

    let all = assert_ok!(client_a.get_all().await);
    assert!(all.data.len() >= 2);

    let has = |app: &str, name: &str, value: &str| {
        all.data
            .iter()
            .any(|i| i.application == app && i.name == name && i.value == value)
    };
    assert!(has("A", "x", "1"));
    assert!(has("B", "y", "2"));

    let only_b = assert_ok!(client_a.get_all_for_application("B").await);
    assert_eq!(only_b.data.len(), 1);

    let apps = assert_ok!(client_a.get_all_applications().await);
    assert_eq!(apps.data, ["A", "B"]);
}

#[tokio::test]
async fn test_get_string() {
    let transport = service();
    let client = client_for(&transport, "A");

    assert_ok!(client.set(&ConfigItem::new("A", "timeout", "30s")).await);
    assert_eq!(client.get_string("timeout", "10s").await, "30s");
    assert_eq!(client.get_string("missing", "10s").await, "10s");
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let transport = service();
    let client = client_for(&transport, "A");
    let item = ConfigItem::new("A", "k", "v1");

    let set = assert_ok!(client.set(&item).await);
    assert_eq!(set.status, 200);
    assert_eq!(set.data.application, "A");
    assert_eq!(set.data.name, "k");
    assert_eq!(set.data.value, "v1");

    let got = assert_ok!(client.get("k").await);
    assert_eq!(got.status, 200);
    assert_eq!(got.data.value, "v1");

    assert_ok!(client.remove(&ConfigItem::new("A", "k", "")).await);

    let gone = assert_ok!(client.get("k").await);
    assert_ne!(gone.status, 200);
    assert!(gone.is_not_found());
}

#[tokio::test]
async fn test_malformed_json_is_decode_error_for_every_operation() {
    let transport = Arc::new(CountingTransport::new(BASE, Reply::Fixed("{\"status\": 200, ")));
    let client = client_for(&transport, "A");
    let item = ConfigItem::new("A", "n", "v");

    let errors = [
        client.get("n").await.unwrap_err(),
        client.get_all().await.unwrap_err(),
        client.set(&item).await.unwrap_err(),
        client.remove(&item).await.unwrap_err(),
    ];

    for err in errors {
        match err {
            ClientError::Decode { body, .. } => assert_eq!(body, "{\"status\": 200, "),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
    assert_eq!(transport.calls(), 4);
}

#[tokio::test]
async fn test_wrong_envelope_shape_is_decode_error() {
    let transport = Arc::new(CountingTransport::new(
        BASE,
        Reply::Fixed(r#"{"status":200,"message":"","data":{"application":"A"}}"#),
    ));
    let client = client_for(&transport, "A");

    // a single item where a collection is expected
    assert!(client.get_all().await.unwrap_err().is_decode());
}

#[tokio::test]
async fn test_transport_error_is_propagated() {
    let transport = Arc::new(CountingTransport::new(BASE, Reply::ConnectionRefused));
    let client = client_for(&transport, "A");

    let err = assert_err!(client.get("n").await);
    assert!(err.is_transport());
    assert!(err.to_string().contains("connection refused"));

    assert!(client.remove(&ConfigItem::new("A", "n", "")).await.unwrap_err().is_transport());
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let transport = service();
    let client = client_for(&transport, "A");

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let item = ConfigItem::new("A", format!("key{i}"), format!("{i}"));
            client.set(&item).await
        }));
    }
    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }

    let all = assert_ok!(client.get_all().await);
    assert_eq!(all.data.len(), 8);
    assert_eq!(transport.calls(), 9);
}

#[tokio::test]
async fn test_cancelled_call_reports_cancellation() {
    let transport = service();
    let client = client_for(&transport, "A");

    let result = until_cancelled(client.get("n"), async {}).await;
    assert!(result.unwrap_err().is_cancelled());
}
