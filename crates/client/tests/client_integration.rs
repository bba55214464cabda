//! End-to-end facade behavior against a mock JSON-RPC endpoint.

mod support;

use odoo_client::{OdooError, SearchOptions, SearchReadOptions};
use serde_json::json;
use support::{
    body_json, execute_kw_parts, is_object_call, mount_authenticate, rpc_result, test_client,
};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer};

fn object_mock() -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"params": {"service": "object", "method": "execute_kw"}})))
}

#[tokio::test]
async fn authenticates_lazily_and_only_once() {
    let server = MockServer::start().await;
    mount_authenticate(&server, 42).await;
    object_mock().respond_with(rpc_result(json!(true))).expect(2).mount(&server).await;

    let client = test_client(&server);

    // construction performs no network I/O
    assert!(server.received_requests().await.unwrap().is_empty());

    client.update("project.task", &[1], json!({"name": "a"})).await.expect("first update");
    client.update("project.task", &[1], json!({"name": "b"})).await.expect("second update");

    let requests = server.received_requests().await.unwrap();
    // one authenticate round trip, then one per operation
    assert_eq!(requests.len(), 3);
    let auth_calls =
        requests.iter().filter(|r| body_json(r)["params"]["service"] == "common").count();
    assert_eq!(auth_calls, 1);
}

#[tokio::test]
async fn uid_is_threaded_into_authenticated_calls() {
    let server = MockServer::start().await;
    mount_authenticate(&server, 42).await;
    object_mock().respond_with(rpc_result(json!(17))).mount(&server).await;

    let client = test_client(&server);
    let id = client.create("project.project", json!({"name": "Playground"})).await.expect("create");
    assert_eq!(id, 17);

    let requests = server.received_requests().await.unwrap();
    let create_req = requests.iter().find(|r| is_object_call(r)).expect("create call");
    let body = body_json(create_req);
    assert_eq!(body["params"]["args"][1], 42, "cached uid is the second leading argument");

    let (model, method, args, kwargs) = execute_kw_parts(&body);
    assert_eq!(model, "project.project");
    assert_eq!(method, "create");
    assert_eq!(args, json!([{"name": "Playground"}]));
    assert_eq!(kwargs, json!({}));
}

#[tokio::test]
async fn search_sends_domain_offset_limit_and_order_positionally() {
    let server = MockServer::start().await;
    mount_authenticate(&server, 42).await;
    object_mock().respond_with(rpc_result(json!([3, 1, 2]))).mount(&server).await;

    let client = test_client(&server);
    let domain = vec![odoo_domain::DomainTerm::new("active", "=", true)];
    let options = SearchOptions { offset: 5, limit: Some(10), order: Some("id desc".into()) };
    let ids = client.search("project.task", domain, &options).await.expect("search");
    assert_eq!(ids, vec![3, 1, 2]);

    let requests = server.received_requests().await.unwrap();
    let search_req = requests.iter().find(|r| is_object_call(r)).expect("search call");
    let (_, method, args, _) = execute_kw_parts(&body_json(search_req));
    assert_eq!(method, "search");
    assert_eq!(args, json!([[["active", "=", true]], 5, 10, "id desc"]));
}

#[tokio::test]
async fn search_read_packs_options_as_kwargs() {
    let server = MockServer::start().await;
    mount_authenticate(&server, 42).await;
    object_mock().respond_with(rpc_result(json!([{"id": 1, "name": "x"}]))).mount(&server).await;

    let client = test_client(&server);
    let options = SearchReadOptions {
        fields: Some(vec!["id".into(), "name".into()]),
        offset: 0,
        limit: Some(80),
        order: None,
    };
    let records = client.search_read("project.project", vec![], &options).await.expect("search_read");
    assert_eq!(records.len(), 1);

    let requests = server.received_requests().await.unwrap();
    let req = requests.iter().find(|r| is_object_call(r)).expect("search_read call");
    let (_, method, args, kwargs) = execute_kw_parts(&body_json(req));
    assert_eq!(method, "search_read");
    assert_eq!(args, json!([[]]));
    // a zero offset is omitted entirely
    assert_eq!(kwargs, json!({"fields": ["id", "name"], "limit": 80}));
}

#[tokio::test]
async fn update_with_identical_values_is_idempotent() {
    let server = MockServer::start().await;
    mount_authenticate(&server, 42).await;
    object_mock().respond_with(rpc_result(json!(true))).expect(2).mount(&server).await;

    let client = test_client(&server);
    let first = client.update("project.task", &[7], json!({"name": "same"})).await.expect("first");
    let second = client.update("project.task", &[7], json!({"name": "same"})).await.expect("second");
    assert!(first);
    assert_eq!(first, second);

    let requests = server.received_requests().await.unwrap();
    let writes: Vec<_> = requests.iter().filter(|r| is_object_call(r)).collect();
    assert_eq!(writes.len(), 2);
    assert_eq!(body_json(writes[0])["params"]["args"], body_json(writes[1])["params"]["args"]);
}

#[tokio::test]
async fn missing_records_surface_as_false_not_errors() {
    let server = MockServer::start().await;
    mount_authenticate(&server, 42).await;
    object_mock().respond_with(rpc_result(json!(false))).mount(&server).await;

    let client = test_client(&server);
    assert!(!client.update("project.task", &[9999], json!({"name": "x"})).await.expect("update"));
    assert!(!client.delete("project.task", &[9999]).await.expect("delete"));
}

#[tokio::test]
async fn remote_rpc_errors_carry_the_payload() {
    let server = MockServer::start().await;
    mount_authenticate(&server, 42).await;
    object_mock()
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 0,
            "error": {"code": 200, "message": "Odoo Server Error", "data": {"message": "missing field"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.create("project.task", json!({})).await;
    match result {
        Err(err @ OdooError::Rpc(_)) => assert_eq!(err.rpc_message(), Some("missing field")),
        other => panic!("expected RPC error, got {:?}", other),
    }
}

#[tokio::test]
async fn selection_labels_preserve_reported_order() {
    let server = MockServer::start().await;
    mount_authenticate(&server, 42).await;
    object_mock()
        .respond_with(rpc_result(json!({
            "state": {"selection": [["01_in_progress", "In Progress"], ["1_done", "Done"]]}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let pairs = client.selection_labels("project.task", "state").await.expect("labels");
    assert_eq!(
        pairs,
        vec![
            ("01_in_progress".to_string(), "In Progress".to_string()),
            ("1_done".to_string(), "Done".to_string()),
        ]
    );

    let missing = client.selection_labels("project.task", "nope").await;
    assert!(matches!(missing, Err(OdooError::InvalidInput(_))));
}

#[tokio::test]
async fn version_skips_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"params": {"service": "common", "method": "version"}})))
        .respond_with(rpc_result(json!({"server_version": "18.0"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let version = client.version().await.expect("version");
    assert_eq!(version["server_version"], "18.0");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
