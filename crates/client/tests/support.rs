#![allow(dead_code)]

use std::sync::Arc;

use odoo_client::{BufferWarnSink, OdooClient};
use odoo_domain::OdooConfig;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Connection settings pointing at a mock server.
pub fn test_config(server: &MockServer) -> OdooConfig {
    OdooConfig::new(server.uri(), "testdb", "bot@example.com", "secret").with_timeout_secs(5)
}

/// Client wired to a mock server with the default warn sink.
pub fn test_client(server: &MockServer) -> OdooClient {
    OdooClient::new(test_config(server)).expect("client should build")
}

/// Client wired to a mock server with a buffering warn sink for assertions.
pub fn client_with_sink(server: &MockServer) -> (OdooClient, Arc<BufferWarnSink>) {
    let sink = Arc::new(BufferWarnSink::new());
    let client = OdooClient::with_warn_sink(test_config(server), sink.clone())
        .expect("client should build");
    (client, sink)
}

/// Successful JSON-RPC response template wrapping `result`.
pub fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 0, "result": result}))
}

/// Mount the common-service authenticate mock, expected exactly once.
pub async fn mount_authenticate(server: &MockServer, uid: i64) {
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({"params": {"service": "common", "method": "authenticate"}}),
        ))
        .respond_with(rpc_result(json!(uid)))
        .expect(1)
        .mount(server)
        .await;
}

/// Parse a captured request body as JSON.
pub fn body_json(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

/// True when a captured request targets the object service.
pub fn is_object_call(request: &wiremock::Request) -> bool {
    body_json(request)["params"]["service"] == "object"
}

/// Decompose an `execute_kw` request body into (model, method, args, kwargs).
pub fn execute_kw_parts(body: &Value) -> (String, String, Value, Value) {
    let wire_args = body["params"]["args"].as_array().expect("args should be a list");
    assert_eq!(wire_args.len(), 7, "execute_kw carries 7 leading+payload args");
    assert_eq!(wire_args[0], "testdb");
    assert_eq!(wire_args[2], "secret");
    (
        wire_args[3].as_str().expect("model").to_string(),
        wire_args[4].as_str().expect("method").to_string(),
        wire_args[5].clone(),
        wire_args[6].clone(),
    )
}
