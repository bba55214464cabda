use std::sync::atomic::{AtomicU64, Ordering};

use odoo_domain::{OdooError, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::TransportError;
use crate::http::HttpTransport;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: RpcParams<'a>,
    id: u64,
}

#[derive(Serialize)]
struct RpcParams<'a> {
    service: &'a str,
    method: &'a str,
    args: &'a [Value],
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Frames `(service, method, args)` calls into the JSON-RPC 2.0 envelope.
///
/// Request identifiers come from a per-endpoint monotonically increasing
/// counter; the remote service uses them for correlation only.
pub struct RpcEndpoint {
    url: String,
    transport: HttpTransport,
    next_id: AtomicU64,
}

impl RpcEndpoint {
    /// Wrap a transport around the `/jsonrpc` endpoint URL.
    pub fn new(url: impl Into<String>, transport: HttpTransport) -> Self {
        Self { url: url.into(), transport, next_id: AtomicU64::new(1) }
    }

    /// The endpoint URL calls are submitted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit one call and decode the response.
    ///
    /// Returns the `result` field verbatim (`Value::Null` when absent). A
    /// decoded response carrying an `error` field is surfaced as
    /// [`OdooError::Rpc`] with the remote payload; repeating such a call
    /// would likely reproduce the same logical error, so nothing at or
    /// below this layer retries it.
    pub async fn call(&self, service: &str, method: &str, args: Vec<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = RpcRequest {
            jsonrpc: "2.0",
            method: "call",
            params: RpcParams { service, method, args: &args },
            id,
        };

        debug!(service, method, id, "RPC call");

        let builder = self.transport.request(Method::POST, &self.url).json(&envelope);
        let response = self.transport.send(builder).await?;

        let decoded: RpcResponse = response.json().await.map_err(|err| {
            let transport: TransportError = err.into();
            OdooError::from(transport)
        })?;

        if let Some(payload) = decoded.error {
            error!(service, method, id, %payload, "RPC error");
            return Err(OdooError::Rpc(payload));
        }

        Ok(decoded.result.unwrap_or(Value::Null))
    }
}
