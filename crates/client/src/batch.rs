//! Batched multi-call execution
//!
//! Bundles heterogeneous ORM calls into a single round trip. The remote
//! applies entries in submission order and aborts the whole batch when one
//! entry fails; no partial-commit semantics are exposed here.

use odoo_domain::constants::SERVICE_OBJECT;
use odoo_domain::{BatchCall, OdooError, RecordId, Result};
use serde_json::{json, Value};

use crate::client::OdooClient;

impl OdooClient {
    /// Execute a list of method calls in a single round trip.
    ///
    /// Returns the remote's per-call result list in submission order.
    pub async fn execute_batch(&self, calls: &[BatchCall]) -> Result<Vec<Value>> {
        let uid = self.session().uid(self.endpoint()).await?;
        let args = vec![
            json!(self.session().db()),
            json!(uid),
            json!(self.session().api_key()),
            serde_json::to_value(calls)
                .map_err(|err| OdooError::InvalidInput(format!("batch is not serializable: {err}")))?,
        ];

        let result = self.endpoint().call(SERVICE_OBJECT, "execute", args).await?;
        match result {
            Value::Array(items) => Ok(items),
            other => Err(OdooError::Internal(format!("batch result was not a list: {other}"))),
        }
    }

    /// Mass updates with a single round trip.
    ///
    /// Builds one `write` entry per `(id, values)` pair, preserving the
    /// input order. The returned list's length is the only success signal
    /// the remote exposes; per-record outcomes are not reported.
    pub async fn bulk_write(
        &self,
        model: &str,
        writes: &[(RecordId, Value)],
    ) -> Result<Vec<Value>> {
        let calls: Vec<BatchCall> = writes
            .iter()
            .map(|(record_id, values)| {
                BatchCall::new(model, "write", vec![json!([record_id]), values.clone()])
            })
            .collect();
        self.execute_batch(&calls).await
    }
}
