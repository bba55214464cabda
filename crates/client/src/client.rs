//! High-level JSON-RPC client
//!
//! `OdooClient` wires the transport, envelope and session layers together
//! and exposes the generic CRUD facade every higher-level helper is built
//! on. No operation at this layer retries: retry is the transport's
//! exclusive responsibility.

use std::sync::Arc;
use std::time::Duration;

use odoo_domain::constants::{SERVICE_COMMON, SERVICE_OBJECT};
use odoo_domain::{Domain, OdooConfig, OdooError, RecordId, Result, SelectionPairs};
use serde_json::{json, Map, Value};

use crate::http::HttpTransport;
use crate::observability::{TracingWarnSink, WarnSink};
use crate::rpc::{RpcEndpoint, Session};

/// Offset, limit and ordering for `search`.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Number of matching records to skip
    pub offset: u64,
    /// Maximum number of ids to return; `None` means no limit
    pub limit: Option<u64>,
    /// Server-side ordering clause, e.g. `"sequence asc"`
    pub order: Option<String>,
}

/// Field selection, offset, limit and ordering for `search_read`.
#[derive(Debug, Clone, Default)]
pub struct SearchReadOptions {
    /// Fields to return; `None` means all readable fields
    pub fields: Option<Vec<String>>,
    /// Number of matching records to skip
    pub offset: u64,
    /// Maximum number of records to return; `None` means no limit
    pub limit: Option<u64>,
    /// Server-side ordering clause
    pub order: Option<String>,
}

/// High-level JSON-RPC client for one Odoo database.
///
/// Holds per-instance mutable state (the cached uid); callers that need
/// isolation between concurrent workflows should use independent client
/// instances. Construction is cheap and performs no network I/O —
/// authentication happens lazily on the first authenticated call.
pub struct OdooClient {
    config: OdooConfig,
    endpoint: RpcEndpoint,
    session: Session,
    warn_sink: Arc<dyn WarnSink>,
}

impl OdooClient {
    /// Create a client from connection settings.
    ///
    /// # Errors
    /// Returns `OdooError::Network` if the underlying HTTP client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(config: OdooConfig) -> Result<Self> {
        Self::with_warn_sink(config, Arc::new(TracingWarnSink))
    }

    /// Create a client with a custom warning sink.
    pub fn with_warn_sink(config: OdooConfig, warn_sink: Arc<dyn WarnSink>) -> Result<Self> {
        let transport = HttpTransport::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .verify_ssl(config.verify_ssl)
            .build()?;

        let url = config.url.trim_end_matches('/').to_string();
        let endpoint = RpcEndpoint::new(url, transport);
        let session =
            Session::new(config.db.clone(), config.username.clone(), config.api_key.clone());

        Ok(Self { config, endpoint, session, warn_sink })
    }

    /// The connection settings this client was built from.
    pub fn config(&self) -> &OdooConfig {
        &self.config
    }

    pub(crate) fn endpoint(&self) -> &RpcEndpoint {
        &self.endpoint
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn emit_warning(&self, message: &str) {
        self.warn_sink.warn(message);
    }

    /// Authenticate eagerly and return the uid.
    ///
    /// Calling this is optional: any authenticated operation authenticates
    /// transparently on first use.
    pub async fn authenticate(&self) -> Result<i64> {
        self.session.authenticate(&self.endpoint).await
    }

    /// Forget the cached uid so the next authenticated call re-authenticates.
    ///
    /// The remote never invalidates uids behind the SDK's back within a
    /// session's normal lifetime; this is the explicit recovery lever after
    /// an authorization failure.
    pub async fn invalidate_session(&self) {
        self.session.invalidate().await;
    }

    /// Server version metadata, via the unauthenticated common service.
    pub async fn version(&self) -> Result<Value> {
        self.endpoint.call(SERVICE_COMMON, "version", vec![]).await
    }

    /// Invoke an arbitrary ORM method through `object.execute_kw`.
    ///
    /// Authenticates lazily when no uid is cached. The database name, uid
    /// and API key are prepended as the protocol's leading arguments.
    pub async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> Result<Value> {
        let uid = self.session.uid(&self.endpoint).await?;
        let rpc_args = vec![
            json!(self.session.db()),
            json!(uid),
            json!(self.session.api_key()),
            json!(model),
            json!(method),
            Value::Array(args),
            Value::Object(kwargs),
        ];
        self.endpoint.call(SERVICE_OBJECT, "execute_kw", rpc_args).await
    }

    // ------------------------- generic CRUD facade --------------------------

    /// Create one record and return its id.
    pub async fn create(&self, model: &str, values: Value) -> Result<RecordId> {
        let result = self.execute_kw(model, "create", vec![values], Map::new()).await?;
        result
            .as_i64()
            .ok_or_else(|| OdooError::Internal(format!("create did not return an id: {result}")))
    }

    /// Read records by id, optionally restricted to a set of fields.
    pub async fn read(
        &self,
        model: &str,
        ids: &[RecordId],
        fields: Option<&[&str]>,
    ) -> Result<Vec<Value>> {
        let fields_value = match fields {
            Some(fields) => json!(fields),
            None => json!([]),
        };
        let result = self.execute_kw(model, "read", vec![json!(ids), fields_value], Map::new()).await?;
        expect_list("read", result)
    }

    /// Write values on a set of records. Returns the remote's success flag;
    /// a nonexistent id typically yields `false` rather than an error.
    pub async fn update(&self, model: &str, ids: &[RecordId], values: Value) -> Result<bool> {
        let result = self.execute_kw(model, "write", vec![json!(ids), values], Map::new()).await?;
        Ok(truthy(&result))
    }

    /// Hard-delete a set of records. Returns the remote's success flag.
    pub async fn delete(&self, model: &str, ids: &[RecordId]) -> Result<bool> {
        let result = self.execute_kw(model, "unlink", vec![json!(ids)], Map::new()).await?;
        Ok(truthy(&result))
    }

    /// Search for record ids matching a domain.
    pub async fn search(
        &self,
        model: &str,
        domain: Domain,
        options: &SearchOptions,
    ) -> Result<Vec<RecordId>> {
        let args = vec![
            serde_json::to_value(domain).map_err(invalid_domain)?,
            json!(options.offset),
            json!(options.limit),
            json!(options.order),
        ];
        let result = self.execute_kw(model, "search", args, Map::new()).await?;
        let items = expect_list("search", result)?;
        items
            .into_iter()
            .map(|item| {
                item.as_i64()
                    .ok_or_else(|| OdooError::Internal(format!("search returned a non-id: {item}")))
            })
            .collect()
    }

    /// Search and read in one server-side round trip.
    pub async fn search_read(
        &self,
        model: &str,
        domain: Domain,
        options: &SearchReadOptions,
    ) -> Result<Vec<Value>> {
        let mut kwargs = Map::new();
        if let Some(fields) = &options.fields {
            kwargs.insert("fields".into(), json!(fields));
        }
        if options.offset > 0 {
            kwargs.insert("offset".into(), json!(options.offset));
        }
        if let Some(limit) = options.limit {
            kwargs.insert("limit".into(), json!(limit));
        }
        if let Some(order) = &options.order {
            kwargs.insert("order".into(), json!(order));
        }

        let args = vec![serde_json::to_value(domain).map_err(invalid_domain)?];
        let result = self.execute_kw(model, "search_read", args, kwargs).await?;
        expect_list("search_read", result)
    }

    /// Count the records matching a domain.
    pub async fn search_count(&self, model: &str, domain: Domain) -> Result<u64> {
        let args = vec![serde_json::to_value(domain).map_err(invalid_domain)?];
        let result = self.execute_kw(model, "search_count", args, Map::new()).await?;
        result
            .as_u64()
            .ok_or_else(|| OdooError::Internal(format!("search_count did not return a count: {result}")))
    }

    /// Server-side aggregation rows (sum, count, average, ...).
    pub async fn read_group(
        &self,
        model: &str,
        fields: &[&str],
        groupby: &[&str],
        domain: Domain,
    ) -> Result<Vec<Value>> {
        let args = vec![
            serde_json::to_value(domain).map_err(invalid_domain)?,
            json!(fields),
            json!(groupby),
        ];
        let result = self.execute_kw(model, "read_group", args, Map::new()).await?;
        expect_list("read_group", result)
    }

    // ----------------------------- metadata ---------------------------------

    /// Field metadata for a model, optionally restricted to attributes.
    pub async fn fields_get(&self, model: &str, attributes: &[&str]) -> Result<Value> {
        let mut kwargs = Map::new();
        kwargs.insert("attributes".into(), json!(attributes));
        self.execute_kw(model, "fields_get", vec![json!([])], kwargs).await
    }

    /// Ordered `(code, label)` pairs of a selection field.
    pub async fn selection_labels(&self, model: &str, field: &str) -> Result<SelectionPairs> {
        let meta = self.fields_get(model, &["selection"]).await?;
        let selection = meta
            .pointer(&format!("/{field}/selection"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                OdooError::InvalidInput(format!("model {model} has no selection field {field}"))
            })?;

        let pairs = selection
            .iter()
            .filter_map(|pair| {
                let code = pair.get(0)?.as_str()?;
                let label = pair.get(1)?.as_str()?;
                Some((code.to_string(), label.to_string()))
            })
            .collect();
        Ok(pairs)
    }

    /// Duplicate a record through the ORM `copy` method and return the new id.
    pub async fn copy_record(
        &self,
        model: &str,
        record_id: RecordId,
        defaults: Option<Value>,
    ) -> Result<RecordId> {
        let args = vec![json!([record_id]), defaults.unwrap_or_else(|| json!({}))];
        let result = self.execute_kw(model, "copy", args, Map::new()).await?;
        result
            .as_i64()
            .ok_or_else(|| OdooError::Internal(format!("copy did not return an id: {result}")))
    }
}

fn invalid_domain(err: serde_json::Error) -> OdooError {
    OdooError::InvalidInput(format!("domain is not serializable: {err}"))
}

fn expect_list(method: &str, result: Value) -> Result<Vec<Value>> {
    match result {
        Value::Array(items) => Ok(items),
        other => Err(OdooError::Internal(format!("{method} did not return a list: {other}"))),
    }
}

/// Truthiness the way the remote's success flags are meant to be read:
/// `false`, `null`, zero and empty containers all signal failure.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn truthy_mirrors_remote_success_flags() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("ok")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&Value::Null));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!([])));
        assert!(!truthy(&json!({})));
    }

    #[test]
    fn expect_list_rejects_scalars() {
        assert!(expect_list("read", json!([1, 2])).is_ok());
        assert!(matches!(expect_list("read", json!(true)), Err(OdooError::Internal(_))));
    }
}
