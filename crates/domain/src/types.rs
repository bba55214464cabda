//! Wire-adjacent value types
//!
//! These structures mirror what the JSON-RPC endpoint expects on the wire;
//! the SDK never interprets their contents beyond serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric identifier of a record within a model
pub type RecordId = i64;

/// One `(field, operator, value)` condition of a search domain.
///
/// Serializes as a three-element array, which is the shape the remote
/// service interprets. The SDK treats the contents as opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainTerm(pub String, pub String, pub Value);

impl DomainTerm {
    /// Build a condition from a field name, operator and JSON value.
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self(field.into(), operator.into(), value.into())
    }
}

/// Ordered list of search conditions, interpreted server-side
pub type Domain = Vec<DomainTerm>;

/// Ordered `(code, label)` pairs of a selection field, as reported by the
/// model metadata. Lookup helpers must respect the reported order.
pub type SelectionPairs = Vec<(String, String)>;

/// One unit of a batched multi-operation round trip.
///
/// The remote service applies batch entries in submission order; failure of
/// one entry aborts the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCall {
    /// Target model, e.g. `project.task`
    pub model: String,
    /// ORM method name, e.g. `write`
    pub method: String,
    /// Positional arguments
    pub args: Vec<Value>,
    /// Keyword arguments
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl BatchCall {
    /// Build a batch entry with empty keyword arguments.
    pub fn new(model: impl Into<String>, method: impl Into<String>, args: Vec<Value>) -> Self {
        Self { model: model.into(), method: method.into(), args, kwargs: Map::new() }
    }

    /// Attach keyword arguments to the entry.
    #[must_use]
    pub fn with_kwargs(mut self, kwargs: Map<String, Value>) -> Self {
        self.kwargs = kwargs;
        self
    }
}
