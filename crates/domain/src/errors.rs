//! Error types used throughout the SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Odoo SDK
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum OdooError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("RPC error: {0}")]
    Rpc(serde_json::Value),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OdooError {
    /// Human-readable message of a remote RPC error payload, when present.
    ///
    /// Odoo error objects carry a top-level `message` plus a nested
    /// `data.message` with more detail; the nested one wins.
    pub fn rpc_message(&self) -> Option<&str> {
        match self {
            Self::Rpc(payload) => payload
                .pointer("/data/message")
                .or_else(|| payload.get("message"))
                .and_then(serde_json::Value::as_str),
            _ => None,
        }
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, OdooError>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rpc_message_prefers_nested_data_message() {
        let err = OdooError::Rpc(json!({
            "code": 200,
            "message": "Odoo Server Error",
            "data": {"message": "Access Denied"}
        }));
        assert_eq!(err.rpc_message(), Some("Access Denied"));
    }

    #[test]
    fn rpc_message_falls_back_to_top_level() {
        let err = OdooError::Rpc(json!({"message": "Odoo Server Error"}));
        assert_eq!(err.rpc_message(), Some("Odoo Server Error"));
    }

    #[test]
    fn rpc_message_is_none_for_other_variants() {
        assert!(OdooError::Network("down".into()).rpc_message().is_none());
    }
}
