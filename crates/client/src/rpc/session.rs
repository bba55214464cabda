use odoo_domain::constants::SERVICE_COMMON;
use odoo_domain::{OdooError, Result};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use super::RpcEndpoint;

/// Credentials and the lazily obtained user id for one client instance.
///
/// The uid is populated on first authenticated call or by an explicit
/// [`Session::authenticate`] and is never persisted. Expiry does not trigger
/// automatic re-authentication: a stale uid surfaces as the remote's
/// authorization error, and callers recover by calling
/// [`Session::invalidate`] and retrying.
pub struct Session {
    db: String,
    username: String,
    api_key: String,
    uid: Mutex<Option<i64>>,
}

impl Session {
    /// Create an unauthenticated session from credentials.
    pub fn new(db: impl Into<String>, username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            username: username.into(),
            api_key: api_key.into(),
            uid: Mutex::new(None),
        }
    }

    /// Database name the session is bound to.
    pub fn db(&self) -> &str {
        &self.db
    }

    /// Credential secret, passed as a leading argument on authenticated calls.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Perform one authentication round trip and cache the returned uid.
    ///
    /// The remote replies with `false` (or another non-integer) when the
    /// credentials are rejected, which is surfaced as [`OdooError::Auth`].
    pub async fn authenticate(&self, endpoint: &RpcEndpoint) -> Result<i64> {
        let result = endpoint
            .call(
                SERVICE_COMMON,
                "authenticate",
                vec![json!(self.db), json!(self.username), json!(self.api_key), json!({})],
            )
            .await?;

        let uid = result
            .as_i64()
            .ok_or_else(|| OdooError::Auth(format!("authenticate did not return a uid: {result}")))?;

        *self.uid.lock().await = Some(uid);
        info!(uid, db = %self.db, "authenticated");
        Ok(uid)
    }

    /// Cached uid, authenticating on first use.
    pub async fn uid(&self, endpoint: &RpcEndpoint) -> Result<i64> {
        if let Some(uid) = *self.uid.lock().await {
            return Ok(uid);
        }
        self.authenticate(endpoint).await
    }

    /// Cached uid without triggering authentication.
    pub async fn cached_uid(&self) -> Option<i64> {
        *self.uid.lock().await
    }

    /// Forget the cached uid so the next authenticated call re-authenticates.
    pub async fn invalidate(&self) {
        *self.uid.lock().await = None;
    }
}
