//! Configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIMEOUT_SECS;

/// Connection settings for one Odoo database.
///
/// Supplied by the caller at construction time; the SDK has no independent
/// configuration-loading responsibility beyond the environment helper in the
/// client crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdooConfig {
    /// The `/jsonrpc` endpoint, e.g. `https://example.odoo.com/jsonrpc`
    pub url: String,
    /// Database name (visible in *Manage Databases* or the sub-domain)
    pub db: String,
    /// Login of the API user
    pub username: String,
    /// API key or password for the user
    pub api_key: String,
    /// Per-call network timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Verify TLS certificates
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

impl OdooConfig {
    /// Create a configuration with default timeout and TLS verification on.
    ///
    /// Trailing slashes on the endpoint URL are stripped so request URLs
    /// never double up separators.
    pub fn new(
        url: impl Into<String>,
        db: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let url = url.into().trim_end_matches('/').to_string();
        Self {
            url,
            db: db.into(),
            username: username.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
            verify_ssl: default_verify_ssl(),
        }
    }

    /// Override the per-call network timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Disable or re-enable TLS certificate verification.
    #[must_use]
    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_verify_ssl() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes_from_url() {
        let config = OdooConfig::new("https://my.odoo.com/jsonrpc///", "my", "bot", "key");
        assert_eq!(config.url, "https://my.odoo.com/jsonrpc");
    }

    #[test]
    fn defaults_to_verified_tls_and_thirty_second_timeout() {
        let config = OdooConfig::new("https://my.odoo.com/jsonrpc", "my", "bot", "key");
        assert!(config.verify_ssl);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = OdooConfig::new("https://my.odoo.com/jsonrpc", "my", "bot", "key")
            .with_timeout_secs(5)
            .with_verify_ssl(false);
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.verify_ssl);
    }
}
