//! Environment configuration loader
//!
//! ## Environment Variables
//! - `ODOO_URL`: The `/jsonrpc` endpoint URL (required)
//! - `ODOO_DB`: Database name (required)
//! - `ODOO_USERNAME`: Login of the API user (required)
//! - `ODOO_API_KEY`: API key or password (required)
//! - `ODOO_TIMEOUT_SECS`: Per-call timeout in seconds (optional)
//! - `ODOO_VERIFY_SSL`: Verify TLS certificates, true/false (optional)

use odoo_domain::{OdooConfig, OdooError, Result};

/// Load connection settings from environment variables.
///
/// # Errors
/// Returns `OdooError::Config` if a required variable is missing or a value
/// fails to parse.
pub fn load_from_env() -> Result<OdooConfig> {
    let url = env_var("ODOO_URL")?;
    let db = env_var("ODOO_DB")?;
    let username = env_var("ODOO_USERNAME")?;
    let api_key = env_var("ODOO_API_KEY")?;

    let mut config = OdooConfig::new(url, db, username, api_key);

    if let Ok(raw) = std::env::var("ODOO_TIMEOUT_SECS") {
        let secs = raw
            .parse::<u64>()
            .map_err(|e| OdooError::Config(format!("Invalid ODOO_TIMEOUT_SECS: {e}")))?;
        config = config.with_timeout_secs(secs);
    }

    config = config.with_verify_ssl(env_bool("ODOO_VERIFY_SSL", true));
    Ok(config)
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| OdooError::Config(format!("{name} is not set")))
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}
