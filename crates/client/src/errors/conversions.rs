//! Conversions from transport-layer errors into domain errors.

use odoo_domain::OdooError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the client side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct TransportError(pub OdooError);

impl From<TransportError> for OdooError {
    fn from(value: TransportError) -> Self {
        value.0
    }
}

impl From<OdooError> for TransportError {
    fn from(value: OdooError) -> Self {
        TransportError(value)
    }
}

impl From<HttpError> for TransportError {
    fn from(value: HttpError) -> Self {
        TransportError(http_error_to_domain(value))
    }
}

fn http_error_to_domain(err: HttpError) -> OdooError {
    if err.is_timeout() {
        return OdooError::Network("HTTP request timed out".into());
    }

    if err.is_connect() {
        return OdooError::Network("HTTP connection failure".into());
    }

    if err.is_decode() {
        return OdooError::Internal(format!("failed to decode HTTP response body: {err}"));
    }

    if let Some(status) = err.status() {
        let code = status.as_u16();
        let message =
            format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

        return match code {
            401 | 403 => OdooError::Auth(message),
            400..=499 => OdooError::Client(message),
            _ => OdooError::Network(message),
        };
    }

    OdooError::Network(err.to_string())
}
