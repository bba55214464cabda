use std::time::Duration;

use odoo_domain::constants::{DEFAULT_BACKOFF_SECS, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS};
use odoo_domain::{OdooError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::TransportError;

/// HTTP transport with bounded retry, per-call timeout and a TLS
/// verification policy.
///
/// Connection-level failures and 5xx responses are retried with exponential
/// backoff up to the configured attempt budget; 4xx responses are surfaced
/// immediately without retry. Application-level RPC errors never reach this
/// layer — they ride inside successful HTTP responses.
#[derive(Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpTransport {
    /// Start building a new transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    ///
    /// Returns the response only for success statuses; any other status is
    /// converted into the corresponding [`OdooError`] once the retry budget
    /// is spent.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                OdooError::Internal(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                )
            })?;

            let request = cloned_builder.build().map_err(|err| {
                let transport: TransportError = err.into();
                OdooError::from(transport)
            })?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if status.is_success() {
                        return Ok(response);
                    }

                    if status.is_client_error() {
                        return Err(OdooError::Client(status_message(status)));
                    }

                    if attempt + 1 < attempts {
                        warn!(%status, attempt = attempt + 1, "transient server error, retrying");
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(OdooError::Network(status_message(status)));
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %url, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && is_transient(&err) {
                        warn!(error = %err, attempt = attempt + 1, "transient network error, retrying");
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    let transport: TransportError = err.into();
                    return Err(OdooError::from(transport));
                }
            }
        }

        Err(OdooError::Internal("transport exhausted retries without producing a result".into()))
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    verify_ssl: bool,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: Duration::from_secs(DEFAULT_BACKOFF_SECS),
            verify_ssl: true,
        }
    }
}

impl HttpTransportBuilder {
    /// Per-call network timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    #[must_use]
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Base delay for the exponential backoff schedule (doubled per retry).
    #[must_use]
    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Whether TLS certificates are verified. Disabling this is only
    /// appropriate for self-hosted instances with self-signed certificates.
    #[must_use]
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if !self.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| {
            let transport: TransportError = err.into();
            OdooError::from(transport)
        })?;

        Ok(HttpTransport {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn status_message(status: reqwest::StatusCode) -> String {
    format!("HTTP {} {}", status.as_u16(), status.canonical_reason().unwrap_or("unknown status"))
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
