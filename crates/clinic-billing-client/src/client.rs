//! Billing service HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use futures::TryStreamExt;
use reqwest::Client;
use tracing::{debug, warn};

use clinic_billing_core::{BillingRecord, Priority};

use crate::error::{ClientError, TransportError};
use crate::resolver::ServiceResolver;
use crate::stream::RecordStream;

/// Logical name the billing service is registered under.
const BILLING_SERVICE: &str = "billing-service";

/// Client for the billing service.
///
/// Resolves the logical name `billing-service` through the configured
/// [`ServiceResolver`] on every call and streams billing records back as they
/// are decoded. The client holds no mutable state and is cheap to clone;
/// construct it once and share it.
#[derive(Debug, Clone)]
pub struct BillingClient {
    http: Client,
    resolver: Arc<dyn ServiceResolver>,
    buffer: usize,
}

impl BillingClient {
    /// Create a new billing client with default options.
    #[must_use]
    pub fn new(resolver: impl ServiceResolver + 'static) -> Self {
        Self::with_options(resolver, ClientOptions::default())
    }

    /// Create a new billing client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(resolver: impl ServiceResolver + 'static, options: ClientOptions) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            resolver: Arc::new(resolver),
            buffer: options.buffer,
        }
    }

    /// Retrieve all billing records.
    ///
    /// Issues `GET /billings/` against the resolved billing service and
    /// returns the records as a lazy stream; the caller may start consuming
    /// before the full response has arrived.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::Transport`] if resolution or the connection
    /// fails, and with [`ClientError::Upstream`] if the billing service
    /// responds with a non-success status. Failures after the body has
    /// started streaming terminate the returned stream instead.
    pub async fn fetch_all_billings(&self) -> Result<RecordStream<BillingRecord>, ClientError> {
        self.fetch(&["billings", ""]).await
    }

    /// Retrieve billing records filtered server-side by priority.
    ///
    /// Issues `GET /billings/by-priority/{priority}` with the priority
    /// substituted as a percent-encoded path segment. The value is forwarded
    /// verbatim; if the billing service rejects it, that surfaces as an
    /// [`ClientError::Upstream`] with a 4xx status.
    ///
    /// # Errors
    ///
    /// Same contract as [`fetch_all_billings`](Self::fetch_all_billings).
    pub async fn fetch_billings_by_priority(
        &self,
        priority: &Priority,
    ) -> Result<RecordStream<BillingRecord>, ClientError> {
        self.fetch(&["billings", "by-priority", priority.as_str()])
            .await
    }

    /// Resolve the billing service, issue a GET for `segments` and hand the
    /// body off to a record stream.
    async fn fetch(&self, segments: &[&str]) -> Result<RecordStream<BillingRecord>, ClientError> {
        let mut url = self.resolver.resolve(BILLING_SERVICE).await?;
        match url.path_segments_mut() {
            Ok(mut path) => {
                path.pop_if_empty().extend(segments);
            }
            Err(()) => {
                return Err(ClientError::Transport(TransportError::Resolve {
                    service: BILLING_SERVICE.to_string(),
                    reason: "resolved URL cannot carry a path".to_string(),
                }));
            }
        }

        debug!(%url, "fetching billing records");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "billing service returned an error");
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(RecordStream::spawn(
            response.bytes_stream().map_err(TransportError::from),
            self.buffer,
        ))
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30). Applied by the HTTP
    /// transport; expiry surfaces as a transport error.
    pub timeout_seconds: u64,
    /// Capacity of the record channel between the response reader and the
    /// consumer (default: 32). Bounds how far decoding runs ahead.
    pub buffer: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            buffer: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticResolver;
    use reqwest::Url;

    fn resolver() -> StaticResolver {
        StaticResolver::new().with_service(
            BILLING_SERVICE,
            Url::parse("http://127.0.0.1:9").unwrap(),
        )
    }

    #[test]
    fn client_creation() {
        let client = BillingClient::new(resolver());
        assert_eq!(client.buffer, 32);
    }

    #[test]
    fn client_options() {
        let options = ClientOptions {
            timeout_seconds: 5,
            buffer: 4,
        };
        let client = BillingClient::with_options(resolver(), options);
        assert_eq!(client.buffer, 4);
    }

    #[tokio::test]
    async fn unknown_service_is_a_transport_error() {
        let client = BillingClient::new(StaticResolver::new());
        let err = client.fetch_all_billings().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(TransportError::Resolve { .. })
        ));
    }
}
