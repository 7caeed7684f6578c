//! HTTP client for a service endpoint.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. It carries encoded invocations to an endpoint
//! and hands the raw response back; encoding and decoding belong to the invocation
//! layer.

mod async_wrapper;
pub use async_wrapper::{AsyncServiceClient, AsyncServiceClientImpl};

use crate::config::Config;
use crate::endpoint::ServiceEndpoint;
use crate::error::{ServiceError, ServiceResult};
use crate::metrics::{HttpTimer, Metrics};
use serde::Serialize;
use std::io::{self, Read};
use std::sync::Arc;
use std::time::Duration;

/// Content type of an encoded invocation batch.
pub const INVOCATION_CONTENT_TYPE: &str = "application/car";

/// Content type the service answers with.
pub const RECEIPT_CONTENT_TYPE: &str = "application/cbor";

/// Path answering with deployment version information.
pub const VERSION_PATH: &str = "/version";

/// What a reachability probe found.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub endpoint: ServiceEndpoint,
    pub status: u16,
    /// Body parsed as JSON, when it is JSON
    pub version: Option<serde_json::Value>,
    pub body: String,
    pub elapsed_ms: u64,
}

/// HTTP client bound to one [`ServiceEndpoint`].
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts through [`AsyncServiceClientImpl`].
#[derive(Clone)]
pub struct ServiceClient {
    endpoint: ServiceEndpoint,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    metrics: Metrics,
}

impl ServiceClient {
    /// Create a client for `endpoint` using the configured timeout.
    pub fn new(endpoint: ServiceEndpoint, config: &Config) -> Self {
        Self::with_timeout(endpoint, config.request_timeout)
    }

    /// Create a client with an explicit timeout in seconds.
    pub fn with_timeout(endpoint: ServiceEndpoint, timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();

        Self {
            endpoint,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// POST an encoded invocation batch and return the encoded receipts.
    pub fn post_invocation(&self, body: &[u8]) -> ServiceResult<Vec<u8>> {
        let url = self.build_url("/");
        let timer = HttpTimer::new(self.metrics.clone());

        tracing::debug!(
            "POST {} ({} bytes) for {}",
            url,
            body.len(),
            self.endpoint.audience
        );

        let result = self
            .agent
            .post(&url)
            .set("Content-Type", INVOCATION_CONTENT_TYPE)
            .set("Accept", RECEIPT_CONTENT_TYPE)
            .send_bytes(body)
            .map_err(Self::map_error)
            .and_then(Self::read_bytes);

        match &result {
            Ok(bytes) => {
                let elapsed = timer.complete();
                self.metrics.record_invocation_sent(body.len());
                tracing::debug!(
                    "POST {} - {} bytes back in {:?}",
                    url,
                    bytes.len(),
                    elapsed
                );
            }
            Err(e) => {
                timer.complete_with_error();
                tracing::error!("POST {} - Error: {:?}", url, e);
            }
        }

        result
    }

    /// GET the endpoint's version route.
    pub fn probe(&self) -> ServiceResult<ProbeReport> {
        let url = self.build_url(VERSION_PATH);
        let timer = HttpTimer::new(self.metrics.clone());

        tracing::debug!("GET {}", url);

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(e) => {
                timer.complete_with_error();
                let err = Self::map_error(e);
                tracing::warn!("GET {} - Error: {}", url, err);
                return Err(err);
            }
        };

        let status = response.status();
        let body = match response.into_string() {
            Ok(body) => body,
            Err(e) => {
                timer.complete_with_error();
                tracing::warn!("GET {} - unreadable body: {}", url, e);
                return Err(ServiceError::Http(e.to_string()));
            }
        };
        let elapsed = timer.complete();

        Ok(ProbeReport {
            endpoint: self.endpoint.clone(),
            status,
            version: serde_json::from_str(&body).ok(),
            body,
            elapsed_ms: elapsed.as_millis() as u64,
        })
    }

    fn read_bytes(response: ureq::Response) -> ServiceResult<Vec<u8>> {
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| ServiceError::Http(e.to_string()))?;
        Ok(bytes)
    }

    /// Map a ureq error to a ServiceError.
    fn map_error(error: ureq::Error) -> ServiceError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => ServiceError::Unauthorized,
                    404 => ServiceError::NotFound(message),
                    429 => ServiceError::RateLimited,
                    _ => ServiceError::Status {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ServiceError::Http("Connection failed".to_string())
                } else if Self::timed_out(&transport) {
                    ServiceError::Timeout
                } else {
                    ServiceError::Http(transport.to_string())
                }
            }
        }
    }

    /// Only an I/O error of kind `TimedOut` or `WouldBlock` under the
    /// transport error counts as a timeout.
    fn timed_out(transport: &ureq::Transport) -> bool {
        transport.kind() == ureq::ErrorKind::Io
            && std::error::Error::source(transport)
                .and_then(|source| source.downcast_ref::<io::Error>())
                .map_or(false, |e| is_timeout_kind(e.kind()))
    }
}

fn is_timeout_kind(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
