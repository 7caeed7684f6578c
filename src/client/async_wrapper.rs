//! Async wrapper around the synchronous ServiceClient.
//!
//! This module provides an async interface to the synchronous ServiceClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! so several endpoints can be exercised concurrently without blocking the runtime.

use crate::client::{ProbeReport, ServiceClient};
use crate::endpoint::ServiceEndpoint;
use crate::error::{ServiceError, ServiceResult};
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::sync::Arc;

/// Async operations against one service endpoint.
#[async_trait]
pub trait AsyncServiceClient: Send + Sync {
    fn endpoint(&self) -> &ServiceEndpoint;

    /// Counters for the requests made through this client.
    fn metrics(&self) -> &Metrics;

    async fn post_invocation(&self, body: Vec<u8>) -> ServiceResult<Vec<u8>>;

    async fn probe(&self) -> ServiceResult<ProbeReport>;
}

/// Async wrapper around synchronous ServiceClient.
#[derive(Clone)]
pub struct AsyncServiceClientImpl {
    client: Arc<ServiceClient>,
}

impl AsyncServiceClientImpl {
    pub fn new(client: ServiceClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn inner(&self) -> &ServiceClient {
        &self.client
    }
}

#[async_trait]
impl AsyncServiceClient for AsyncServiceClientImpl {
    fn endpoint(&self) -> &ServiceEndpoint {
        self.client.endpoint()
    }

    fn metrics(&self) -> &Metrics {
        self.client.metrics()
    }

    async fn post_invocation(&self, body: Vec<u8>) -> ServiceResult<Vec<u8>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.post_invocation(&body))
            .await
            .map_err(|e| ServiceError::Http(format!("Task join error: {}", e)))?
    }

    async fn probe(&self) -> ServiceResult<ProbeReport> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.probe())
            .await
            .map_err(|e| ServiceError::Http(format!("Task join error: {}", e)))?
    }
}
