//! Run-level helpers: which identities a run acts as, and probing every
//! endpoint of a deployment at once.

use crate::client::{AsyncServiceClient, AsyncServiceClientImpl, ProbeReport, ServiceClient};
use crate::config::Config;
use crate::domain::DidMailto;
use crate::endpoint::ServiceEndpoint;
use crate::error::ServiceResult;
use futures::future::join_all;
use std::sync::Arc;

/// The identities a configured run acts as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identities {
    /// `did:mailto` of the configured account email
    pub account: Option<DidMailto>,

    /// `did:key` of the registered space
    pub space: Option<String>,
}

impl Identities {
    pub fn from_config(config: &Config) -> Self {
        Self {
            account: config.email.as_ref().map(DidMailto::from_email),
            space: config.registered_space.as_ref().map(|s| s.did()),
        }
    }
}

/// Result of probing one endpoint.
#[derive(Debug)]
pub struct ProbeOutcome {
    pub endpoint: ServiceEndpoint,
    pub result: ServiceResult<ProbeReport>,
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// One async client per endpoint of the configured deployment.
pub fn clients_for(config: &Config) -> Vec<Arc<dyn AsyncServiceClient>> {
    config
        .target
        .endpoints()
        .into_iter()
        .map(|endpoint| {
            let client = ServiceClient::new(endpoint, config);
            Arc::new(AsyncServiceClientImpl::new(client)) as Arc<dyn AsyncServiceClient>
        })
        .collect()
}

/// Probe all clients concurrently. Results keep the order of `clients`.
pub async fn probe_all(clients: &[Arc<dyn AsyncServiceClient>]) -> Vec<ProbeOutcome> {
    let probes = clients.iter().map(|client| async move {
        let result = client.probe().await;
        match &result {
            Ok(report) => tracing::info!(
                "{} answered {} in {}ms",
                client.endpoint(),
                report.status,
                report.elapsed_ms
            ),
            Err(e) => tracing::warn!("{} failed: {}", client.endpoint(), e),
        }
        ProbeOutcome {
            endpoint: client.endpoint().clone(),
            result,
        }
    });

    join_all(probes).await
}
