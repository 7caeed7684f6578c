//! Known service deployments.
//!
//! Each deployment is reachable through an access API and an upload API.
//! Both answer to the same service DID, which is the audience of every
//! invocation sent to them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A service DID together with the URL that accepts invocations for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServiceEndpoint {
    /// DID the invocation is addressed to
    pub audience: String,

    /// Base URL of the HTTP channel
    pub url: String,
}

impl ServiceEndpoint {
    pub fn new(audience: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            url: url.into(),
        }
    }

    /// Every (audience, url) pair of both deployments: staging upload,
    /// staging access, production upload, production access.
    pub fn all() -> Vec<ServiceEndpoint> {
        [Target::Staging, Target::Production]
            .into_iter()
            .flat_map(|t| t.endpoints())
            .collect()
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aud={} url={}", self.audience, self.url)
    }
}

/// Which deployment to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Staging,
    Production,
}

impl Target {
    /// The service DID of this deployment.
    pub fn service_did(self) -> &'static str {
        match self {
            Target::Staging => "did:web:staging.web3.storage",
            Target::Production => "did:web:web3.storage",
        }
    }

    pub fn access_endpoint(self) -> ServiceEndpoint {
        let url = match self {
            Target::Staging => "https://w3access-staging.protocol-labs.workers.dev",
            Target::Production => "https://access.web3.storage",
        };
        ServiceEndpoint::new(self.service_did(), url)
    }

    pub fn upload_endpoint(self) -> ServiceEndpoint {
        let url = match self {
            Target::Staging => "https://staging.up.web3.storage",
            Target::Production => "https://up.web3.storage",
        };
        ServiceEndpoint::new(self.service_did(), url)
    }

    /// Upload endpoint first, then access endpoint.
    pub fn endpoints(self) -> Vec<ServiceEndpoint> {
        vec![self.upload_endpoint(), self.access_endpoint()]
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staging" => Ok(Target::Staging),
            "production" | "prod" => Ok(Target::Production),
            other => Err(format!(
                "expected \"staging\" or \"production\", got {:?}",
                other
            )),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Staging => f.write_str("staging"),
            Target::Production => f.write_str("production"),
        }
    }
}
