//! w3protocol-probe - integration harness for the web3.storage capability services.
//!
//! The harness derives the identities a run acts as, builds the capability
//! payloads handed to the (external) invocation layer, carries encoded
//! invocations to the access and upload endpoints over HTTP, and checks the
//! results that come back.
//!
//! # Architecture
//!
//! - **domain**: `EmailAddress`, `DidMailto` and `SpaceSigner` value objects
//! - **error**: Error types for configuration, transport and result checks
//! - **config**: Configuration read through an injectable environment source
//! - **endpoint**: Staging and production service endpoints
//! - **capability**: `{can, with, nb}` payloads
//! - **client**: Blocking HTTP client plus an async facade
//! - **outcome**: Classifying and asserting on invocation results
//! - **harness**: Identities of a run and concurrent endpoint probing
//! - **metrics**: Request counters

pub mod capability;
pub mod client;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod harness;
pub mod metrics;
pub mod outcome;

pub use capability::Capability;
pub use client::{AsyncServiceClient, AsyncServiceClientImpl, ProbeReport, ServiceClient};
pub use config::{Config, EnvSource, ProcessEnv};
pub use domain::{DidMailto, EmailAddress, InvalidEmailError, SpaceSigner};
pub use endpoint::{ServiceEndpoint, Target};
pub use error::{AssertionError, ConfigError, ServiceError};
pub use harness::{Identities, ProbeOutcome};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use outcome::InvocationOutcome;
