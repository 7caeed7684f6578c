//! w3protocol-probe - main entry point
//!
//! Loads the harness configuration, reports the identities a run acts as and
//! checks that every endpoint of the configured deployment answers.

use anyhow::{bail, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use w3protocol_probe::harness::{clients_for, probe_all};
use w3protocol_probe::{Capability, Config, EnvSource, Identities, ProcessEnv};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Read .env before anything else so LOG_LEVEL can come from it
    let env = ProcessEnv::load();
    let default_level = env.get("LOG_LEVEL").unwrap_or_else(|| "warn".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_source(&env) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Probing {} ({})",
        config.target,
        config.target.service_did()
    );

    let identities = Identities::from_config(&config);
    if let Some(account) = &identities.account {
        info!("Account: {}", account);
    }
    if let Some(space) = &identities.space {
        info!("Registered space: {}", space);
        info!(
            "space/info payload: {}",
            Capability::space_info(space.as_str()).to_json()
        );
        if let Some(account) = &identities.account {
            info!(
                "access/authorize payload: {}",
                Capability::access_authorize(space.as_str(), account).to_json()
            );
        }
    }

    let clients = clients_for(&config);
    let outcomes = probe_all(&clients).await;

    for client in &clients {
        let summary = client.metrics().summary();
        info!(
            "{}: {} requests, {} errors, {:.1}ms average",
            client.endpoint(),
            summary.http_requests_total,
            summary.http_errors_total,
            summary.http_duration_avg_ms
        );
    }

    let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_ok()).collect();
    for outcome in &failed {
        if let Err(e) = &outcome.result {
            error!("{}: {}", outcome.endpoint, e);
        }
    }

    if !failed.is_empty() {
        bail!("{} of {} endpoints failed", failed.len(), outcomes.len());
    }

    info!("All {} endpoints answered", outcomes.len());
    Ok(())
}
