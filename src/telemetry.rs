use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber configured from `RUST_LOG` (default `info`).
pub fn install(service_name: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;
    tracing::debug!(service = service_name, "telemetry installed");
    Ok(())
}
