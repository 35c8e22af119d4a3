//! Loading of connection settings and machine definitions.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{ConnectionConfig, MachineConfig};

/// Prefix of every connection environment variable.
pub const ENV_PREFIX: &str = "VRA7_";

/// Read `VRA7_HOST`, `VRA7_TENANT`, `VRA7_USERNAME`, `VRA7_PASSWORD` and
/// `VRA7_POLL_INTERVAL_SECS` from the process environment.
///
/// # Errors
///
/// Returns an error if a required variable is missing or malformed.
pub fn connection_from_env() -> Result<ConnectionConfig> {
    connection_from_vars(std::env::vars())
}

/// Same as [`connection_from_env`] over an explicit variable list.
///
/// # Errors
///
/// Returns an error if a required variable is missing or malformed.
pub fn connection_from_vars<I>(vars: I) -> Result<ConnectionConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    let config: ConnectionConfig = envy::prefixed(ENV_PREFIX)
        .from_iter(vars)
        .map_err(|e| anyhow::anyhow!("invalid vRA connection settings: {e}"))?;
    tracing::debug!(?config, "connection settings loaded");
    Ok(config)
}

/// Parse a machine definition from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the definition is invalid.
pub fn parse_machine_config(content: &str) -> Result<MachineConfig> {
    let config: MachineConfig =
        serde_yaml::from_str(content).context("cannot parse machine definition")?;
    config.validate()?;
    Ok(config)
}

/// Read and validate a machine definition file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_machine_config(path: &Path) -> Result<MachineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse_machine_config(&content).with_context(|| format!("in {}", path.display()))
}
