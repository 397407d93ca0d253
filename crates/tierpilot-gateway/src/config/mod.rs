//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use tierpilot_core::error::{Result, TierPilotError};

pub use schema::{CatalogSection, ServerSection, ServiceConfig};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TIERPILOT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "tierpilot.yaml";

pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TierPilotError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| TierPilotError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
