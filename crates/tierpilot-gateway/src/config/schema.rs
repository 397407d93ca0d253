use std::path::{Path, PathBuf};

use serde::Deserialize;
use tierpilot_core::error::{Result, TierPilotError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub catalog: CatalogSection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TierPilotError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.catalog.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(TierPilotError::BadRequest(format!(
                "server.listen must be a socket address: {}",
                self.listen
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Catalog directory layout. Sub-paths are relative to `root`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default = "default_tiers_dir")]
    pub tiers_dir: String,

    #[serde(default = "default_rules_file")]
    pub rules_file: String,

    #[serde(default = "default_packs_dir")]
    pub packs_dir: String,

    #[serde(default = "default_policies_dir")]
    pub policies_dir: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            tiers_dir: default_tiers_dir(),
            rules_file: default_rules_file(),
            packs_dir: default_packs_dir(),
            policies_dir: default_policies_dir(),
        }
    }
}

impl CatalogSection {
    pub fn validate(&self) -> Result<()> {
        if self.root.trim().is_empty() {
            return Err(TierPilotError::BadRequest(
                "catalog.root must not be empty".into(),
            ));
        }
        let subs = [
            ("catalog.tiers_dir", &self.tiers_dir),
            ("catalog.rules_file", &self.rules_file),
            ("catalog.packs_dir", &self.packs_dir),
            ("catalog.policies_dir", &self.policies_dir),
        ];
        for (name, p) in subs {
            if p.trim().is_empty() || Path::new(p).is_absolute() {
                return Err(TierPilotError::BadRequest(format!(
                    "{name} must be a non-empty relative path"
                )));
            }
        }
        Ok(())
    }

    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }
}

fn default_root() -> String {
    "catalog".into()
}
fn default_tiers_dir() -> String {
    "tiers".into()
}
fn default_rules_file() -> String {
    "requirements.json".into()
}
fn default_packs_dir() -> String {
    "packs".into()
}
fn default_policies_dir() -> String {
    "policies".into()
}
