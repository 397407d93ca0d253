//! Directory-backed catalog.
//!
//! Layout (all paths relative to the catalog root):
//! - `tiers/<key>.json`: one tier capability record, key = file stem
//! - `requirements.json`: array of requirement rules
//! - `packs/<id>.json`: one policy pack, id defaults to the file stem
//! - `policies/<category>/<id>.json`: one policy definition
//!
//! Files are visited in name order so catalog order is stable across runs.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use tierpilot_core::catalog::{compile_rules, RawRequirementRule};
use tierpilot_core::error::{Result, TierPilotError};
use tierpilot_core::{Catalog, PolicyDefinition, PolicyPack, TierCapability};

use super::CatalogSource;
use crate::config::CatalogSection;

#[derive(Debug, Clone)]
pub struct FsCatalog {
    root: PathBuf,
    tiers_dir: PathBuf,
    rules_file: PathBuf,
    packs_dir: PathBuf,
    policies_dir: PathBuf,
}

impl FsCatalog {
    /// Catalog rooted at `root` with the default layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_layout(root.into(), &CatalogSection::default())
    }

    pub fn from_config(cfg: &CatalogSection) -> Self {
        Self::with_layout(cfg.root_path(), cfg)
    }

    fn with_layout(root: PathBuf, cfg: &CatalogSection) -> Self {
        Self {
            tiers_dir: root.join(&cfg.tiers_dir),
            rules_file: root.join(&cfg.rules_file),
            packs_dir: root.join(&cfg.packs_dir),
            policies_dir: root.join(&cfg.policies_dir),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn load_tiers(&self) -> Result<Vec<TierCapability>> {
        let mut out = Vec::new();
        for path in json_files(&self.tiers_dir).await? {
            let Some(mut tier) = read_json::<TierCapability>(&path).await? else {
                continue;
            };
            tier.key = file_stem(&path);
            if tier.name.is_empty() {
                tier.name = tier.key.clone();
            }
            out.push(tier);
        }
        Ok(out)
    }

    async fn load_rules(&self) -> Result<Vec<RawRequirementRule>> {
        Ok(read_json(&self.rules_file).await?.unwrap_or_default())
    }

    async fn load_packs(&self) -> Result<Vec<PolicyPack>> {
        let mut out = Vec::new();
        for path in json_files(&self.packs_dir).await? {
            let Some(mut pack) = read_json::<PolicyPack>(&path).await? else {
                continue;
            };
            if pack.id.trim().is_empty() {
                pack.id = file_stem(&path);
            }
            out.push(pack);
        }
        Ok(out)
    }

    async fn load_policies(&self) -> Result<Vec<PolicyDefinition>> {
        let mut out = Vec::new();
        for category_dir in sorted_entries(&self.policies_dir, true).await? {
            let category = file_name(&category_dir);
            for path in json_files(&category_dir).await? {
                let Some(mut def) = read_json::<PolicyDefinition>(&path).await? else {
                    continue;
                };
                if def.category.trim().is_empty() {
                    def.category = category.clone();
                }
                if def.id.trim().is_empty() {
                    def.id = file_stem(&path);
                }
                out.push(def);
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl CatalogSource for FsCatalog {
    fn name(&self) -> &'static str {
        "fs"
    }

    async fn load(&self) -> Result<Catalog> {
        let tiers = self.load_tiers().await?;
        let raw_rules = self.load_rules().await?;
        let packs = self.load_packs().await?;
        let policies = self.load_policies().await?;

        let rules = compile_rules(&raw_rules);
        if rules.len() < raw_rules.len() {
            tracing::debug!(
                dropped = raw_rules.len() - rules.len(),
                "incomplete requirement rules ignored"
            );
        }

        let catalog = Catalog::new(tiers, rules, packs, policies);
        tracing::debug!(
            root = %self.root.display(),
            tiers = catalog.tiers.len(),
            rules = catalog.rules.len(),
            packs = catalog.packs.len(),
            policies = catalog.policy_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

fn catalog_err(path: &Path, e: impl std::fmt::Display) -> TierPilotError {
    TierPilotError::Catalog(format!("{}: {e}", path.display()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Entries of `dir` sorted by name; directories only when `dirs` is set,
/// regular files otherwise. A missing directory has no entries.
async fn sorted_entries(dir: &Path, dirs: bool) -> Result<Vec<PathBuf>> {
    let mut rd = match tokio::fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(catalog_err(dir, e)),
    };

    let mut out = Vec::new();
    while let Some(entry) = rd.next_entry().await.map_err(|e| catalog_err(dir, e))? {
        let ft = entry.file_type().await.map_err(|e| catalog_err(dir, e))?;
        if (dirs && ft.is_dir()) || (!dirs && ft.is_file()) {
            out.push(entry.path());
        }
    }
    out.sort();
    Ok(out)
}

async fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = sorted_entries(dir, false).await?;
    files.retain(|p| p.extension().is_some_and(|e| e == "json"));
    Ok(files)
}

/// `None` when the file does not exist; parse failures are fatal.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let s = match tokio::fs::read_to_string(path).await {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(catalog_err(path, e)),
    };
    serde_json::from_str(&s)
        .map(Some)
        .map_err(|e| catalog_err(path, e))
}
