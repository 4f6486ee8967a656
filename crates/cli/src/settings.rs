#![forbid(unsafe_code)]

use anyhow::Context;
use eco_core::CatalogConfig;
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_STORE_DIRNAME: &str = ".ecomap";

/// Built-in tables unless a YAML override is given. Fields missing from the
/// file keep their defaults.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<CatalogConfig> {
    let Some(path) = path else {
        return Ok(CatalogConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = parse_config(&raw).with_context(|| format!("config {}", path.display()))?;
    tracing::info!(path = %path.display(), "catalog config loaded");
    Ok(config)
}

pub(crate) fn parse_config(raw: &str) -> anyhow::Result<CatalogConfig> {
    let config = if raw.trim().is_empty() {
        CatalogConfig::default()
    } else {
        serde_yaml::from_str::<Option<CatalogConfig>>(raw)?.unwrap_or_default()
    };
    config.validate()?;
    Ok(config)
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Prefers a store at the enclosing repository root so every subdirectory
/// shares one preference file.
pub(crate) fn default_storage_dir_from_start(start: &Path) -> PathBuf {
    find_repo_root(start)
        .unwrap_or_else(|| start.to_path_buf())
        .join(DEFAULT_STORE_DIRNAME)
}

pub(crate) fn resolve_storage_dir(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().context("resolving current directory")?;
    Ok(default_storage_dir_from_start(&cwd))
}
