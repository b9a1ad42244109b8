use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use collector::{directory_collectors, gather};
use mintwarden_core::config::{Config, ConfigPaths};
use mintwarden_core::evidence::{EvidenceBundle, TokenIdentity};

pub mod analyze;
pub mod config;
pub mod report;
pub mod verify;

#[derive(Debug, Clone)]
pub struct EvidenceInput {
    pub input: PathBuf,
    pub mint: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub timeout_secs: u64,
}

/// Effective config: the explicit path, else the default location, else
/// built-in defaults when no file exists.
pub fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => {
            Config::load(&path).with_context(|| format!("load config {}", path.display()))
        }
        None => {
            let paths = ConfigPaths::resolve()?;
            Config::load_or_default(&paths.config_path)
                .with_context(|| format!("load config {}", paths.config_path.display()))
        }
    }
}

pub fn load_bundle(evidence: &EvidenceInput) -> Result<EvidenceBundle> {
    if evidence.input.is_dir() {
        collect_directory(evidence)
    } else {
        read_bundle_file(&evidence.input, evidence)
    }
}

fn read_bundle_file(path: &Path, evidence: &EvidenceInput) -> Result<EvidenceBundle> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read evidence bundle {}", path.display()))?;
    let mut bundle: EvidenceBundle =
        serde_json::from_str(&contents).context("parse evidence bundle JSON")?;
    if let Some(mint) = &evidence.mint {
        bundle.identity.mint = mint.clone();
    }
    if evidence.name.is_some() {
        bundle.identity.name = evidence.name.clone();
    }
    if evidence.symbol.is_some() {
        bundle.identity.symbol = evidence.symbol.clone();
    }
    Ok(bundle)
}

fn collect_directory(evidence: &EvidenceInput) -> Result<EvidenceBundle> {
    let mint = evidence
        .mint
        .clone()
        .ok_or_else(|| anyhow!("--mint is required when --input is an evidence directory"))?;
    let identity = TokenIdentity {
        mint,
        name: evidence.name.clone(),
        symbol: evidence.symbol.clone(),
    };
    let collectors = directory_collectors(&evidence.input)?;
    let timeout = Duration::from_secs(evidence.timeout_secs);

    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
    Ok(runtime.block_on(gather(&identity, &collectors, timeout)))
}
