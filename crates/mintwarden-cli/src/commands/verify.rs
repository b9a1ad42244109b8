use std::path::PathBuf;

use anyhow::{Context, Result};

use mintwarden_core::evidence::EvidenceBundle;
use trust_engine::{TrustEngine, VerificationResult};

use super::{load_bundle, load_config, EvidenceInput};

pub fn execute(config_path: Option<PathBuf>, evidence: EvidenceInput, json: bool) -> Result<()> {
    let engine = TrustEngine::from_config(load_config(config_path)?)?;
    let bundle = load_bundle(&evidence)?;
    let result = verification_for(&engine, &bundle);

    if json {
        let output = serde_json::to_string_pretty(&result).context("render verification JSON")?;
        println!("{output}");
        return Ok(());
    }

    println!(
        "{}: {} ({}% confidence)",
        bundle.identity.mint,
        result.level.calm_label(),
        result.confidence
    );
    for reason in &result.reasons {
        println!("  {reason}");
    }
    Ok(())
}

/// Malformed evidence comes back unverified, same as in a full analysis.
fn verification_for(engine: &TrustEngine, bundle: &EvidenceBundle) -> VerificationResult {
    engine.verify_bundle(bundle)
}
