use std::path::PathBuf;

use anyhow::{Context, Result};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use mintwarden_core::config::ConfigPaths;
use reporting::json::render_json;
use reporting::TokenReport;
use trust_engine::TrustEngine;

use super::{load_bundle, load_config, EvidenceInput};

pub struct AnalyzeInputs {
    pub config_path: Option<PathBuf>,
    pub evidence: EvidenceInput,
    pub now: Option<String>,
    pub json: bool,
    pub save: Option<PathBuf>,
    pub store: bool,
}

pub fn execute(inputs: AnalyzeInputs) -> Result<()> {
    let config = load_config(inputs.config_path)?;
    let engine = TrustEngine::from_config(config)?;
    let now = parse_now(inputs.now.as_deref())?;

    let bundle = load_bundle(&inputs.evidence)?;
    let verdict = engine.analyze(&bundle, now);
    let report = TokenReport::new(&bundle, verdict, now)?;
    info!(
        analysis_id = %report.analysis_id,
        fingerprint = %report.fingerprint,
        records = bundle.records.len(),
        "analysis complete"
    );

    if let Some(path) = &inputs.save {
        report.save(path)?;
        info!(analysis_id = %report.analysis_id, path = %path.display(), "report saved");
    }
    if inputs.store {
        let paths = ConfigPaths::resolve()?;
        let path = paths.report_dir.join(format!("{}.json", report.analysis_id));
        report.save(&path)?;
        eprintln!("Report stored at {}", path.display());
    }

    if inputs.json {
        println!("{}", render_json(&report));
    } else {
        println!("{}", report.human_summary());
    }
    Ok(())
}

fn parse_now(now: Option<&str>) -> Result<OffsetDateTime> {
    match now {
        Some(value) => OffsetDateTime::parse(value, &Rfc3339)
            .with_context(|| format!("parse --now '{value}' as RFC 3339")),
        None => Ok(OffsetDateTime::now_utc()),
    }
}
