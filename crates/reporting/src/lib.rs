use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use mintwarden_core::evidence::EvidenceBundle;
use mintwarden_core::ids::AnalysisId;
use trust_engine::TokenVerdict;

pub mod json;
pub mod redact;
pub mod timeline;

use redact::short_mint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    pub risk_factors: u32,
    pub safety_factors: u32,
    pub recognizing_sources: u32,
    pub positive_signals: u32,
    pub total_signals: u32,
}

/// A saved analysis: the verdict plus when and over which evidence it ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenReport {
    pub analysis_id: AnalysisId,
    #[serde(with = "time::serde::rfc3339")]
    pub analyzed_at: OffsetDateTime,
    /// Evidence bundle fingerprint; identical fingerprints yield identical verdicts.
    pub fingerprint: String,
    pub verdict: TokenVerdict,
    pub stats: ReportStats,
}

impl TokenReport {
    pub fn new(
        bundle: &EvidenceBundle,
        verdict: TokenVerdict,
        analyzed_at: OffsetDateTime,
    ) -> Result<Self> {
        let fingerprint = bundle.fingerprint()?;
        let stats = ReportStats::from_verdict(&verdict);
        Ok(Self {
            analysis_id: AnalysisId::new(),
            analyzed_at,
            fingerprint,
            verdict,
            stats,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read report {}", path.display()))?;
        serde_json::from_str(&contents).context("parse report JSON")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create report dir {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self).context("render report JSON")?;
        fs::write(path, contents).with_context(|| format!("write report {}", path.display()))?;
        Ok(())
    }

    pub fn human_summary(&self) -> String {
        let verdict = &self.verdict;
        let verification = &verdict.verification;
        let assessment = &verdict.assessment;

        let name = verdict
            .identity
            .name
            .as_deref()
            .map(|name| format!("{name} ({})", short_mint(&verdict.identity.mint)))
            .unwrap_or_else(|| short_mint(&verdict.identity.mint));

        let standing = if verification.is_verified {
            format!(
                "This token is {} ({}% confidence).",
                verification.level.calm_label(),
                verification.confidence
            )
        } else if verdict.heuristic.is_recently_launched_legitimate {
            format!(
                "Not yet verified, but it looks like a legitimate new launch ({}/{} signals).",
                verdict.heuristic.positive_signals, verdict.heuristic.total_signals
            )
        } else {
            "No registry or venue vouches for this token.".to_string()
        };

        let mut lines = vec![
            format!("Analyzed {name}."),
            standing,
            format!(
                "Risk score {}/100: {}.",
                assessment.score,
                assessment.level.label()
            ),
        ];
        lines.extend(assessment.recommendations.iter().cloned());
        lines.join("\n")
    }
}

impl ReportStats {
    pub fn from_verdict(verdict: &TokenVerdict) -> Self {
        Self {
            risk_factors: count(verdict.assessment.risk_factors.len()),
            safety_factors: count(verdict.assessment.safety_factors.len()),
            recognizing_sources: count(verdict.verification.sources.len()),
            positive_signals: verdict.heuristic.positive_signals,
            total_signals: verdict.heuristic.total_signals,
        }
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintwarden_core::config::Config;
    use mintwarden_core::evidence::{AuthorityRecord, Evidence, EvidenceCheck, TokenIdentity};
    use tempfile::tempdir;
    use trust_engine::TrustEngine;

    fn analyzed(matched: bool) -> (EvidenceBundle, TokenVerdict) {
        let bundle = EvidenceBundle::new(TokenIdentity {
            mint: "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU".to_string(),
            name: Some("Samoyed Coin".to_string()),
            symbol: Some("SAMO".to_string()),
        })
        .with_record(Evidence::OnChain(AuthorityRecord {
            mint_revoked: true,
            freeze_revoked: true,
            decimals: 9,
            supply: "4000000000".to_string(),
            created_at: None,
        }))
        .with_record(Evidence::Registry(EvidenceCheck {
            source: "Jupiter".to_string(),
            participated: true,
            matched,
            weight: if matched { 70.0 } else { 0.0 },
            details: None,
        }));
        let engine = TrustEngine::from_config(Config::default_config()).unwrap();
        let verdict = engine.analyze(&bundle, OffsetDateTime::UNIX_EPOCH);
        (bundle, verdict)
    }

    #[test]
    fn test_summary_for_verified_token() {
        let (bundle, verdict) = analyzed(true);
        let report = TokenReport::new(&bundle, verdict, OffsetDateTime::UNIX_EPOCH).unwrap();
        let summary = report.human_summary();
        assert!(summary.starts_with("Analyzed Samoyed Coin (7xKX...sAsU)."));
        assert!(summary.contains("This token is officially recognized (100% confidence)."));
        assert!(summary.contains("Risk score 0/100: low risk."));
        assert_eq!(report.stats.recognizing_sources, 1);
    }

    #[test]
    fn test_summary_for_unverified_token() {
        let (bundle, verdict) = analyzed(false);
        let report = TokenReport::new(&bundle, verdict, OffsetDateTime::UNIX_EPOCH).unwrap();
        assert!(report
            .human_summary()
            .contains("No registry or venue vouches for this token."));
        assert_eq!(report.stats.recognizing_sources, 0);
        assert_eq!(report.stats.risk_factors, 1);
    }

    #[test]
    fn test_fingerprint_tracks_evidence() {
        let (bundle, verdict) = analyzed(true);
        let first = TokenReport::new(&bundle, verdict.clone(), OffsetDateTime::UNIX_EPOCH).unwrap();
        let second = TokenReport::new(&bundle, verdict, OffsetDateTime::UNIX_EPOCH).unwrap();
        assert_eq!(first.fingerprint, second.fingerprint);
        assert_ne!(first.analysis_id, second.analysis_id);

        let (other_bundle, other_verdict) = analyzed(false);
        let other =
            TokenReport::new(&other_bundle, other_verdict, OffsetDateTime::UNIX_EPOCH).unwrap();
        assert_ne!(first.fingerprint, other.fingerprint);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("samo.json");
        let (bundle, verdict) = analyzed(true);
        let report = TokenReport::new(&bundle, verdict, OffsetDateTime::UNIX_EPOCH).unwrap();
        report.save(&path).unwrap();
        assert_eq!(TokenReport::load(&path).unwrap(), report);
    }
}
