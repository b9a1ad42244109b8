//! Verification aggregation.
//!
//! Combines registry and venue checks into a single [`VerificationResult`]:
//! - critical-infrastructure tokens short-circuit to OFFICIAL
//! - non-participating checks are ignored entirely
//! - confidence is the verified share of total weight, per the weighting policy
//! - the level needs both enough confidence and enough verified weight

use tracing::debug;

use mintwarden_core::config::{LevelRule, VerificationConfig};
use mintwarden_core::evidence::{EvidenceCheck, MetadataRecord, TokenIdentity};
use mintwarden_core::trust::VerificationLevel;

use crate::verdict::VerificationResult;

pub mod registry;
pub mod weighting;

pub use registry::CriticalRegistry;
pub use weighting::{MatchedOnly, NominalWeight, WeightingPolicy};

#[derive(Debug)]
pub struct VerificationAggregator {
    config: VerificationConfig,
    policy: Box<dyn WeightingPolicy>,
}

impl VerificationAggregator {
    pub fn new(config: VerificationConfig) -> Self {
        let policy = weighting::policy_for(&config);
        Self { config, policy }
    }

    pub fn with_policy(mut self, policy: Box<dyn WeightingPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn aggregate(
        &self,
        identity: &TokenIdentity,
        checks: &[EvidenceCheck],
        metadata: Option<&MetadataRecord>,
        registry: &CriticalRegistry,
    ) -> VerificationResult {
        if let Some(name) = registry.lookup(&identity.mint) {
            debug!(mint = %identity.mint, name, "critical infrastructure token");
            return VerificationResult::critical(name);
        }

        let participating: Vec<&EvidenceCheck> =
            checks.iter().filter(|check| check.participated).collect();
        let total_weight =
            canonical_sum(participating.iter().map(|check| self.policy.total_weight(check)));
        let verified_weight =
            canonical_sum(participating.iter().map(|check| self.policy.verified_weight(check)));

        let mut reasons = Vec::new();
        let mut sources = Vec::new();
        for check in participating {
            if check.matched {
                reasons.push(format!("Listed on {}", check.source));
                reasons.extend(self.detail_reasons(check));
                sources.push(check.source.clone());
            }
        }

        let confidence = confidence_pct(verified_weight, total_weight);
        let level = self.level_for(confidence, verified_weight);

        if !level.is_verified() {
            if let Some(record) = metadata {
                for field in record.missing_fields() {
                    reasons.push(format!("Missing token {field}"));
                }
            }
            if sources.is_empty() {
                reasons.push("No registry or venue recognized this token".to_string());
            }
        }

        debug!(
            mint = %identity.mint,
            confidence,
            verified_weight,
            total_weight,
            level = %level,
            "aggregated verification"
        );

        VerificationResult {
            is_verified: level.is_verified(),
            level,
            confidence,
            reasons,
            sources,
        }
    }

    fn level_for(&self, confidence: u8, verified_weight: f64) -> VerificationLevel {
        let meets = |rule: &LevelRule| {
            confidence >= rule.min_confidence && verified_weight >= rule.min_verified_weight
        };
        if meets(&self.config.official) {
            VerificationLevel::Official
        } else if meets(&self.config.established) {
            VerificationLevel::Established
        } else if meets(&self.config.community) {
            VerificationLevel::Community
        } else {
            VerificationLevel::Unverified
        }
    }

    fn detail_reasons(&self, check: &EvidenceCheck) -> Vec<String> {
        let Some(details) = &check.details else {
            return Vec::new();
        };
        let mut reasons = Vec::new();
        if let Some(score) = details.trust_score {
            if score >= self.config.high_trust_score {
                reasons.push(format!("{}: high trust score ({score:.1})", check.source));
            }
        }
        if let Some(rank) = details.market_cap_rank {
            if rank <= self.config.top_market_cap_rank {
                reasons.push(format!("{}: top market-cap rank (#{rank})", check.source));
            }
        }
        if details.strict_listing == Some(true) {
            reasons.push(format!("{}: strict listing", check.source));
        }
        reasons
    }
}

/// Sums in ascending order so the total does not depend on evidence order.
fn canonical_sum(weights: impl Iterator<Item = f64>) -> f64 {
    let mut weights: Vec<f64> = weights.collect();
    weights.sort_by(f64::total_cmp);
    weights.into_iter().sum()
}

fn confidence_pct(verified_weight: f64, total_weight: f64) -> u8 {
    if total_weight <= 0.0 || !total_weight.is_finite() {
        return 0;
    }
    (100.0 * verified_weight / total_weight).round().clamp(0.0, 100.0) as u8
}
