//! Risk factor engine.
//!
//! Scores one token from its context and verification outcome:
//! 1. baseline from verification (discount when verified, penalty otherwise)
//! 2. authority, age, activity, creator and metadata factors, scaled by
//!    verification class and skipped entirely for OFFICIAL tokens
//! 3. venue factors, always evaluated, reduced for verified tokens
//! 4. clamp to [0, 100] and map to a level with the class's threshold bands

use tracing::{debug, warn};

use mintwarden_core::config::RiskConfig;
use mintwarden_core::context::AnalysisContext;
use mintwarden_core::trust::VerificationLevel;

use crate::recommend::recommend;
use crate::verdict::{HeuristicFlag, RiskAssessment, VerificationResult};

pub mod factors;
pub mod thresholds;

use factors::Finding;

const HEURISTIC_NOTE: &str = "(recently launched - monitoring)";

#[derive(Debug, Clone)]
pub struct RiskFactorEngine {
    config: RiskConfig,
}

/// Running totals for one assessment, in evaluation order.
#[derive(Debug, Default)]
struct ScoreSheet {
    score: f64,
    risk_factors: Vec<String>,
    safety_factors: Vec<String>,
}

/// How adverse findings are scaled for the current verification class.
#[derive(Debug, Clone)]
struct Scaling {
    multiplier: f64,
    note: Option<String>,
}

impl ScoreSheet {
    fn apply(&mut self, finding: Option<Finding>, scaling: &Scaling) {
        match finding {
            Some(Finding::Risk { points, text }) => {
                self.score += points * scaling.multiplier;
                let text = match &scaling.note {
                    Some(note) => format!("{text} {note}"),
                    None => text,
                };
                self.risk_factors.push(text);
            }
            Some(Finding::Safety(text)) => self.safety_factors.push(text),
            None => {}
        }
    }
}

impl Scaling {
    fn full() -> Self {
        Self {
            multiplier: 1.0,
            note: None,
        }
    }
}

impl RiskFactorEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn score(
        &self,
        context: &AnalysisContext,
        verification: &VerificationResult,
        heuristic: &HeuristicFlag,
    ) -> RiskAssessment {
        let weights = &self.config.weights;
        let limits = &self.config.limits;
        let mut sheet = ScoreSheet::default();

        self.apply_baseline(&mut sheet, verification, heuristic);

        if let Some(scaling) = self.token_scaling(verification, heuristic) {
            sheet.apply(factors::mint_authority(context, weights), &scaling);
            sheet.apply(factors::freeze_authority(context, weights), &scaling);
            sheet.apply(factors::token_age(context, weights, limits), &scaling);
            sheet.apply(factors::transfer_activity(context, weights, limits), &scaling);
            sheet.apply(factors::creator_behavior(context, weights), &scaling);
            sheet.apply(factors::metadata_quality(context, weights), &scaling);
        }

        if let Some(snapshot) = &context.liquidity {
            let scaling = self.venue_scaling(verification);
            sheet.apply(factors::low_liquidity(snapshot, weights, limits), &scaling);
            sheet.apply(factors::volume_to_liquidity(snapshot, weights, limits), &scaling);
            sheet.apply(factors::rug_pull(snapshot, weights), &scaling);
            sheet.apply(factors::pool_concentration(snapshot, weights), &scaling);
        }

        if !sheet.score.is_finite() {
            warn!(
                mint = %context.identity.mint,
                "non-finite risk score; returning fail-safe assessment"
            );
            return RiskAssessment::fail_safe();
        }

        let score = sheet.score.round().clamp(0.0, 100.0) as u8;
        let level = thresholds::level_for(&self.config.thresholds, verification.level, score);
        let recommendations = recommend(score, verification, heuristic);

        debug!(
            mint = %context.identity.mint,
            score,
            level = %level,
            risk_factors = sheet.risk_factors.len(),
            safety_factors = sheet.safety_factors.len(),
            "scored token risk"
        );

        RiskAssessment {
            score,
            level,
            risk_factors: sheet.risk_factors,
            safety_factors: sheet.safety_factors,
            recommendations,
        }
    }

    fn apply_baseline(
        &self,
        sheet: &mut ScoreSheet,
        verification: &VerificationResult,
        heuristic: &HeuristicFlag,
    ) {
        let baseline = &self.config.baseline;
        if verification.is_verified {
            let level_discount = match verification.level {
                VerificationLevel::Official => baseline.official_discount,
                VerificationLevel::Established => baseline.established_discount,
                VerificationLevel::Community => baseline.community_discount,
                VerificationLevel::Unverified => 0.0,
            };
            let mut discount = level_discount * f64::from(verification.confidence) / 100.0;
            if verification.level == VerificationLevel::Official {
                discount += baseline.official_flat_discount;
            }
            sheet.score = (0.0 - discount).max(0.0);
            sheet.safety_factors.push(format!(
                "Verified {} token ({}% confidence)",
                verification.level, verification.confidence
            ));
        } else if heuristic.is_recently_launched_legitimate {
            let penalty = (baseline.unverified_penalty * baseline.heuristic_penalty_multiplier)
                .max(baseline.heuristic_penalty_floor);
            sheet.score += penalty;
            sheet
                .risk_factors
                .push(format!("Not yet verified by any registry {HEURISTIC_NOTE}"));
        } else {
            sheet.score += baseline.unverified_penalty;
            sheet
                .risk_factors
                .push("Not verified by any registry".to_string());
        }
    }

    /// `None` when token-level factors are skipped (OFFICIAL tokens).
    fn token_scaling(
        &self,
        verification: &VerificationResult,
        heuristic: &HeuristicFlag,
    ) -> Option<Scaling> {
        let multipliers = &self.config.multipliers;
        match verification.level {
            VerificationLevel::Official => None,
            VerificationLevel::Established => Some(Scaling {
                multiplier: multipliers.established,
                note: Some("(reduced: ESTABLISHED verification)".to_string()),
            }),
            VerificationLevel::Community => Some(Scaling {
                multiplier: multipliers.community,
                note: Some("(reduced: COMMUNITY verification)".to_string()),
            }),
            VerificationLevel::Unverified if heuristic.is_recently_launched_legitimate => {
                Some(Scaling {
                    multiplier: multipliers.heuristic,
                    note: Some(HEURISTIC_NOTE.to_string()),
                })
            }
            VerificationLevel::Unverified => Some(Scaling::full()),
        }
    }

    fn venue_scaling(&self, verification: &VerificationResult) -> Scaling {
        if verification.is_verified {
            Scaling {
                multiplier: self.config.multipliers.verified_venue,
                note: Some("(partially offset by verification)".to_string()),
            }
        } else {
            Scaling::full()
        }
    }
}
