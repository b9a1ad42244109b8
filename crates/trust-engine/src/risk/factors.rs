//! Individual risk factor computations.
//!
//! Each function inspects one aspect of the context and yields at most one
//! finding. `None` means the evidence was missing or the aspect is neutral.

use mintwarden_core::config::{FactorLimits, RiskWeights};
use mintwarden_core::context::AnalysisContext;
use mintwarden_core::evidence::LiquiditySnapshot;
use mintwarden_core::trust::CreatorRisk;

#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// Adverse condition with its nominal score contribution.
    Risk { points: f64, text: String },
    /// Favorable condition; never changes the score.
    Safety(String),
}

impl Finding {
    fn risk(points: f64, text: impl Into<String>) -> Self {
        Finding::Risk {
            points,
            text: text.into(),
        }
    }

    fn safety(text: impl Into<String>) -> Self {
        Finding::Safety(text.into())
    }
}

pub fn mint_authority(context: &AnalysisContext, weights: &RiskWeights) -> Option<Finding> {
    context.mint_revoked.map(|revoked| {
        if revoked {
            Finding::safety("Mint authority revoked")
        } else {
            Finding::risk(
                weights.mint_authority_active,
                "Mint authority is active: supply can be inflated",
            )
        }
    })
}

pub fn freeze_authority(context: &AnalysisContext, weights: &RiskWeights) -> Option<Finding> {
    context.freeze_revoked.map(|revoked| {
        if revoked {
            Finding::safety("Freeze authority revoked")
        } else {
            Finding::risk(
                weights.freeze_authority_active,
                "Freeze authority is active: holder accounts can be frozen",
            )
        }
    })
}

pub fn token_age(
    context: &AnalysisContext,
    weights: &RiskWeights,
    limits: &FactorLimits,
) -> Option<Finding> {
    let age = context.token_age_days?;
    if age < limits.very_young_days {
        Some(Finding::risk(
            weights.token_too_young,
            format!("Token is less than a day old ({:.1} hours)", age * 24.0),
        ))
    } else if age < limits.young_days {
        Some(Finding::risk(
            weights.token_too_young * 0.5,
            format!("Token is less than a week old ({age:.1} days)"),
        ))
    } else if age >= limits.mature_days {
        Some(Finding::safety(format!(
            "Token has been active for {age:.0} days"
        )))
    } else {
        None
    }
}

pub fn transfer_activity(
    context: &AnalysisContext,
    weights: &RiskWeights,
    limits: &FactorLimits,
) -> Option<Finding> {
    let transfers = context.activity.as_ref()?.total_transfers;
    if transfers < limits.low_transfer_count {
        Some(Finding::risk(
            weights.low_transfer_volume,
            format!("Very low transfer activity ({transfers} transfers)"),
        ))
    } else if transfers >= limits.healthy_transfer_count {
        Some(Finding::safety(format!(
            "Healthy transfer activity ({transfers} transfers)"
        )))
    } else {
        None
    }
}

/// Creator rating plus any suspicious transaction patterns, as one finding.
pub fn creator_behavior(context: &AnalysisContext, weights: &RiskWeights) -> Option<Finding> {
    let patterns = context
        .activity
        .as_ref()
        .map(|activity| activity.suspicious_patterns.as_slice())
        .unwrap_or(&[]);

    if !patterns.is_empty() {
        let rating = context
            .creator_risk
            .map(|risk| format!(" (creator rated {risk})"))
            .unwrap_or_default();
        return Some(Finding::risk(
            weights.suspicious_creator_behavior,
            format!("Suspicious creator behavior: {}{rating}", patterns.join(", ")),
        ));
    }

    match context.creator_risk? {
        CreatorRisk::High => Some(Finding::risk(
            weights.suspicious_creator_behavior,
            "Creator wallet rated HIGH risk",
        )),
        CreatorRisk::Medium => Some(Finding::risk(
            weights.suspicious_creator_behavior * 0.5,
            "Creator wallet rated MEDIUM risk",
        )),
        CreatorRisk::Low => Some(Finding::safety("Creator wallet rated LOW risk")),
    }
}

pub fn metadata_quality(context: &AnalysisContext, weights: &RiskWeights) -> Option<Finding> {
    let flags = context.metadata?;
    let missing = flags.missing();
    if missing.is_empty() {
        return Some(Finding::safety("Complete token metadata"));
    }
    let share = missing.len() as f64 / 4.0;
    Some(Finding::risk(
        weights.poor_metadata * share,
        format!("Incomplete metadata (missing: {})", missing.join(", ")),
    ))
}

pub fn low_liquidity(
    snapshot: &LiquiditySnapshot,
    weights: &RiskWeights,
    limits: &FactorLimits,
) -> Option<Finding> {
    let liquidity = snapshot.total_liquidity;
    if liquidity < limits.low_liquidity {
        Some(Finding::risk(
            weights.low_liquidity,
            format!("Low liquidity (${liquidity:.0})"),
        ))
    } else if liquidity >= limits.deep_liquidity {
        Some(Finding::safety(format!("Deep liquidity (${liquidity:.0})")))
    } else {
        None
    }
}

pub fn volume_to_liquidity(
    snapshot: &LiquiditySnapshot,
    weights: &RiskWeights,
    limits: &FactorLimits,
) -> Option<Finding> {
    if snapshot.total_liquidity <= 0.0 {
        return None;
    }
    let ratio = snapshot.volume_24h / snapshot.total_liquidity;
    (ratio > limits.max_volume_liquidity_ratio).then(|| {
        Finding::risk(
            weights.high_volume_to_liquidity_ratio,
            format!("High volume-to-liquidity ratio ({ratio:.1}x)"),
        )
    })
}

pub fn rug_pull(snapshot: &LiquiditySnapshot, weights: &RiskWeights) -> Option<Finding> {
    snapshot
        .rug_pull_detected
        .then(|| Finding::risk(weights.rug_pull_detected, "Rug-pull indicators detected"))
}

pub fn pool_concentration(snapshot: &LiquiditySnapshot, weights: &RiskWeights) -> Option<Finding> {
    (snapshot.pool_count == 1).then(|| {
        Finding::risk(
            weights.single_pool_concentration,
            "Liquidity concentrated in a single pool",
        )
    })
}
