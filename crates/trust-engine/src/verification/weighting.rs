//! How each participating evidence check contributes to verification confidence.

use std::collections::BTreeMap;
use std::fmt;

use mintwarden_core::config::{VerificationConfig, WeightingMode};
use mintwarden_core::evidence::EvidenceCheck;

/// Weights one participating check. Non-participating checks never reach a
/// policy.
pub trait WeightingPolicy: fmt::Debug + Send + Sync {
    /// Weight added to the confidence denominator.
    fn total_weight(&self, check: &EvidenceCheck) -> f64;

    /// Weight added to the confidence numerator.
    fn verified_weight(&self, check: &EvidenceCheck) -> f64 {
        if check.matched {
            check.weight
        } else {
            0.0
        }
    }
}

/// Counts the weight each source reported. Collectors report zero weight for
/// sources that did not match, so confidence reaches 100 as soon as any
/// source matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchedOnly;

impl WeightingPolicy for MatchedOnly {
    fn total_weight(&self, check: &EvidenceCheck) -> f64 {
        check.weight
    }
}

/// Unmatched sources add their nominal weight to the denominator, so every
/// source that answered "not listed" lowers confidence.
#[derive(Debug, Clone, Default)]
pub struct NominalWeight {
    nominal: BTreeMap<String, f64>,
}

impl NominalWeight {
    pub fn new(nominal: BTreeMap<String, f64>) -> Self {
        Self { nominal }
    }
}

impl WeightingPolicy for NominalWeight {
    fn total_weight(&self, check: &EvidenceCheck) -> f64 {
        if check.matched {
            return check.weight;
        }
        self.nominal
            .get(&check.source)
            .copied()
            .unwrap_or(check.weight)
    }
}

pub fn policy_for(config: &VerificationConfig) -> Box<dyn WeightingPolicy> {
    match config.weighting {
        WeightingMode::MatchedOnly => Box::new(MatchedOnly),
        WeightingMode::NominalWeight => {
            Box::new(NominalWeight::new(config.nominal_weights.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(source: &str, matched: bool, weight: f64) -> EvidenceCheck {
        EvidenceCheck {
            source: source.to_string(),
            participated: true,
            matched,
            weight,
            details: None,
        }
    }

    #[test]
    fn test_matched_only_uses_reported_weight() {
        let policy = MatchedOnly;
        assert_eq!(policy.total_weight(&check("Jupiter", false, 0.0)), 0.0);
        assert_eq!(policy.total_weight(&check("Jupiter", true, 30.0)), 30.0);
        assert_eq!(policy.verified_weight(&check("Jupiter", true, 30.0)), 30.0);
    }

    #[test]
    fn test_nominal_weight_penalizes_unmatched_sources() {
        let mut nominal = BTreeMap::new();
        nominal.insert("CoinGecko".to_string(), 25.0);
        let policy = NominalWeight::new(nominal);

        assert_eq!(policy.total_weight(&check("CoinGecko", false, 0.0)), 25.0);
        assert_eq!(policy.verified_weight(&check("CoinGecko", false, 0.0)), 0.0);
        // unknown sources fall back to whatever they reported
        assert_eq!(policy.total_weight(&check("Elsewhere", false, 0.0)), 0.0);
    }
}
