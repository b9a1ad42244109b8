use serde::{Deserialize, Serialize};

use mintwarden_core::evidence::TokenIdentity;
use mintwarden_core::trust::{RiskLevel, VerificationLevel};

pub const FAIL_SAFE_SCORE: u8 = 75;
pub const FAIL_SAFE_FACTOR: &str = "Technical analysis failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub is_verified: bool,
    pub level: VerificationLevel,
    pub confidence: u8,
    pub reasons: Vec<String>,
    pub sources: Vec<String>,
}

/// Diagnostic outcome of the recently-launched classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicFlag {
    pub is_recently_launched_legitimate: bool,
    pub positive_signals: u32,
    pub total_signals: u32,
    pub confidence_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub safety_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenVerdict {
    pub identity: TokenIdentity,
    pub verification: VerificationResult,
    pub heuristic: HeuristicFlag,
    pub assessment: RiskAssessment,
}

impl VerificationResult {
    pub fn critical(name: &str) -> Self {
        Self {
            is_verified: true,
            level: VerificationLevel::Official,
            confidence: 100,
            reasons: vec![format!("Critical infrastructure: {name}")],
            sources: vec!["System Registry".to_string()],
        }
    }

    pub fn unverified(reasons: Vec<String>) -> Self {
        Self {
            is_verified: false,
            level: VerificationLevel::Unverified,
            confidence: 0,
            reasons,
            sources: Vec::new(),
        }
    }
}

impl HeuristicFlag {
    pub fn none() -> Self {
        Self {
            is_recently_launched_legitimate: false,
            positive_signals: 0,
            total_signals: 0,
            confidence_pct: 0.0,
        }
    }
}

impl RiskAssessment {
    /// Verdict used whenever the analysis cannot be completed.
    pub fn fail_safe() -> Self {
        Self {
            score: FAIL_SAFE_SCORE,
            level: RiskLevel::High,
            risk_factors: vec![FAIL_SAFE_FACTOR.to_string()],
            safety_factors: Vec::new(),
            recommendations: vec![
                "Analysis could not be completed; treat this token as high risk until it is re-analyzed"
                    .to_string(),
            ],
        }
    }
}

impl TokenVerdict {
    pub fn fail_safe(identity: TokenIdentity) -> Self {
        Self {
            identity,
            verification: VerificationResult::unverified(vec![
                "Evidence could not be validated".to_string(),
            ]),
            heuristic: HeuristicFlag::none(),
            assessment: RiskAssessment::fail_safe(),
        }
    }
}
