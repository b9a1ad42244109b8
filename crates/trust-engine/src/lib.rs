use anyhow::Result;
use time::OffsetDateTime;
use tracing::{info, warn};

use mintwarden_core::config::Config;
use mintwarden_core::context::AnalysisContext;
use mintwarden_core::evidence::{EvidenceBundle, EvidenceCheck, MetadataRecord, TokenIdentity};

pub mod heuristic;
mod recommend;
pub mod risk;
mod verdict;
pub mod verification;

pub use heuristic::{HeuristicClassifier, KeywordList, KeywordScreen};
pub use recommend::recommend;
pub use risk::RiskFactorEngine;
pub use verdict::{
    HeuristicFlag, RiskAssessment, TokenVerdict, VerificationResult, FAIL_SAFE_FACTOR,
    FAIL_SAFE_SCORE,
};
pub use verification::{
    CriticalRegistry, MatchedOnly, NominalWeight, VerificationAggregator, WeightingPolicy,
};

/// Trust verdict engine for a single token.
///
/// Holds only configuration; every operation is a pure function of its
/// arguments, so callers may memoize results by evidence fingerprint.
#[derive(Debug)]
pub struct TrustEngine {
    registry: CriticalRegistry,
    aggregator: VerificationAggregator,
    classifier: HeuristicClassifier,
    risk: RiskFactorEngine,
}

impl TrustEngine {
    /// Creates a TrustEngine from validated configuration
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let registry = CriticalRegistry::from_config(&config);
        Ok(Self {
            registry,
            aggregator: VerificationAggregator::new(config.verification),
            classifier: HeuristicClassifier::new(config.heuristic),
            risk: RiskFactorEngine::new(config.risk),
        })
    }

    pub fn with_registry(mut self, registry: CriticalRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_weighting(mut self, policy: Box<dyn WeightingPolicy>) -> Self {
        self.aggregator = self.aggregator.with_policy(policy);
        self
    }

    pub fn with_keyword_screen(mut self, screen: Box<dyn KeywordScreen>) -> Self {
        self.classifier = self.classifier.with_screen(screen);
        self
    }

    /// Aggregates registry evidence into a verification verdict
    pub fn verify(
        &self,
        identity: &TokenIdentity,
        checks: &[EvidenceCheck],
        metadata: Option<&MetadataRecord>,
    ) -> VerificationResult {
        self.aggregator
            .aggregate(identity, checks, metadata, &self.registry)
    }

    /// Verification only, over a collected bundle. Applies the same evidence
    /// validation as [`TrustEngine::analyze`], so invalid evidence is never
    /// verified.
    pub fn verify_bundle(&self, bundle: &EvidenceBundle) -> VerificationResult {
        if let Err(error) = bundle.validate() {
            warn!(
                mint = %bundle.identity.mint,
                error = %error,
                "evidence rejected; returning unverified result"
            );
            return TokenVerdict::fail_safe(bundle.identity.clone()).verification;
        }
        self.verify(&bundle.identity, &bundle.checks(), bundle.metadata())
    }

    /// Evaluates the recently-launched legitimacy signals
    pub fn classify(&self, context: &AnalysisContext) -> HeuristicFlag {
        self.classifier.classify(context)
    }

    /// Scores risk for an already verified and classified token
    pub fn assess_risk(
        &self,
        context: &AnalysisContext,
        verification: &VerificationResult,
        heuristic: &HeuristicFlag,
    ) -> RiskAssessment {
        self.risk.score(context, verification, heuristic)
    }

    /// Runs the full pipeline over a collected bundle. Evidence that cannot be
    /// validated yields the fail-safe HIGH verdict instead of an error.
    pub fn analyze(&self, bundle: &EvidenceBundle, now: OffsetDateTime) -> TokenVerdict {
        let context = match AnalysisContext::from_bundle(bundle, now) {
            Ok(context) => context,
            Err(error) => {
                warn!(
                    mint = %bundle.identity.mint,
                    error = %error,
                    "evidence rejected; returning fail-safe verdict"
                );
                return TokenVerdict::fail_safe(bundle.identity.clone());
            }
        };

        let verification = self.verify(&bundle.identity, &bundle.checks(), bundle.metadata());
        let heuristic = self.classify(&context);
        let assessment = self.assess_risk(&context, &verification, &heuristic);

        info!(
            mint = %bundle.identity.mint,
            verification = %verification.level,
            confidence = verification.confidence,
            score = assessment.score,
            level = %assessment.level,
            "token analyzed"
        );

        TokenVerdict {
            identity: bundle.identity.clone(),
            verification,
            heuristic,
            assessment,
        }
    }
}
