use time::OffsetDateTime;

use crate::error::MintWardenError;
use crate::evidence::{
    EvidenceBundle, LiquiditySnapshot, MetadataRecord, SocialSnapshot, TokenIdentity,
};
use crate::trust::CreatorRisk;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Read-only snapshot of everything known about one token for one analysis.
///
/// Each `None` means the corresponding collector supplied nothing; scoring
/// treats that as absence of signal rather than a negative finding.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisContext {
    pub identity: TokenIdentity,
    /// Display name from metadata, falling back to the identity's name.
    pub name: Option<String>,
    pub mint_revoked: Option<bool>,
    pub freeze_revoked: Option<bool>,
    pub token_age_days: Option<f64>,
    pub activity: Option<ActivitySummary>,
    pub creator_risk: Option<CreatorRisk>,
    pub metadata: Option<MetadataFlags>,
    pub liquidity: Option<LiquiditySnapshot>,
    pub social: Option<SocialSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySummary {
    pub total_transfers: u64,
    pub unique_accounts: u64,
    pub suspicious_patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataFlags {
    pub has_name: bool,
    pub has_symbol: bool,
    pub has_image: bool,
    pub has_description: bool,
}

impl MetadataFlags {
    pub fn from_record(record: &MetadataRecord) -> Self {
        let missing = record.missing_fields();
        Self {
            has_name: !missing.contains(&"name"),
            has_symbol: !missing.contains(&"symbol"),
            has_image: !missing.contains(&"image"),
            has_description: !missing.contains(&"description"),
        }
    }

    pub fn complete() -> Self {
        Self {
            has_name: true,
            has_symbol: true,
            has_image: true,
            has_description: true,
        }
    }

    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("name", self.has_name),
            ("symbol", self.has_symbol),
            ("image", self.has_image),
            ("description", self.has_description),
        ]
        .iter()
        .filter(|(_, present)| !present)
        .map(|(label, _)| *label)
        .collect()
    }
}

impl AnalysisContext {
    /// Context with no evidence beyond the identity.
    pub fn empty(identity: TokenIdentity) -> Self {
        let name = identity.name.clone();
        Self {
            identity,
            name,
            mint_revoked: None,
            freeze_revoked: None,
            token_age_days: None,
            activity: None,
            creator_risk: None,
            metadata: None,
            liquidity: None,
            social: None,
        }
    }

    /// Validates the bundle and flattens it. `now` is the only clock the
    /// analysis ever sees; age comes from the on-chain creation time when
    /// known, otherwise from the transaction history span.
    pub fn from_bundle(
        bundle: &EvidenceBundle,
        now: OffsetDateTime,
    ) -> Result<Self, MintWardenError> {
        bundle.validate()?;

        let mut context = Self::empty(bundle.identity.clone());

        if let Some(authority) = bundle.authority() {
            context.mint_revoked = Some(authority.mint_revoked);
            context.freeze_revoked = Some(authority.freeze_revoked);
            context.token_age_days = authority
                .created_at
                .map(|created| ((now - created).as_seconds_f64() / SECONDS_PER_DAY).max(0.0));
        }

        if let Some(summary) = bundle.transactions() {
            if context.token_age_days.is_none() {
                context.token_age_days = Some(summary.days_active);
            }
            context.activity = Some(ActivitySummary {
                total_transfers: summary.total_transfers,
                unique_accounts: summary.unique_accounts,
                suspicious_patterns: summary.suspicious_patterns.clone(),
            });
        }

        if let Some(record) = bundle.metadata() {
            context.metadata = Some(MetadataFlags::from_record(record));
            if let Some(name) = record.name.as_ref().filter(|n| !n.trim().is_empty()) {
                context.name = Some(name.clone());
            }
        }

        context.creator_risk = bundle.creator().map(|creator| creator.risk_level);
        context.liquidity = bundle.liquidity().cloned();
        context.social = bundle.social().cloned();

        Ok(context)
    }
}
