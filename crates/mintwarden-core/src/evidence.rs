//! Evidence records produced by collectors.
//!
//! Every source category has its own record type. A bundle carries at most
//! one record per single-valued category and any number of registry checks.
//! Collectors that failed or timed out report [`Evidence::Unavailable`], or a
//! registry check with `participated = false`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use crate::error::MintWardenError;
use crate::trust::CreatorRisk;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenIdentity {
    pub mint: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    OnChain,
    Registry,
    Transactions,
    Liquidity,
    Social,
    Metadata,
    Creator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    OnChain(AuthorityRecord),
    Registry(EvidenceCheck),
    Transactions(TransactionSummary),
    Liquidity(LiquiditySnapshot),
    Social(SocialSnapshot),
    Metadata(MetadataRecord),
    Creator(CreatorProfile),
    Unavailable {
        source: String,
        category: EvidenceCategory,
    },
}

/// Mint/freeze authority state read from chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityRecord {
    pub mint_revoked: bool,
    pub freeze_revoked: bool,
    pub decimals: u8,
    pub supply: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// One registry or venue check. `weight` is the source's trust contribution,
/// which collectors only set when `matched` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceCheck {
    pub source: String,
    #[serde(default = "participated_by_default")]
    pub participated: bool,
    pub matched: bool,
    pub weight: f64,
    #[serde(default)]
    pub details: Option<RegistryDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDetails {
    #[serde(default)]
    pub trust_score: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub strict_listing: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub total_transfers: u64,
    pub days_active: f64,
    pub unique_accounts: u64,
    #[serde(default)]
    pub suspicious_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquiditySnapshot {
    pub total_liquidity: f64,
    pub volume_24h: f64,
    pub pool_count: u32,
    pub rug_pull_detected: bool,
    #[serde(default)]
    pub volume_change_24h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialSnapshot {
    pub overall_score: f64,
    pub twitter_verified: bool,
    #[serde(default)]
    pub community_member_counts: CommunityCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityCounts {
    #[serde(default)]
    pub twitter: Option<u64>,
    #[serde(default)]
    pub telegram: Option<u64>,
    #[serde(default)]
    pub discord: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorProfile {
    pub risk_level: CreatorRisk,
    #[serde(default)]
    pub tokens_created: u32,
    #[serde(default)]
    pub rugged_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub identity: TokenIdentity,
    #[serde(default)]
    pub records: Vec<Evidence>,
}

fn participated_by_default() -> bool {
    true
}

impl Evidence {
    pub fn category(&self) -> EvidenceCategory {
        match self {
            Evidence::OnChain(_) => EvidenceCategory::OnChain,
            Evidence::Registry(_) => EvidenceCategory::Registry,
            Evidence::Transactions(_) => EvidenceCategory::Transactions,
            Evidence::Liquidity(_) => EvidenceCategory::Liquidity,
            Evidence::Social(_) => EvidenceCategory::Social,
            Evidence::Metadata(_) => EvidenceCategory::Metadata,
            Evidence::Creator(_) => EvidenceCategory::Creator,
            Evidence::Unavailable { category, .. } => *category,
        }
    }
}

impl EvidenceCheck {
    /// Check for a source that errored or timed out.
    pub fn absent(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            participated: false,
            matched: false,
            weight: 0.0,
            details: None,
        }
    }
}

impl MetadataRecord {
    /// Field names that are missing or blank, in display order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("name", &self.name),
            ("symbol", &self.symbol),
            ("image", &self.image),
            ("description", &self.description),
        ];
        fields
            .iter()
            .filter(|(_, value)| !is_present(value))
            .map(|(label, _)| *label)
            .collect()
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

impl EvidenceBundle {
    pub fn new(identity: TokenIdentity) -> Self {
        Self {
            identity,
            records: Vec::new(),
        }
    }

    pub fn with_record(mut self, record: Evidence) -> Self {
        self.records.push(record);
        self
    }

    pub fn authority(&self) -> Option<&AuthorityRecord> {
        self.records.iter().find_map(|record| match record {
            Evidence::OnChain(value) => Some(value),
            _ => None,
        })
    }

    pub fn transactions(&self) -> Option<&TransactionSummary> {
        self.records.iter().find_map(|record| match record {
            Evidence::Transactions(value) => Some(value),
            _ => None,
        })
    }

    pub fn liquidity(&self) -> Option<&LiquiditySnapshot> {
        self.records.iter().find_map(|record| match record {
            Evidence::Liquidity(value) => Some(value),
            _ => None,
        })
    }

    pub fn social(&self) -> Option<&SocialSnapshot> {
        self.records.iter().find_map(|record| match record {
            Evidence::Social(value) => Some(value),
            _ => None,
        })
    }

    pub fn metadata(&self) -> Option<&MetadataRecord> {
        self.records.iter().find_map(|record| match record {
            Evidence::Metadata(value) => Some(value),
            _ => None,
        })
    }

    pub fn creator(&self) -> Option<&CreatorProfile> {
        self.records.iter().find_map(|record| match record {
            Evidence::Creator(value) => Some(value),
            _ => None,
        })
    }

    /// Registry checks in input order. Unavailable registry sources are
    /// reported as non-participating checks.
    pub fn checks(&self) -> Vec<EvidenceCheck> {
        self.records
            .iter()
            .filter_map(|record| match record {
                Evidence::Registry(check) => Some(check.clone()),
                Evidence::Unavailable {
                    source,
                    category: EvidenceCategory::Registry,
                } => Some(EvidenceCheck::absent(source.clone())),
                _ => None,
            })
            .collect()
    }

    /// Rejects records that cannot be scored. Runs before any context is built.
    pub fn validate(&self) -> Result<(), MintWardenError> {
        if self.identity.mint.trim().is_empty() {
            return Err(MintWardenError::MissingIdentity);
        }

        let mut seen = HashSet::new();
        for record in &self.records {
            let category = record.category();
            let single_valued = !matches!(
                record,
                Evidence::Registry(_) | Evidence::Unavailable { .. }
            );
            if single_valued && !seen.insert(category) {
                return Err(MintWardenError::DuplicateEvidence(category.to_string()));
            }
            validate_record(record)?;
        }
        Ok(())
    }

    /// SHA-256 over the canonical JSON form, usable as a memoization key.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self).context("render evidence bundle JSON")?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}

fn validate_record(record: &Evidence) -> Result<(), MintWardenError> {
    match record {
        Evidence::OnChain(authority) => {
            authority.supply.trim().parse::<u128>().map_err(|_| {
                MintWardenError::invalid_evidence(
                    "on_chain",
                    format!("unparsable supply '{}'", authority.supply),
                )
            })?;
        }
        Evidence::Registry(check) => {
            ensure_non_negative(&check.source, "weight", check.weight)?;
            if let Some(score) = check.details.as_ref().and_then(|d| d.trust_score) {
                ensure_non_negative(&check.source, "trust_score", score)?;
            }
        }
        Evidence::Transactions(summary) => {
            ensure_non_negative("transactions", "days_active", summary.days_active)?;
        }
        Evidence::Liquidity(snapshot) => {
            ensure_non_negative("liquidity", "total_liquidity", snapshot.total_liquidity)?;
            ensure_non_negative("liquidity", "volume_24h", snapshot.volume_24h)?;
            if !snapshot.volume_change_24h.is_finite() {
                return Err(MintWardenError::invalid_evidence(
                    "liquidity",
                    "volume_change_24h is not finite",
                ));
            }
        }
        Evidence::Social(snapshot) => {
            ensure_non_negative("social", "overall_score", snapshot.overall_score)?;
            if snapshot.overall_score > 100.0 {
                return Err(MintWardenError::invalid_evidence(
                    "social",
                    format!("overall_score {} exceeds 100", snapshot.overall_score),
                ));
            }
        }
        Evidence::Metadata(_) | Evidence::Creator(_) | Evidence::Unavailable { .. } => {}
    }
    Ok(())
}

fn ensure_non_negative(source: &str, field: &str, value: f64) -> Result<(), MintWardenError> {
    if !value.is_finite() || value < 0.0 {
        return Err(MintWardenError::invalid_evidence(
            source,
            format!("{field} must be a finite non-negative number (got {value})"),
        ));
    }
    Ok(())
}

impl fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            EvidenceCategory::OnChain => "on_chain",
            EvidenceCategory::Registry => "registry",
            EvidenceCategory::Transactions => "transactions",
            EvidenceCategory::Liquidity => "liquidity",
            EvidenceCategory::Social => "social",
            EvidenceCategory::Metadata => "metadata",
            EvidenceCategory::Creator => "creator",
        };
        write!(f, "{value}")
    }
}

impl FromStr for EvidenceCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().replace('-', "_").as_str() {
            "on_chain" => Ok(EvidenceCategory::OnChain),
            "registry" => Ok(EvidenceCategory::Registry),
            "transactions" => Ok(EvidenceCategory::Transactions),
            "liquidity" => Ok(EvidenceCategory::Liquidity),
            "social" => Ok(EvidenceCategory::Social),
            "metadata" => Ok(EvidenceCategory::Metadata),
            "creator" => Ok(EvidenceCategory::Creator),
            _ => Err(format!("unknown evidence category: {value}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> TokenIdentity {
        TokenIdentity {
            mint: "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU".to_string(),
            name: Some("Samoyed Coin".to_string()),
            symbol: Some("SAMO".to_string()),
        }
    }

    fn liquidity(total: f64) -> Evidence {
        Evidence::Liquidity(LiquiditySnapshot {
            total_liquidity: total,
            volume_24h: 50.0,
            pool_count: 2,
            rug_pull_detected: false,
            volume_change_24h: 0.0,
        })
    }

    #[test]
    fn test_bundle_parses_tagged_records() {
        let json = r#"{
            "identity": { "mint": "abc" },
            "records": [
                { "kind": "on_chain", "mint_revoked": true, "freeze_revoked": false,
                  "decimals": 9, "supply": "1000000", "created_at": "2026-10-01T00:00:00Z" },
                { "kind": "registry", "source": "Jupiter", "matched": true, "weight": 30,
                  "details": { "strict_listing": true } },
                { "kind": "unavailable", "source": "CoinGecko", "category": "registry" }
            ]
        }"#;
        let bundle: EvidenceBundle = serde_json::from_str(json).unwrap();
        let authority = bundle.authority().unwrap();
        assert!(authority.mint_revoked);
        assert!(authority.created_at.is_some());

        let checks = bundle.checks();
        assert_eq!(checks.len(), 2);
        assert!(checks[0].participated);
        assert!(!checks[1].participated);
        assert_eq!(checks[1].source, "CoinGecko");
    }

    #[test]
    fn test_validate_rejects_duplicate_single_valued_records() {
        let bundle = EvidenceBundle::new(identity())
            .with_record(liquidity(10.0))
            .with_record(liquidity(20.0));
        assert!(matches!(
            bundle.validate(),
            Err(MintWardenError::DuplicateEvidence(_))
        ));
    }

    #[test]
    fn test_validate_allows_many_registry_checks() {
        let bundle = EvidenceBundle::new(identity())
            .with_record(Evidence::Registry(EvidenceCheck::absent("a")))
            .with_record(Evidence::Registry(EvidenceCheck::absent("b")));
        assert!(bundle.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let bundle = EvidenceBundle::new(identity()).with_record(liquidity(-1.0));
        assert!(bundle.validate().is_err());

        let bundle = EvidenceBundle::new(identity()).with_record(liquidity(f64::NAN));
        assert!(bundle.validate().is_err());

        let bundle = EvidenceBundle::new(identity()).with_record(Evidence::OnChain(AuthorityRecord {
            mint_revoked: true,
            freeze_revoked: true,
            decimals: 6,
            supply: "lots".to_string(),
            created_at: None,
        }));
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn test_validate_requires_mint() {
        let mut id = identity();
        id.mint = "  ".to_string();
        assert!(matches!(
            EvidenceBundle::new(id).validate(),
            Err(MintWardenError::MissingIdentity)
        ));
    }

    #[test]
    fn test_missing_metadata_fields_treat_blank_as_missing() {
        let record = MetadataRecord {
            name: Some("Samoyed Coin".to_string()),
            symbol: Some(" ".to_string()),
            image: None,
            description: Some("dog".to_string()),
        };
        assert_eq!(record.missing_fields(), vec!["symbol", "image"]);
    }

    #[test]
    fn test_fingerprint_is_stable_and_sensitive() {
        let a = EvidenceBundle::new(identity()).with_record(liquidity(10.0));
        let b = a.clone();
        let c = EvidenceBundle::new(identity()).with_record(liquidity(11.0));
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
        assert_eq!(a.fingerprint().unwrap().len(), 64);
    }
}
