use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::MintWardenError;

/// Schema version of the weight and threshold tables.
pub const CONFIG_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub version: u32,
    pub verification: VerificationConfig,
    pub heuristic: HeuristicConfig,
    pub risk: RiskConfig,
    pub critical_tokens: Vec<CriticalTokenConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingMode {
    /// Only participating sources' reported weights count.
    MatchedOnly,
    /// Participating sources that did not match still add their nominal
    /// weight to the denominator.
    NominalWeight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationConfig {
    pub weighting: WeightingMode,
    pub official: LevelRule,
    pub established: LevelRule,
    pub community: LevelRule,
    pub high_trust_score: f64,
    pub top_market_cap_rank: u32,
    pub nominal_weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRule {
    pub min_confidence: u8,
    pub min_verified_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicConfig {
    pub min_age_days: f64,
    pub max_age_days: f64,
    pub min_transfers: u64,
    pub min_liquidity: f64,
    pub min_volume_24h: f64,
    pub min_social_score: f64,
    pub twitter_followers: u64,
    pub telegram_members: u64,
    pub discord_members: u64,
    pub min_signals: u32,
    pub min_confidence_pct: f64,
    pub placeholder_names: Vec<String>,
    pub scam_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub weights: RiskWeights,
    pub baseline: BaselineConfig,
    pub multipliers: MultiplierConfig,
    pub limits: FactorLimits,
    pub thresholds: ThresholdTable,
}

/// Nominal score contribution of each adverse factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub mint_authority_active: f64,
    pub freeze_authority_active: f64,
    pub token_too_young: f64,
    pub low_transfer_volume: f64,
    pub suspicious_creator_behavior: f64,
    pub poor_metadata: f64,
    pub low_liquidity: f64,
    pub high_volume_to_liquidity_ratio: f64,
    pub rug_pull_detected: f64,
    pub single_pool_concentration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineConfig {
    pub official_discount: f64,
    pub established_discount: f64,
    pub community_discount: f64,
    pub official_flat_discount: f64,
    pub unverified_penalty: f64,
    pub heuristic_penalty_multiplier: f64,
    pub heuristic_penalty_floor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierConfig {
    pub established: f64,
    pub community: f64,
    pub heuristic: f64,
    pub verified_venue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorLimits {
    pub very_young_days: f64,
    pub young_days: f64,
    pub mature_days: f64,
    pub low_transfer_count: u64,
    pub healthy_transfer_count: u64,
    pub low_liquidity: f64,
    pub deep_liquidity: f64,
    pub max_volume_liquidity_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub official: LevelBands,
    pub established: LevelBands,
    pub community: LevelBands,
    pub unverified: LevelBands,
}

/// Minimum scores for each risk level. A missing band is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBands {
    pub medium: u8,
    #[serde(default)]
    pub high: Option<u8>,
    #[serde(default)]
    pub critical: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalTokenConfig {
    pub mint: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            version: CONFIG_VERSION,
            verification: VerificationConfig {
                weighting: WeightingMode::MatchedOnly,
                official: LevelRule {
                    min_confidence: 80,
                    min_verified_weight: 60.0,
                },
                established: LevelRule {
                    min_confidence: 60,
                    min_verified_weight: 40.0,
                },
                community: LevelRule {
                    min_confidence: 40,
                    min_verified_weight: 20.0,
                },
                high_trust_score: 7.0,
                top_market_cap_rank: 100,
                nominal_weights: [
                    ("Jupiter", 30.0),
                    ("CoinGecko", 25.0),
                    ("Solana Token List", 20.0),
                    ("Birdeye", 15.0),
                    ("DexScreener", 10.0),
                ]
                .into_iter()
                .map(|(name, weight)| (name.to_string(), weight))
                .collect(),
            },
            heuristic: HeuristicConfig {
                min_age_days: 0.1,
                max_age_days: 30.0,
                min_transfers: 5,
                min_liquidity: 100.0,
                min_volume_24h: 10.0,
                min_social_score: 50.0,
                twitter_followers: 5_000,
                telegram_members: 1_000,
                discord_members: 500,
                min_signals: 4,
                min_confidence_pct: 60.0,
                placeholder_names: ["", "unknown", "unknown token", "token", "???", "n/a"]
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
                scam_keywords: [
                    "scam",
                    "rug",
                    "honeypot",
                    "fake",
                    "test",
                    "airdrop",
                    "giveaway",
                    "free money",
                ]
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            },
            risk: RiskConfig {
                weights: RiskWeights {
                    mint_authority_active: 25.0,
                    freeze_authority_active: 20.0,
                    token_too_young: 15.0,
                    low_transfer_volume: 10.0,
                    suspicious_creator_behavior: 20.0,
                    poor_metadata: 10.0,
                    low_liquidity: 15.0,
                    high_volume_to_liquidity_ratio: 10.0,
                    rug_pull_detected: 40.0,
                    single_pool_concentration: 5.0,
                },
                baseline: BaselineConfig {
                    official_discount: 30.0,
                    established_discount: 20.0,
                    community_discount: 10.0,
                    official_flat_discount: 10.0,
                    unverified_penalty: 20.0,
                    heuristic_penalty_multiplier: 0.5,
                    heuristic_penalty_floor: 10.0,
                },
                multipliers: MultiplierConfig {
                    established: 0.3,
                    community: 0.6,
                    heuristic: 0.5,
                    verified_venue: 0.5,
                },
                limits: FactorLimits {
                    very_young_days: 1.0,
                    young_days: 7.0,
                    mature_days: 30.0,
                    low_transfer_count: 10,
                    healthy_transfer_count: 100,
                    low_liquidity: 1_000.0,
                    deep_liquidity: 100_000.0,
                    max_volume_liquidity_ratio: 10.0,
                },
                thresholds: ThresholdTable {
                    official: LevelBands {
                        medium: 25,
                        high: None,
                        critical: None,
                    },
                    established: LevelBands {
                        medium: 30,
                        high: Some(70),
                        critical: Some(90),
                    },
                    community: LevelBands {
                        medium: 35,
                        high: Some(65),
                        critical: Some(85),
                    },
                    unverified: LevelBands {
                        medium: 40,
                        high: Some(60),
                        critical: Some(80),
                    },
                },
            },
            critical_tokens: vec![
                CriticalTokenConfig {
                    mint: "So11111111111111111111111111111111111111112".to_string(),
                    name: "Wrapped SOL".to_string(),
                },
                CriticalTokenConfig {
                    mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
                    name: "USD Coin".to_string(),
                },
                CriticalTokenConfig {
                    mint: "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB".to_string(),
                    name: "Tether USD".to_string(),
                },
            ],
        }
    }

    /// Rejects tables the engine cannot apply consistently.
    pub fn validate(&self) -> Result<(), MintWardenError> {
        if self.version != CONFIG_VERSION {
            return Err(MintWardenError::InvalidConfig(format!(
                "unsupported config version {} (expected {CONFIG_VERSION})",
                self.version
            )));
        }

        let weights = &self.risk.weights;
        let named = [
            ("mint_authority_active", weights.mint_authority_active),
            ("freeze_authority_active", weights.freeze_authority_active),
            ("token_too_young", weights.token_too_young),
            ("low_transfer_volume", weights.low_transfer_volume),
            ("suspicious_creator_behavior", weights.suspicious_creator_behavior),
            ("poor_metadata", weights.poor_metadata),
            ("low_liquidity", weights.low_liquidity),
            ("high_volume_to_liquidity_ratio", weights.high_volume_to_liquidity_ratio),
            ("rug_pull_detected", weights.rug_pull_detected),
            ("single_pool_concentration", weights.single_pool_concentration),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(MintWardenError::InvalidConfig(format!(
                    "risk weight {name} must be non-negative"
                )));
            }
        }

        let multipliers = &self.risk.multipliers;
        let fractions = [
            ("established", multipliers.established),
            ("community", multipliers.community),
            ("heuristic", multipliers.heuristic),
            ("verified_venue", multipliers.verified_venue),
            ("heuristic_penalty_multiplier", self.risk.baseline.heuristic_penalty_multiplier),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(MintWardenError::InvalidConfig(format!(
                    "multiplier {name} must be within [0, 1]"
                )));
            }
        }

        let baseline = &self.risk.baseline;
        let limits = &self.risk.limits;
        let amounts = [
            ("baseline.official_discount", baseline.official_discount),
            ("baseline.established_discount", baseline.established_discount),
            ("baseline.community_discount", baseline.community_discount),
            ("baseline.official_flat_discount", baseline.official_flat_discount),
            ("baseline.unverified_penalty", baseline.unverified_penalty),
            ("baseline.heuristic_penalty_floor", baseline.heuristic_penalty_floor),
            ("limits.very_young_days", limits.very_young_days),
            ("limits.young_days", limits.young_days),
            ("limits.mature_days", limits.mature_days),
            ("limits.low_liquidity", limits.low_liquidity),
            ("limits.deep_liquidity", limits.deep_liquidity),
            ("limits.max_volume_liquidity_ratio", limits.max_volume_liquidity_ratio),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(MintWardenError::InvalidConfig(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }

        let ordered = [
            (
                "limits.very_young_days exceeds limits.young_days",
                limits.very_young_days <= limits.young_days,
            ),
            (
                "limits.young_days exceeds limits.mature_days",
                limits.young_days <= limits.mature_days,
            ),
            (
                "limits.low_transfer_count exceeds limits.healthy_transfer_count",
                limits.low_transfer_count <= limits.healthy_transfer_count,
            ),
            (
                "limits.low_liquidity exceeds limits.deep_liquidity",
                limits.low_liquidity <= limits.deep_liquidity,
            ),
        ];
        if let Some((message, _)) = ordered.iter().find(|(_, holds)| !holds) {
            return Err(MintWardenError::InvalidConfig(message.to_string()));
        }

        let table = &self.risk.thresholds;
        for (name, bands) in [
            ("official", table.official),
            ("established", table.established),
            ("community", table.community),
            ("unverified", table.unverified),
        ] {
            bands.check(name)?;
        }

        if self.heuristic.min_age_days > self.heuristic.max_age_days {
            return Err(MintWardenError::InvalidConfig(
                "heuristic min_age_days exceeds max_age_days".to_string(),
            ));
        }

        if self.critical_tokens.iter().any(|token| token.mint.trim().is_empty()) {
            return Err(MintWardenError::InvalidConfig(
                "critical token with empty mint".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let output = toml::to_string_pretty(self).context("render config TOML")?;
        Ok(output)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Loads the config, or the defaults when no file exists yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default_config());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let contents = self.to_toml_string()?;
        fs::write(path, contents).with_context(|| format!("write config at {}", path.display()))?;
        Ok(())
    }
}

impl LevelBands {
    fn check(&self, name: &str) -> Result<(), MintWardenError> {
        let high = self.high.unwrap_or(u8::MAX);
        let critical = self.critical.unwrap_or(u8::MAX);
        let critical_without_high = self.critical.is_some() && self.high.is_none();
        if self.medium > high || high > critical || critical_without_high {
            return Err(MintWardenError::InvalidConfig(format!(
                "{name} thresholds must be non-decreasing (medium <= high <= critical)"
            )));
        }
        Ok(())
    }
}

impl ConfigPaths {
    pub fn resolve() -> Result<Self> {
        let project_dirs = ProjectDirs::from("io", "mintwarden", "mintwarden")
            .ok_or_else(|| anyhow::anyhow!("unable to determine project directories"))?;
        let config_dir = project_dirs.config_dir();
        let data_dir = project_dirs.data_dir();
        Ok(Self {
            config_path: config_dir.join("config.toml"),
            data_dir: data_dir.to_path_buf(),
            report_dir: data_dir.join("reports"),
        })
    }
}
