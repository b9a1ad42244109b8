pub mod config;
pub mod context;
pub mod error;
pub mod evidence;
pub mod ids;
pub mod trust;

pub use config::{Config, ConfigPaths, WeightingMode};
pub use context::{ActivitySummary, AnalysisContext, MetadataFlags};
pub use error::MintWardenError;
pub use evidence::{
    AuthorityRecord, CommunityCounts, CreatorProfile, Evidence, EvidenceBundle, EvidenceCategory,
    EvidenceCheck, LiquiditySnapshot, MetadataRecord, RegistryDetails, SocialSnapshot,
    TokenIdentity, TransactionSummary,
};
pub use ids::AnalysisId;
pub use trust::{CreatorRisk, RiskLevel, VerificationLevel};
