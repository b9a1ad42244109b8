use thiserror::Error;

#[derive(Debug, Error)]
pub enum MintWardenError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid evidence from {source_name}: {reason}")]
    InvalidEvidence { source_name: String, reason: String },
    #[error("duplicate {0} evidence record")]
    DuplicateEvidence(String),
    #[error("missing token identity")]
    MissingIdentity,
}

impl MintWardenError {
    pub fn invalid_evidence(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEvidence {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
