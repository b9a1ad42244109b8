use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registry trust tier, strongest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerificationLevel {
    Official,
    Established,
    Community,
    Unverified,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Risk rating of the wallet that created the token, as reported by a collector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CreatorRisk {
    Low,
    Medium,
    High,
}

impl VerificationLevel {
    pub fn is_verified(&self) -> bool {
        !matches!(self, VerificationLevel::Unverified)
    }

    pub fn calm_label(&self) -> &'static str {
        match self {
            VerificationLevel::Official => "officially recognized",
            VerificationLevel::Established => "established",
            VerificationLevel::Community => "community recognized",
            VerificationLevel::Unverified => "unverified",
        }
    }
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low risk",
            RiskLevel::Medium => "medium risk",
            RiskLevel::High => "high risk",
            RiskLevel::Critical => "critical risk",
        }
    }
}

impl FromStr for VerificationLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "official" => Ok(VerificationLevel::Official),
            "established" => Ok(VerificationLevel::Established),
            "community" => Ok(VerificationLevel::Community),
            "unverified" => Ok(VerificationLevel::Unverified),
            _ => Err(format!("unknown verification level: {value}")),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(format!("unknown risk level: {value}")),
        }
    }
}

impl FromStr for CreatorRisk {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "low" => Ok(CreatorRisk::Low),
            "medium" => Ok(CreatorRisk::Medium),
            "high" => Ok(CreatorRisk::High),
            _ => Err(format!("unknown creator risk: {value}")),
        }
    }
}

impl fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            VerificationLevel::Official => "OFFICIAL",
            VerificationLevel::Established => "ESTABLISHED",
            VerificationLevel::Community => "COMMUNITY",
            VerificationLevel::Unverified => "UNVERIFIED",
        };
        write!(f, "{value}")
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        };
        write!(f, "{value}")
    }
}

impl fmt::Display for CreatorRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CreatorRisk::Low => "LOW",
            CreatorRisk::Medium => "MEDIUM",
            CreatorRisk::High => "HIGH",
        };
        write!(f, "{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_parse_case_insensitively() {
        assert_eq!("official".parse::<VerificationLevel>(), Ok(VerificationLevel::Official));
        assert_eq!("CRITICAL".parse::<RiskLevel>(), Ok(RiskLevel::Critical));
        assert!("platinum".parse::<VerificationLevel>().is_err());
    }

    #[test]
    fn test_risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_only_unverified_is_not_verified() {
        assert!(VerificationLevel::Community.is_verified());
        assert!(!VerificationLevel::Unverified.is_verified());
    }
}
