use mintwarden_core::config::{LevelBands, ThresholdTable};
use mintwarden_core::trust::{RiskLevel, VerificationLevel};

/// Maps a score to a risk level using the bands of the verification class.
pub fn level_for(table: &ThresholdTable, verification: VerificationLevel, score: u8) -> RiskLevel {
    let bands = bands_for(table, verification);
    if reaches(bands.critical, score) {
        RiskLevel::Critical
    } else if reaches(bands.high, score) {
        RiskLevel::High
    } else if score >= bands.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn bands_for(table: &ThresholdTable, verification: VerificationLevel) -> &LevelBands {
    match verification {
        VerificationLevel::Official => &table.official,
        VerificationLevel::Established => &table.established,
        VerificationLevel::Community => &table.community,
        VerificationLevel::Unverified => &table.unverified,
    }
}

fn reaches(threshold: Option<u8>, score: u8) -> bool {
    threshold.map_or(false, |min| score >= min)
}
