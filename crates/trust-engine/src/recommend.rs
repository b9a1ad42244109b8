use crate::verdict::{HeuristicFlag, VerificationResult};

/// Ordered guidance for a scored token. Pure lookup over its inputs.
pub fn recommend(
    score: u8,
    verification: &VerificationResult,
    heuristic: &HeuristicFlag,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if verification.is_verified {
        recommendations.push(format!(
            "Verified {} token ({}% confidence)",
            verification.level, verification.confidence
        ));
        if !verification.sources.is_empty() {
            recommendations.push(format!(
                "Recognized by: {}",
                verification.sources.join(", ")
            ));
        }
        if score > 20 {
            recommendations.push(format!(
                "Some risk remains despite verification (score {score}); review the risk factors before trading"
            ));
        }
        return recommendations;
    }

    if heuristic.is_recently_launched_legitimate {
        recommendations.push(format!(
            "Recently launched token showing legitimate signals ({}/{} checks passed)",
            heuristic.positive_signals, heuristic.total_signals
        ));
        recommendations
            .push("Monitor liquidity and holder activity closely over the coming days".to_string());
        recommendations
            .push("Wait for registry verification before committing large amounts".to_string());
        let caution = match score {
            60..=u8::MAX => "High risk despite positive launch signals; avoid or keep exposure minimal",
            40..=59 => "Moderate risk; start with a small position if you proceed",
            _ => "Low risk for a new token; keep monitoring as it matures",
        };
        recommendations.push(caution.to_string());
        return recommendations;
    }

    let message = match score {
        80..=u8::MAX => "AVOID: critical risk indicators present",
        60..=79 => "High risk: interact only with extreme caution",
        _ => "Unverified token; it may be legitimate, but research it before trading",
    };
    recommendations.push(message.to_string());
    recommendations
}
