use trust_engine::TokenVerdict;

/// The verdict as evaluation steps, in the order the engine produced them.
pub fn timeline(verdict: &TokenVerdict) -> Vec<String> {
    let verification = &verdict.verification;
    let heuristic = &verdict.heuristic;
    let assessment = &verdict.assessment;

    let mut lines = vec![format!(
        "verification: {} ({}% confidence)",
        verification.level, verification.confidence
    )];
    lines.extend(verification.reasons.iter().map(|reason| format!("  {reason}")));
    lines.push(format!(
        "launch signals: {}/{} ({:.0}%){}",
        heuristic.positive_signals,
        heuristic.total_signals,
        heuristic.confidence_pct,
        if heuristic.is_recently_launched_legitimate {
            ", recently launched"
        } else {
            ""
        }
    ));
    lines.extend(assessment.risk_factors.iter().map(|factor| format!("+ {factor}")));
    lines.extend(assessment.safety_factors.iter().map(|factor| format!("- {factor}")));
    lines.push(format!("result: {} ({}/100)", assessment.level, assessment.score));
    lines
}
