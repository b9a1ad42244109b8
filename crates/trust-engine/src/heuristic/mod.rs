//! Recently-launched legitimacy classifier.
//!
//! Counts independent signals that a young, unlisted token is probably
//! legitimate. A signal only counts toward the total when its evidence exists.

use tracing::debug;

use mintwarden_core::config::HeuristicConfig;
use mintwarden_core::context::AnalysisContext;
use mintwarden_core::trust::CreatorRisk;

use crate::verdict::HeuristicFlag;

pub mod keywords;

pub use keywords::{KeywordList, KeywordScreen};

#[derive(Debug)]
pub struct HeuristicClassifier {
    config: HeuristicConfig,
    screen: Box<dyn KeywordScreen>,
}

#[derive(Debug, Default)]
struct Tally {
    positive: u32,
    total: u32,
}

impl Tally {
    fn record(&mut self, outcome: Option<bool>) {
        if let Some(passed) = outcome {
            self.total += 1;
            if passed {
                self.positive += 1;
            }
        }
    }
}

impl HeuristicClassifier {
    pub fn new(config: HeuristicConfig) -> Self {
        let screen = Box::new(KeywordList::new(&config.scam_keywords));
        Self { config, screen }
    }

    pub fn with_screen(mut self, screen: Box<dyn KeywordScreen>) -> Self {
        self.screen = screen;
        self
    }

    pub fn classify(&self, context: &AnalysisContext) -> HeuristicFlag {
        let config = &self.config;
        let mut tally = Tally::default();
        let name = context.name.as_deref();

        tally.record(
            context
                .token_age_days
                .map(|age| age >= config.min_age_days && age <= config.max_age_days),
        );
        tally.record(
            context
                .activity
                .as_ref()
                .map(|activity| activity.total_transfers >= config.min_transfers),
        );
        // Metadata without a name still counts as a failed name check.
        let name_known = name.is_some() || context.metadata.is_some();
        tally.record(name_known.then(|| name.map(|n| !self.is_placeholder(n)).unwrap_or(false)));

        let liquidity = context.liquidity.as_ref();
        tally.record(liquidity.map(|l| l.total_liquidity > config.min_liquidity));
        tally.record(name.map(|n| !self.screen.is_suspicious(n)));
        tally.record(context.creator_risk.map(|risk| risk != CreatorRisk::High));
        tally.record(liquidity.map(|l| l.volume_24h > config.min_volume_24h));
        tally.record(liquidity.map(|l| !l.rug_pull_detected));

        let social = context.social.as_ref();
        tally.record(social.map(|s| s.overall_score >= config.min_social_score));
        tally.record(social.map(|s| s.twitter_verified));
        tally.record(social.map(|s| {
            let counts = &s.community_member_counts;
            counts.twitter.map_or(false, |n| n > config.twitter_followers)
                || counts.telegram.map_or(false, |n| n > config.telegram_members)
                || counts.discord.map_or(false, |n| n > config.discord_members)
        }));

        let confidence_pct = if tally.total == 0 {
            0.0
        } else {
            100.0 * f64::from(tally.positive) / f64::from(tally.total)
        };
        let young_enough = context
            .token_age_days
            .map_or(false, |age| age <= config.max_age_days);
        let is_recently_launched_legitimate = young_enough
            && tally.total >= config.min_signals
            && confidence_pct >= config.min_confidence_pct;

        debug!(
            mint = %context.identity.mint,
            positive = tally.positive,
            total = tally.total,
            confidence_pct,
            is_recently_launched_legitimate,
            "classified launch signals"
        );

        HeuristicFlag {
            is_recently_launched_legitimate,
            positive_signals: tally.positive,
            total_signals: tally.total,
            confidence_pct,
        }
    }

    fn is_placeholder(&self, name: &str) -> bool {
        let trimmed = name.trim().to_lowercase();
        self.config
            .placeholder_names
            .iter()
            .any(|placeholder| placeholder.to_lowercase() == trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintwarden_core::config::Config;
    use mintwarden_core::context::{ActivitySummary, MetadataFlags};
    use mintwarden_core::evidence::{
        CommunityCounts, LiquiditySnapshot, SocialSnapshot, TokenIdentity,
    };

    fn classifier() -> HeuristicClassifier {
        HeuristicClassifier::new(Config::default_config().heuristic)
    }

    fn context(name: Option<&str>) -> AnalysisContext {
        AnalysisContext::empty(TokenIdentity {
            mint: "mint".to_string(),
            name: name.map(str::to_string),
            symbol: None,
        })
    }

    fn launch_context() -> AnalysisContext {
        let mut ctx = context(Some("Moon Otter"));
        ctx.token_age_days = Some(5.0);
        ctx.activity = Some(ActivitySummary {
            total_transfers: 20,
            unique_accounts: 14,
            suspicious_patterns: vec![],
        });
        ctx.liquidity = Some(LiquiditySnapshot {
            total_liquidity: 5_000.0,
            volume_24h: 250.0,
            pool_count: 2,
            rug_pull_detected: false,
            volume_change_24h: 12.0,
        });
        ctx.social = Some(SocialSnapshot {
            overall_score: 60.0,
            twitter_verified: false,
            community_member_counts: CommunityCounts::default(),
        });
        ctx
    }

    #[test]
    fn test_recent_launch_with_healthy_signals() {
        let flag = classifier().classify(&launch_context());

        // age, transfers, name, liquidity, keywords, volume, rug-pull and
        // social score pass; verified account and community size fail;
        // creator risk is unknown and not counted.
        assert_eq!(flag.total_signals, 10);
        assert_eq!(flag.positive_signals, 8);
        assert!((flag.confidence_pct - 80.0).abs() < 1e-9);
        assert!(flag.is_recently_launched_legitimate);
    }

    #[test]
    fn test_no_evidence_counts_nothing() {
        let flag = classifier().classify(&context(None));
        assert_eq!(flag.total_signals, 0);
        assert_eq!(flag.confidence_pct, 0.0);
        assert!(!flag.is_recently_launched_legitimate);
    }

    #[test]
    fn test_old_tokens_are_never_flagged() {
        let mut ctx = launch_context();
        ctx.token_age_days = Some(45.0);
        let flag = classifier().classify(&ctx);
        assert!(!flag.is_recently_launched_legitimate);
        assert_eq!(flag.positive_signals, 7);
    }

    #[test]
    fn test_unknown_age_is_never_flagged() {
        let mut ctx = launch_context();
        ctx.token_age_days = None;
        let flag = classifier().classify(&ctx);
        assert_eq!(flag.total_signals, 9);
        assert!(!flag.is_recently_launched_legitimate);
    }

    #[test]
    fn test_too_few_signals_are_not_enough() {
        let mut ctx = context(Some("Moon Otter"));
        ctx.token_age_days = Some(2.0);
        ctx.creator_risk = Some(CreatorRisk::Low);
        let flag = classifier().classify(&ctx);
        assert_eq!(flag.total_signals, 4);
        assert_eq!(flag.positive_signals, 4);
        assert!(flag.is_recently_launched_legitimate);

        ctx.creator_risk = None;
        let flag = classifier().classify(&ctx);
        assert_eq!(flag.total_signals, 3);
        assert!(!flag.is_recently_launched_legitimate);
    }

    #[test]
    fn test_scam_names_and_placeholders_fail() {
        let mut ctx = launch_context();
        ctx.name = Some("Free Airdrop Token".to_string());
        let flag = classifier().classify(&ctx);
        assert_eq!(flag.positive_signals, 7);

        ctx.name = Some("Unknown".to_string());
        let flag = classifier().classify(&ctx);
        assert_eq!(flag.positive_signals, 7);
    }

    #[test]
    fn test_metadata_without_name_counts_as_failed_name() {
        let mut ctx = context(None);
        ctx.metadata = Some(MetadataFlags {
            has_name: false,
            has_symbol: true,
            has_image: true,
            has_description: true,
        });
        let flag = classifier().classify(&ctx);
        assert_eq!(flag.total_signals, 1);
        assert_eq!(flag.positive_signals, 0);
    }

    #[test]
    fn test_community_threshold_accepts_any_platform() {
        let mut ctx = launch_context();
        ctx.social = Some(SocialSnapshot {
            overall_score: 60.0,
            twitter_verified: false,
            community_member_counts: CommunityCounts {
                twitter: Some(100),
                telegram: None,
                discord: Some(501),
            },
        });
        let flag = classifier().classify(&ctx);
        assert_eq!(flag.positive_signals, 9);
    }

    #[derive(Debug)]
    struct RejectAll;

    impl KeywordScreen for RejectAll {
        fn is_suspicious(&self, _name: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_keyword_screen_is_replaceable() {
        let flag = classifier()
            .with_screen(Box::new(RejectAll))
            .classify(&launch_context());
        assert_eq!(flag.positive_signals, 7);
    }
}
