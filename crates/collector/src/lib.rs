//! Evidence collection boundary.
//!
//! Collectors run concurrently, each under the same timeout. A collector that
//! errors or times out never fails the bundle: its slot is filled with an
//! `Unavailable` record, or an absent check for registry sources, so the
//! engine treats it as non-participating.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use mintwarden_core::evidence::{
    Evidence, EvidenceBundle, EvidenceCategory, EvidenceCheck, TokenIdentity,
};

pub mod file;

pub use file::{directory_collectors, FileCollector};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait EvidenceCollector: Send + Sync {
    /// Name reported in reasons and in non-participation records.
    fn source(&self) -> &str;

    /// Category of the record this collector yields.
    fn category(&self) -> EvidenceCategory;

    async fn collect(&self, identity: &TokenIdentity) -> Result<Evidence>;
}

/// Yields a fixed record. Useful for replaying captured evidence.
#[derive(Debug, Clone)]
pub struct StaticCollector {
    source: String,
    record: Evidence,
}

impl StaticCollector {
    pub fn new(source: impl Into<String>, record: Evidence) -> Self {
        Self {
            source: source.into(),
            record,
        }
    }
}

#[async_trait]
impl EvidenceCollector for StaticCollector {
    fn source(&self) -> &str {
        &self.source
    }

    fn category(&self) -> EvidenceCategory {
        self.record.category()
    }

    async fn collect(&self, _identity: &TokenIdentity) -> Result<Evidence> {
        Ok(self.record.clone())
    }
}

/// Runs every collector for `identity` and assembles the results in
/// collector order.
pub async fn gather(
    identity: &TokenIdentity,
    collectors: &[Box<dyn EvidenceCollector>],
    timeout: Duration,
) -> EvidenceBundle {
    let runs = collectors.iter().map(|collector| async move {
        match tokio::time::timeout(timeout, collector.collect(identity)).await {
            Ok(Ok(record)) if record.category() == collector.category() => {
                debug!(
                    source = collector.source(),
                    category = %collector.category(),
                    "evidence collected"
                );
                record
            }
            Ok(Ok(record)) => {
                warn!(
                    source = collector.source(),
                    expected = %collector.category(),
                    received = %record.category(),
                    "collector returned the wrong category"
                );
                non_participation(collector.as_ref())
            }
            Ok(Err(error)) => {
                warn!(source = collector.source(), error = %error, "collector failed");
                non_participation(collector.as_ref())
            }
            Err(_) => {
                warn!(
                    source = collector.source(),
                    timeout_ms = timeout.as_millis() as u64,
                    "collector timed out"
                );
                non_participation(collector.as_ref())
            }
        }
    });

    let records = join_all(runs).await;
    records
        .into_iter()
        .fold(EvidenceBundle::new(identity.clone()), EvidenceBundle::with_record)
}

fn non_participation(collector: &dyn EvidenceCollector) -> Evidence {
    match collector.category() {
        EvidenceCategory::Registry => {
            Evidence::Registry(EvidenceCheck::absent(collector.source()))
        }
        category => Evidence::Unavailable {
            source: collector.source().to_string(),
            category,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use mintwarden_core::evidence::{LiquiditySnapshot, TransactionSummary};

    fn identity() -> TokenIdentity {
        TokenIdentity {
            mint: "mint".to_string(),
            name: None,
            symbol: None,
        }
    }

    struct Failing {
        category: EvidenceCategory,
    }

    #[async_trait]
    impl EvidenceCollector for Failing {
        fn source(&self) -> &str {
            "Flaky"
        }

        fn category(&self) -> EvidenceCategory {
            self.category
        }

        async fn collect(&self, _identity: &TokenIdentity) -> Result<Evidence> {
            Err(anyhow!("upstream returned 503"))
        }
    }

    struct Stalled;

    #[async_trait]
    impl EvidenceCollector for Stalled {
        fn source(&self) -> &str {
            "Slow"
        }

        fn category(&self) -> EvidenceCategory {
            EvidenceCategory::Liquidity
        }

        async fn collect(&self, _identity: &TokenIdentity) -> Result<Evidence> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(anyhow!("unreachable"))
        }
    }

    fn transactions() -> Evidence {
        Evidence::Transactions(TransactionSummary {
            total_transfers: 12,
            days_active: 3.0,
            unique_accounts: 9,
            suspicious_patterns: vec![],
        })
    }

    #[tokio::test]
    async fn test_gather_keeps_collector_order() {
        let collectors: Vec<Box<dyn EvidenceCollector>> = vec![
            Box::new(StaticCollector::new("Helius", transactions())),
            Box::new(StaticCollector::new(
                "Jupiter",
                Evidence::Registry(EvidenceCheck {
                    source: "Jupiter".to_string(),
                    participated: true,
                    matched: true,
                    weight: 30.0,
                    details: None,
                }),
            )),
        ];
        let bundle = gather(&identity(), &collectors, DEFAULT_TIMEOUT).await;
        assert_eq!(bundle.records.len(), 2);
        assert_eq!(bundle.records[0], transactions());
        assert_eq!(bundle.checks().len(), 1);
        assert!(bundle.validate().is_ok());
    }

    #[tokio::test]
    async fn test_failed_registry_becomes_absent_check() {
        let collectors: Vec<Box<dyn EvidenceCollector>> = vec![Box::new(Failing {
            category: EvidenceCategory::Registry,
        })];
        let bundle = gather(&identity(), &collectors, DEFAULT_TIMEOUT).await;
        assert_eq!(bundle.records, vec![Evidence::Registry(EvidenceCheck::absent("Flaky"))]);
        assert!(!bundle.checks()[0].participated);
    }

    #[tokio::test]
    async fn test_failed_collector_becomes_unavailable() {
        let collectors: Vec<Box<dyn EvidenceCollector>> = vec![Box::new(Failing {
            category: EvidenceCategory::Social,
        })];
        let bundle = gather(&identity(), &collectors, DEFAULT_TIMEOUT).await;
        assert_eq!(
            bundle.records,
            vec![Evidence::Unavailable {
                source: "Flaky".to_string(),
                category: EvidenceCategory::Social,
            }]
        );
        assert!(bundle.social().is_none());
    }

    #[tokio::test]
    async fn test_stalled_collector_times_out() {
        let collectors: Vec<Box<dyn EvidenceCollector>> = vec![
            Box::new(Stalled),
            Box::new(StaticCollector::new("Helius", transactions())),
        ];
        let bundle = gather(&identity(), &collectors, Duration::from_millis(50)).await;
        assert_eq!(
            bundle.records[0],
            Evidence::Unavailable {
                source: "Slow".to_string(),
                category: EvidenceCategory::Liquidity,
            }
        );
        assert_eq!(bundle.records[1], transactions());
    }

    #[tokio::test]
    async fn test_mismatched_category_is_discarded() {
        struct Confused;

        #[async_trait]
        impl EvidenceCollector for Confused {
            fn source(&self) -> &str {
                "Confused"
            }

            fn category(&self) -> EvidenceCategory {
                EvidenceCategory::Social
            }

            async fn collect(&self, _identity: &TokenIdentity) -> Result<Evidence> {
                Ok(Evidence::Liquidity(LiquiditySnapshot {
                    total_liquidity: 1.0,
                    volume_24h: 1.0,
                    pool_count: 1,
                    rug_pull_detected: false,
                    volume_change_24h: 0.0,
                }))
            }
        }

        let collectors: Vec<Box<dyn EvidenceCollector>> = vec![Box::new(Confused)];
        let bundle = gather(&identity(), &collectors, DEFAULT_TIMEOUT).await;
        assert!(bundle.liquidity().is_none());
        assert!(matches!(bundle.records[0], Evidence::Unavailable { .. }));
    }
}
