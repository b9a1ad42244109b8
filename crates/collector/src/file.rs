//! Collectors backed by captured JSON evidence on disk.
//!
//! An evidence directory holds one record per file. The file stem names the
//! category, optionally followed by `.` and the source name:
//! `on_chain.json`, `liquidity.json`, `registry.Jupiter.json`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;

use mintwarden_core::evidence::{Evidence, EvidenceCategory, TokenIdentity};

use crate::EvidenceCollector;

#[derive(Debug, Clone)]
pub struct FileCollector {
    path: PathBuf,
    source: String,
    category: EvidenceCategory,
}

impl FileCollector {
    pub fn new(
        path: impl Into<PathBuf>,
        source: impl Into<String>,
        category: EvidenceCategory,
    ) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            category,
        }
    }

    /// Derives category and source from the file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| anyhow!("evidence file {} has no usable name", path.display()))?;
        let (category, source) = match stem.split_once('.') {
            Some((category, source)) if !source.is_empty() => (category, source),
            _ => (stem, stem),
        };
        let category = category
            .parse::<EvidenceCategory>()
            .map_err(|reason| anyhow!("{}: {reason}", path.display()))?;
        Ok(Self::new(path, source, category))
    }
}

#[async_trait]
impl EvidenceCollector for FileCollector {
    fn source(&self) -> &str {
        &self.source
    }

    fn category(&self) -> EvidenceCategory {
        self.category
    }

    async fn collect(&self, identity: &TokenIdentity) -> Result<Evidence> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read evidence file {}", self.path.display()))?;
        let record: Evidence = serde_json::from_str(&contents)
            .with_context(|| format!("parse evidence file {}", self.path.display()))?;
        if let Evidence::Unavailable { .. } = record {
            bail!("{} reports no evidence for {}", self.source, identity.mint);
        }
        Ok(record)
    }
}

/// One collector per `*.json` file in `dir`, sorted by file name.
pub fn directory_collectors(dir: &Path) -> Result<Vec<Box<dyn EvidenceCollector>>> {
    let mut paths = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read evidence directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            FileCollector::from_path(path)
                .map(|collector| Box::new(collector) as Box<dyn EvidenceCollector>)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gather, DEFAULT_TIMEOUT};
    use std::fs;
    use tempfile::tempdir;

    fn identity() -> TokenIdentity {
        TokenIdentity {
            mint: "mint".to_string(),
            name: None,
            symbol: None,
        }
    }

    #[test]
    fn test_names_map_to_category_and_source() {
        let collector = FileCollector::from_path(Path::new("/tmp/registry.Jupiter.json")).unwrap();
        assert_eq!(collector.category(), EvidenceCategory::Registry);
        assert_eq!(collector.source(), "Jupiter");

        let collector = FileCollector::from_path(Path::new("/tmp/on_chain.json")).unwrap();
        assert_eq!(collector.category(), EvidenceCategory::OnChain);
        assert_eq!(collector.source(), "on_chain");

        assert!(FileCollector::from_path(Path::new("/tmp/weather.json")).is_err());
    }

    #[tokio::test]
    async fn test_directory_gathers_records() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("transactions.json"),
            r#"{"kind":"transactions","total_transfers":40,"days_active":3.5,"unique_accounts":21}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("registry.Jupiter.json"),
            r#"{"kind":"registry","source":"Jupiter","matched":true,"weight":30}"#,
        )
        .unwrap();
        fs::write(dir.path().join("registry.Birdeye.json"), "not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let collectors = directory_collectors(dir.path()).unwrap();
        assert_eq!(collectors.len(), 3);

        let bundle = gather(&identity(), &collectors, DEFAULT_TIMEOUT).await;
        let checks = bundle.checks();
        assert_eq!(checks.len(), 2);
        let birdeye = checks.iter().find(|check| check.source == "Birdeye").unwrap();
        assert!(!birdeye.participated);
        let jupiter = checks.iter().find(|check| check.source == "Jupiter").unwrap();
        assert!(jupiter.matched && jupiter.participated);
        assert_eq!(bundle.transactions().map(|t| t.total_transfers), Some(40));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let collector = FileCollector::new(
            "/nonexistent/liquidity.json",
            "liquidity",
            EvidenceCategory::Liquidity,
        );
        assert!(collector.collect(&identity()).await.is_err());
    }
}
