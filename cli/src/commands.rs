//! Subcommand implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, info, warn};

use apiscope_duplicates::{
    ApiStore, DuplicateDetector, ExistingApiRecord, InMemoryApiStore, OverlapCount, count_overlap,
    overlap_details,
};
use apiscope_embeddings::EmbeddingProvider;
use apiscope_openapi::{ApiSpec, parse_and_validate, summarize};

use crate::cli::{OverlapArgs, ScanArgs, SummarizeArgs};
use crate::settings::Settings;

const SPEC_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Read and validate a spec file.
pub async fn read_spec(path: &Path) -> Result<ApiSpec> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_and_validate(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Load every spec in `dir` as an existing record, sorted by file name.
///
/// The file stem is the record id; the title is its name, or the stem when
/// the title is empty. Unreadable files are skipped with a warning.
pub async fn load_corpus(dir: &Path) -> Result<Vec<ExistingApiRecord>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read corpus directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_spec = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SPEC_EXTENSIONS.contains(&ext));
        if is_spec {
            paths.push(path);
        }
    }
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        match read_spec(&path).await {
            Ok(spec) => {
                let name = if spec.title().is_empty() {
                    id.clone()
                } else {
                    spec.title().to_string()
                };
                records.push(ExistingApiRecord::new(id, name, spec));
            }
            Err(e) => warn!("Skipping {}: {e:#}", path.display()),
        }
    }

    info!("Loaded {} specs from {}", records.len(), dir.display());
    Ok(records)
}

pub async fn scan(args: ScanArgs, settings: &Settings) -> Result<()> {
    let config = settings.detector_config(args.threshold, args.model.as_deref());
    let provider = settings.provider(&config.embedding_model);
    if !provider.is_available() {
        bail!("no embedding API key: set OPENAI_API_KEY or [openai].api_key in the settings file");
    }
    debug!(
        "Embedding with {} model {} ({} dimensions expected)",
        provider.name(),
        provider.default_model(),
        provider.default_dimension()
    );

    let detector = DuplicateDetector::new(Arc::new(provider), config)?;
    let spec = read_spec(&args.spec).await?;

    let store = InMemoryApiStore::new();
    for record in load_corpus(&args.corpus).await? {
        store.put(record).await?;
    }

    let findings = match &args.id {
        Some(id) => {
            let records = store.list().await?;
            detector.find_duplicates_for(id, &spec, &records).await?
        }
        None => detector.find_duplicates_in_store(&store, &spec).await?,
    };

    println!("{}", serde_json::to_string_pretty(&findings)?);
    Ok(())
}

pub async fn summarize_spec(args: SummarizeArgs) -> Result<()> {
    let spec = read_spec(&args.spec).await?;
    println!("{}", summarize(&spec));
    Ok(())
}

#[derive(Debug, Serialize)]
struct OverlapReport {
    #[serde(flatten)]
    count: OverlapCount,
    total: usize,
    details: Vec<String>,
}

fn overlap_report(spec_a: &ApiSpec, spec_b: &ApiSpec) -> OverlapReport {
    let count = count_overlap(&spec_a.path_set(), &spec_b.path_set());
    OverlapReport {
        count,
        total: count.total(),
        details: overlap_details(spec_a, spec_b),
    }
}

pub async fn overlap(args: OverlapArgs) -> Result<()> {
    let spec_a = read_spec(&args.spec_a).await?;
    let spec_b = read_spec(&args.spec_b).await?;
    let report = overlap_report(&spec_a, &spec_b);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ORDERS: &str = r#"
openapi: 3.0.0
info:
  title: Orders
paths:
  /orders: {}
  /orders/{id}: {}
"#;

    const LEGACY: &str = r#"{
  "openapi": "3.0.0",
  "info": {"title": ""},
  "paths": {"/orders": {}, "/orders/{order_id}": {}}
}"#;

    #[tokio::test]
    async fn test_load_corpus() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-orders.yaml"), ORDERS).unwrap();
        std::fs::write(dir.path().join("a-legacy.json"), LEGACY).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::write(dir.path().join("c-broken.yml"), "info: [").unwrap();

        let records = load_corpus(dir.path()).await.unwrap();

        let pairs: Vec<(String, String)> = records
            .iter()
            .map(|r| (r.id.clone(), r.name.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a-legacy".to_string(), "a-legacy".to_string()),
                ("b-orders".to_string(), "Orders".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_corpus_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_corpus(&dir.path().join("missing")).await.is_err());
    }

    #[test]
    fn test_overlap_report() {
        let a = parse_and_validate(ORDERS).unwrap();
        let b = parse_and_validate(LEGACY).unwrap();

        let report = serde_json::to_value(overlap_report(&a, &b)).unwrap();
        assert_eq!(
            report,
            serde_json::json!({
                "exact": 1,
                "fuzzy": 1,
                "total": 2,
                "details": ["Both expose 1 identical endpoints"]
            })
        );
    }
}
