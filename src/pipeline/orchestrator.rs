// file: src/pipeline/orchestrator.rs
// description: coordinates source loading, extraction, aggregation and emission
// reference: orchestrates the per-provider harvest workflow

use crate::config::{Config, ProviderConfig, RulesetConfig};
use crate::emitter::{EmittedFile, ListEmitter};
use crate::error::Result;
use crate::extractor::{DomainFilter, StructuredExtractor, TextScanner};
use crate::models::{Candidate, CandidateKind, ContentKind, ResultSet, SourceConfig};
use crate::pipeline::progress::{FetchProgress, RunStats};
use crate::source::SourceLoader;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug)]
pub struct ProviderRun {
    pub provider: String,
    pub files: Vec<EmittedFile>,
    pub stats: RunStats,
}

/// One linear pass per provider: load all sources, extract candidates,
/// filter, aggregate per kind, emit. Sources load concurrently but each
/// yields its own candidate list; merging happens once, afterwards.
pub struct HarvestPipeline {
    config: Config,
    loader: SourceLoader,
    emitter: ListEmitter,
    colored: bool,
}

impl HarvestPipeline {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_color(config, true)
    }

    pub fn with_color(config: Config, colored: bool) -> Result<Self> {
        let loader = SourceLoader::new(&config.fetch)?;
        let emitter = ListEmitter::new(&config.output.directory)?;
        Ok(Self {
            config,
            loader,
            emitter,
            colored,
        })
    }

    /// Runs one provider. A failed required source aborts before anything
    /// is written, so an incomplete list can never be mistaken for a
    /// complete one. Failed supplementary sources are logged and skipped.
    pub async fn run_provider(
        &self,
        provider: &ProviderConfig,
        generated_at: DateTime<Utc>,
    ) -> Result<ProviderRun> {
        info!("Harvesting provider {}", provider.name);
        let start = Instant::now();

        let progress = FetchProgress::new(provider.name.as_str(), provider.sources.len(), self.colored);
        let loader = &self.loader;
        let rules = &provider.ruleset;
        let tracker = &progress;

        let outcomes: Vec<(SourceConfig, Result<Vec<Candidate>>)> =
            stream::iter(provider.sources.clone())
                .map(|source| async move {
                    let outcome = load_and_extract(loader, &source, rules).await;
                    tracker.source_done(&source.id);
                    (source, outcome)
                })
                .buffer_unordered(self.config.fetch.concurrency)
                .collect()
                .await;
        progress.finish();

        let mut stats = RunStats::new();
        let mut candidates = Vec::new();
        for (source, outcome) in outcomes {
            match outcome {
                Ok(extracted) => {
                    stats.sources_loaded += 1;
                    candidates.extend(extracted);
                }
                Err(e) if source.optional => {
                    warn!("Skipping supplementary source {}: {}", source.id, e);
                    stats.sources_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        stats.candidates_extracted = candidates.len();

        let sections = aggregate(&candidates, rules);

        let mut files = Vec::new();
        for output in &provider.outputs {
            let file_sections: Vec<(CandidateKind, Vec<String>)> = output
                .kinds
                .iter()
                .map(|kind| (*kind, sections.get(kind).cloned().unwrap_or_default()))
                .collect();
            let emitted = self
                .emitter
                .write(provider, output, &file_sections, generated_at)?;
            stats.entries_emitted += emitted.total();
            stats.files_written += 1;
            files.push(emitted);
        }

        stats.duration_secs = start.elapsed().as_secs_f64();
        info!(
            "Provider {} done in {:.2}s: {} sources, {} candidates, {} entries kept ({:.1}% retained)",
            provider.name,
            stats.duration_secs,
            stats.sources_loaded,
            stats.candidates_extracted,
            stats.entries_emitted,
            stats.retention_rate()
        );

        Ok(ProviderRun {
            provider: provider.name.clone(),
            files,
            stats,
        })
    }
}

async fn load_and_extract(
    loader: &SourceLoader,
    source: &SourceConfig,
    rules: &RulesetConfig,
) -> Result<Vec<Candidate>> {
    let document = loader.load(source).await?;
    match document.source.kind {
        ContentKind::Json => StructuredExtractor::extract_json(&document),
        ContentKind::Csv => StructuredExtractor::extract_csv(&document),
        ContentKind::Html | ContentKind::Text => Ok(TextScanner::scan(&document, rules)),
    }
}

/// Merge step: dedup into one ResultSet per kind, then finalize into
/// sorted entries. Domains pass the retention filter; IP candidates are
/// kept as matched.
fn aggregate(
    candidates: &[Candidate],
    rules: &RulesetConfig,
) -> HashMap<CandidateKind, Vec<String>> {
    let filter = DomainFilter::new(&rules.domain_substrings);
    let mut sets: HashMap<CandidateKind, ResultSet> = HashMap::new();

    for candidate in candidates {
        let set = sets
            .entry(candidate.kind)
            .or_insert_with(|| ResultSet::new(candidate.kind));
        match candidate.kind {
            CandidateKind::Domain => {
                if let Some(domain) = filter.retain(&candidate.value) {
                    set.insert(domain);
                }
            }
            _ => {
                set.insert(candidate.value.clone());
            }
        }
    }

    sets.into_iter()
        .map(|(kind, set)| (kind, set.finalize()))
        .collect()
}
