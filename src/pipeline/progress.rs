// file: src/pipeline/progress.rs
// description: source-load progress reporting and per-run statistics
// reference: uses indicatif for progress bars

use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub sources_loaded: usize,
    pub sources_skipped: usize,
    pub candidates_extracted: usize,
    pub entries_emitted: usize,
    pub files_written: usize,
    pub duration_secs: f64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of extracted candidates that survived filtering and dedup.
    pub fn retention_rate(&self) -> f64 {
        if self.candidates_extracted == 0 {
            return 0.0;
        }
        (self.entries_emitted as f64 / self.candidates_extracted as f64) * 100.0
    }
}

pub struct FetchProgress {
    bar: ProgressBar,
}

impl FetchProgress {
    pub fn new(provider: &str, total_sources: usize, colored: bool) -> Self {
        let bar = ProgressBar::new(total_sources as u64);
        let template = if colored {
            "{spinner:.green} {prefix:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}"
        } else {
            "{spinner} {prefix} [{bar:30}] {pos}/{len} {msg}"
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
        bar.set_prefix(provider.to_string());
        Self { bar }
    }

    pub fn source_done(&self, source_id: &str) {
        self.bar.inc(1);
        self.bar.set_message(source_id.to_string());
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retention_rate() {
        let stats = RunStats {
            candidates_extracted: 200,
            entries_emitted: 50,
            ..RunStats::new()
        };
        assert_eq!(stats.retention_rate(), 25.0);
    }

    #[test]
    fn test_retention_rate_no_candidates() {
        let stats = RunStats::new();
        assert_eq!(stats.retention_rate(), 0.0);
    }

    #[test]
    fn test_fetch_progress_counts() {
        let progress = FetchProgress::new("cloudflare", 2, false);
        progress.source_done("ips-v4");
        progress.source_done("ips-v6");
        progress.finish();
    }
}
