// file: src/emitter/text.rs
// description: renders and atomically writes allow-list text files
// reference: firewall import file conventions

use crate::config::{OutputFileConfig, ProviderConfig};
use crate::error::Result;
use crate::models::CandidateKind;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmittedFile {
    pub path: PathBuf,
    pub counts: Vec<(CandidateKind, usize)>,
}

impl EmittedFile {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Writes one output file from finalized per-kind sections. The rendered
/// content lands in a `.tmp` sibling first and is renamed into place, so
/// callers never observe a partially written list.
#[derive(Debug, Clone)]
pub struct ListEmitter {
    output_dir: PathBuf,
}

impl ListEmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// `sections` holds the sorted entries per kind, in the file's
    /// configured kind order. `generated_at` is injected by the caller so
    /// identical inputs render identical bytes.
    pub fn write(
        &self,
        provider: &ProviderConfig,
        output: &OutputFileConfig,
        sections: &[(CandidateKind, Vec<String>)],
        generated_at: DateTime<Utc>,
    ) -> Result<EmittedFile> {
        let path = self.output_dir.join(&output.file_name);
        let content = render(provider, output, sections, generated_at);

        let tmp = self.output_dir.join(format!("{}.tmp", output.file_name));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;

        debug!("Wrote {}", path.display());
        Ok(EmittedFile {
            path,
            counts: sections
                .iter()
                .map(|(kind, entries)| (*kind, entries.len()))
                .collect(),
        })
    }
}

fn render(
    provider: &ProviderConfig,
    output: &OutputFileConfig,
    sections: &[(CandidateKind, Vec<String>)],
    generated_at: DateTime<Utc>,
) -> String {
    let mut content = String::new();

    if output.header {
        let total: usize = sections.iter().map(|(_, entries)| entries.len()).sum();
        let locations: Vec<String> = provider
            .sources
            .iter()
            .map(|s| s.location.describe())
            .collect();
        let label = if locations.len() == 1 { "Source" } else { "Sources" };

        content.push_str(&format!("# {}\n", provider.title));
        content.push_str(&format!("# {}: {}\n", label, locations.join(" and ")));
        content.push_str(&format!(
            "# Date: {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        content.push_str(&format!("# Total: {} CIDRs\n\n", total));
    }

    for (index, (kind, entries)) in sections.iter().enumerate() {
        if output.section_labels {
            if index > 0 {
                content.push('\n');
            }
            content.push_str(&format!("# {}\n", section_label(*kind)));
        }
        for entry in entries {
            content.push_str(entry);
            content.push('\n');
        }
    }

    content
}

fn section_label(kind: CandidateKind) -> &'static str {
    match kind {
        CandidateKind::Ipv4Cidr => "IPv4 Ranges",
        CandidateKind::Ipv6Cidr => "IPv6 Ranges",
        CandidateKind::Domain => "Domains",
    }
}
