// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod emitter;
pub mod error;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod utils;

pub use config::{
    Config, FetchConfig, OutputConfig, OutputFileConfig, ProviderConfig, RulesetConfig,
};
pub use emitter::{EmittedFile, ListEmitter};
pub use error::{HarvestError, Result};
pub use extractor::{DomainFilter, StructuredExtractor, TextScanner};
pub use models::{
    Candidate, CandidateKind, ContentKind, JsonShape, RawDocument, ResultSet, SourceConfig,
    SourceLocation,
};
pub use pipeline::{HarvestPipeline, ProviderRun, RunStats};
pub use source::SourceLoader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        assert!(!config.providers.is_empty());
    }
}
