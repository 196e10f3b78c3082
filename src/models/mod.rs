// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod candidate;
pub mod result_set;
pub mod source;

pub use candidate::{Candidate, CandidateKind};
pub use result_set::ResultSet;
pub use source::{ContentKind, JsonShape, RawDocument, SourceConfig, SourceLocation};
