// file: src/emitter/mod.rs
// description: output emission module exports
// reference: internal module structure

pub mod text;

pub use text::{EmittedFile, ListEmitter};
