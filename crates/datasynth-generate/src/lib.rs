//! Random dataset synthesis for datasynth.
//!
//! This crate turns a declarative entity tree into records
//! ([`SynthesisEngine`]), serializes them to CSV, JSON, SQL or XML
//! ([`output`]), and ties both together in [`DatasetProject`].

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod project;
pub mod resolve;
pub mod values;
pub mod vocabulary;

pub use engine::{DataGenerator, SynthesisEngine};
pub use errors::GenerationError;
pub use model::{ExportSummary, GenerateOptions};
pub use output::{OutputFormat, RecordWriter, WriterOptions, writer_for};
pub use project::DatasetProject;
pub use vocabulary::{StaticVocabulary, VocabularyCategory, VocabularyProvider};
