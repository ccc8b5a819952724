//! Core contracts for datasynth.
//!
//! This crate defines the declarative schema model (entities, attributes,
//! constraints), the record model produced by synthesis, and advisory
//! validation helpers shared by the engine and the CLI.

pub mod constraints;
pub mod error;
pub mod record;
pub mod schema;
pub mod types;
pub mod validation;

pub use constraints::{Constraints, DistributionKind, MAX_TEXT_LENGTH};
pub use error::{Error, Result};
pub use record::{Record, Value};
pub use schema::{Attribute, Entity, SchemaDocument, document_json_schema};
pub use types::DataType;
pub use validation::{
    DEFAULT_MAX_DEPTH, IssueSeverity, ValidationIssue, ValidationReport, ensure_depth,
    validate_entity,
};
