//! Loading schema documents from JSON or TOML files.
//!
//! Both formats are converted to a JSON value and checked against the
//! document JSON Schema before being deserialized, so structural mistakes are
//! reported with a path instead of a bare serde error.

use std::io;
use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use datasynth_core::{
    IssueSeverity, SchemaDocument, ValidationIssue, ValidationReport, document_json_schema,
};

#[derive(Debug, Error)]
pub enum SchemaFileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported schema file extension '{0}' (expected .json or .toml)")]
    UnsupportedExtension(String),
    #[error("json schema error: {0}")]
    JsonSchema(String),
    #[error("schema document failed structural validation with {} error(s)", .0.errors.len())]
    Structural(ValidationReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaFormat {
    Json,
    Toml,
}

fn detect_format(path: &Path) -> Result<SchemaFormat, SchemaFileError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "json" => Ok(SchemaFormat::Json),
        "toml" => Ok(SchemaFormat::Toml),
        _ => Err(SchemaFileError::UnsupportedExtension(extension)),
    }
}

/// Read, structurally validate and deserialize a schema file.
pub fn load_schema(path: &Path) -> Result<SchemaDocument, SchemaFileError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| SchemaFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&content, format)
}

fn parse_schema(content: &str, format: SchemaFormat) -> Result<SchemaDocument, SchemaFileError> {
    let raw: Value = match format {
        SchemaFormat::Json => serde_json::from_str(content)?,
        SchemaFormat::Toml => serde_json::to_value(toml::from_str::<toml::Value>(content)?)?,
    };

    let report = validate_structure(&raw)?;
    if !report.is_ok() {
        return Err(SchemaFileError::Structural(report));
    }

    let document: SchemaDocument = serde_json::from_value(raw)?;
    debug!(
        entities = document.entities.len(),
        project = document.project.as_deref().unwrap_or(""),
        "schema document loaded"
    );
    Ok(document)
}

/// Check a raw document against the schema document JSON Schema.
pub fn validate_structure(document: &Value) -> Result<ValidationReport, SchemaFileError> {
    let schema = serde_json::to_value(document_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| SchemaFileError::JsonSchema(err.to_string()))?;

    let mut report = ValidationReport::default();
    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                normalized_json_pointer(&error.instance_path.to_string()),
                error.to_string(),
                None,
            ));
        }
    }
    Ok(report)
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}

#[cfg(test)]
mod tests {
    use datasynth_core::DataType;

    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            detect_format(Path::new("a/b.JSON")).ok(),
            Some(SchemaFormat::Json)
        );
        assert_eq!(
            detect_format(Path::new("b.toml")).ok(),
            Some(SchemaFormat::Toml)
        );
        assert!(matches!(
            detect_format(Path::new("schema.yaml")),
            Err(SchemaFileError::UnsupportedExtension(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn parses_toml_documents() {
        let document = parse_schema(
            r#"
            [[entities]]
            name = "order"

            [[entities.attributes]]
            name = "total"
            type = "float"
            constraints = { min = 1, max = 5 }
            "#,
            SchemaFormat::Toml,
        )
        .expect("parse toml");
        let order = document.entity("order").expect("order");
        assert_eq!(order.attributes[0].data_type, Some(DataType::Float));
        let constraints = order.attributes[0].constraints.as_ref().expect("constraints");
        assert_eq!(constraints.max, Some(5.0));
    }

    #[test]
    fn structural_errors_carry_paths() {
        let err = parse_schema(
            r#"{ "entities": [ { "name": "x", "attributes": [ { "type": "colour" } ] } ] }"#,
            SchemaFormat::Json,
        )
        .expect_err("unknown type");
        let SchemaFileError::Structural(report) = err else {
            panic!("expected structural error, got {err}");
        };
        assert!(report.has_code("schema_violation"));
        assert!(
            report
                .errors
                .iter()
                .any(|issue| issue.path.starts_with("/entities/0/attributes/0"))
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_schema("{ not json", SchemaFormat::Json),
            Err(SchemaFileError::Json(_))
        ));
    }
}
