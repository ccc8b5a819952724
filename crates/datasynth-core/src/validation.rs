use std::collections::BTreeSet;

use crate::constraints::MAX_TEXT_LENGTH;
use crate::error::{Error, Result};
use crate::schema::Entity;
use crate::types::DataType;

/// Default bound on schema nesting accepted by synthesis.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured validation issue with location and hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        severity: IssueSeverity,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            path: path.into(),
            message: message.into(),
            hint,
        }
    }
}

/// Aggregated validation report with errors and warnings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn push_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|issue| issue.code == code)
    }
}

/// Fail when the tree rooted at `entity` is deeper than `max_depth` levels.
pub fn ensure_depth(entity: &Entity, max_depth: usize) -> Result<()> {
    let depth = entity.depth();
    if depth > max_depth {
        return Err(Error::InvalidSchema(format!(
            "entity '{}' is nested {depth} levels deep (limit {max_depth})",
            entity.name.as_deref().unwrap_or("<unnamed>")
        )));
    }
    Ok(())
}

/// Advisory checks over an entity tree.
///
/// Synthesis does not depend on this report: nameless items are skipped and
/// inconsistent constraints fall back to the degenerate-range policy. Only an
/// excessive depth is reported as an error, since synthesis refuses it.
pub fn validate_entity(entity: &Entity, max_depth: usize) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Err(err) = ensure_depth(entity, max_depth) {
        report.push_error(ValidationIssue::new(
            IssueSeverity::Error,
            "max_depth_exceeded",
            entity_path("", entity),
            err.to_string(),
            Some("flatten the schema or raise max_depth".to_string()),
        ));
        return report;
    }

    let mut stack: Vec<(String, &Entity)> = vec![(entity_path("", entity), entity)];
    while let Some((path, entity)) = stack.pop() {
        let mut keys = BTreeSet::new();

        for (index, attribute) in entity.attributes.iter().enumerate() {
            let Some(name) = attribute.name.as_deref() else {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "unnamed_attribute",
                    format!("{path}/attributes/{index}"),
                    "attribute has no name and will be skipped",
                    None,
                ));
                continue;
            };
            let attribute_path = format!("{path}/{name}");

            if !keys.insert(name.to_string()) {
                report.push_warning(duplicate_key(&attribute_path, name));
            }

            let Some(constraints) = attribute.constraints.as_ref() else {
                continue;
            };

            if !constraints.is_consistent() {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "inconsistent_constraints",
                    attribute_path.clone(),
                    "constraints contradict each other",
                    Some("inverted ranges collapse to their minimum".to_string()),
                ));
            }

            if constraints
                .possible_values
                .as_ref()
                .is_some_and(|values| values.is_empty())
            {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "empty_candidate_list",
                    attribute_path.clone(),
                    "possible_values is empty and will be ignored",
                    None,
                ));
            }

            if attribute.data_type == Some(DataType::String)
                && constraints.candidates().is_none()
                && constraints.exceeds_text_limit()
            {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "text_length_clamped",
                    attribute_path.clone(),
                    format!("text length bounds above {MAX_TEXT_LENGTH} are clamped"),
                    Some(format!("keep min and max at or below {MAX_TEXT_LENGTH}")),
                ));
            }

            let inert = constraints.inert_fields();
            if !inert.is_empty() {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "inert_constraint",
                    attribute_path,
                    format!("fields have no effect on synthesis: {}", inert.join(", ")),
                    None,
                ));
            }
        }

        for (index, child) in entity.children.iter().enumerate() {
            let Some(name) = child.name.as_deref() else {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "unnamed_entity",
                    format!("{path}/children/{index}"),
                    "child entity has no name and will be skipped",
                    None,
                ));
                continue;
            };
            let child_path = entity_path(&path, child);
            if !keys.insert(name.to_string()) {
                report.push_warning(duplicate_key(&child_path, name));
            }
            stack.push((child_path, child));
        }
    }

    report
}

fn duplicate_key(path: &str, name: &str) -> ValidationIssue {
    ValidationIssue::new(
        IssueSeverity::Warning,
        "duplicate_key",
        path,
        format!("key '{name}' is declared more than once; the last value wins"),
        None,
    )
}

fn entity_path(parent: &str, entity: &Entity) -> String {
    format!("{parent}/{}", entity.name.as_deref().unwrap_or("<unnamed>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{Constraints, DistributionKind};
    use crate::schema::Attribute;

    #[test]
    fn clean_schema_has_no_issues() {
        let entity = Entity::new("person")
            .with_attribute(Attribute::new("id", DataType::Integer))
            .with_child(
                Entity::new("address").with_attribute(Attribute::new("city", DataType::String)),
            );
        let report = validate_entity(&entity, DEFAULT_MAX_DEPTH);
        assert!(report.is_ok());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn reports_skipped_and_duplicate_items() {
        let entity = Entity::new("person")
            .with_attribute(Attribute::new("id", DataType::Integer))
            .with_attribute(Attribute::new("id", DataType::String))
            .with_attribute(Attribute::default())
            .with_child(Entity::default())
            .with_child(Entity::new("id"));

        let report = validate_entity(&entity, DEFAULT_MAX_DEPTH);
        assert!(report.is_ok());
        assert!(report.has_code("unnamed_attribute"));
        assert!(report.has_code("unnamed_entity"));
        let duplicates = report
            .warnings
            .iter()
            .filter(|issue| issue.code == "duplicate_key")
            .count();
        assert_eq!(duplicates, 2);
    }

    #[test]
    fn reports_constraint_problems() {
        let mut inert = Constraints::range(0.0, 1.0);
        inert.distribution = DistributionKind::Exponential;
        let entity = Entity::new("metrics")
            .with_attribute(
                Attribute::new("score", DataType::Float).with_constraints(Constraints::range(9.0, 1.0)),
            )
            .with_attribute(
                Attribute::new("label", DataType::Enum)
                    .with_constraints(Constraints::one_of(Vec::<String>::new())),
            )
            .with_attribute(Attribute::new("rate", DataType::Float).with_constraints(inert));

        let report = validate_entity(&entity, DEFAULT_MAX_DEPTH);
        assert!(report.has_code("inconsistent_constraints"));
        assert!(report.has_code("empty_candidate_list"));
        let inert_issue = report
            .warnings
            .iter()
            .find(|issue| issue.code == "inert_constraint")
            .expect("inert constraint warning");
        assert_eq!(inert_issue.path, "/metrics/rate");
    }

    #[test]
    fn oversized_text_bounds_are_reported() {
        let entity = Entity::new("doc")
            .with_attribute(
                Attribute::new("body", DataType::String)
                    .with_constraints(Constraints::range(1e15, 1e15)),
            )
            .with_attribute(
                Attribute::new("count", DataType::Integer)
                    .with_constraints(Constraints::range(1e15, 1e15)),
            );

        let report = validate_entity(&entity, DEFAULT_MAX_DEPTH);
        assert!(report.is_ok());
        let clamped: Vec<&str> = report
            .warnings
            .iter()
            .filter(|issue| issue.code == "text_length_clamped")
            .map(|issue| issue.path.as_str())
            .collect();
        assert_eq!(clamped, vec!["/doc/body"]);
    }

    #[test]
    fn depth_limit_is_an_error() {
        let entity = Entity::new("a").with_child(Entity::new("b").with_child(Entity::new("c")));
        assert!(ensure_depth(&entity, 3).is_ok());
        assert!(matches!(ensure_depth(&entity, 2), Err(Error::InvalidSchema(_))));

        let report = validate_entity(&entity, 2);
        assert!(!report.is_ok());
        assert_eq!(report.errors[0].code, "max_depth_exceeded");
    }
}
