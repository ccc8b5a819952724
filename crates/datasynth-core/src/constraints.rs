use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Longest text value synthesis will produce; larger declared lengths are
/// clamped to it.
pub const MAX_TEXT_LENGTH: i64 = 1 << 20;

/// Statistical distribution requested for an attribute.
///
/// Sampling is always uniform; the other kinds are accepted and recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    #[default]
    Uniform,
    Normal,
    Exponential,
    Poisson,
    Binomial,
}

/// Generation rules attached to an attribute.
///
/// `min`/`max` bound numeric values directly. For text they bound the length
/// and for dates they are epoch days; both are truncated toward zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Candidate values; when non-empty one of them is always picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_max: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(default)]
    pub distribution: DistributionKind,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraints bounding the value (or length, or epoch day) to `[min, max]`.
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    /// Constraints restricting the value to a fixed candidate list.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            possible_values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Non-empty candidate list, if any.
    pub fn candidates(&self) -> Option<&[String]> {
        self.possible_values
            .as_deref()
            .filter(|values| !values.is_empty())
    }

    /// Advisory self-consistency check. Synthesis never calls this.
    pub fn is_consistent(&self) -> bool {
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return false;
        }
        if let (Some(min), Some(max)) = (self.length_min, self.length_max)
            && min > max
        {
            return false;
        }
        if let (Some(mean), Some(min), Some(max)) = (self.mean, self.min, self.max)
            && (mean < min || mean > max)
        {
            return false;
        }
        true
    }

    /// True when a declared bound asks for text longer than [`MAX_TEXT_LENGTH`].
    pub fn exceeds_text_limit(&self) -> bool {
        [self.min, self.max]
            .into_iter()
            .flatten()
            .any(|bound| bound > MAX_TEXT_LENGTH as f64)
    }

    /// Names of declared fields that have no effect on synthesis.
    pub fn inert_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.length_min.is_some() {
            fields.push("length_min");
        }
        if self.length_max.is_some() {
            fields.push("length_max");
        }
        if self.pattern.is_some() {
            fields.push("pattern");
        }
        if self.nullable {
            fields.push("nullable");
        }
        if self.mean.is_some() {
            fields.push("mean");
        }
        if self.median.is_some() {
            fields.push("median");
        }
        if self.std_dev.is_some() {
            fields.push("std_dev");
        }
        if self.distribution != DistributionKind::Uniform {
            fields.push("distribution");
        }
        fields
    }
}
