use schemars::schema::RootSchema;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use crate::constraints::Constraints;
use crate::types::DataType;

/// Typed leaf of an entity.
///
/// An attribute without a name is skipped during synthesis. An attribute
/// without a type is synthesized as generic text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: Some(name.into()),
            data_type: Some(data_type),
            constraints: None,
        }
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }
}

/// Named node of a schema tree.
///
/// An entity owns its attributes and children exclusively, so a schema tree
/// can never contain a cycle. Depth is unbounded and is checked by the
/// engine before synthesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub children: Vec<Entity>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_child(mut self, child: Entity) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn add_child(&mut self, child: Entity) {
        self.children.push(child);
    }

    /// Remove the first attribute with the given name.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let index = self
            .attributes
            .iter()
            .position(|attribute| attribute.name.as_deref() == Some(name))?;
        Some(self.attributes.remove(index))
    }

    /// Remove the first child entity with the given name.
    pub fn remove_child(&mut self, name: &str) -> Option<Entity> {
        let index = self
            .children
            .iter()
            .position(|child| child.name.as_deref() == Some(name))?;
        Some(self.children.remove(index))
    }

    /// Number of levels in the tree rooted here; a leaf entity has depth 1.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&Entity, usize)> = vec![(self, 1)];
        while let Some((entity, level)) = stack.pop() {
            max = max.max(level);
            for child in &entity.children {
                stack.push((child, level + 1));
            }
        }
        max
    }
}

/// Top-level schema file: an optional project name and its root entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SchemaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl SchemaDocument {
    /// Find a root entity by name.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.name.as_deref() == Some(name))
    }
}

/// Emit the JSON Schema for schema documents.
pub fn document_json_schema() -> RootSchema {
    schema_for!(SchemaDocument)
}
