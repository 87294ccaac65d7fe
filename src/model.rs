//! Parsed model graph, as handed over by the model-language parser.
//!
//! Everything here is already resolved: nullability defaults are applied,
//! annotations are plain booleans and the structural shape of every property
//! is classified. Nothing in this module re-derives or validates any of it.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// A whole model: named declarations in source order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub definitions: IndexMap<String, ModelContainer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Standalone shape, not backed by storage.
    Type,
    /// Persisted, addressable record.
    Entity,
}

/// A `type` or `entity` declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelContainer {
    pub kind: ContainerKind,
    /// Keyed by property name; iteration order is declaration order.
    #[serde(default)]
    pub elements: IndexMap<String, ModelProperty>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelProperty {
    #[serde(rename = "type")]
    pub base_type: BaseType,
    /// Model language default: elements are nullable unless declared `not null`.
    #[serde(default = "nullable_by_default")]
    pub nullable: bool,
    /// Explicit `@mandatory`-style override. Absent means "no override".
    #[serde(default)]
    pub mandatory: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Scalar(Primitive),
    Array(Box<ArrayItems>),
    Struct(IndexMap<String, ModelProperty>),
}

/// Element declaration of an `array of T` property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArrayItems {
    #[serde(rename = "type")]
    pub base_type: BaseType,
    /// Inline element types are non-null unless the model says otherwise.
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
}

fn nullable_by_default() -> bool { true }

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Model {
    pub fn container(&self, name: &str) -> Option<&ModelContainer> {
        self.definitions.get(name)
    }
    /// Append another model's definitions, keeping both source orders.
    pub fn merge(&mut self, other: Model) -> Result<()> {
        for (name, container) in other.definitions {
            if self.definitions.contains_key(&name) {
                return Err(Error::DuplicateDefinition(name));
            }
            self.definitions.insert(name, container);
        }
        Ok(())
    }
}

impl ModelContainer {
    pub fn new(kind: ContainerKind) -> Self {
        Self { kind, elements: IndexMap::new() }
    }
    /// Builder-style insert; keeps declaration order.
    pub fn with(mut self, name: impl Into<String>, property: ModelProperty) -> Self {
        self.elements.insert(name.into(), property);
        self
    }
    pub fn property(&self, name: &str) -> Option<&ModelProperty> {
        self.elements.get(name)
    }
}

impl ModelProperty {
    pub fn new(base_type: BaseType) -> Self {
        Self { base_type, nullable: true, mandatory: false }
    }
    pub fn scalar(primitive: Primitive) -> Self {
        Self::new(BaseType::Scalar(primitive))
    }
    /// `array of <items>` with non-null elements.
    pub fn array_of(items: BaseType) -> Self {
        Self::new(BaseType::Array(Box::new(ArrayItems { base_type: items, nullable: false })))
    }
    pub fn inline<I, K>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, ModelProperty)>,
        K: Into<String>,
    {
        Self::new(BaseType::Struct(
            members.into_iter().map(|(k, p)| (k.into(), p)).collect()
        ))
    }
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
