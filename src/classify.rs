//! Property classification: the three facts the projector keys off.
use crate::model::{BaseType, ModelProperty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    /// Value may be null (explicit annotation or language default).
    pub nullable: bool,
    /// Explicit presence override.
    pub mandatory: bool,
    /// Collection-valued, independent of nullability.
    pub is_array: bool,
}

pub fn classify(property: &ModelProperty) -> Classification {
    Classification {
        nullable: property.nullable,
        mandatory: property.mandatory,
        is_array: matches!(property.base_type, BaseType::Array(_)),
    }
}
