// Strongly-typed output AST for codegen. Built by `project`, read by `codegen`.

use serde::Serialize;

use crate::model::{ContainerKind, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum TypeNode {
    Scalar { primitive: Primitive },
    Array { item: Box<TypeNode> },
    Struct { members: Vec<MemberNode> }, // declaration order
    Nullable { inner: Box<TypeNode> },   // `T | null`, never nested
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberNode {
    pub name: String,
    pub optional: bool, // presence, not value-nullability
    #[serde(rename = "type")]
    pub ty: TypeNode,
}

/// One projected `type`/`entity` declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub kind: ContainerKind,
    pub members: Vec<MemberNode>,
}

impl TypeNode {
    pub fn scalar(primitive: Primitive) -> Self {
        TypeNode::Scalar { primitive }
    }

    pub fn array(item: TypeNode) -> Self {
        TypeNode::Array { item: Box::new(item) }
    }

    /// Wrap in a null union. Already-wrapped nodes are returned as is.
    pub fn nullable(inner: TypeNode) -> Self {
        match inner {
            TypeNode::Nullable { .. } => inner,
            other => TypeNode::Nullable { inner: Box::new(other) },
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeNode::Nullable { .. })
    }

    /// Strip the null union, if any.
    pub fn unwrap_nullable(&self) -> &TypeNode {
        match self {
            TypeNode::Nullable { inner } => inner,
            other => other,
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            TypeNode::Scalar { primitive } => Some(*primitive),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self.primitive(), Some(Primitive::Number | Primitive::Integer))
    }

    pub fn is_string(&self) -> bool {
        self.primitive() == Some(Primitive::String)
    }

    /// Element type of a (non-wrapped) array node.
    pub fn array_item(&self) -> Option<&TypeNode> {
        match self {
            TypeNode::Array { item } => Some(item),
            _ => None,
        }
    }

    /// Members of a (non-wrapped) inline struct node.
    pub fn members(&self) -> Option<&[MemberNode]> {
        match self {
            TypeNode::Struct { members } => Some(members),
            _ => None,
        }
    }

    pub fn member(&self, name: &str) -> Option<&MemberNode> {
        self.members()?.iter().find(|m| m.name == name)
    }
}

impl Declaration {
    pub fn member(&self, name: &str) -> Option<&MemberNode> {
        self.members.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_wrapper_never_nests() {
        let once = TypeNode::nullable(TypeNode::scalar(Primitive::Number));
        let twice = TypeNode::nullable(once.clone());
        assert_eq!(once, twice);
        assert!(twice.unwrap_nullable().is_number());
    }

    #[test]
    fn predicates_look_through_nothing() {
        let arr = TypeNode::nullable(TypeNode::array(TypeNode::scalar(Primitive::String)));
        // wrapped node is not itself an array
        assert!(arr.array_item().is_none());
        let item = arr.unwrap_nullable().array_item().unwrap();
        assert!(item.is_string());
        assert!(!item.is_nullable());
    }

    #[test]
    fn serializes_with_node_tags() {
        let m = MemberNode {
            name: "a".into(),
            optional: true,
            ty: TypeNode::nullable(TypeNode::scalar(Primitive::Number)),
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["type"]["node"], "nullable");
        assert_eq!(v["type"]["inner"]["primitive"], "number");
        assert_eq!(v["optional"], true);
    }
}
