//! Nullability projection: model properties → decorated member nodes.
//!
//! Two independent decisions are made per property, once, at the property's
//! own level:
//! - presence: is the emitted member optional (`name?:`)?
//! - value: is the emitted type a union with null (`T | null`)?
//!
//! Nested inline structures are projected with the same rules and the same
//! container kind as the enclosing declaration. Array element types carry
//! their own nullability and never inherit the property's.
use crate::classify::{classify, Classification};
use crate::config::{EntityArrayNullability, ProjectionOptions};
use crate::ir::{Declaration, MemberNode, TypeNode};
use crate::model::{BaseType, ContainerKind, Model, ModelContainer, ModelProperty};

// ————————————————————————————————————————————————————————————————————————————
// CORE RULE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub optional: bool,
    pub nullable: bool,
}

/// The rule table. Entities are always present; types are optional when
/// nullable unless a mandatory override forces presence. The override never
/// touches value-nullability.
pub fn decide(kind: ContainerKind, facts: &Classification) -> Decision {
    match kind {
        ContainerKind::Type => Decision {
            optional: facts.nullable && !facts.mandatory,
            nullable: facts.nullable,
        },
        ContainerKind::Entity => Decision {
            optional: false,
            nullable: facts.nullable,
        },
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TRAVERSAL
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    options: ProjectionOptions,
}

impl Projector {
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    pub fn project_model(&self, model: &Model) -> Vec<Declaration> {
        model.definitions.iter()
            .map(|(name, container)| self.project_container(name, container))
            .collect()
    }

    pub fn project_container(&self, name: &str, container: &ModelContainer) -> Declaration {
        let members = self.project_members(container.kind, name, &container.elements);
        tracing::debug!(declaration = name, kind = ?container.kind, members = members.len(), "projected");
        Declaration {
            name: name.to_string(),
            kind: container.kind,
            members,
        }
    }

    /// Project a single property declared (directly or nested) under a
    /// container of the given kind. `path` is only used for diagnostics.
    pub fn project_property(
        &self,
        kind: ContainerKind,
        path: &str,
        name: &str,
        property: &ModelProperty,
    ) -> MemberNode {
        let here = format!("{path}.{name}");
        let facts = classify(property);
        let mut decision = decide(kind, &facts);

        if decision.nullable
            && facts.is_array
            && kind == ContainerKind::Entity
            && self.options.entity_arrays == EntityArrayNullability::Unwrapped
        {
            tracing::debug!(property = %here, "nullable entity array left without `| null`");
            decision.nullable = false;
        }

        let base = self.project_base(kind, &here, &property.base_type);
        let ty = if decision.nullable { TypeNode::nullable(base) } else { base };

        MemberNode {
            name: name.to_string(),
            optional: decision.optional,
            ty,
        }
    }

    fn project_members<'a, I>(&self, kind: ContainerKind, path: &str, members: I) -> Vec<MemberNode>
    where
        I: IntoIterator<Item = (&'a String, &'a ModelProperty)>,
    {
        members.into_iter()
            .map(|(name, property)| self.project_property(kind, path, name, property))
            .collect()
    }

    /// Base type before the property-level null wrapper is applied.
    fn project_base(&self, kind: ContainerKind, path: &str, base: &BaseType) -> TypeNode {
        match base {
            BaseType::Scalar(primitive) => TypeNode::scalar(*primitive),
            BaseType::Array(items) => {
                let item = self.project_base(kind, &format!("{path}[]"), &items.base_type);
                // element nullability is the element's own
                let item = if items.nullable { TypeNode::nullable(item) } else { item };
                TypeNode::array(item)
            }
            BaseType::Struct(members) => TypeNode::Struct {
                members: self.project_members(kind, path, members),
            },
        }
    }
}

/// Convenience: project a whole model with default options.
pub fn project_model(model: &Model) -> Vec<Declaration> {
    Projector::default().project_model(model)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArrayItems, Primitive};

    fn number() -> ModelProperty { ModelProperty::scalar(Primitive::Number) }
    fn string() -> ModelProperty { ModelProperty::scalar(Primitive::String) }
    fn numbers() -> ModelProperty { ModelProperty::array_of(BaseType::Scalar(Primitive::Number)) }
    fn strings() -> ModelProperty { ModelProperty::array_of(BaseType::Scalar(Primitive::String)) }

    /// Same shape under both kinds, mirroring a `type T` and an `entity E`.
    fn container(kind: ContainerKind) -> ModelContainer {
        ModelContainer::new(kind)
            .with("a", number())
            .with("b", number().not_null())
            .with("c", number().not_null().mandatory())
            .with("d", numbers())
            .with("e", numbers().not_null().mandatory())
            .with("s", ModelProperty::inline([
                ("x", string()),
                ("y", string().not_null()),
                ("z", string().not_null().mandatory()),
                ("arr", strings()),
                ("arrM", strings().not_null().mandatory()),
            ]))
    }

    fn project(kind: ContainerKind) -> Declaration {
        Projector::default().project_container("X", &container(kind))
    }

    #[test]
    fn rule_table() {
        let t = |n, m| decide(ContainerKind::Type, &Classification { nullable: n, mandatory: m, is_array: false });
        let e = |n, m| decide(ContainerKind::Entity, &Classification { nullable: n, mandatory: m, is_array: false });

        assert_eq!(t(true, false), Decision { optional: true, nullable: true });
        assert_eq!(t(true, true), Decision { optional: false, nullable: true });
        assert_eq!(t(false, false), Decision { optional: false, nullable: false });
        assert_eq!(t(false, true), Decision { optional: false, nullable: false });

        for m in [false, true] {
            assert_eq!(e(true, m), Decision { optional: false, nullable: true });
            assert_eq!(e(false, m), Decision { optional: false, nullable: false });
        }
    }

    #[test]
    fn type_nullable_scalar_is_optional_and_nullable() {
        let decl = project(ContainerKind::Type);
        let a = decl.member("a").unwrap();
        assert!(a.optional);
        assert!(a.ty.is_nullable());
        assert!(a.ty.unwrap_nullable().is_number());
    }

    #[test]
    fn type_not_null_scalars_stay_required() {
        let decl = project(ContainerKind::Type);
        for name in ["b", "c"] {
            let m = decl.member(name).unwrap();
            assert!(!m.optional, "{name} should be required");
            assert!(m.ty.is_number() && !m.ty.is_nullable(), "{name} should be plain number");
        }
    }

    #[test]
    fn type_arrays_follow_property_nullability() {
        let decl = project(ContainerKind::Type);

        let d = decl.member("d").unwrap();
        assert!(d.optional);
        assert!(d.ty.is_nullable());
        assert!(d.ty.unwrap_nullable().array_item().unwrap().is_number());

        let e = decl.member("e").unwrap();
        assert!(!e.optional);
        assert!(!e.ty.is_nullable());
        let item = e.ty.array_item().unwrap();
        assert!(item.is_number() && !item.is_nullable());
    }

    #[test]
    fn type_nested_members_use_type_rules() {
        let decl = project(ContainerKind::Type);
        let s = &decl.member("s").unwrap().ty;
        // s itself is nullable in the fixture
        let s = s.unwrap_nullable();

        let x = s.member("x").unwrap();
        assert!(x.optional);
        assert!(x.ty.is_nullable() && x.ty.unwrap_nullable().is_string());

        for name in ["y", "z"] {
            let m = s.member(name).unwrap();
            assert!(!m.optional);
            assert!(m.ty.is_string() && !m.ty.is_nullable());
        }

        let arr = s.member("arr").unwrap();
        assert!(arr.optional);
        assert!(arr.ty.unwrap_nullable().array_item().unwrap().is_string());
        assert!(arr.ty.is_nullable());

        let arr_m = s.member("arrM").unwrap();
        assert!(!arr_m.optional);
        assert!(!arr_m.ty.is_nullable());
        assert!(arr_m.ty.array_item().unwrap().is_string());
    }

    #[test]
    fn mandatory_nullable_keeps_null_union() {
        let c = ModelContainer::new(ContainerKind::Type).with("m", number().mandatory());
        let decl = Projector::default().project_container("T", &c);
        let m = decl.member("m").unwrap();
        assert!(!m.optional);
        assert!(m.ty.is_nullable());
    }

    #[test]
    fn entity_members_are_never_optional() {
        let decl = project(ContainerKind::Entity);
        assert!(decl.members.iter().all(|m| !m.optional));

        let a = decl.member("a").unwrap();
        assert!(a.ty.is_nullable() && a.ty.unwrap_nullable().is_number());

        let x = decl.member("s").unwrap().ty.unwrap_nullable().member("x").unwrap();
        assert!(!x.optional);
        assert!(x.ty.is_nullable() && x.ty.unwrap_nullable().is_string());
    }

    #[test]
    fn entity_nullable_array_unwrapped_by_default() {
        let decl = project(ContainerKind::Entity);
        let d = decl.member("d").unwrap();
        assert!(!d.optional);
        assert!(!d.ty.is_nullable());
        assert!(d.ty.array_item().unwrap().is_number());
    }

    #[test]
    fn entity_nullable_array_wrapped_when_asked() {
        let options = ProjectionOptions::default().with_entity_arrays(EntityArrayNullability::Wrapped);
        let decl = Projector::new(options).project_container("E", &container(ContainerKind::Entity));
        let d = decl.member("d").unwrap();
        assert!(!d.optional);
        assert!(d.ty.is_nullable());
        assert!(d.ty.unwrap_nullable().array_item().unwrap().is_number());
    }

    #[test]
    fn array_element_nullability_is_independent() {
        let nullable_items = ModelProperty::new(BaseType::Array(Box::new(ArrayItems {
            base_type: BaseType::Scalar(Primitive::String),
            nullable: true,
        }))).not_null();
        let c = ModelContainer::new(ContainerKind::Type).with("tags", nullable_items);
        let decl = Projector::default().project_container("T", &c);
        let tags = decl.member("tags").unwrap();
        assert!(!tags.optional);
        assert!(!tags.ty.is_nullable());
        let item = tags.ty.array_item().unwrap();
        assert!(item.is_nullable() && item.unwrap_nullable().is_string());
    }

    #[test]
    fn arrays_of_inline_structs_recurse_with_enclosing_kind() {
        let rows = ModelProperty::array_of(BaseType::Struct(
            [("label".to_string(), string())].into_iter().collect()
        )).not_null();
        for kind in [ContainerKind::Type, ContainerKind::Entity] {
            let c = ModelContainer::new(kind).with("rows", rows.clone());
            let decl = Projector::default().project_container("R", &c);
            let item = decl.member("rows").unwrap().ty.array_item().unwrap();
            let label = item.member("label").unwrap();
            assert_eq!(label.optional, kind == ContainerKind::Type);
            assert!(label.ty.is_nullable());
        }
    }

    #[test]
    fn deep_nesting_keeps_kind() {
        let mut leaf = string();
        for _ in 0..16 {
            leaf = ModelProperty::inline([("inner", leaf)]).not_null();
        }
        let c = ModelContainer::new(ContainerKind::Type).with("root", leaf);
        let decl = Projector::default().project_container("D", &c);

        let mut node = &decl.member("root").unwrap().ty;
        for _ in 0..15 {
            node = &node.member("inner").unwrap().ty;
        }
        let last = node.member("inner").unwrap();
        assert!(last.optional);
        assert!(last.ty.is_nullable() && last.ty.unwrap_nullable().is_string());
    }

    #[test]
    fn member_order_is_declaration_order() {
        let decl = project(ContainerKind::Type);
        let names: Vec<&str> = decl.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d", "e", "s"]);
    }

    #[test]
    fn projection_is_deterministic() {
        assert_eq!(project(ContainerKind::Type), project(ContainerKind::Type));
        assert_eq!(project(ContainerKind::Entity), project(ContainerKind::Entity));
    }
}
