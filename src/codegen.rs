//! TypeScript-style declaration emitter over the projected AST.
//!
//! Each declaration becomes an `export interface`. Presence comes from
//! `MemberNode::optional` (`name?:`), value-nullability from
//! `TypeNode::Nullable` (`| null`); the two are rendered independently.
use crate::ir::{Declaration, MemberNode, TypeNode};
use crate::model::Primitive;

const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self { Self::default() }

    pub fn emit(&mut self, decl: &Declaration) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(&format!("export interface {} {{\n", interface_name(&decl.name)));
        for m in &decl.members {
            self.member(m, 1);
        }
        self.out.push_str("}\n");
    }

    pub fn emit_all<'a>(&mut self, decls: impl IntoIterator<Item = &'a Declaration>) {
        for d in decls {
            self.emit(d);
        }
    }

    pub fn into_string(self) -> String { self.out }

    fn member(&mut self, m: &MemberNode, depth: usize) {
        let ty = render_type(&m.ty, depth);
        self.out.push_str(&format!(
            "{}{}{}: {};\n",
            INDENT.repeat(depth),
            property_key(&m.name),
            if m.optional { "?" } else { "" },
            ty,
        ));
    }
}

/// Render a type; `depth` is the indentation level of the owning member.
pub fn render_type(ty: &TypeNode, depth: usize) -> String {
    match ty {
        TypeNode::Scalar { primitive } => primitive_name(*primitive).to_string(),
        TypeNode::Array { item } => format!("Array<{}>", render_type(item, depth)),
        TypeNode::Nullable { inner } => format!("{} | null", render_type(inner, depth)),
        TypeNode::Struct { members } => {
            if members.is_empty() {
                return "{}".to_string();
            }
            let mut nested = Codegen::new();
            for m in members {
                nested.member(m, depth + 1);
            }
            format!("{{\n{}{}}}", nested.out, INDENT.repeat(depth))
        }
    }
}

fn primitive_name(p: Primitive) -> &'static str {
    match p {
        Primitive::String => "string",
        Primitive::Number | Primitive::Integer => "number",
        Primitive::Boolean => "boolean",
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Interface name for a declaration: the last segment of a namespaced name,
/// with characters outside `[A-Za-z0-9_$]` replaced by `_` and a leading
/// `_` when it would otherwise start with a digit.
pub fn interface_name(name: &str) -> String {
    let last = name.rsplit('.').next().unwrap_or(name);
    let mut ident: String = last.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if !is_identifier(&ident) {
        ident.insert(0, '_');
    }
    ident
}

fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        // JSON string syntax is a valid TS string literal
        serde_json::Value::from(name).to_string()
    }
}
