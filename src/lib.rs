pub mod model;
pub mod classify;
pub mod ir;
pub mod config;
pub mod project;
pub mod codegen;
pub mod path_de;
pub mod error;
pub mod cli;

pub use classify::{classify, Classification};
pub use config::{EntityArrayNullability, ProjectionOptions};
pub use error::{Error, Result};
pub use ir::{Declaration, MemberNode, TypeNode};
pub use model::{ArrayItems, BaseType, ContainerKind, Model, ModelContainer, ModelProperty, Primitive};
pub use project::{decide, project_model, Decision, Projector};
