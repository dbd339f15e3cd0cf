//! In-memory model of a GraphQL schema, as consumed by the selection client.
//!
//! The model is built once from a [`SchemaDescription`] (JSON) or from SDL and is read-only
//! afterwards. Construction validates the description: every referenced type must exist and be
//! usable where it is referenced, root fields must be unique and root types must be objects.

mod builder;
mod definitions;
pub mod description;
mod error;
mod sdl;
mod wrapping;


use indexmap::IndexMap;

pub use definitions::*;
pub use description::SchemaDescription;
pub use error::SchemaError;
pub use wrapping::{TypeRef, Wrapping};

#[derive(Debug, Clone)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
    query_type: String,
    mutation_type: Option<String>,
    queries: IndexMap<String, RootOperation>,
    mutations: IndexMap<String, RootOperation>,
}

impl Schema {
    pub fn from_description(description: SchemaDescription) -> Result<Self, SchemaError> {
        builder::build(description)
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let description =
            serde_json::from_str(json).map_err(|err| SchemaError::InvalidDescription(err.to_string()))?;

        Self::from_description(description)
    }

    pub fn from_sdl(sdl: &str) -> Result<Self, SchemaError> {
        Self::from_description(sdl::description_from_sdl(sdl)?)
    }

    pub fn definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> + '_ {
        self.types.values()
    }

    /// Fields of an object or interface type, empty for anything else.
    pub fn fields(&self, type_name: &str) -> &[FieldDefinition] {
        self.definition(type_name)
            .map(TypeDefinition::fields)
            .unwrap_or_default()
    }

    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => Some(&self.query_type),
            OperationKind::Mutation => self.mutation_type.as_deref(),
        }
    }

    pub fn root_operation(&self, kind: OperationKind, name: &str) -> Option<&RootOperation> {
        self.root_operations_map(kind).get(name)
    }

    pub fn root_operations(&self, kind: OperationKind) -> impl Iterator<Item = &RootOperation> + '_ {
        self.root_operations_map(kind).values()
    }

    fn root_operations_map(&self, kind: OperationKind) -> &IndexMap<String, RootOperation> {
        match kind {
            OperationKind::Query => &self.queries,
            OperationKind::Mutation => &self.mutations,
        }
    }

    /// The concrete object types a value of `type_name` can be: the members of a union, the
    /// implementors of an interface, or the object itself.
    pub fn possible_types(&self, type_name: &str) -> Vec<&str> {
        match self.definition(type_name) {
            Some(TypeDefinition::Union(union)) => union.members.iter().map(String::as_str).collect(),
            Some(TypeDefinition::Interface(interface)) => {
                interface.implementors.iter().map(String::as_str).collect()
            }
            Some(TypeDefinition::Object(object)) => vec![object.name.as_str()],
            _ => Vec::new(),
        }
    }

    pub fn is_possible_type(&self, type_name: &str, concrete: &str) -> bool {
        match self.definition(type_name) {
            Some(TypeDefinition::Union(union)) => union.members.contains(concrete),
            Some(TypeDefinition::Interface(interface)) => interface.implementors.contains(concrete),
            Some(TypeDefinition::Object(object)) => object.name == concrete,
            _ => false,
        }
    }
}
