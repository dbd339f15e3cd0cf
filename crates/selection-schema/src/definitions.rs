use indexmap::IndexSet;

use crate::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TypeKind {
    #[strum(serialize = "object")]
    Object,
    #[strum(serialize = "interface")]
    Interface,
    #[strum(serialize = "union")]
    Union,
    #[strum(serialize = "enum")]
    Enum,
    #[strum(serialize = "scalar")]
    Scalar,
    #[strum(serialize = "input object")]
    InputObject,
}

impl TypeKind {
    /// Object, interface and union types take a selection set.
    pub fn is_composite(self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::Interface | TypeKind::Union)
    }

    pub fn is_abstract(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Union)
    }

    pub(crate) fn is_output(self) -> bool {
        self != TypeKind::InputObject
    }

    pub(crate) fn is_input(self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum | TypeKind::InputObject)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Object(ObjectDefinition),
    Interface(InterfaceDefinition),
    Union(UnionDefinition),
    Enum(EnumDefinition),
    Scalar(ScalarDefinition),
    InputObject(InputObjectDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(def) => &def.name,
            TypeDefinition::Interface(def) => &def.name,
            TypeDefinition::Union(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
            TypeDefinition::Scalar(def) => &def.name,
            TypeDefinition::InputObject(def) => &def.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDefinition::Object(_) => TypeKind::Object,
            TypeDefinition::Interface(_) => TypeKind::Interface,
            TypeDefinition::Union(_) => TypeKind::Union,
            TypeDefinition::Enum(_) => TypeKind::Enum,
            TypeDefinition::Scalar(_) => TypeKind::Scalar,
            TypeDefinition::InputObject(_) => TypeKind::InputObject,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.kind().is_composite()
    }

    pub fn is_abstract(&self) -> bool {
        self.kind().is_abstract()
    }

    /// Output fields, in declaration order. Empty for every kind but objects and interfaces.
    pub fn fields(&self) -> &[FieldDefinition] {
        match self {
            TypeDefinition::Object(def) => &def.fields,
            TypeDefinition::Interface(def) => &def.fields,
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Leaf fields: the default selection for this type.
    pub fn scalar_fields(&self) -> impl Iterator<Item = &FieldDefinition> + '_ {
        self.fields().iter().filter(|field| !field.is_composite)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDefinition {
    pub name: String,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    pub implementors: IndexSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionDefinition {
    pub name: String,
    pub members: IndexSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDefinition {
    pub name: String,
    pub values: IndexSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDefinition {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectDefinition {
    pub name: String,
    pub fields: Vec<InputValueDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    /// The named type is an object, interface or union.
    pub is_composite: bool,
    pub arguments: Vec<InputValueDefinition>,
}

/// An argument or an input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub has_default: bool,
}

impl InputValueDefinition {
    pub fn is_required(&self) -> bool {
        self.ty.is_required() && !self.has_default
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// A field of the query or mutation root type.
#[derive(Debug, Clone, PartialEq)]
pub struct RootOperation {
    pub name: String,
    pub kind: OperationKind,
    pub return_type: TypeRef,
    pub arguments: Vec<InputValueDefinition>,
}

impl RootOperation {
    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}
