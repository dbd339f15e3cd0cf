use crate::{OperationKind, TypeKind};

/// The schema description is malformed or internally inconsistent.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Could not parse the schema description: {0}")]
    InvalidDescription(String),
    #[error("Could not parse the schema SDL: {0}")]
    InvalidSdl(String),
    #[error("Invalid type reference '{reference}'")]
    InvalidTypeReference { reference: String },
    #[error("At {location}, '{name}' is not a valid GraphQL name")]
    InvalidName { location: String, name: String },
    #[error("The type '{name}' is defined more than once")]
    DuplicateType { name: String },
    #[error("An extension of '{name}' does not match the kind of its definition")]
    MismatchedExtension { name: String },
    #[error("The field '{field}' is defined more than once on '{ty}'")]
    DuplicateField { ty: String, field: String },
    #[error("The {kind} root field '{name}' is defined more than once")]
    DuplicateRootField { kind: OperationKind, name: String },
    #[error("At {location}, the type '{name}' is not defined")]
    UnknownType { location: String, name: String },
    #[error("At {location}, the input object '{name}' cannot be used as an output type")]
    NotAnOutputType { location: String, name: String },
    #[error("At {location}, the {kind} '{name}' cannot be used as an input type")]
    NotAnInputType {
        location: String,
        name: String,
        kind: TypeKind,
    },
    #[error("'{object}' implements '{name}', which is not an interface")]
    NotAnInterface { object: String, name: String },
    #[error("The union '{union}' has the member '{name}', which is not an object type")]
    InvalidUnionMember { union: String, name: String },
    #[error("The {kind} root type '{name}' is not defined")]
    MissingRootType { kind: OperationKind, name: String },
    #[error("The {kind} root type '{name}' is not an object type")]
    RootTypeNotObject { kind: OperationKind, name: String },
}
