use selection_schema::{RootOperation, TypeRef};
use serde_json::{Map, Value};

use crate::CompileError;

/// A `$name: Type` declaration of the operation.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundVariables {
    /// In argument declaration order.
    pub definitions: Vec<VariableDefinition>,
    pub payload: Map<String, Value>,
}

/// Binds the supplied values to the arguments of a root field. Every supplied argument becomes a
/// variable of the same name, typed with the argument's declared type, and its value is carried
/// into the payload untouched.
pub fn bind(
    operation: &RootOperation,
    supplied: &Map<String, Value>,
    validate_required: bool,
) -> Result<BoundVariables, CompileError> {
    let mut bound = BoundVariables::default();

    for argument in &operation.arguments {
        match supplied.get(&argument.name) {
            Some(value) => {
                bound.definitions.push(VariableDefinition {
                    name: argument.name.clone(),
                    ty: argument.ty.clone(),
                });
                bound.payload.insert(argument.name.clone(), value.clone());
            }
            None if validate_required && argument.is_required() => {
                return Err(CompileError::MissingRequiredArgument {
                    field: operation.name.clone(),
                    argument: argument.name.clone(),
                });
            }
            None => {}
        }
    }

    for name in supplied.keys() {
        if operation.argument(name).is_none() {
            tracing::debug!(field = %operation.name, variable = %name, "Dropping undeclared variable");
        }
    }

    Ok(bound)
}
