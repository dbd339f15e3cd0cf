//! Compilation of plain data selections into GraphQL operation documents.
//!
//! Documents are rendered on a single line, e.g.
//! `query($id: Int!) { users_by_pk(id: $id) { id name } }`. Every field that ends up in the
//! document exists in the schema: unknown entries of a selection are dropped, and interface or
//! union values are narrowed with `__typename` and inline fragments.

mod plan;
mod render;

use selection_schema::{RootOperation, Schema};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{variables, CompileError, Narrowing, OperationArgs, Selection, VariableDefinition};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Reject calls that omit a required argument instead of letting the server report it.
    pub validate_required_arguments: bool,
}

/// A ready to send operation: the document and its variables payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledOperation {
    pub query: String,
    pub variables: Map<String, Value>,
}

/// Renders the document of a root field call. `variables` are the declarations produced by
/// [`variables::bind`], each one passed to the argument of the same name.
pub fn compile(
    schema: &Schema,
    operation: &RootOperation,
    selection: Option<&Selection>,
    narrowing: Option<&Narrowing>,
    variables: &[VariableDefinition],
) -> Result<String, CompileError> {
    let return_type = operation.return_type.name();
    let returns_composite = schema
        .definition(return_type)
        .is_some_and(|definition| definition.is_composite());

    let selection_set = if returns_composite {
        let planner = plan::Planner { schema };
        Some(planner.plan(return_type, selection, narrowing)?)
    } else {
        if selection.is_some() || narrowing.is_some() {
            tracing::debug!(field = %operation.name, "Ignoring the selection of a leaf root field");
        }
        None
    };

    Ok(render::render_document(operation, variables, selection_set.as_ref()))
}

/// Binds the variables and compiles the document of one accessor call.
pub fn compile_operation(
    schema: &Schema,
    operation: &RootOperation,
    args: &OperationArgs,
    options: CompileOptions,
) -> Result<CompiledOperation, CompileError> {
    let bound = variables::bind(operation, &args.variables, options.validate_required_arguments)?;
    let query = compile(
        schema,
        operation,
        args.select.as_ref(),
        args.on.as_ref(),
        &bound.definitions,
    )?;

    Ok(CompiledOperation {
        query,
        variables: bound.payload,
    })
}
