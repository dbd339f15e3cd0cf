
use selection_schema::{OperationKind, RootOperation, Schema};

fn schema() -> Schema {
    Schema::from_sdl(include_str!("../../tests/fixtures/schema.graphql")).unwrap()
}

fn root_operation(schema: &Schema, kind: OperationKind, name: &str) -> RootOperation {
    schema.root_operation(kind, name).unwrap().clone()
}
