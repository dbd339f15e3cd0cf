//! Schema-aware GraphQL client.
//!
//! Root fields are called with plain data selections rather than query strings: a
//! [`Selection`] names the wanted fields (`true` for a field's scalar fields), a [`Narrowing`]
//! picks fields per concrete type of an interface or union, and the client compiles both into a
//! GraphQL document, sends it through an [`Executor`] and returns `data.<field>`.

mod client;
pub mod compile;
mod config;
mod error;
mod executor;
mod selection;
pub mod variables;

#[cfg(test)]
mod tests;

pub use client::{Client, Namespace, RootAccessor};
pub use compile::{CompileOptions, CompiledOperation};
pub use config::ClientConfig;
pub use error::{CompileError, Error, RequestError, TransportError};
pub use executor::{Executor, GraphqlError, GraphqlErrorLocation, GraphqlRequest, GraphqlResponse, HttpExecutor};
pub use selection::{FieldSelection, Narrowing, NestedSelection, OperationArgs, Selection};
pub use selection_schema::{OperationKind, RootOperation, Schema, SchemaError};
pub use variables::{BoundVariables, VariableDefinition};
