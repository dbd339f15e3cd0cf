use std::{path::PathBuf, time::Duration};

use selection_schema::{OperationKind, SchemaError};

use crate::GraphqlError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The response carried neither errors nor data for the requested root field.
    #[error("The response contains no data for the field '{field}'")]
    MissingData { field: String },
    #[error("Could not deserialize the data of '{field}': {source}")]
    Deserialize {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid client configuration: {0}")]
    Config(String),
    #[error("Could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Raised before any network activity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("The {kind} root field '{name}' does not exist")]
    UnknownRootField { kind: OperationKind, name: String },
    #[error("'{narrowed}' is not a possible type of '{ty}'")]
    UnknownNarrowingType { ty: String, narrowed: String },
    #[error("The argument '{argument}' of '{field}' is required")]
    MissingRequiredArgument { field: String, argument: String },
}

/// The server answered with a non-empty `errors` list. Partial data is discarded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("The GraphQL request failed: {}", join_messages(errors))]
pub struct RequestError {
    pub errors: Vec<GraphqlError>,
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Invalid GraphQL response: {0}")]
    InvalidResponse(String),
}
