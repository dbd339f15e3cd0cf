use std::sync::Arc;

use indexmap::IndexMap;
use selection_schema::{OperationKind, RootOperation, Schema};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    compile, ClientConfig, CompileError, CompileOptions, CompiledOperation, Error, Executor, HttpExecutor,
    OperationArgs, RequestError,
};

/// Entry point: one accessor per root query and mutation field of the schema.
///
/// ```no_run
/// # async fn run(client: selection_client::Client) -> Result<(), selection_client::Error> {
/// use selection_client::{OperationArgs, Selection};
///
/// let _users = client
///     .query()
///     .field("users")?
///     .send(OperationArgs::new().select(Selection::new().field("id").field("name")))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    schema: Schema,
    executor: Arc<dyn Executor>,
    options: CompileOptions,
    queries: IndexMap<String, RootOperation>,
    mutations: IndexMap<String, RootOperation>,
}

impl Client {
    /// A client sending its operations over HTTP to the configured endpoint.
    pub fn new(schema: Schema, config: &ClientConfig) -> Result<Self, Error> {
        let executor = HttpExecutor::new(config)?;
        Ok(Self::with_executor(schema, executor, config.compile_options()))
    }

    /// A client sending its operations through any executor.
    pub fn with_executor(schema: Schema, executor: impl Executor + 'static, options: CompileOptions) -> Self {
        let dispatch_table = |kind: OperationKind| {
            schema
                .root_operations(kind)
                .map(|operation| (operation.name.clone(), operation.clone()))
                .collect::<IndexMap<_, _>>()
        };

        let queries = dispatch_table(OperationKind::Query);
        let mutations = dispatch_table(OperationKind::Mutation);

        tracing::debug!(queries = queries.len(), mutations = mutations.len(), "Client ready");

        Client {
            inner: Arc::new(ClientInner {
                schema,
                executor: Arc::new(executor),
                options,
                queries,
                mutations,
            }),
        }
    }

    /// Loads the schema file named by the configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        let schema = config.load_schema()?;
        Self::new(schema, config)
    }

    pub fn schema(&self) -> &Schema {
        &self.inner.schema
    }

    pub fn query(&self) -> Namespace<'_> {
        self.namespace(OperationKind::Query)
    }

    pub fn mutation(&self) -> Namespace<'_> {
        self.namespace(OperationKind::Mutation)
    }

    pub fn namespace(&self, kind: OperationKind) -> Namespace<'_> {
        let operations = match kind {
            OperationKind::Query => &self.inner.queries,
            OperationKind::Mutation => &self.inner.mutations,
        };

        Namespace {
            client: self,
            kind,
            operations,
        }
    }
}

/// The accessors of one operation kind.
#[derive(Clone, Copy)]
pub struct Namespace<'a> {
    client: &'a Client,
    kind: OperationKind,
    operations: &'a IndexMap<String, RootOperation>,
}

impl<'a> Namespace<'a> {
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Root field names, in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.operations.keys().map(String::as_str)
    }

    pub fn field(&self, name: &str) -> Result<RootAccessor<'a>, CompileError> {
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| CompileError::UnknownRootField {
                kind: self.kind,
                name: name.to_string(),
            })?;

        Ok(RootAccessor {
            client: self.client,
            operation,
        })
    }
}

#[derive(Clone, Copy)]
pub struct RootAccessor<'a> {
    client: &'a Client,
    operation: &'a RootOperation,
}

impl<'a> RootAccessor<'a> {
    pub fn operation(&self) -> &'a RootOperation {
        self.operation
    }

    /// The document and variables a call with `args` sends, without sending it.
    pub fn compile(&self, args: &OperationArgs) -> Result<CompiledOperation, CompileError> {
        let inner = &self.client.inner;
        compile::compile_operation(&inner.schema, self.operation, args, inner.options)
    }

    /// Runs the operation and returns `data.<field>`.
    #[tracing::instrument(skip_all, fields(kind = %self.operation.kind, field = %self.operation.name))]
    pub async fn send(&self, args: OperationArgs) -> Result<Value, Error> {
        let compiled = self.compile(&args)?;

        tracing::debug!(query = %compiled.query, variables = ?compiled.variables, "Sending operation");

        let response = self.client.inner.executor.execute(compiled.into()).await?;

        if !response.errors.is_empty() {
            tracing::warn!(errors = response.errors.len(), "Operation failed");
            return Err(RequestError {
                errors: response.errors,
            }
            .into());
        }

        let missing_data = || Error::MissingData {
            field: self.operation.name.clone(),
        };

        match response.data {
            Some(Value::Object(mut data)) => data
                .get_mut(&self.operation.name)
                .map(Value::take)
                .ok_or_else(missing_data),
            _ => Err(missing_data()),
        }
    }

    /// Like [`RootAccessor::send`], decoding the result into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, args: OperationArgs) -> Result<T, Error> {
        let data = self.send(args).await?;

        serde_json::from_value(data).map_err(|source| Error::Deserialize {
            field: self.operation.name.clone(),
            source,
        })
    }
}
