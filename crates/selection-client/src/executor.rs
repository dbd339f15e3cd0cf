use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::{ClientConfig, CompiledOperation, Error, TransportError};

/// The JSON body POSTed to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: Map<String, Value>,
}

impl From<CompiledOperation> for GraphqlRequest {
    fn from(operation: CompiledOperation) -> Self {
        GraphqlRequest {
            query: operation.query,
            variables: operation.variables,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<GraphqlErrorLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        GraphqlError {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorLocation {
    pub line: usize,
    pub column: usize,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Performs the round trip of a compiled operation.
#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError>;
}

/// [`Executor`] POSTing JSON requests over HTTP.
pub struct HttpExecutor {
    client: reqwest::Client,
    url: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpExecutor {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();

        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| Error::Config(format!("invalid header name '{name}': {err}")))?;

            let value = HeaderValue::from_str(value)
                .map_err(|err| Error::Config(format!("invalid value for header '{name}': {err}")))?;

            headers.insert(name, value);
        }

        headers.entry(ACCEPT).or_insert(HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .build()
            .map_err(TransportError::Http)?;

        Ok(HttpExecutor {
            client,
            url: config.url.clone(),
            headers,
            timeout: config.timeout,
        })
    }

    async fn post(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, TransportError> {
        let response = self
            .client
            .post(self.url.clone())
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let parsed = serde_json::from_slice::<GraphqlResponse>(&body);

        if status.is_success() {
            return parsed.map_err(|err| TransportError::InvalidResponse(err.to_string()));
        }

        match parsed {
            Ok(response) if !response.errors.is_empty() => Ok(response),
            _ => Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError> {
        let Some(timeout) = self.timeout else {
            return self.post(&request).await;
        };

        let expired = async {
            tokio::time::sleep(timeout).await;
            Err(TransportError::Timeout(timeout))
        };

        tokio::select! {
            result = expired => { result }
            result = self.post(&request) => { result }
        }
    }
}
