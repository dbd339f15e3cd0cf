use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use indexmap::IndexMap;
use selection_schema::Schema;
use serde::Deserialize;
use url::Url;

use crate::{CompileOptions, Error};

/// Client settings, usually read from a TOML file:
///
/// ```toml
/// url = "http://localhost:8080/v1/graphql"
/// schema = "schema.graphql"
/// timeout = "30s"
///
/// [headers]
/// x-hasura-admin-secret = "secret"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub url: Url,
    /// `.json` files hold a schema description, anything else is read as SDL.
    #[serde(default)]
    pub schema: Option<PathBuf>,
    /// Sent with every request.
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    #[serde(default, deserialize_with = "duration_str::deserialize_option_duration")]
    pub timeout: Option<Duration>,
    #[serde(default)]
    pub validate_required_arguments: bool,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        ClientConfig {
            url,
            schema: None,
            headers: IndexMap::new(),
            timeout: None,
            validate_required_arguments: false,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_required_argument_validation(mut self, enabled: bool) -> Self {
        self.validate_required_arguments = enabled;
        self
    }

    pub fn from_toml(toml: &str) -> Result<Self, Error> {
        toml::from_str(toml).map_err(|err| Error::Config(err.to_string()))
    }

    /// Reads a TOML configuration file. A relative schema path is resolved against the directory
    /// of the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut config = Self::from_toml(&read(path)?)?;

        config.schema = config.schema.take().map(|schema| match path.parent() {
            Some(parent) if schema.is_relative() => parent.join(schema),
            _ => schema,
        });

        Ok(config)
    }

    pub fn load_schema(&self) -> Result<Schema, Error> {
        let Some(path) = &self.schema else {
            return Err(Error::Config("no schema file configured".to_string()));
        };

        let contents = read(path)?;
        let is_json = path.extension().is_some_and(|extension| extension == "json");

        tracing::debug!(path = %path.display(), "Loading schema");

        let schema = if is_json {
            Schema::from_json(&contents)?
        } else {
            Schema::from_sdl(&contents)?
        };

        Ok(schema)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            validate_required_arguments: self.validate_required_arguments,
        }
    }
}

fn read(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
