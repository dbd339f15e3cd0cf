use std::{path::Path, time::Duration};

use selection_client::{Client, ClientConfig, Error, OperationArgs, OperationKind};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn full_configuration() {
    let config = ClientConfig::from_toml(indoc::indoc! {r#"
        url = "https://example.com/v1/graphql"
        schema = "/etc/schema.graphql"
        timeout = "1m"
        validate_required_arguments = true

        [headers]
        authorization = "Bearer token"
        x-hasura-role = "user"
    "#})
    .unwrap();

    assert_eq!(config.url.as_str(), "https://example.com/v1/graphql");
    assert_eq!(config.schema.as_deref(), Some(Path::new("/etc/schema.graphql")));
    assert_eq!(config.timeout, Some(Duration::from_secs(60)));
    assert!(config.compile_options().validate_required_arguments);

    let headers = config.headers.iter().collect::<Vec<_>>();
    insta::assert_debug_snapshot!(headers, @r#"
    [
        (
            "authorization",
            "Bearer token",
        ),
        (
            "x-hasura-role",
            "user",
        ),
    ]
    "#);
}

#[test]
fn defaults() {
    let config = ClientConfig::from_toml(r#"url = "http://localhost:8080/v1/graphql""#).unwrap();

    assert_eq!(config, ClientConfig::new("http://localhost:8080/v1/graphql".parse().unwrap()));
    assert!(!config.validate_required_arguments);
}

#[test]
fn unknown_keys_are_rejected() {
    let error = ClientConfig::from_toml(indoc::indoc! {r#"
        url = "http://localhost:8080/v1/graphql"
        retries = 3
    "#})
    .unwrap_err();

    assert!(matches!(error, Error::Config(ref message) if message.contains("retries")));
}

#[test]
fn invalid_values() {
    assert!(ClientConfig::from_toml(r#"url = "not a url""#).is_err());
    assert!(ClientConfig::from_toml(indoc::indoc! {r#"
        url = "http://localhost:8080/v1/graphql"
        timeout = "soon"
    "#})
    .is_err());
}

#[test]
fn schema_path_is_relative_to_the_configuration_file() {
    let config = ClientConfig::load(fixture("client.toml")).unwrap();

    assert_eq!(config.schema, Some(fixture("schema.graphql")));
    assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.headers["x-hasura-admin-secret"], "secret");
}

#[test]
fn client_from_configuration_file() {
    let config = ClientConfig::load(fixture("client.toml")).unwrap();
    let client = Client::from_config(&config).unwrap();

    assert!(client.query().fields().any(|field| field == "pets"));
    assert!(client.schema().root_operation(OperationKind::Mutation, "insert_messages_one").is_some());

    // Required arguments are validated before anything is sent.
    let error = client
        .query()
        .field("users_by_pk")
        .unwrap()
        .compile(&OperationArgs::new())
        .unwrap_err();
    insta::assert_snapshot!(error, @"The argument 'id' of 'users_by_pk' is required");
}

#[test]
fn json_schema_files() {
    let config = ClientConfig::new("http://localhost:8080/v1/graphql".parse().unwrap()).with_schema(fixture("schema.json"));
    let client = Client::from_config(&config).unwrap();

    let compiled = client
        .query()
        .field("users")
        .unwrap()
        .compile(&OperationArgs::new().variable("limit", 5))
        .unwrap();
    insta::assert_snapshot!(compiled.query, @"query($limit: Int) { users(limit: $limit) { id name } }");
}

#[test]
fn missing_files() {
    let error = ClientConfig::load(fixture("missing.toml")).unwrap_err();
    assert!(matches!(error, Error::Io { .. }));

    let config = ClientConfig::new("http://localhost:8080/v1/graphql".parse().unwrap());
    let error = Client::from_config(&config).err().unwrap();
    insta::assert_snapshot!(error, @"Invalid client configuration: no schema file configured");
}

#[test]
fn invalid_schema_files() {
    let config = ClientConfig::new("http://localhost:8080/v1/graphql".parse().unwrap()).with_schema(fixture("client.toml"));

    let error = Client::from_config(&config).err().unwrap();
    assert!(matches!(error, Error::Schema(_)));
}
