mod common;

use std::time::Duration;

use selection_client::{Client, ClientConfig, Error, OperationArgs, TransportError};
use serde_json::json;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

async fn client_answered_with(response: ResponseTemplate) -> (MockServer, Client) {
    let server = MockServer::start().await;

    Mock::given(method("POST")).respond_with(response).mount(&server).await;

    let config = common::config(&server).with_timeout(Duration::from_millis(200));
    let client = Client::new(common::schema(), &config).unwrap();

    (server, client)
}

async fn count_users(client: &Client) -> Result<serde_json::Value, Error> {
    client.query().field("users_count")?.send(OperationArgs::new()).await
}

#[tokio::test]
async fn plain_failure_status() {
    let (_server, client) = client_answered_with(ResponseTemplate::new(500).set_body_string("upstream unavailable")).await;

    let error = count_users(&client).await.unwrap_err();

    let Error::Transport(TransportError::Status { status, body }) = error else {
        unreachable!("expected a status error, got {error:?}");
    };
    assert_eq!(status, 500);
    assert_eq!(body, "upstream unavailable");
}

#[tokio::test]
async fn failure_status_with_graphql_errors() {
    let (_server, client) = client_answered_with(
        ResponseTemplate::new(400).set_body_json(json!({ "errors": [{ "message": "invalid JWT" }] })),
    )
    .await;

    let error = count_users(&client).await.unwrap_err();

    insta::assert_snapshot!(error, @"The GraphQL request failed: invalid JWT");
}

#[tokio::test]
async fn errors_win_over_partial_data() {
    let (_server, client) = client_answered_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": { "users_count": 3 },
        "errors": [
            { "message": "first", "path": ["users_count"], "locations": [{ "line": 1, "column": 9 }] },
            { "message": "second" }
        ]
    })))
    .await;

    let Error::Request(error) = count_users(&client).await.unwrap_err() else {
        unreachable!("expected a request error");
    };

    assert_eq!(error.errors.len(), 2);
    assert_eq!(error.errors[0].path, Some(vec![json!("users_count")]));
    insta::assert_snapshot!(error, @"The GraphQL request failed: first; second");
}

#[tokio::test]
async fn null_errors_are_no_errors() {
    let (_server, client) = client_answered_with(
        ResponseTemplate::new(200).set_body_json(json!({ "data": { "users_count": 3 }, "errors": null })),
    )
    .await;

    assert_eq!(count_users(&client).await.unwrap(), json!(3));
}

#[tokio::test]
async fn missing_data() {
    let (_server, client) = client_answered_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null }))).await;

    let error = count_users(&client).await.unwrap_err();
    insta::assert_snapshot!(error, @"The response contains no data for the field 'users_count'");

    let (_server, client) = client_answered_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} }))).await;

    let error = count_users(&client).await.unwrap_err();
    assert!(matches!(error, Error::MissingData { .. }));
}

#[tokio::test]
async fn invalid_response_body() {
    let (_server, client) = client_answered_with(ResponseTemplate::new(200).set_body_string("<html></html>")).await;

    let error = count_users(&client).await.unwrap_err();
    assert!(matches!(error, Error::Transport(TransportError::InvalidResponse(_))));
}

#[tokio::test]
async fn timeout() {
    let (_server, client) = client_answered_with(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "data": { "users_count": 3 } }))
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let error = count_users(&client).await.unwrap_err();

    assert!(matches!(error, Error::Transport(TransportError::Timeout(_))));
    insta::assert_snapshot!(error, @"Request timed out after 200ms");
}

#[tokio::test]
async fn connection_failure() {
    // Nothing listens on a port once its listener is gone.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let config = ClientConfig::new(format!("http://127.0.0.1:{port}/v1/graphql").parse().unwrap());

    let client = Client::new(common::schema(), &config).unwrap();
    let error = count_users(&client).await.unwrap_err();

    assert!(matches!(error, Error::Transport(TransportError::Http(_))));
}

#[test]
fn invalid_header_names_are_configuration_errors() {
    let config = ClientConfig::new("http://localhost:8080/v1/graphql".parse().unwrap())
        .with_header("not a header", "value");

    let error = Client::new(common::schema(), &config).err().unwrap();
    assert!(matches!(error, Error::Config(_)));
}
