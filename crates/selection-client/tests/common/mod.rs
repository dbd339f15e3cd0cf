#![allow(dead_code)]

use std::sync::Mutex;

use cynic_parser::executable::{iter::Iter, Selection};
use selection_client::{Client, ClientConfig, Schema};
use serde_json::{json, Map, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

pub const SCHEMA: &str = include_str!("../fixtures/schema.graphql");

pub fn schema() -> Schema {
    Schema::from_sdl(SCHEMA).unwrap()
}

/// A mock server answering with [`FakeBackend`] on `/v1/graphql`, and a client pointed at it.
pub async fn start() -> (MockServer, Client) {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .respond_with(FakeBackend::default())
        .mount(&server)
        .await;

    let client = Client::new(schema(), &config(&server)).unwrap();

    (server, client)
}

pub fn config(server: &MockServer) -> ClientConfig {
    let url = format!("{}/v1/graphql", server.uri()).parse().unwrap();
    ClientConfig::new(url).with_header("x-hasura-admin-secret", "secret")
}

/// Request bodies received by the server, in order.
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}

/// In-memory GraphQL backend for the fixture schema. It resolves the root field of the incoming
/// document against a few tables and projects the rows over the requested selection set, like a
/// real server would. Selecting a field a row doesn't have is reported as a GraphQL error.
pub struct FakeBackend {
    tables: Mutex<Tables>,
}

struct Tables {
    users: Vec<Value>,
    messages: Vec<Value>,
    pets: Vec<Value>,
    media: Vec<Value>,
    next_message_id: i64,
}

impl Default for FakeBackend {
    fn default() -> Self {
        let tables = Tables {
            users: vec![
                json!({ "__typename": "users", "id": 1, "name": "Alice", "role": "admin", "created_at": "2024-01-01T00:00:00+00:00" }),
                json!({ "__typename": "users", "id": 2, "name": "Bob", "role": "user", "created_at": "2024-02-01T00:00:00+00:00" }),
                json!({ "__typename": "users", "id": 3, "name": "Carol", "role": "user", "created_at": "2024-03-01T00:00:00+00:00" }),
            ],
            messages: vec![
                json!({ "__typename": "messages", "id": 1, "contents": "hello", "userId": 1 }),
                json!({ "__typename": "messages", "id": 2, "contents": "hi there", "userId": 2 }),
            ],
            pets: vec![
                json!({ "__typename": "Dog", "name": "Rex", "age": 3, "breed": "beagle" }),
                json!({ "__typename": "Hamster", "name": "Nibbles", "age": 1, "wheelSize": 4.5, "ownerId": 2 }),
            ],
            media: vec![
                json!({ "__typename": "Image", "id": 1, "url": "cat.png", "width": 640, "height": 480 }),
                json!({ "__typename": "Video", "id": 2, "url": "cat.mp4", "duration": 60 }),
                json!({ "__typename": "Article", "id": 3, "title": "Cats", "body": "Cats are great." }),
            ],
            next_message_id: 3,
        };

        FakeBackend {
            tables: Mutex::new(tables),
        }
    }
}

impl Respond for FakeBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let query = body["query"].as_str().unwrap();
        let variables = body["variables"].as_object().cloned().unwrap_or_default();

        let document = cynic_parser::parse_executable_document(query).unwrap();
        let operation = document.operations().next().unwrap();
        let Some(Selection::Field(field)) = operation.selection_set().next() else {
            unreachable!("operations select a single root field");
        };

        let arguments = field
            .arguments()
            .filter_map(|argument| {
                let name = argument.name();
                variables.get(name).map(|value| (name.to_string(), value.clone()))
            })
            .collect::<Map<_, _>>();

        let nodes = nodes(field.selection_set());
        let resolved = self.tables.lock().unwrap().resolve(field.name(), &arguments);

        let response = resolved.and_then(|value| {
            let mut data = Map::new();
            let value = if nodes.is_empty() { value } else { project(&value, &nodes)? };
            data.insert(field.name().to_string(), value);

            Ok(json!({ "data": data }))
        });

        match response {
            Ok(body) => ResponseTemplate::new(200).set_body_json(body),
            Err(message) => ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": message, "extensions": { "code": "validation-failed" } }]
            })),
        }
    }
}

impl Tables {
    fn resolve(&mut self, field: &str, arguments: &Map<String, Value>) -> Result<Value, String> {
        let required = |name: &str| {
            arguments
                .get(name)
                .filter(|value| !value.is_null())
                .cloned()
                .ok_or_else(|| format!("missing required field '{name}'"))
        };

        let value = match field {
            "users" => {
                let role = arguments.get("where").and_then(|filter| filter.pointer("/role/_eq"));
                let limit = arguments.get("limit").and_then(Value::as_u64).unwrap_or(u64::MAX);

                let users = self
                    .users
                    .iter()
                    .filter(|user| role.map_or(true, |role| &user["role"] == role))
                    .take(usize::try_from(limit).unwrap_or(usize::MAX))
                    .map(|user| self.user(user))
                    .collect();

                Value::Array(users)
            }
            "users_by_pk" => {
                let id = required("id")?;
                self.users
                    .iter()
                    .find(|user| user["id"] == id)
                    .map(|user| self.user(user))
                    .unwrap_or(Value::Null)
            }
            "users_count" => json!(self.users.len()),
            "messages" => Value::Array(self.messages.iter().map(|message| self.message(message)).collect()),
            "messages_by_pk" => {
                let id = required("id")?;
                self.messages
                    .iter()
                    .find(|message| message["id"] == id)
                    .map(|message| self.message(message))
                    .unwrap_or(Value::Null)
            }
            "pets" => Value::Array(self.pets.iter().map(|pet| self.pet(pet)).collect()),
            "media" => Value::Array(self.media.clone()),
            "insert_messages_one" => {
                let object = required("object")?;
                let message = json!({
                    "__typename": "messages",
                    "id": self.next_message_id,
                    "contents": object["contents"],
                    "userId": object["userId"],
                });

                self.next_message_id += 1;
                self.messages.push(message.clone());
                self.message(&message)
            }
            "delete_messages_by_pk" => {
                let id = required("id")?;
                match self.messages.iter().position(|message| message["id"] == id) {
                    Some(position) => {
                        let message = self.messages.remove(position);
                        self.message(&message)
                    }
                    None => Value::Null,
                }
            }
            _ => return Err(format!("field '{field}' not found in type: 'query_root'")),
        };

        Ok(value)
    }

    fn user(&self, user: &Value) -> Value {
        let mut user = user.clone();
        let id = user["id"].clone();

        user["messages"] = self
            .messages
            .iter()
            .filter(|message| message["userId"] == id)
            .cloned()
            .collect();

        user["favorite_pet"] = if id == 1 {
            self.pets[0].clone()
        } else {
            Value::Null
        };

        user
    }

    fn message(&self, message: &Value) -> Value {
        let mut message = message.clone();
        let user_id = message["userId"].clone();

        message["user"] = self
            .users
            .iter()
            .find(|user| user["id"] == user_id)
            .cloned()
            .unwrap_or(Value::Null);

        message
    }

    fn pet(&self, pet: &Value) -> Value {
        let mut pet = pet.clone();

        if let Some(owner_id) = pet.get("ownerId").cloned() {
            pet["owner"] = self
                .users
                .iter()
                .find(|user| user["id"] == owner_id)
                .cloned()
                .unwrap_or(Value::Null);
        }

        pet
    }
}

enum Node {
    Field { name: String, children: Vec<Node> },
    InlineFragment { type_condition: String, children: Vec<Node> },
}

fn nodes(selection_set: Iter<'_, Selection<'_>>) -> Vec<Node> {
    selection_set
        .map(|selection| match selection {
            Selection::Field(field) => Node::Field {
                name: field.name().to_string(),
                children: nodes(field.selection_set()),
            },
            Selection::InlineFragment(fragment) => Node::InlineFragment {
                type_condition: fragment.type_condition().unwrap_or_default().to_string(),
                children: nodes(fragment.selection_set()),
            },
            Selection::FragmentSpread(_) => unreachable!("compiled documents have no named fragments"),
        })
        .collect()
}

fn project(value: &Value, nodes: &[Node]) -> Result<Value, String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| project(item, nodes))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(row) => {
            let mut projected = Map::new();
            project_into(row, nodes, &mut projected)?;
            Ok(Value::Object(projected))
        }
        other => Ok(other.clone()),
    }
}

fn project_into(row: &Map<String, Value>, nodes: &[Node], projected: &mut Map<String, Value>) -> Result<(), String> {
    for node in nodes {
        match node {
            Node::Field { name, children } => {
                let value = row.get(name).ok_or_else(|| {
                    format!(
                        "field '{name}' not found in type: '{}'",
                        row["__typename"].as_str().unwrap_or_default()
                    )
                })?;

                let value = if children.is_empty() {
                    value.clone()
                } else {
                    project(value, children)?
                };

                projected.insert(name.clone(), value);
            }
            Node::InlineFragment {
                type_condition,
                children,
            } => {
                if row["__typename"] == type_condition.as_str() {
                    project_into(row, children, projected)?;
                }
            }
        }
    }

    Ok(())
}
