use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Id the public placeholder API assigns to every created post.
pub const CREATED_POST_ID: u64 = 101;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Read-only data served by the mock.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub todos: Vec<Todo>,
}

impl Fixtures {
    pub fn seeded() -> Self {
        let user = |id: u64, name: &str, username: &str| User {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
        };
        let todo = |user_id: u64, id: u64, title: &str, completed: bool| Todo {
            user_id,
            id,
            title: title.to_string(),
            completed,
        };
        Self {
            users: vec![
                user(1, "Alice", "alice"),
                user(2, "Bob", "bob"),
                user(3, "Carol", "carol"),
            ],
            todos: vec![
                todo(1, 1, "delectus aut autem", false),
                todo(1, 2, "quis ut nam facilis et officia qui", false),
                todo(2, 3, "fugiat veniam minus", true),
            ],
        }
    }
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::seeded())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/todos", get(list_todos))
        .route("/posts", post(create_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.users.clone())
}

/// Unknown ids answer 404 with an empty JSON object, like the public API.
async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    match db.users.iter().find(|user| user.id == id) {
        Some(user) => (StatusCode::OK, Json(json!(user))),
        None => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.todos.clone())
}

/// Echo the payload back with the fixed id. Nothing is stored.
async fn create_post(Json(input): Json<Value>) -> (StatusCode, Json<Value>) {
    let created = match input {
        Value::Object(mut fields) => {
            fields.insert("id".to_string(), json!(CREATED_POST_ID));
            Value::Object(fields)
        }
        _ => json!({ "id": CREATED_POST_ID }),
    };
    (StatusCode::CREATED, Json(created))
}
