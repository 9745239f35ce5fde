//! In-process stand-in for the hosted todo API.
//!
//! Every body is a `{ "data": ... }` envelope. Ids are sequential integers,
//! the list comes back in ascending id order, and records carry a
//! server-side `createdAt` the client is expected to preserve.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub is_completed: bool,
    pub due_at: Option<String>,
    pub created_at: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub due_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub due_at: Option<String>,
}

/// Response wrapper used for every body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    todos: BTreeMap<i64, Todo>,
}

pub type Db = Arc<RwLock<Store>>;

type Reply<T> = Result<(StatusCode, Json<Envelope<T>>), (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "data": null })))
}

fn blank_title() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "data": null, "message": "title is required" })),
    )
}

async fn list_todos(State(db): State<Db>) -> Json<Envelope<Vec<Todo>>> {
    let store = db.read().await;
    info!(count = store.todos.len(), "list");
    Json(Envelope {
        data: store.todos.values().cloned().collect(),
    })
}

async fn create_todo(State(db): State<Db>, Json(input): Json<CreateTodo>) -> Reply<Todo> {
    if input.title.trim().is_empty() {
        return Err(blank_title());
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let todo = Todo {
        id: store.next_id,
        title: input.title,
        description: input.description,
        priority: input.priority,
        is_completed: false,
        due_at: input.due_at,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    store.todos.insert(todo.id, todo.clone());
    info!(id = todo.id, "create");
    Ok((StatusCode::CREATED, Json(Envelope { data: todo })))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Reply<Todo> {
    let store = db.read().await;
    let todo = store.todos.get(&id).cloned().ok_or_else(not_found)?;
    info!(id, "get");
    Ok((StatusCode::OK, Json(Envelope { data: todo })))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Reply<Todo> {
    if input.title.trim().is_empty() {
        return Err(blank_title());
    }
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(not_found)?;
    todo.title = input.title;
    todo.description = input.description;
    todo.is_completed = input.is_completed;
    todo.priority = input.priority;
    todo.due_at = input.due_at;
    info!(id, "update");
    Ok((StatusCode::OK, Json(Envelope { data: todo.clone() })))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    store.todos.remove(&id).ok_or_else(not_found)?;
    info!(id, "delete");
    Ok(StatusCode::NO_CONTENT)
}
