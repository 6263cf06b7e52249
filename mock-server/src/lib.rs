use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

/// Page size used when a list request carries no `limit`.
pub const DEFAULT_LIMIT: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub completed: bool,
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub todo: Option<String>,
    pub completed: Option<bool>,
}

/// Body of a successful delete: the last representation plus a marker.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTodo {
    #[serde(flatten)]
    pub todo: Todo,
    pub is_deleted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

/// Todos keyed by id, so listing is ordered by id.
#[derive(Debug)]
pub struct Store {
    todos: BTreeMap<i64, Todo>,
    /// `None` once ids are exhausted.
    next_id: Option<i64>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            todos: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

impl Store {
    pub fn seeded(todos: impl IntoIterator<Item = Todo>) -> Self {
        let todos: BTreeMap<i64, Todo> = todos.into_iter().map(|t| (t.id, t)).collect();
        let next_id = todos.keys().next_back().map_or(Some(1), |id| id.checked_add(1));
        Self { todos, next_id }
    }

    fn allocate_id(&mut self) -> Option<i64> {
        let id = self.next_id?.max(1);
        self.next_id = id.checked_add(1);
        Some(id)
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

/// An empty collection served under `/todos`.
pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded(todos)));
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/add", post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener, todos: Vec<Todo>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(todos)).await
}

/// A handful of todos for local runs.
pub fn sample_todos() -> Vec<Todo> {
    [
        ("Do something nice for someone you care about", false, 152),
        ("Memorize a poem", true, 13),
        ("Watch a classic movie", true, 68),
        ("Watch a documentary", false, 84),
        ("Invest in cryptocurrency", false, 163),
    ]
    .into_iter()
    .zip(1..)
    .map(|((todo, completed, user_id), id)| Todo {
        id,
        todo: todo.to_string(),
        completed,
        user_id,
    })
    .collect()
}

fn not_found(id: i64) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: format!("Todo with id '{id}' not found"),
        }),
    )
}

async fn list_todos(State(db): State<Db>, Query(page): Query<PageQuery>) -> Json<TodoList> {
    let store = db.read().await;
    let skip = page.skip.unwrap_or(0);
    let limit = page.limit.unwrap_or(DEFAULT_LIMIT);
    let take = if limit == 0 { usize::MAX } else { limit };
    let todos: Vec<Todo> = store.todos.values().skip(skip).take(take).cloned().collect();
    let limit = if limit == 0 { todos.len() } else { limit };
    Json(TodoList {
        todos,
        total: store.todos.len(),
        skip,
        limit,
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), (StatusCode, Json<ErrorBody>)> {
    let mut store = db.write().await;
    let id = store.allocate_id().ok_or_else(|| {
        (
            StatusCode::INSUFFICIENT_STORAGE,
            Json(ErrorBody {
                message: "No todo ids left".to_string(),
            }),
        )
    })?;
    let todo = Todo {
        id,
        todo: input.todo,
        completed: input.completed,
        user_id: input.user_id,
    };
    store.todos.insert(todo.id, todo.clone());
    debug!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> ApiResult<Todo> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(|| not_found(id))?;
    if let Some(text) = input.todo {
        todo.todo = text;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    debug!(id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<DeletedTodo> {
    let mut store = db.write().await;
    let todo = store.todos.remove(&id).ok_or_else(|| not_found(id))?;
    debug!(id, "deleted todo");
    Ok(Json(DeletedTodo {
        todo,
        is_deleted: true,
    }))
}
