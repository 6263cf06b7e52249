//! Wire DTOs for the remote todo list API.
//!
//! # Design
//! Field names follow the remote service's camelCase JSON (`userId`). Update
//! responses are decoded into `TodoPatch` rather than `Todo` because a server
//! may echo only the fields it touched; merging a patch over the stored entry
//! keeps whatever the response left out.

use serde::{Deserialize, Serialize};

/// Server-assigned todo identifier.
pub type TodoId = i64;

/// A single todo item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub todo: String,
    pub completed: bool,
    pub user_id: i64,
}

impl Todo {
    /// Copy every field present in `patch` over `self`. Fields the patch
    /// omits keep their current value; `id` is never touched.
    pub fn merge(&mut self, patch: &TodoPatch) {
        if let Some(todo) = &patch.todo {
            self.todo.clone_from(todo);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
    }
}

/// One page of todos from `GET <base>?limit=&skip=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Request payload for `POST <base>/add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
    pub user_id: i64,
}

/// Request payload for `PUT <base>/<id>`. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// A possibly partial todo representation returned by an update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub id: TodoId,
    pub todo: Option<String>,
    pub completed: Option<bool>,
    pub user_id: Option<i64>,
}

impl From<Todo> for TodoPatch {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            todo: Some(todo.todo),
            completed: Some(todo.completed),
            user_id: Some(todo.user_id),
        }
    }
}
