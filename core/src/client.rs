//! Stateless request builder and response parser for the remote todo list.
//!
//! # Design
//! `TodoClient` holds only the collection URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method producing
//! an `HttpRequest` and a `parse_*` method consuming an `HttpResponse`. The
//! combined `list`/`create`/`update`/`delete` methods glue the two halves
//! around a caller-supplied `Transport`.

use std::num::NonZeroU32;

use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{CreateTodo, Todo, TodoId, TodoPage, TodoPatch, UpdateTodo};

/// Client for a remote todo collection such as `https://dummyjson.com/todos`.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network itself.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    /// `base_url` addresses the collection itself, not the service root.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self, limit: NonZeroU32, skip: u32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}?limit={limit}&skip={skip}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, TransportError> {
        let body = serde_json::to_string(input).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/add", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_todo(&self, id: TodoId, input: &UpdateTodo) -> Result<HttpRequest, TransportError> {
        let body = serde_json::to_string(input).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<TodoPage, TransportError> {
        parse_json(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, TransportError> {
        parse_json(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<TodoPatch, TransportError> {
        parse_json(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Todo, TransportError> {
        parse_json(response)
    }

    /// Fetch one page of todos.
    pub fn list<T: Transport + ?Sized>(
        &self,
        transport: &T,
        limit: NonZeroU32,
        skip: u32,
    ) -> Result<TodoPage, TransportError> {
        let response = transport.execute(self.build_list_todos(limit, skip))?;
        self.parse_list_todos(response)
    }

    /// Create a todo. `input.todo` is sent as-is; trimming is the caller's job.
    pub fn create<T: Transport + ?Sized>(&self, transport: &T, input: &CreateTodo) -> Result<Todo, TransportError> {
        let response = transport.execute(self.build_create_todo(input)?)?;
        self.parse_create_todo(response)
    }

    pub fn update<T: Transport + ?Sized>(
        &self,
        transport: &T,
        id: TodoId,
        input: &UpdateTodo,
    ) -> Result<TodoPatch, TransportError> {
        let response = transport.execute(self.build_update_todo(id, input)?)?;
        self.parse_update_todo(response)
    }

    pub fn delete<T: Transport + ?Sized>(&self, transport: &T, id: TodoId) -> Result<Todo, TransportError> {
        let response = transport.execute(self.build_delete_todo(id))?;
        self.parse_delete_todo(response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Reject non-2xx statuses, then decode the body.
fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, TransportError> {
    if !response.is_success() {
        return Err(TransportError::Status {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| TransportError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000/todos")
    }

    fn limit(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    /// Records the last request and replays a canned response.
    struct Canned {
        reply: Result<HttpResponse, TransportError>,
        seen: RefCell<Option<HttpRequest>>,
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            *self.seen.borrow_mut() = Some(request);
            self.reply.clone()
        }
    }

    #[test]
    fn build_list_todos_carries_limit_and_skip() {
        let req = client().build_list_todos(limit(20), 40);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos?limit=20&skip=40");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_todo_posts_to_add() {
        let input = CreateTodo {
            todo: "Buy milk".to_string(),
            completed: false,
            user_id: 1,
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos/add");
        assert_eq!(req.headers, json_headers());
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"todo": "Buy milk", "completed": false, "userId": 1}));
    }

    #[test]
    fn build_update_todo_sends_only_present_fields() {
        let input = UpdateTodo {
            todo: None,
            completed: Some(true),
        };
        let req = client().build_update_todo(7, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todos/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true}));
    }

    #[test]
    fn build_delete_todo_has_no_body() {
        let req = client().build_delete_todo(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todos/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/todos/");
        assert_eq!(client.build_delete_todo(1).path, "http://localhost:3000/todos/1");
    }

    #[test]
    fn parse_list_todos_success() {
        let page = client()
            .parse_list_todos(response(
                200,
                r#"{"todos":[{"id":1,"todo":"x","completed":false,"userId":1}],"total":1,"skip":0,"limit":20}"#,
            ))
            .unwrap();
        assert_eq!(page.todos.len(), 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.limit, 20);
    }

    #[test]
    fn parse_create_accepts_any_2xx() {
        let body = r#"{"id":255,"todo":"New","completed":false,"userId":1}"#;
        assert_eq!(client().parse_create_todo(response(201, body)).unwrap().id, 255);
        assert_eq!(client().parse_create_todo(response(200, body)).unwrap().id, 255);
    }

    #[test]
    fn parse_update_tolerates_missing_fields() {
        let patch = client()
            .parse_update_todo(response(200, r#"{"id":5,"completed":true}"#))
            .unwrap();
        assert_eq!(patch.todo, None);
        assert_eq!(patch.completed, Some(true));
        assert_eq!(patch.user_id, None);
    }

    #[test]
    fn parse_delete_ignores_extra_fields() {
        let todo = client()
            .parse_delete_todo(response(
                200,
                r#"{"id":3,"todo":"gone","completed":true,"userId":2,"isDeleted":true}"#,
            ))
            .unwrap();
        assert_eq!(todo.id, 3);
        assert_eq!(todo.user_id, 2);
    }

    #[test]
    fn not_found_is_a_plain_status_error() {
        let err = client()
            .parse_delete_todo(response(404, r#"{"message":"Todo with id '9' not found"}"#))
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }

    #[test]
    fn bad_json_is_a_decode_error() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn combined_update_executes_built_request() {
        let transport = Canned {
            reply: Ok(response(200, r#"{"id":4,"todo":"t","completed":true,"userId":1}"#)),
            seen: RefCell::new(None),
        };
        let patch = client()
            .update(
                &transport,
                4,
                &UpdateTodo {
                    todo: None,
                    completed: Some(true),
                },
            )
            .unwrap();
        assert_eq!(patch.completed, Some(true));
        let seen = transport.seen.borrow().clone().unwrap();
        assert_eq!(seen.method, HttpMethod::Put);
        assert_eq!(seen.path, "http://localhost:3000/todos/4");
    }

    #[test]
    fn combined_create_posts_and_parses() {
        let transport = Canned {
            reply: Ok(response(201, r#"{"id":255,"todo":"Buy milk","completed":false,"userId":1}"#)),
            seen: RefCell::new(None),
        };
        let input = CreateTodo {
            todo: "Buy milk".to_string(),
            completed: false,
            user_id: 1,
        };
        let created = client().create(&transport, &input).unwrap();
        assert_eq!(created.id, 255);
        assert_eq!(created.todo, "Buy milk");
        let seen = transport.seen.borrow().clone().unwrap();
        assert_eq!(seen.method, HttpMethod::Post);
        assert_eq!(seen.path, "http://localhost:3000/todos/add");
        assert!(seen.body.is_some());
    }

    #[test]
    fn combined_delete_sends_delete_and_parses() {
        let transport = Canned {
            reply: Ok(response(
                200,
                r#"{"id":3,"todo":"gone","completed":true,"userId":2,"isDeleted":true}"#,
            )),
            seen: RefCell::new(None),
        };
        let deleted = client().delete(&transport, 3).unwrap();
        assert_eq!(deleted.id, 3);
        assert!(deleted.completed);
        let seen = transport.seen.borrow().clone().unwrap();
        assert_eq!(seen.method, HttpMethod::Delete);
        assert_eq!(seen.path, "http://localhost:3000/todos/3");
        assert!(seen.body.is_none());
    }

    #[test]
    fn combined_delete_surfaces_not_found() {
        let transport = Canned {
            reply: Ok(response(404, r#"{"message":"Todo with id '3' not found"}"#)),
            seen: RefCell::new(None),
        };
        let err = client().delete(&transport, 3).unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }

    #[test]
    fn combined_list_propagates_network_failure() {
        let transport = Canned {
            reply: Err(TransportError::Network("connection refused".to_string())),
            seen: RefCell::new(None),
        };
        let err = client().list(&transport, limit(20), 0).unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
