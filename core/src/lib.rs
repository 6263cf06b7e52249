//! Client core for a remote todo list.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the view state of
//! one todo list session in sync with the remote collection.
//!
//! # Design
//! - `TodoClient` is stateless. It holds only the collection URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit. A
//!   `Transport` implementation supplied by the host closes the loop.
//! - `ViewState` holds the snapshot, draft, and flags; `Session` drives it
//!   against a `Transport` one call at a time.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use error::TransportError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use session::Session;
pub use types::{CreateTodo, Todo, TodoId, TodoPage, TodoPatch, UpdateTodo};
pub use view::{EditDraft, NewTodoForm, Pending, Ticket, ViewState};
