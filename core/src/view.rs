//! View state for a single todo list session.
//!
//! # Design
//! `ViewState` owns the list snapshot, the new-todo form, the edit draft, and
//! the request flags. Every remote call is split in two:
//!
//! - `begin_*` checks the guards, flips the flags, and returns a `Ticket`
//!   holding the `HttpRequest` to execute (or `None` when the guard rejects
//!   the call).
//! - `complete` takes the ticket's `Pending` tag plus the host's response and
//!   reconciles it synchronously. The `finish_*` methods take an already
//!   parsed `Result` for hosts that call the client directly.
//!
//! One `submitting` flag gates add, save, toggle, and delete alike, so a
//! pending delete blocks an add. List loading has its own `loading` flag and
//! does not block mutations.

use std::num::NonZeroU32;

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, TodoId, TodoPage, TodoPatch, UpdateTodo};

pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => panic!("page size must be non-zero"),
};

/// Owner assigned to new todos until the form says otherwise.
pub const DEFAULT_USER_ID: i64 = 1;

pub const LOAD_FAILED: &str = "Failed to load todos. Please try again.";
pub const ADD_FAILED: &str = "Failed to create todo. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update todo. Please try again.";
pub const TOGGLE_FAILED: &str = "Failed to update todo status. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete todo. Please try again.";

/// Inputs for the "add todo" row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoForm {
    pub text: String,
    pub completed: bool,
    pub user_id: i64,
}

impl Default for NewTodoForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            completed: false,
            user_id: DEFAULT_USER_ID,
        }
    }
}

/// The single in-progress inline edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

/// Which remote call a `Ticket` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Load,
    Add,
    SaveEdit(TodoId),
    Toggle(TodoId),
    Delete(TodoId),
}

impl Pending {
    /// The message shown when this call fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Pending::Load => LOAD_FAILED,
            Pending::Add => ADD_FAILED,
            Pending::SaveEdit(_) => UPDATE_FAILED,
            Pending::Toggle(_) => TOGGLE_FAILED,
            Pending::Delete(_) => DELETE_FAILED,
        }
    }
}

/// A call that passed its guard. The host executes `request` and hands the
/// outcome back to `ViewState::complete` together with `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub pending: Pending,
    pub request: HttpRequest,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    client: TodoClient,
    page_size: NonZeroU32,
    skip: u32,
    todos: Vec<Todo>,
    total: u64,
    loading: bool,
    submitting: bool,
    error_message: String,
    new_todo: NewTodoForm,
    draft: Option<EditDraft>,
}

impl ViewState {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            page_size: DEFAULT_PAGE_SIZE,
            skip: 0,
            todos: Vec::new(),
            total: 0,
            loading: false,
            submitting: false,
            error_message: String::new(),
            new_todo: NewTodoForm::default(),
            draft: None,
        }
    }

    /// Load `page_size` todos starting at offset `skip` on every refresh.
    pub fn with_page(mut self, page_size: NonZeroU32, skip: u32) -> Self {
        self.page_size = page_size;
        self.skip = skip;
        self
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Total reported by the server on the last successful load.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Empty when the last attempt succeeded or none has been made.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn new_todo(&self) -> &NewTodoForm {
        &self.new_todo
    }

    pub fn new_todo_mut(&mut self) -> &mut NewTodoForm {
        &mut self.new_todo
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    pub fn begin_load(&mut self) -> Option<Ticket> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error_message.clear();
        debug!(limit = self.page_size.get(), skip = self.skip, "loading todos");
        Some(Ticket {
            pending: Pending::Load,
            request: self.client.build_list_todos(self.page_size, self.skip),
        })
    }

    /// Replace the snapshot with the fetched page, or keep it and report.
    pub fn finish_load(&mut self, result: Result<TodoPage, TransportError>) {
        self.loading = false;
        match result {
            Ok(page) => {
                self.total = page.total;
                self.todos = page.todos;
            }
            Err(e) => self.record_failure(Pending::Load, &e),
        }
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    pub fn begin_add(&mut self) -> Option<Ticket> {
        if self.submitting {
            return None;
        }
        let text = self.new_todo.text.trim();
        if text.is_empty() {
            return None;
        }
        let input = CreateTodo {
            todo: text.to_string(),
            completed: self.new_todo.completed,
            user_id: self.new_todo.user_id,
        };
        let request = self.client.build_create_todo(&input);
        self.start_mutation(Pending::Add, request)
    }

    /// Prepend the created todo and reset the form.
    pub fn finish_add(&mut self, result: Result<Todo, TransportError>) {
        self.submitting = false;
        match result {
            Ok(todo) => {
                self.todos.insert(0, todo);
                self.new_todo = NewTodoForm::default();
            }
            Err(e) => self.record_failure(Pending::Add, &e),
        }
    }

    // -----------------------------------------------------------------------
    // Edit draft
    // -----------------------------------------------------------------------

    /// Start editing `todo`, discarding any other unsaved draft.
    pub fn begin_edit(&mut self, todo: &Todo) {
        self.draft = Some(EditDraft {
            id: todo.id,
            text: todo.todo.clone(),
            completed: todo.completed,
        });
    }

    /// `begin_edit` for the snapshot entry with `id`. Returns `false` if no
    /// such entry is loaded.
    pub fn begin_edit_by_id(&mut self, id: TodoId) -> bool {
        let Some(todo) = self.todos.iter().find(|t| t.id == id).cloned() else {
            return false;
        };
        self.begin_edit(&todo);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub fn begin_save_edit(&mut self) -> Option<Ticket> {
        if self.submitting {
            return None;
        }
        let draft = self.draft.as_ref()?;
        let text = draft.text.trim();
        if text.is_empty() {
            return None;
        }
        let id = draft.id;
        let input = UpdateTodo {
            todo: Some(text.to_string()),
            completed: Some(draft.completed),
        };
        let request = self.client.build_update_todo(id, &input);
        self.start_mutation(Pending::SaveEdit(id), request)
    }

    pub fn finish_save_edit(&mut self, id: TodoId, result: Result<TodoPatch, TransportError>) {
        self.reconcile_update(Pending::SaveEdit(id), id, result);
    }

    // -----------------------------------------------------------------------
    // Toggle
    // -----------------------------------------------------------------------

    /// Flip the completion flag of the loaded todo `id`. Unknown ids are
    /// ignored.
    pub fn begin_toggle(&mut self, id: TodoId) -> Option<Ticket> {
        if self.submitting {
            return None;
        }
        let current = self.todos.iter().find(|t| t.id == id)?;
        let input = UpdateTodo {
            todo: None,
            completed: Some(!current.completed),
        };
        let request = self.client.build_update_todo(id, &input);
        self.start_mutation(Pending::Toggle(id), request)
    }

    pub fn finish_toggle(&mut self, id: TodoId, result: Result<TodoPatch, TransportError>) {
        self.reconcile_update(Pending::Toggle(id), id, result);
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    pub fn begin_delete(&mut self, id: TodoId) -> Option<Ticket> {
        if self.submitting {
            return None;
        }
        let request = Ok(self.client.build_delete_todo(id));
        self.start_mutation(Pending::Delete(id), request)
    }

    pub fn finish_delete(&mut self, id: TodoId, result: Result<Todo, TransportError>) {
        self.submitting = false;
        match result {
            Ok(_) => {
                self.todos.retain(|t| t.id != id);
                if self.draft.as_ref().is_some_and(|d| d.id == id) {
                    self.draft = None;
                }
            }
            Err(e) => self.record_failure(Pending::Delete(id), &e),
        }
    }

    // -----------------------------------------------------------------------
    // Completion
    // -----------------------------------------------------------------------

    /// Parse the host's outcome for `pending` and reconcile it.
    pub fn complete(&mut self, pending: Pending, response: Result<HttpResponse, TransportError>) {
        match pending {
            Pending::Load => {
                let result = response.and_then(|r| self.client.parse_list_todos(r));
                self.finish_load(result);
            }
            Pending::Add => {
                let result = response.and_then(|r| self.client.parse_create_todo(r));
                self.finish_add(result);
            }
            Pending::SaveEdit(id) => {
                let result = response.and_then(|r| self.client.parse_update_todo(r));
                self.finish_save_edit(id, result);
            }
            Pending::Toggle(id) => {
                let result = response.and_then(|r| self.client.parse_update_todo(r));
                self.finish_toggle(id, result);
            }
            Pending::Delete(id) => {
                let result = response.and_then(|r| self.client.parse_delete_todo(r));
                self.finish_delete(id, result);
            }
        }
    }

    fn start_mutation(
        &mut self,
        pending: Pending,
        request: Result<HttpRequest, TransportError>,
    ) -> Option<Ticket> {
        self.error_message.clear();
        match request {
            Ok(request) => {
                self.submitting = true;
                debug!(?pending, method = request.method.as_str(), path = %request.path, "issuing todo mutation");
                Some(Ticket { pending, request })
            }
            Err(e) => {
                self.record_failure(pending, &e);
                None
            }
        }
    }

    /// Merge the server's fields over the matching entry; fields the server
    /// left out keep their local value.
    fn reconcile_update(&mut self, pending: Pending, id: TodoId, result: Result<TodoPatch, TransportError>) {
        self.submitting = false;
        match result {
            Ok(patch) => {
                if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
                    todo.merge(&patch);
                }
                if self.draft.as_ref().is_some_and(|d| d.id == id) {
                    self.draft = None;
                }
            }
            Err(e) => self.record_failure(pending, &e),
        }
    }

    fn record_failure(&mut self, pending: Pending, error: &TransportError) {
        warn!(?pending, error = %error, "todo request failed");
        self.error_message = pending.failure_message().to_string();
    }
}
