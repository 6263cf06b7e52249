//! Blocking driver that pairs a `ViewState` with a `Transport`.
//!
//! Each operation runs `begin_*`, executes the ticket's request, and feeds the
//! outcome straight back into `ViewState::complete`, so no other completion
//! can interleave. The return value says whether a request was issued at all.

use crate::http::Transport;
use crate::types::TodoId;
use crate::view::{Ticket, ViewState};

#[derive(Debug)]
pub struct Session<T> {
    view: ViewState,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(view: ViewState, transport: T) -> Self {
        Self { view, transport }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable access for editing form and draft fields.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn load(&mut self) -> bool {
        let ticket = self.view.begin_load();
        self.run(ticket)
    }

    pub fn add(&mut self) -> bool {
        let ticket = self.view.begin_add();
        self.run(ticket)
    }

    pub fn save_edit(&mut self) -> bool {
        let ticket = self.view.begin_save_edit();
        self.run(ticket)
    }

    pub fn toggle_complete(&mut self, id: TodoId) -> bool {
        let ticket = self.view.begin_toggle(id);
        self.run(ticket)
    }

    pub fn delete(&mut self, id: TodoId) -> bool {
        let ticket = self.view.begin_delete(id);
        self.run(ticket)
    }

    fn run(&mut self, ticket: Option<Ticket>) -> bool {
        let Some(Ticket { pending, request }) = ticket else {
            return false;
        };
        let response = self.transport.execute(request);
        self.view.complete(pending, response);
        true
    }
}
