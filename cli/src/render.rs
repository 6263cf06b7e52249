//! Plain-text rendering of a `ViewState`.

use std::io::{self, Write};

use todo_core::{Todo, ViewState};

/// One line per todo: `[x]   12  text  (user 3)`.
pub fn format_todo(todo: &Todo) -> String {
    let mark = if todo.completed { 'x' } else { ' ' };
    format!("[{mark}] {:>4}  {}  (user {})", todo.id, todo.todo, todo.user_id)
}

pub fn render(view: &ViewState, out: &mut impl Write) -> io::Result<()> {
    if view.todos().is_empty() {
        writeln!(out, "no todos")?;
    }
    for todo in view.todos() {
        writeln!(out, "{}", format_todo(todo))?;
    }
    writeln!(out, "showing {} of {}", view.todos().len(), view.total())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use todo_core::{TodoClient, TodoPage};

    use super::*;

    fn todo(id: i64, completed: bool) -> Todo {
        Todo {
            id,
            todo: format!("item {id}"),
            completed,
            user_id: 2,
        }
    }

    #[test]
    fn completed_todos_are_marked() {
        assert_eq!(format_todo(&todo(7, true)), "[x]    7  item 7  (user 2)");
        assert_eq!(format_todo(&todo(12, false)), "[ ]   12  item 12  (user 2)");
    }

    #[test]
    fn render_lists_snapshot_in_order() {
        let mut view = ViewState::new(TodoClient::new("http://api.test/todos"));
        view.begin_load().unwrap();
        view.finish_load(Ok(TodoPage {
            todos: vec![todo(3, false), todo(1, true)],
            total: 40,
            skip: 0,
            limit: 20,
        }));

        let mut out = Vec::new();
        render(&view, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["[ ]    3  item 3  (user 2)", "[x]    1  item 1  (user 2)", "showing 2 of 40"]);
    }

    #[test]
    fn render_empty_view() {
        let view = ViewState::new(TodoClient::new("http://api.test/todos"));
        let mut out = Vec::new();
        render(&view, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "no todos\nshowing 0 of 0\n");
    }
}
