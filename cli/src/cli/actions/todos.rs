use std::io::Write;

use anyhow::{bail, Result};
use todo_core::{authorized, CreateTodo, Todo, TodoClient, TodoId, TodoService, UpdateTodo, UreqTransport};
use tracing::warn;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Command {
    List,
    Get {
        id: TodoId,
    },
    Add {
        title: String,
        completed: bool,
    },
    Edit {
        id: TodoId,
        title: Option<String>,
        completed: Option<bool>,
    },
    Toggle {
        id: TodoId,
    },
    Delete {
        id: TodoId,
    },
}

fn expired_session(route: &str) {
    warn!(route, "session cleared after unauthorized response");
    eprintln!("Your session has expired. Run `todo login` to sign in again.");
}

fn render(todo: &Todo) -> String {
    let mark = if todo.completed { "x" } else { " " };
    format!("[{mark}] {}  {}", todo.id, todo.title)
}

/// Handle a todo command
/// # Errors
/// Returns an error when not logged in or when the request fails.
pub fn handle(command: Command, globals: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
    let store = globals.session_store();
    if !store.is_authenticated() {
        bail!("not logged in: run `todo login` or `todo signup` first");
    }

    let service = TodoService::new(
        TodoClient::new(&globals.config.todos_url()),
        authorized(
            UreqTransport::new(globals.config.timeout),
            store,
            expired_session,
            &globals.config.login_route,
        ),
    );

    match command {
        Command::List => {
            let todos = service.list()?;
            if todos.is_empty() {
                writeln!(out, "No todos yet")?;
            }
            for todo in &todos {
                writeln!(out, "{}", render(todo))?;
            }
        }
        Command::Get { id } => writeln!(out, "{}", render(&service.get(&id)?))?,
        Command::Add { title, completed } => {
            let todo = service.create(&CreateTodo { title, completed })?;
            writeln!(out, "{}", render(&todo))?;
        }
        Command::Edit {
            id,
            title,
            completed,
        } => {
            let todo = service.update(&id, &UpdateTodo { title, completed })?;
            writeln!(out, "{}", render(&todo))?;
        }
        Command::Toggle { id } => writeln!(out, "{}", render(&service.toggle(&id)?))?,
        Command::Delete { id } => {
            service.delete(&id)?;
            writeln!(out, "Deleted {id}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_marks_completion() {
        let mut todo = Todo {
            id: TodoId::Int(3),
            title: "Water plants".to_string(),
            completed: false,
        };
        assert_eq!(render(&todo), "[ ] 3  Water plants");
        todo.completed = true;
        assert_eq!(render(&todo), "[x] 3  Water plants");
    }
}
