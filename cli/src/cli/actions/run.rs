use std::io::Write;

use anyhow::Result;

use super::{session, todos, Action};

pub(super) fn execute(action: Action, out: &mut dyn Write) -> Result<()> {
    match action {
        Action::Session { globals, command } => session::handle(command, &globals, out),
        Action::Todos { globals, command } => todos::handle(command, &globals, out),
    }
}
