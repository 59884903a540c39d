pub mod session;
pub mod todos;

// Internal "interpreter" for `Action`.
mod run;

use std::io::Write;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Session {
        globals: GlobalArgs,
        command: session::Command,
    },
    Todos {
        globals: GlobalArgs,
        command: todos::Command,
    },
}

impl Action {
    /// Execute the action, printing results to stdout.
    /// # Errors
    /// Returns an error if the action fails.
    pub fn execute(self) -> anyhow::Result<()> {
        run::execute(self, &mut std::io::stdout().lock())
    }

    /// Execute the action, printing results to `out`.
    /// # Errors
    /// Returns an error if the action fails.
    pub fn execute_with(self, out: &mut dyn Write) -> anyhow::Result<()> {
        run::execute(self, out)
    }
}
