use std::io::Write;

use anyhow::Result;
use todo_core::{AuthClient, FileStorage, RequestLog, SessionManager, UreqTransport};
use tracing::info;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Command {
    Signup {
        username: String,
        password: String,
        admin: bool,
    },
    Login {
        username: String,
        password: String,
    },
    Logout,
    Whoami,
}

fn manager(globals: &GlobalArgs) -> SessionManager<FileStorage, RequestLog<UreqTransport>> {
    SessionManager::new(
        AuthClient::new(&globals.config.auth_url()),
        RequestLog::new(UreqTransport::new(globals.config.timeout)),
        globals.session_store(),
    )
}

/// Handle a session command
/// # Errors
/// Returns the server's message when signup or login is refused.
pub fn handle(command: Command, globals: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
    let manager = manager(globals);

    match command {
        Command::Signup {
            username,
            password,
            admin,
        } => {
            let user = manager.signup(&username, &password, admin)?;
            info!(username = %user.username, "signed up");
            let role = if user.is_admin() { " (admin)" } else { "" };
            writeln!(out, "Signed up and logged in as {}{role}", user.username)?;
        }
        Command::Login { username, password } => {
            let user = manager.login(&username, &password)?;
            info!(username = %user.username, "logged in");
            writeln!(out, "Logged in as {}", user.username)?;
        }
        Command::Logout => {
            manager.logout();
            writeln!(out, "Logged out")?;
        }
        Command::Whoami => match manager.user().filter(|_| manager.is_authenticated()) {
            Some(user) if user.is_admin() => writeln!(out, "{} (admin)", user.username)?,
            Some(user) => writeln!(out, "{}", user.username)?,
            None => writeln!(out, "Not logged in")?,
        },
    }

    Ok(())
}
