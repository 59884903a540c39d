use std::path::PathBuf;
use std::time::Duration;

use crate::cli::actions::{session, todos, Action};
use crate::cli::globals::GlobalArgs;
use anyhow::{bail, Context, Result};
use todo_core::{ClientConfig, TodoId};

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .with_context(|| format!("missing required argument: {name}"))
}

fn id(matches: &clap::ArgMatches) -> Result<TodoId> {
    matches
        .get_one::<TodoId>("id")
        .cloned()
        .context("missing required argument: id")
}

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = matches.get_one::<String>("url") {
        config.base_url.clone_from(url);
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config.timeout = Some(Duration::from_secs(*secs));
    }
    let globals = GlobalArgs::new(config, matches.get_one::<PathBuf>("session-file").cloned());

    let (name, sub) = matches.subcommand().context("missing subcommand")?;

    let session_action = |command: session::Command| -> Result<Action> {
        Ok(Action::Session {
            globals: globals.clone(),
            command,
        })
    };
    let todo_action = |command: todos::Command| -> Result<Action> {
        Ok(Action::Todos {
            globals: globals.clone(),
            command,
        })
    };

    match name {
        "signup" => session_action(session::Command::Signup {
            username: required(sub, "username")?.clone(),
            password: required(sub, "password")?.clone(),
            admin: sub.get_flag("admin"),
        }),
        "login" => session_action(session::Command::Login {
            username: required(sub, "username")?.clone(),
            password: required(sub, "password")?.clone(),
        }),
        "logout" => session_action(session::Command::Logout),
        "whoami" => session_action(session::Command::Whoami),
        "list" => todo_action(todos::Command::List),
        "get" => todo_action(todos::Command::Get { id: id(sub)? }),
        "add" => todo_action(todos::Command::Add {
            title: required(sub, "title")?.clone(),
            completed: sub.get_flag("completed"),
        }),
        "edit" => {
            let title = sub.get_one::<String>("title").cloned();
            let completed = sub.get_one::<bool>("completed").copied();
            if title.is_none() && completed.is_none() {
                bail!("nothing to change: pass --title and/or --completed");
            }
            todo_action(todos::Command::Edit {
                id: id(sub)?,
                title,
                completed,
            })
        }
        "toggle" => todo_action(todos::Command::Toggle { id: id(sub)? }),
        "delete" => todo_action(todos::Command::Delete { id: id(sub)? }),
        other => bail!("unknown command: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    fn dispatch(args: &[&str]) -> Result<Action> {
        let matches = commands::new().try_get_matches_from(args)?;
        handler(&matches)
    }

    #[test]
    fn login_builds_session_action() {
        let action = dispatch(&[
            "todo",
            "login",
            "alice",
            "-p",
            "pw",
            "--url",
            "http://api:9000/",
            "--session-file",
            "/tmp/alice.json",
        ])
        .unwrap();

        match action {
            Action::Session { globals, command } => {
                assert_eq!(globals.config.todos_url(), "http://api:9000/api/todos");
                assert_eq!(globals.session_file, PathBuf::from("/tmp/alice.json"));
                assert!(matches!(
                    command,
                    session::Command::Login { ref username, ref password }
                        if username == "alice" && password == "pw"
                ));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn timeout_is_seconds() {
        let action = dispatch(&["todo", "list", "--timeout", "3"]).unwrap();
        let Action::Todos { globals, command } = action else {
            panic!("expected todos action");
        };
        assert_eq!(globals.config.timeout, Some(Duration::from_secs(3)));
        assert!(matches!(command, todos::Command::List));
    }

    #[test]
    fn timeout_falls_back_to_environment() {
        temp_env::with_vars(
            [
                ("TODO_API_URL", Some("http://env-host:7000")),
                ("TODO_API_TIMEOUT_SECS", Some("9")),
            ],
            || {
                let action = dispatch(&["todo", "whoami"]).unwrap();
                let Action::Session { globals, .. } = action else {
                    panic!("expected session action");
                };
                assert_eq!(globals.config.base_url, "http://env-host:7000");
                assert_eq!(globals.config.timeout, Some(Duration::from_secs(9)));
            },
        );
    }

    #[test]
    fn edit_requires_a_change() {
        let err = dispatch(&["todo", "edit", "4"]).unwrap_err();
        assert!(err.to_string().contains("nothing to change"));

        let action = dispatch(&["todo", "edit", "4", "--title", "Renamed"]).unwrap();
        let Action::Todos { command, .. } = action else {
            panic!("expected todos action");
        };
        assert!(matches!(
            command,
            todos::Command::Edit { id: TodoId::Int(4), title: Some(_), completed: None }
        ));
    }
}
