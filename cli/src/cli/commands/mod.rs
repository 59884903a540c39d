use std::path::PathBuf;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};
use todo_core::{config::DEFAULT_BASE_URL, TodoId};

fn id_arg() -> Arg {
    Arg::new("id")
        .help("Todo id as returned by the server")
        .required(true)
        .value_parser(|s: &str| s.parse::<TodoId>())
}

fn username_arg() -> Arg {
    Arg::new("username").help("Account name").required(true)
}

fn password_arg() -> Arg {
    Arg::new("password")
        .short('p')
        .long("password")
        .help("Account password")
        .env("TODO_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("todo")
        .about("Manage your todo list")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .help("API server base URL")
                .default_value(DEFAULT_BASE_URL)
                .env("TODO_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Per-request timeout in seconds")
                .env("TODO_API_TIMEOUT_SECS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("session-file")
                .long("session-file")
                .help("Where the session token is kept (default: ~/.todo-session.json)")
                .env("TODO_SESSION_FILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("signup")
                .about("Create an account and log in")
                .arg(username_arg())
                .arg(password_arg())
                .arg(
                    Arg::new("admin")
                        .long("admin")
                        .help("Request an admin account")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and store the session")
                .arg(username_arg())
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(Command::new("list").about("List your todos"))
        .subcommand(Command::new("get").about("Show one todo").arg(id_arg()))
        .subcommand(
            Command::new("add")
                .about("Add a todo")
                .arg(Arg::new("title").help("What needs doing").required(true))
                .arg(
                    Arg::new("completed")
                        .long("completed")
                        .help("Mark it done right away")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Change the title or completion of a todo")
                .arg(id_arg())
                .arg(Arg::new("title").long("title").help("New title"))
                .arg(
                    Arg::new("completed")
                        .long("completed")
                        .help("New completion state")
                        .value_parser(clap::value_parser!(bool)),
                ),
        )
        .subcommand(
            Command::new("toggle")
                .about("Flip the completion state of a todo")
                .arg(id_arg()),
        )
        .subcommand(Command::new("delete").about("Delete a todo").arg(id_arg()))
}
