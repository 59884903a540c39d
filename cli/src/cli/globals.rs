use std::env;
use std::path::PathBuf;

use todo_core::{ClientConfig, FileStorage, SessionStore};

const SESSION_FILE_NAME: &str = ".todo-session.json";

/// Settings shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: ClientConfig,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: ClientConfig, session_file: Option<PathBuf>) -> Self {
        Self {
            config,
            session_file: session_file.unwrap_or_else(default_session_file),
        }
    }

    #[must_use]
    pub fn session_store(&self) -> SessionStore<FileStorage> {
        SessionStore::new(FileStorage::new(&self.session_file))
    }
}

/// `$HOME/.todo-session.json`, or the working directory when `HOME` is unset.
#[must_use]
pub fn default_session_file() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SESSION_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_session_file_wins() {
        let globals = GlobalArgs::new(ClientConfig::default(), Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(globals.session_file, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn default_session_file_lives_in_home() {
        temp_env::with_var("HOME", Some("/home/alice"), || {
            assert_eq!(
                default_session_file(),
                PathBuf::from("/home/alice/.todo-session.json")
            );
        });
    }
}
