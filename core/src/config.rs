//! Endpoint and transport settings.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the API server.
    pub base_url: String,
    pub auth_path: String,
    pub todos_path: String,
    /// Route handed to the `Navigator` after a 401.
    pub login_route: String,
    /// Global per-request timeout. `None` waits indefinitely.
    #[serde(with = "seconds")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_path: "/api/auth".to_string(),
            todos_path: "/api/todos".to_string(),
            login_route: "/login".to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `TODO_API_URL` and `TODO_API_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("TODO_API_URL") {
            config.base_url = url;
        }
        if let Ok(secs) = env::var("TODO_API_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(e) => warn!("ignoring TODO_API_TIMEOUT_SECS={secs}: {e}"),
            }
        }
        config
    }

    pub fn auth_url(&self) -> String {
        join(&self.base_url, &self.auth_path)
    }

    pub fn todos_url(&self) -> String {
        join(&self.base_url, &self.todos_path)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
