//! Session state: the bearer token and the cached user profile.
//!
//! # Design
//! `SessionStore` keeps nothing in memory; every accessor goes straight to the
//! injected `Storage` under two fixed keys. It is cheap to clone (the storage
//! sits behind an `Arc`) so the middleware stack and the `SessionManager` can
//! share one store.
//!
//! `SessionManager` adds the network half: login and signup exchange
//! credentials for a token and persist the new session.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::auth::AuthClient;
use crate::error::{AuthError, AuthOperation, StorageError};
use crate::http::{HttpRequest, Transport};
use crate::storage::Storage;
use crate::types::{LoginRequest, SignupRequest, User};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "jwt_token";

/// Storage key of the JSON-encoded `User`.
pub const USER_KEY: &str = "user_data";

const PREVIEW_CHARS: usize = 20;

/// Shortened token for log output. The full token never reaches the logs.
pub fn token_preview(token: &str) -> String {
    let mut chars = token.chars();
    let preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}

pub struct SessionStore<S> {
    storage: Arc<S>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::from_arc(Arc::new(storage))
    }

    pub fn from_arc(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current token, if any. Unreadable storage counts as no token.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("failed to read token: {e}");
                None
            }
        }
    }

    /// Cached user profile.
    ///
    /// A record that does not parse is removed so the corruption does not
    /// persist, and `None` is returned.
    pub fn user(&self) -> Option<User> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                debug!("no user data found in storage");
                return None;
            }
            Err(e) => {
                warn!("failed to read user data: {e}");
                return None;
            }
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                error!("error parsing user data, clearing it: {e}");
                if let Err(e) = self.storage.remove(USER_KEY) {
                    warn!("failed to clear corrupted user data: {e}");
                }
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a new session, overwriting the previous one. The token is
    /// written first.
    pub fn save(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &user_json)?;
        Ok(())
    }

    /// Remove both keys. Never fails; storage trouble is only logged.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("failed to remove {key}: {e}");
            }
        }
    }
}

/// Login, signup and logout on top of a `SessionStore`.
pub struct SessionManager<S, T> {
    auth: AuthClient,
    transport: T,
    store: SessionStore<S>,
}

impl<S: Storage, T: Transport> SessionManager<S, T> {
    pub fn new(auth: AuthClient, transport: T, store: SessionStore<S>) -> Self {
        Self {
            auth,
            transport,
            store,
        }
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let request = self
            .auth
            .build_login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .map_err(|_| AuthError::Failed(AuthOperation::Login))?;
        let user = User {
            username: username.to_string(),
            admin: None,
        };
        self.authenticate(AuthOperation::Login, request, user)
    }

    pub fn signup(&self, username: &str, password: &str, admin: bool) -> Result<User, AuthError> {
        let request = self
            .auth
            .build_signup(&SignupRequest {
                username: username.to_string(),
                password: password.to_string(),
                admin,
            })
            .map_err(|_| AuthError::Failed(AuthOperation::Signup))?;
        let user = User {
            username: username.to_string(),
            admin: Some(admin),
        };
        self.authenticate(AuthOperation::Signup, request, user)
    }

    /// Purely local: no request is sent.
    pub fn logout(&self) {
        debug!("logging out");
        self.store.clear();
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn user(&self) -> Option<User> {
        self.store.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    fn authenticate(&self, operation: AuthOperation, request: HttpRequest, user: User) -> Result<User, AuthError> {
        let response = self.transport.execute(request).map_err(|e| {
            error!("{operation} error: {e}");
            AuthError::Failed(operation)
        })?;
        debug!(status = response.status, "{operation} response");

        let token = self.auth.parse_token(operation, response).inspect_err(|e| {
            warn!("{operation} rejected: {e}");
        })?;

        self.store.save(&token, &user)?;
        debug!(token = %token_preview(&token), username = %user.username, "session stored");
        Ok(user)
    }
}
