//! Session-aware client for the todo service.
//!
//! # Overview
//! Two leaves, both usable from any front end:
//! - `SessionManager` logs in, signs up and logs out, keeping the bearer token
//!   and a minimal user profile in an injected `Storage`.
//! - `TodoService` performs CRUD on the todo collection through a transport
//!   stack that attaches the token to every request and, on a 401, clears the
//!   session and sends the user to the login route.
//!
//! # Design
//! - `TodoClient` and `AuthClient` are stateless and sans-IO: `build_*`
//!   produces an `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - I/O sits behind the `Transport` trait. `UreqTransport` is the real one;
//!   tests plug in doubles.
//! - Cross-cutting request behavior lives in `middleware` as explicit
//!   `Transport` decorators.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod service;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthClient;
pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::{ApiError, AuthError, AuthOperation, StorageError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use middleware::{authorized, Authorized, BearerAuth, Navigator, RequestLog, UnauthorizedGuard};
pub use service::TodoService;
pub use session::{SessionManager, SessionStore, TOKEN_KEY, USER_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use transport::UreqTransport;
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo, User};
