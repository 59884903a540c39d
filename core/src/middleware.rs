//! Transport decorators applied to every todo request.
//!
//! # Design
//! Each decorator wraps an inner `Transport` and is itself a `Transport`, so
//! the stack is an ordinary value built once and handed to `TodoService`:
//!
//! ```text
//! UnauthorizedGuard -> BearerAuth -> RequestLog -> base transport
//! ```
//!
//! Requests flow left to right, responses right to left. Because the guard is
//! outermost it sees every response, whichever operation sent the request.

use tracing::{debug, error, warn};

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::session::{token_preview, SessionStore};
use crate::storage::Storage;

/// Where to send the user once their session is gone.
pub trait Navigator {
    fn navigate(&self, route: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, route: &str) {
        self(route)
    }
}

/// Logs each request and its outcome.
pub struct RequestLog<T> {
    inner: T,
}

impl<T> RequestLog<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Transport> Transport for RequestLog<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method;
        let path = request.path.clone();
        debug!(%method, %path, has_token = request.header("authorization").is_some(), "sending request");

        match self.inner.execute(request) {
            Ok(response) => {
                if response.is_success() {
                    debug!(%method, %path, status = response.status, "request succeeded");
                } else {
                    match response.status {
                        404 => warn!(%method, %path, "todo not found or access denied"),
                        403 => warn!(%method, %path, "access denied"),
                        status => warn!(%method, %path, status, "request failed"),
                    }
                }
                Ok(response)
            }
            Err(e) => {
                error!(%method, %path, "network error, server may be down: {e}");
                Err(e)
            }
        }
    }
}

/// Adds `Authorization: Bearer <token>` from the session store.
///
/// The token is read per request, so a login or logout takes effect on the
/// next call. Without a token the request goes out unchanged.
pub struct BearerAuth<T, S> {
    inner: T,
    session: SessionStore<S>,
}

impl<T, S> BearerAuth<T, S> {
    pub fn new(inner: T, session: SessionStore<S>) -> Self {
        Self { inner, session }
    }
}

impl<T: Transport, S: Storage> Transport for BearerAuth<T, S> {
    fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, TransportError> {
        match self.session.token() {
            Some(token) => {
                debug!(token = %token_preview(&token), "attaching bearer token");
                request
                    .headers
                    .retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
                request
                    .headers
                    .push(("authorization".to_string(), format!("Bearer {token}")));
            }
            None => warn!(path = %request.path, "no token found for request"),
        }
        self.inner.execute(request)
    }
}

/// Clears the session and navigates to the login route on any 401.
///
/// The response itself is still returned so the caller's parse step reports
/// `ApiError::Unauthorized`.
pub struct UnauthorizedGuard<T, S, N> {
    inner: T,
    session: SessionStore<S>,
    navigator: N,
    login_route: String,
}

impl<T, S, N> UnauthorizedGuard<T, S, N> {
    pub fn new(inner: T, session: SessionStore<S>, navigator: N, login_route: &str) -> Self {
        Self {
            inner,
            session,
            navigator,
            login_route: login_route.to_string(),
        }
    }
}

impl<T: Transport, S: Storage, N: Navigator> Transport for UnauthorizedGuard<T, S, N> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self.inner.execute(request)?;
        if response.status == 401 {
            warn!("token expired or invalid, logging out");
            self.session.clear();
            self.navigator.navigate(&self.login_route);
        }
        Ok(response)
    }
}

/// The full stack used for todo requests.
pub type Authorized<T, S, N> = UnauthorizedGuard<BearerAuth<RequestLog<T>, S>, S, N>;

/// Wrap `transport` in logging, bearer auth and the 401 guard.
pub fn authorized<T, S, N>(transport: T, session: SessionStore<S>, navigator: N, login_route: &str) -> Authorized<T, S, N> {
    UnauthorizedGuard::new(
        BearerAuth::new(RequestLog::new(transport), session.clone()),
        session,
        navigator,
        login_route,
    )
}
