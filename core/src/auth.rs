//! Request builder and response parser for the authentication endpoints.
//!
//! Same split as `TodoClient`: `build_*` produces an `HttpRequest`,
//! `parse_token` turns the `HttpResponse` into the issued token or an
//! `AuthError` carrying the message the caller should show.

use crate::client::json_request;
use crate::error::{ApiError, AuthError, AuthOperation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorBody, LoginRequest, SignupRequest, TokenResponse};

#[derive(Debug, Clone)]
pub struct AuthClient {
    endpoint: String,
}

impl AuthClient {
    /// `endpoint` is the auth base URL, e.g. `http://localhost:8080/api/auth`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_login(&self, input: &LoginRequest) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/login", self.endpoint), input)
    }

    pub fn build_signup(&self, input: &SignupRequest) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/signup", self.endpoint), input)
    }

    /// Extract the token from a login or signup response.
    ///
    /// A 2xx answer without a non-empty token is `NoToken`. A failed answer
    /// yields the server's `error` message when there is one, otherwise the
    /// generic fallback for `operation`.
    pub fn parse_token(&self, operation: AuthOperation, response: HttpResponse) -> Result<String, AuthError> {
        if !response.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty());
            return Err(match message {
                Some(message) => AuthError::Rejected(message),
                None => AuthError::Failed(operation),
            });
        }

        let body: TokenResponse =
            serde_json::from_str(&response.body).map_err(|_| AuthError::Failed(operation))?;
        body.token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::NoToken)
    }
}
