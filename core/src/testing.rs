//! Transport doubles shared by unit tests.

use std::cell::RefCell;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Answers every request with the same canned result and records requests.
pub(crate) struct Canned {
    result: Result<HttpResponse, TransportError>,
    pub(crate) seen: RefCell<Vec<HttpRequest>>,
}

impl Canned {
    pub(crate) fn status(status: u16, body: &str) -> Self {
        Self {
            result: Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            result: Err(TransportError("connection refused".to_string())),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.seen.borrow().last().cloned().expect("no request was sent")
    }

    pub(crate) fn count(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl Transport for Canned {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request);
        self.result.clone()
    }
}
