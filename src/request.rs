//! Incoming HTTP request type.

use http::{HeaderMap, Uri};

use crate::body::Body;
use crate::method::Method;

/// An incoming HTTP request.
///
/// The body is a stream that has not been read yet; take it with
/// [`Request::into_body`] or [`Request::take_body`].
pub struct Request {
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Body,
}

impl Request {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Body) -> Self {
        Self { method, uri, headers, body }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// The query component as received, still URL-encoded. Empty when absent.
    pub fn query(&self) -> &str { self.uri.query().unwrap_or("") }

    /// Moves the body out, leaving an empty one in its place.
    pub fn take_body(&mut self) -> Body {
        std::mem::take(&mut self.body)
    }

    /// Replaces the body, e.g. with a buffered copy of the original stream.
    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }

    pub fn into_body(self) -> Body { self.body }
}
