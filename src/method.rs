//! HTTP method as a typed enum.
//!
//! Covers the RFC 9110 standard methods. Any other token is carried verbatim
//! as [`Method::Extension`] and routed like every other request; it is the
//! route's business whether to answer it.

use std::fmt;

/// An HTTP request method.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    /// A token outside RFC 9110, e.g. `PURGE`.
    Extension(Box<str>),
}

impl Method {
    /// Returns the wire representation (e.g. `"GET"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect => "CONNECT",
            Self::Delete  => "DELETE",
            Self::Get     => "GET",
            Self::Head    => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch   => "PATCH",
            Self::Post    => "POST",
            Self::Put     => "PUT",
            Self::Trace   => "TRACE",
            Self::Extension(token) => token,
        }
    }
}

/// Case-sensitive per RFC 9110 §9.1: `"post"` is an extension token, not `POST`.
impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s {
            "CONNECT" => Self::Connect,
            "DELETE"  => Self::Delete,
            "GET"     => Self::Get,
            "HEAD"    => Self::Head,
            "OPTIONS" => Self::Options,
            "PATCH"   => Self::Patch,
            "POST"    => Self::Post,
            "PUT"     => Self::Put,
            "TRACE"   => Self::Trace,
            other     => Self::Extension(other.into()),
        }
    }
}

impl From<&http::Method> for Method {
    fn from(m: &http::Method) -> Self {
        Self::from(m.as_str())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
