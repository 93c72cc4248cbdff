//! Middleware layer.
//!
//! Middleware wraps a [`Handler`](crate::Handler) and returns another one, so
//! it can sit in front of a single route, a [`MethodRouter`](crate::MethodRouter),
//! or anything else that is a handler.
//!
//! - [`request_logger`]: one structured log record per request, with the
//!   body of `POST` requests teed into the record.

mod log;

pub use log::request_logger;
