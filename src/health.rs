//! Liveness probe.
//!
//! `/` answers `200 OK` with an empty body for every method. If the process
//! can respond to HTTP at all it is alive, so the handler has no
//! dependencies: it never touches the database.

use crate::{Request, Response};

/// Liveness probe handler. Always `200 OK`, no body.
pub async fn liveness(_req: Request) -> Response {
    Response::empty()
}
