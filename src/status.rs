//! HTTP status codes as a typed enum.
//!
//! Only the codes usersvc actually answers with are listed. Use [`Status`]
//! anywhere a status code is accepted: `Response::status()` or as a bare
//! handler return value.
//!
//! ```rust
//! use usersvc::{Request, Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::BadRequest);
//!
//! // return Status directly from a handler, usersvc wraps it
//! async fn not_here(_req: Request) -> Status {
//!     Status::MethodNotAllowed
//! }
//! ```

/// The HTTP status codes produced by the service.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        match s {
            Status::Ok                  => http::StatusCode::OK,
            Status::BadRequest          => http::StatusCode::BAD_REQUEST,
            Status::NotFound            => http::StatusCode::NOT_FOUND,
            Status::MethodNotAllowed    => http::StatusCode::METHOD_NOT_ALLOWED,
            Status::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
