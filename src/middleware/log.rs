use std::sync::Arc;

use tracing::{error, info};

use crate::body::Body;
use crate::handler::Handler;
use crate::method::Method;
use crate::request::Request;

/// Logs every request before handing it to `handler`.
///
/// For `POST` requests the body is read completely, logged as text and put
/// back as a fresh body over the same bytes, so the wrapped handler reads
/// exactly what the client sent. A read failure is logged and the handler
/// still runs, with whatever arrived before the failure.
///
/// Other methods forward the body untouched and unread.
///
/// The query string is logged exactly as received, still URL-encoded and in
/// client order, not decoded and re-sorted.
///
/// Wrap the whole router so misses and unknown methods are logged too:
///
/// ```rust
/// # use usersvc::{Request, Response, Router};
/// # use usersvc::middleware::request_logger;
/// # async fn liveness(_: Request) -> Response { Response::empty() }
/// let app = request_logger(Router::new().route("/", liveness).into_handler());
/// ```
pub fn request_logger(handler: impl Handler) -> impl Handler {
    let inner = handler.into_boxed_handler();
    move |req: Request| {
        let inner = Arc::clone(&inner);
        async move {
            let req = tee_and_log(req).await;
            inner(req).await
        }
    }
}

async fn tee_and_log(mut req: Request) -> Request {
    let mut body = String::new();

    if *req.method() == Method::Post {
        let (bytes, err) = req.take_body().read_partial().await;
        match err {
            Some(e) => error!(error = %e, read = bytes.len(), "failed to read request body"),
            None => body = String::from_utf8_lossy(&bytes).into_owned(),
        }
        req.set_body(Body::from(bytes));
    }

    info!(
        method = %req.method(),
        path = req.path(),
        query = req.query(),
        headers = ?req.headers(),
        body = body.as_str(),
        "request received"
    );

    req
}
