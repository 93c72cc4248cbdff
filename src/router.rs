//! Request routing.
//!
//! Two levels. [`Router`] maps a path to a handler through a radix tree,
//! O(path-length) lookup, `404` on a miss. [`MethodRouter`] sits behind a path
//! and picks the handler for the request method, `405` when there is none.
//! Middleware wraps whichever level it should observe.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::info;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Catch-all segment name for everything below a [`Router::subtree`] prefix.
const REST: &str = "rest";

/// The application router.
///
/// Build it once at startup, turn it into a handler with
/// [`into_handler`](Router::into_handler) and pass that to
/// [`Server::serve`](crate::Server::serve), usually behind middleware.
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    tree: MatchitRouter<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { tree: MatchitRouter::new() }
    }

    /// Register a handler for exactly `path`, whatever the method.
    ///
    /// # Panics
    ///
    /// Panics if the path is malformed or conflicts with an existing route.
    pub fn route(self, path: &str, handler: impl Handler) -> Self {
        self.insert(path, handler.into_boxed_handler())
    }

    /// Register a handler for `prefix` and every path below it.
    ///
    /// `prefix` must end in `/`. The handler sees the full path.
    ///
    /// ```rust
    /// # use usersvc::{Request, Response, Router};
    /// # async fn users(_: Request) -> Response { Response::empty() }
    /// // matches "/users/", "/users/42", "/users/42/anything"
    /// Router::new().subtree("/users/", users);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `prefix` does not end in `/` or conflicts with an existing route.
    pub fn subtree(self, prefix: &str, handler: impl Handler) -> Self {
        assert!(prefix.ends_with('/'), "subtree prefix `{prefix}` must end in `/`");
        let handler = handler.into_boxed_handler();
        let below = format!("{prefix}{{*{REST}}}");
        self.insert(prefix, Arc::clone(&handler)).insert(&below, handler)
    }

    fn insert(mut self, path: &str, handler: BoxedHandler) -> Self {
        self.tree
            .insert(path, handler)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    fn lookup(&self, path: &str) -> Option<BoxedHandler> {
        self.tree.at(path).ok().map(|matched| Arc::clone(matched.value))
    }

    /// Routes one request and produces one response.
    pub async fn handle(&self, req: Request) -> Response {
        let Some(handler) = self.lookup(req.path()) else {
            info!(method = %req.method(), path = req.path(), "no route");
            return Response::status(Status::NotFound);
        };
        handler(req).await
    }

    /// Turns the router into a handler, so middleware can wrap every
    /// request it sees, misses included.
    pub fn into_handler(self) -> impl Handler {
        let router = Arc::new(self);
        move |req: Request| {
            let router = Arc::clone(&router);
            async move { router.handle(req).await }
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// Per-method dispatch behind a single path.
///
/// ```rust
/// # use usersvc::{Method, MethodRouter, Request, Response, Router};
/// # async fn list(_: Request) -> Response { Response::empty() }
/// # async fn create(_: Request) -> Response { Response::empty() }
/// let users = MethodRouter::new()
///     .on(Method::Get,  list)
///     .on(Method::Post, create);
///
/// Router::new().subtree("/users/", users.into_handler());
/// ```
pub struct MethodRouter {
    handlers: HashMap<Method, BoxedHandler>,
}

impl MethodRouter {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Register `handler` for `method`. A later registration for the same
    /// method replaces the earlier one.
    pub fn on(mut self, method: Method, handler: impl Handler) -> Self {
        self.handlers.insert(method, handler.into_boxed_handler());
        self
    }

    /// Turns the table into a handler that answers `405` for any method
    /// without an entry.
    pub fn into_handler(self) -> impl Handler {
        let table = Arc::new(self);
        move |req: Request| {
            let table = Arc::clone(&table);
            async move { table.dispatch(req).await }
        }
    }

    async fn dispatch(&self, req: Request) -> Response {
        match self.handlers.get(req.method()) {
            Some(handler) => handler(req).await,
            None => {
                info!(method = %req.method(), path = req.path(), "method not allowed");
                Response::status(Status::MethodNotAllowed)
            }
        }
    }
}

impl Default for MethodRouter {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    fn request(method: Method, uri: &'static str) -> Request {
        Request::new(method, http::Uri::from_static(uri), http::HeaderMap::new(), Body::empty())
    }

    async fn echo_path(req: Request) -> Response {
        Response::json(req.path().to_owned())
    }

    #[tokio::test]
    async fn subtree_matches_prefix_and_everything_below() {
        let router = Router::new().subtree("/users/", echo_path);

        let res = router.handle(request(Method::Get, "/users/")).await;
        assert_eq!(res.code(), Status::Ok);
        assert_eq!(res.body(), b"/users/");

        let res = router.handle(request(Method::Get, "/users/abc/def")).await;
        assert_eq!(res.body(), b"/users/abc/def");

        let res = router.handle(request(Method::Get, "/users")).await;
        assert_eq!(res.code(), Status::NotFound);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let router = Router::new().route("/", echo_path);
        let res = router.handle(request(Method::Get, "/nope")).await;
        assert_eq!(res.code(), Status::NotFound);
    }

    #[tokio::test]
    async fn method_router_rejects_unregistered_methods() {
        let router = Router::new()
            .subtree("/users/", MethodRouter::new().on(Method::Get, echo_path).into_handler());

        let res = router.handle(request(Method::Get, "/users/x")).await;
        assert_eq!(res.code(), Status::Ok);

        for method in [Method::Delete, Method::from("BREW")] {
            let res = router.handle(request(method, "/users/x")).await;
            assert_eq!(res.code(), Status::MethodNotAllowed);
            assert!(res.body().is_empty());
        }
    }

    #[tokio::test]
    async fn router_as_handler_answers_misses() {
        let handler = Router::new().route("/", echo_path).into_handler().into_boxed_handler();

        assert_eq!(handler(request(Method::Get, "/")).await.code(), Status::Ok);
        assert_eq!(handler(request(Method::Get, "/nope")).await.code(), Status::NotFound);
    }

    #[test]
    #[should_panic(expected = "must end in `/`")]
    fn subtree_prefix_needs_trailing_slash() {
        let _ = Router::new().subtree("/users", echo_path);
    }
}
