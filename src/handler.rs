//! Handler trait and type erasure.
//!
//! The router, the method table and the middleware all hold handlers of
//! different concrete types side by side, so every handler is erased into a
//! [`BoxedHandler`]: a shared `Fn(Request) -> BoxFuture`.
//!
//! ```text
//! async fn create(req: Request) -> Response { … }   ← written as a plain fn
//!        ↓ MethodRouter::on(Method::Post, create)
//! create.into_boxed_handler()                       ← Handler blanket impl
//!        ↓
//! Arc<dyn Fn(Request) -> BoxFuture>                 ← stored, cloned per lookup
//!        ↓
//! handler(req)                                      ← one indirect call per request
//! ```
//!
//! Closures work too, which is how handlers get at shared state:
//!
//! ```rust
//! # use std::sync::Arc;
//! # use usersvc::{Handler, Request, Response};
//! let greeting = Arc::new(String::from("hi"));
//! let handler = move |_req: Request| {
//!     let greeting = Arc::clone(&greeting);
//!     async move { Response::json(greeting.as_bytes().to_vec()) }
//! };
//! let _boxed = handler.into_boxed_handler();
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
#[doc(hidden)]
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A type-erased handler shared across concurrent requests.
///
/// `#[doc(hidden)] pub` because it is the return type of the public
/// `Handler::into_boxed_handler`.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn Fn(Request) -> BoxFuture + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `Fn(Request) -> impl Future<Output = impl IntoResponse>`.
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler: sealed::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod sealed {
    pub trait Sealed {}
}

impl<F, Fut, R> sealed::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(move |req: Request| -> BoxFuture {
            let fut = self(req);
            Box::pin(async move { fut.await.into_response() })
        })
    }
}
