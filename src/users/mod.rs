//! The user resource: create, list and get over one relational table.
//!
//! | Method | Path | Outcome |
//! |---|---|---|
//! | any | `/` | `200`, empty |
//! | `GET` | `/users/` | `200`, JSON array of users |
//! | `GET` | `/users/{uuid}` | `200`, JSON user; `500` if the lookup fails |
//! | `GET` | `/users/{anything else}` | `400` |
//! | `POST` | `/users/...` | `200` empty; `400` bad body; `500` storage failure |
//! | other | `/users/...` | `405` |
//! | any | anything else | `404` |
//!
//! Every request, misses included, passes through the request logger first.

pub mod handlers;
pub mod id;
pub mod model;
pub mod store;

use std::sync::Arc;

use crate::handler::Handler;
use crate::health;
use crate::method::Method;
use crate::middleware::request_logger;
use crate::request::Request;
use crate::router::{MethodRouter, Router};

pub use handlers::Users;
pub use model::User;
pub use store::{SqlUserStore, StoreError, UserStore};

/// Builds the whole app around one shared store: the router behind the
/// request logger.
pub fn routes(store: Arc<dyn UserStore>) -> impl Handler {
    let users = Users::new(store);

    let endpoint = MethodRouter::new()
        .on(Method::Get, {
            let users = users.clone();
            move |req: Request| users.clone().read(req)
        })
        .on(Method::Post, move |req: Request| users.clone().create(req));

    let router = Router::new()
        .route("/", health::liveness)
        .subtree(id::PREFIX, endpoint.into_handler());

    request_logger(router.into_handler())
}
