//! # usersvc
//!
//! A small HTTP service over a single "user" resource: create, list and get,
//! backed by one relational table.
//!
//! ## Layout
//!
//! The HTTP plumbing is a thin layer over hyper:
//!
//! - [`Server`]: tokio accept loop, one task per connection, graceful shutdown
//! - [`Router`]: radix-tree path lookup via [`matchit`], `404` on a miss
//! - [`MethodRouter`]: per-method dispatch behind a path, `405` on a miss
//! - [`middleware::request_logger`]: one structured log record per request
//!
//! The resource itself lives in [`users`]: identifier extraction, the
//! [`users::UserStore`] collaborator and the three handlers.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use usersvc::{Config, Server, users};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), usersvc::Error> {
//!     let config = Config::from_env()?;
//!     let store = users::SqlUserStore::connect(&config.database_url, config.max_connections).await?;
//!     store.init_schema().await?;
//!
//!     Server::bind(config.socket_addr())
//!         .await?
//!         .serve(users::routes(Arc::new(store)))
//!         .await
//! }
//! ```

mod body;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod middleware;
pub mod users;

pub use body::{Body, BoxError};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
#[doc(hidden)]
pub use handler::BoxedHandler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::{MethodRouter, Router};
pub use server::Server;
pub use status::Status;
