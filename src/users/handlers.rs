use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use super::id::{candidate, extract_id};
use super::model::User;
use super::store::{StoreError, UserStore};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

/// The user endpoints. Cheap to clone: every clone shares one store.
#[derive(Clone)]
pub struct Users {
    store: Arc<dyn UserStore>,
}

impl Users {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// `GET /users/...`: list when the path carries no id, fetch one when it
    /// carries a v4 UUID, `400` when it carries something else.
    pub async fn read(self, req: Request) -> Response {
        // Only the URI outlives the awaits below; `Request` itself is not `Sync`.
        let Request { uri, .. } = req;
        let path = uri.path();
        match (extract_id(path), candidate(path)) {
            (Some(id), _) => self.get(id).await,
            (None, None) => self.list().await,
            (None, Some(bad)) => {
                warn!(id = bad, "malformed user id");
                Response::status(Status::BadRequest)
            }
        }
    }

    /// `POST /users/...`: decode, validate, assign a fresh id and insert.
    pub async fn create(self, req: Request) -> Response {
        info!("create user");

        let body = match req.into_body().read_to_end().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read request body");
                return Response::status(Status::BadRequest);
            }
        };

        let mut user = match User::from_body(&body) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "malformed user body");
                return Response::status(Status::BadRequest);
            }
        };

        if let Err(e) = user.validate() {
            warn!(reason = %e, user = ?user, "invalid user");
            return Response::status(Status::BadRequest);
        }

        user.id = Uuid::new_v4().to_string();

        if let Err(e) = self.store.insert(&user).await {
            error!(error = %e, "failed to insert user");
            return Response::status(Status::InternalServerError);
        }

        info!(id = %user.id, "user created");
        Response::empty()
    }

    async fn list(&self) -> Response {
        info!("list users");

        match self.store.query_all().await {
            Ok(users) => Json(users).into_response(),
            Err(e) => {
                error!(error = %e, "failed to list users");
                Response::status(Status::InternalServerError)
            }
        }
    }

    async fn get(&self, id: &str) -> Response {
        info!(id, "get user");

        match self.store.query_by_id(id).await {
            Ok(user) => Json(user).into_response(),
            // No distinct not-found status: a missing row answers 500 like
            // any other lookup failure.
            Err(StoreError::NotFound) => {
                error!(id, "user not found");
                Response::status(Status::InternalServerError)
            }
            Err(e) => {
                error!(id, error = %e, "failed to get user");
                Response::status(Status::InternalServerError)
            }
        }
    }
}
