use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::HeaderMap;
use usersvc::users::{self, SqlUserStore, StoreError, User, UserStore};
use usersvc::{Body, BoxedHandler, Handler, Method, Request, Response, Status};

async fn app() -> (BoxedHandler, SqlUserStore) {
    let store = SqlUserStore::connect("sqlite::memory:", 1).await.unwrap();
    store.init_schema().await.unwrap();
    (users::routes(Arc::new(store.clone())).into_boxed_handler(), store)
}

fn request(method: Method, uri: &str, body: &'static str) -> Request {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", "application/json".parse().unwrap());
    Request::new(method, uri.parse().unwrap(), headers, Body::from(body))
}

async fn send(app: &BoxedHandler, method: Method, uri: &str, body: &'static str) -> Response {
    app(request(method, uri, body)).await
}

fn decode<T: serde::de::DeserializeOwned>(res: &Response) -> T {
    serde_json::from_slice(res.body()).unwrap()
}

/// A store whose every call fails the way a dropped connection would.
struct BrokenStore;

#[async_trait]
impl UserStore for BrokenStore {
    async fn insert(&self, _user: &User) -> Result<(), StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolClosed))
    }
    async fn query_all(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolClosed))
    }
    async fn query_by_id(&self, _id: &str) -> Result<User, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolClosed))
    }
}

const MISSING_ID: &str = "5d4f3c2b-1a09-4876-a543-210fedcba987";

#[tokio::test]
async fn root_answers_ok_for_every_method() {
    let (router, _) = app().await;
    for method in [
        Method::Get,
        Method::Post,
        Method::Delete,
        Method::Put,
        Method::Head,
        Method::from("BREW"),
    ] {
        let res = send(&router, method.clone(), "/", "").await;
        assert_eq!(res.code(), Status::Ok, "{method}");
        assert!(res.body().is_empty());
    }
}

#[tokio::test]
async fn create_assigns_a_fresh_v4_id() {
    let (router, store) = app().await;

    let res = send(
        &router,
        Method::Post,
        "/users/",
        r#"{"id":"client-chosen","email":"a@b.com","name":"A"}"#,
    )
    .await;
    assert_eq!(res.code(), Status::Ok);
    assert!(res.body().is_empty());

    let res = send(&router, Method::Post, "/users/", r#"{"email":"a@b.com","name":"A"}"#).await;
    assert_eq!(res.code(), Status::Ok);

    let stored = store.query_all().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_ne!(stored[0].id, stored[1].id);
    for user in &stored {
        assert_ne!(user.id, "client-chosen");
        let id = uuid::Uuid::parse_str(&user.id).unwrap();
        assert_eq!(id.get_version_num(), 4);
        assert_eq!((user.email.as_str(), user.name.as_str()), ("a@b.com", "A"));
    }
}

#[tokio::test]
async fn create_ignores_id_in_path() {
    let (router, store) = app().await;
    let uri = format!("/users/{MISSING_ID}");
    let res = send(&router, Method::Post, &uri, r#"{"email":"a@b.com","name":"A"}"#).await;
    assert_eq!(res.code(), Status::Ok);
    let stored = store.query_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_ne!(stored[0].id, MISSING_ID);
}

#[tokio::test]
async fn create_rejects_empty_fields_without_persisting() {
    let (router, store) = app().await;

    for body in [
        r#"{"email":"","name":"A"}"#,
        r#"{"email":"a@b.com","name":""}"#,
        r#"{"email":"a@b.com"}"#,
        "",
        "   ",
    ] {
        let res = send(&router, Method::Post, "/users/", body).await;
        assert_eq!(res.code(), Status::BadRequest, "body {body:?}");
    }

    assert!(store.query_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_malformed_bodies() {
    let (router, store) = app().await;

    for body in ["not json", r#"{"email":"a@b.com","name":"#, r#"{"email":["a"],"name":"A"}"#] {
        let res = send(&router, Method::Post, "/users/", body).await;
        assert_eq!(res.code(), Status::BadRequest, "body {body:?}");
    }

    assert!(store.query_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_starts_as_empty_array() {
    let (router, _) = app().await;
    let res = send(&router, Method::Get, "/users/", "").await;
    assert_eq!(res.code(), Status::Ok);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.body(), b"[]");
}

#[tokio::test]
async fn list_returns_every_created_user() {
    let (router, _) = app().await;
    send(&router, Method::Post, "/users/", r#"{"email":"a@b.com","name":"A"}"#).await;
    send(&router, Method::Post, "/users/", r#"{"email":"c@d.com","name":"C"}"#).await;

    let res = send(&router, Method::Get, "/users/", "").await;
    assert_eq!(res.code(), Status::Ok);

    let mut users: Vec<User> = decode(&res);
    users.sort_by(|a, b| a.email.cmp(&b.email));
    let pairs: Vec<_> = users.iter().map(|u| (u.email.as_str(), u.name.as_str())).collect();
    assert_eq!(pairs, [("a@b.com", "A"), ("c@d.com", "C")]);
    assert!(users.iter().all(|u| !u.id.is_empty()));
}

#[tokio::test]
async fn created_user_can_be_fetched_by_id() {
    let (router, _) = app().await;
    send(&router, Method::Post, "/users/", r#"{"email":"a@b.com","name":"A"}"#).await;

    let listed: Vec<User> = decode(&send(&router, Method::Get, "/users/", "").await);
    let id = &listed[0].id;

    let res = send(&router, Method::Get, &format!("/users/{id}"), "").await;
    assert_eq!(res.code(), Status::Ok);
    let fetched: User = decode(&res);
    assert_eq!(fetched, listed[0]);

    // anything after the id is ignored
    let res = send(&router, Method::Get, &format!("/users/{id}/details?x=1"), "").await;
    assert_eq!(decode::<User>(&res), listed[0]);
}

#[tokio::test]
async fn missing_user_is_a_server_error() {
    let (router, _) = app().await;
    let res = send(&router, Method::Get, &format!("/users/{MISSING_ID}"), "").await;
    assert_eq!(res.code(), Status::InternalServerError);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let (router, _) = app().await;
    for uri in ["/users/42", "/users/not-a-uuid/orders", "/users/5d4f3c2b-1a09-1876-a543-210fedcba987"] {
        let res = send(&router, Method::Get, uri, "").await;
        assert_eq!(res.code(), Status::BadRequest, "{uri}");
    }
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let (router, _) = app().await;
    for (method, uri) in [
        (Method::Delete, "/users/".to_owned()),
        (Method::Put, format!("/users/{MISSING_ID}")),
        (Method::Patch, "/users/x".to_owned()),
        (Method::from("BREW"), "/users/".to_owned()),
    ] {
        let res = send(&router, method.clone(), &uri, "").await;
        assert_eq!(res.code(), Status::MethodNotAllowed, "{method} {uri}");
        assert!(res.body().is_empty());
    }
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let (router, _) = app().await;
    for uri in ["/users", "/health", "/people/"] {
        let res = send(&router, Method::Get, uri, "").await;
        assert_eq!(res.code(), Status::NotFound, "{uri}");
    }
}

#[tokio::test]
async fn storage_failures_are_server_errors() {
    let router = users::routes(Arc::new(BrokenStore)).into_boxed_handler();

    let res = send(&router, Method::Post, "/users/", r#"{"email":"a@b.com","name":"A"}"#).await;
    assert_eq!(res.code(), Status::InternalServerError);

    let res = send(&router, Method::Get, "/users/", "").await;
    assert_eq!(res.code(), Status::InternalServerError);

    let res = send(&router, Method::Get, &format!("/users/{MISSING_ID}"), "").await;
    assert_eq!(res.code(), Status::InternalServerError);

    // validation runs before storage is touched
    let res = send(&router, Method::Post, "/users/", r#"{"email":"","name":"A"}"#).await;
    assert_eq!(res.code(), Status::BadRequest);
}

#[tokio::test]
async fn closed_pool_is_a_server_error() {
    let (router, store) = app().await;
    store.pool().close().await;

    let res = send(&router, Method::Get, "/users/", "").await;
    assert_eq!(res.code(), Status::InternalServerError);
}

/// Collects everything the fmt subscriber writes.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

#[tokio::test]
async fn every_request_is_logged_whatever_the_outcome() {
    let logs = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer({
            let logs = logs.clone();
            move || logs.clone()
        })
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (router, _) = app().await;
    let sent = [
        (Method::from("BREW"), "/", Status::Ok),
        (Method::Get, "/favicon.ico", Status::NotFound),
        (Method::from("BREW"), "/users/", Status::MethodNotAllowed),
        (Method::Get, "/users/42", Status::BadRequest),
    ];
    for (method, uri, status) in &sent {
        let res = send(&router, method.clone(), uri, "").await;
        assert_eq!(res.code(), *status, "{method} {uri}");
    }

    let text = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
    let records: Vec<&str> = text.lines().filter(|l| l.contains("request received")).collect();
    assert_eq!(records.len(), sent.len(), "{text}");
    assert!(records[0].contains("method=BREW"), "{}", records[0]);
    assert!(records[1].contains("/favicon.ico"), "{}", records[1]);
}
