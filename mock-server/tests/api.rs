use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, ErrorBody, Todo, TokenBody};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(String::new()).unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn signup(app: &Router, username: &str) -> String {
    let body = format!(r#"{{"username":"{username}","password":"pw","admin":false}}"#);
    let resp = send(app, json_request("POST", "/api/auth/signup", None, &body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json::<TokenBody>(resp).await.token
}

// --- auth ---

#[tokio::test]
async fn signup_then_login_issue_tokens() {
    let app = app();
    let first = signup(&app, "alice").await;
    assert!(!first.is_empty());

    let resp = send(
        &app,
        json_request("POST", "/api/auth/login", None, r#"{"username":"alice","password":"pw"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second: TokenBody = body_json(resp).await;
    assert_ne!(first, second.token);
}

#[tokio::test]
async fn duplicate_signup_is_conflict() {
    let app = app();
    signup(&app, "alice").await;
    let resp = send(
        &app,
        json_request("POST", "/api/auth/signup", None, r#"{"username":"alice","password":"x"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let err: ErrorBody = body_json(resp).await;
    assert_eq!(err.error, "Username already exists");
}

#[tokio::test]
async fn blank_signup_is_bad_request() {
    let app = app();
    let resp = send(
        &app,
        json_request("POST", "/api/auth/signup", None, r#"{"username":" ","password":""}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app();
    signup(&app, "alice").await;
    let resp = send(
        &app,
        json_request("POST", "/api/auth/login", None, r#"{"username":"alice","password":"nope"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err: ErrorBody = body_json(resp).await;
    assert_eq!(err.error, "Invalid credentials");
}

// --- bearer protection ---

#[tokio::test]
async fn todos_require_token() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/api/todos", None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(&app, empty_request("GET", "/api/todos", Some("bogus"))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_todos_empty() {
    let app = app();
    let token = signup(&app, "alice").await;
    let resp = send(&app, empty_request("GET", "/api/todos", Some(&token))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201() {
    let app = app();
    let token = signup(&app, "alice").await;
    let resp = send(
        &app,
        json_request("POST", "/api/todos", Some(&token), r#"{"title":"Buy milk"}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let app = app();
    let token = signup(&app, "alice").await;
    let resp = send(
        &app,
        json_request("POST", "/api/todos", Some(&token), r#"{"not_title":1}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get / update / delete ---

#[tokio::test]
async fn get_todo_not_found() {
    let app = app();
    let token = signup(&app, "alice").await;
    let resp = send(
        &app,
        empty_request(
            "GET",
            "/api/todos/00000000-0000-0000-0000-000000000000",
            Some(&token),
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_todo_bad_uuid_returns_400() {
    let app = app();
    let token = signup(&app, "alice").await;
    let resp = send(&app, empty_request("GET", "/api/todos/not-a-uuid", Some(&token))).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_users_todos_are_masked_as_not_found() {
    let app = app();
    let alice = signup(&app, "alice").await;
    let mallory = signup(&app, "mallory").await;

    let resp = send(
        &app,
        json_request("POST", "/api/todos", Some(&alice), r#"{"title":"private"}"#),
    )
    .await;
    let todo: Todo = body_json(resp).await;
    let uri = format!("/api/todos/{}", todo.id);

    let resp = send(&app, empty_request("GET", &uri, Some(&mallory))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, json_request("PUT", &uri, Some(&mallory), r#"{"title":"x"}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, empty_request("DELETE", &uri, Some(&mallory))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, empty_request("GET", "/api/todos", Some(&mallory))).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());

    let resp = send(&app, empty_request("GET", &uri, Some(&alice))).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = app();
    let token = signup(&app, "alice").await;
    let token = Some(token.as_str());

    // create
    let resp = send(&app, json_request("POST", "/api/todos", token, r#"{"title":"Walk dog"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    let id = created.id;
    let uri = format!("/api/todos/{id}");

    // list contains the one todo
    let resp = send(&app, empty_request("GET", "/api/todos", token)).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, id);

    // partial update keeps the title
    let resp = send(&app, json_request("PUT", &uri, token, r#"{"completed":true}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Walk dog");
    assert!(updated.completed);

    // delete, then gone
    let resp = send(&app, empty_request("DELETE", &uri, token)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, empty_request("GET", &uri, token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, empty_request("DELETE", &uri, token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
