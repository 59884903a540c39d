use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenBody {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

struct OwnedTodo {
    owner: String,
    todo: Todo,
}

struct Account {
    password: String,
    admin: bool,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    todos: HashMap<Uuid, OwnedTodo>,
}

pub type Db = Arc<RwLock<Store>>;

type Failure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: &str) -> Failure {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Username behind a valid `Authorization: Bearer <token>` header.
pub struct CurrentUser(pub String);

impl FromRequestParts<Db> for CurrentUser {
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, db: &Db) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Missing token"))?;

        let store = db.read().await;
        store
            .tokens
            .get(token)
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }
}

fn issue_token(store: &mut Store, username: &str) -> Json<TokenBody> {
    let token = Uuid::new_v4().simple().to_string();
    store.tokens.insert(token.clone(), username.to_string());
    Json(TokenBody { token })
}

async fn signup(State(db): State<Db>, Json(input): Json<Credentials>) -> Result<Json<TokenBody>, Failure> {
    if input.username.trim().is_empty() || input.password.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Username and password are required"));
    }
    let mut store = db.write().await;
    if store.users.contains_key(&input.username) {
        return Err(failure(StatusCode::CONFLICT, "Username already exists"));
    }
    info!(username = %input.username, admin = input.admin, "user signed up");
    store.users.insert(
        input.username.clone(),
        Account {
            password: input.password,
            admin: input.admin,
        },
    );
    Ok(issue_token(&mut store, &input.username))
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Result<Json<TokenBody>, Failure> {
    let mut store = db.write().await;
    let Some(account) = store
        .users
        .get(&input.username)
        .filter(|account| account.password == input.password)
    else {
        debug!(username = %input.username, "rejected login");
        return Err(failure(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    };
    info!(username = %input.username, admin = account.admin, "user logged in");
    Ok(issue_token(&mut store, &input.username))
}

async fn list_todos(CurrentUser(user): CurrentUser, State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(
        store
            .todos
            .values()
            .filter(|owned| owned.owner == user)
            .map(|owned| owned.todo.clone())
            .collect(),
    )
}

async fn create_todo(
    CurrentUser(user): CurrentUser,
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = Todo {
        id: Uuid::new_v4(),
        title: input.title,
        completed: input.completed,
    };
    db.write().await.todos.insert(
        todo.id,
        OwnedTodo {
            owner: user,
            todo: todo.clone(),
        },
    );
    (StatusCode::CREATED, Json(todo))
}

/// Todos of other users answer 404, never 403.
fn not_found() -> Failure {
    failure(StatusCode::NOT_FOUND, "Todo not found")
}

async fn get_todo(
    CurrentUser(user): CurrentUser,
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, Failure> {
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .filter(|owned| owned.owner == user)
        .map(|owned| Json(owned.todo.clone()))
        .ok_or_else(not_found)
}

async fn update_todo(
    CurrentUser(user): CurrentUser,
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, Failure> {
    let mut store = db.write().await;
    let owned = store
        .todos
        .get_mut(&id)
        .filter(|owned| owned.owner == user)
        .ok_or_else(not_found)?;
    if let Some(title) = input.title {
        owned.todo.title = title;
    }
    if let Some(completed) = input.completed {
        owned.todo.completed = completed;
    }
    Ok(Json(owned.todo.clone()))
}

async fn delete_todo(
    CurrentUser(user): CurrentUser,
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Failure> {
    let mut store = db.write().await;
    if !store.todos.get(&id).is_some_and(|owned| owned.owner == user) {
        return Err(not_found());
    }
    store.todos.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}
