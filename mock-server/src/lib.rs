use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

/// Users in insertion order plus the next id to hand out.
#[derive(Clone)]
pub struct Db {
    users: Arc<RwLock<Vec<User>>>,
    next_id: Arc<AtomicU64>,
}

impl Db {
    /// Seeds the store. A seed holding `u64::MAX` pins the sequence there.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .map(|u| u.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self {
            users: Arc::new(RwLock::new(users)),
            next_id: Arc::new(AtomicU64::new(next_id)),
        }
    }
}

pub fn app() -> Router {
    app_with_users(Vec::new())
}

/// Router whose store starts with `users`; new ids continue after the largest.
pub fn app_with_users(users: Vec<User>) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .with_state(Db::with_users(users))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_users(listener: TcpListener, users: Vec<User>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_users(users)).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.users.read().await.clone())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<UserInput>,
) -> (StatusCode, Json<User>) {
    let user = User {
        id: db.next_id.fetch_add(1, Ordering::Relaxed),
        name: input.name,
        email: input.email,
    };
    debug!(id = user.id, "created user");
    db.users.write().await.push(user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UserInput>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.users.write().await;
    let user = users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    user.name = input.name;
    user.email = input.email;
    debug!(id, "updated user");
    Ok(Json(user.clone()))
}

/// Answers 200 with an empty object, like the public mock API.
async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut users = db.users.write().await;
    let index = users
        .iter()
        .position(|u| u.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    users.remove(index);
    debug!(id, "deleted user");
    Ok(Json(serde_json::json!({})))
}
