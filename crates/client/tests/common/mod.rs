//! In-process fake of the movie tracker backend.
//!
//! Serves the `/movies` and `/users` endpoints from memory on an
//! ephemeral port and records every request body it receives, so tests can
//! assert on the exact wire format the client produced.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Form, Json, Router};
use movietrack_core::movie::{Movie, MovieRequest};

pub const VALID_USERNAME: &str = "alice";
pub const VALID_PASSWORD: &str = "secret";
pub const ISSUED_TOKEN: &str = "header.payload.signature";

/// A request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Default)]
pub struct FakeState {
    pub movies: Vec<Movie>,
    pub max_id: i64,
    pub requests: Vec<Recorded>,
    /// When set, every `/movies` request answers with this status.
    pub fail_with: Option<u16>,
    /// When set, `GET /movies` and `POST /movies` answer 2xx with this body.
    pub reply_with: Option<serde_json::Value>,
    /// Usernames registered through `POST /users/signup`.
    pub usernames: Vec<String>,
    /// `Authorization` headers seen by `POST /users/logout`.
    pub logouts: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn seed(&self, movies: Vec<Movie>) {
        let mut state = self.state.lock().unwrap();
        state.max_id = movies.iter().map(|m| m.id).max().unwrap_or(0);
        state.movies = movies;
    }

    pub fn fail_with(&self, status: u16) {
        self.state.lock().unwrap().fail_with = Some(status);
    }

    /// Answer list and create with `body` regardless of stored movies.
    pub fn reply_with(&self, body: serde_json::Value) {
        self.state.lock().unwrap().reply_with = Some(body);
    }

    pub fn usernames(&self) -> Vec<String> {
        self.state.lock().unwrap().usernames.clone()
    }

    pub fn logouts(&self) -> Vec<String> {
        self.state.lock().unwrap().logouts.clone()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.state.lock().unwrap().movies.clone()
    }

    fn record(&self, method: &'static str, path: String, body: Option<serde_json::Value>) -> Option<u16> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(Recorded { method, path, body });
        state.fail_with
    }
}

fn failure(status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "detail": "injected failure" }))).into_response()
}

fn not_found(id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "detail": format!("The movie with ID={id} is not found.") })),
    )
        .into_response()
}

async fn list_movies(State(fake): State<FakeBackend>) -> Response {
    if let Some(status) = fake.record("GET", "/movies".into(), None) {
        return failure(status);
    }
    if let Some(body) = fake.state.lock().unwrap().reply_with.clone() {
        return Json(body).into_response();
    }
    Json(fake.movies()).into_response()
}

async fn create_movie(State(fake): State<FakeBackend>, Json(body): Json<serde_json::Value>) -> Response {
    if let Some(status) = fake.record("POST", "/movies".into(), Some(body.clone())) {
        return failure(status);
    }
    if let Some(reply) = fake.state.lock().unwrap().reply_with.clone() {
        return (StatusCode::CREATED, Json(reply)).into_response();
    }
    let request: MovieRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    };

    let mut state = fake.state.lock().unwrap();
    state.max_id += 1;
    let movie = Movie {
        id: state.max_id,
        title: request.title,
        director: request.director,
        release_year: request.release_year,
        watched: request.watched,
    };
    state.movies.push(movie.clone());
    (StatusCode::CREATED, Json(movie)).into_response()
}

async fn update_movie(
    State(fake): State<FakeBackend>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if let Some(status) = fake.record("PUT", format!("/movies/{id}"), Some(body.clone())) {
        return failure(status);
    }
    let request: MovieRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    };

    let mut state = fake.state.lock().unwrap();
    match state.movies.iter_mut().find(|m| m.id == id) {
        Some(movie) => {
            movie.apply(&request);
            Json(serde_json::json!({ "message": "Movie updated successfully" })).into_response()
        }
        None => not_found(id),
    }
}

async fn delete_movie(State(fake): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    if let Some(status) = fake.record("DELETE", format!("/movies/{id}"), None) {
        return failure(status);
    }
    let mut state = fake.state.lock().unwrap();
    let before = state.movies.len();
    state.movies.retain(|m| m.id != id);
    if state.movies.len() == before {
        return not_found(id);
    }
    Json(serde_json::json!({ "message": format!("The movie with ID={id} has been deleted.") }))
        .into_response()
}

async fn toggle_watched(State(fake): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    if let Some(status) = fake.record("PUT", format!("/movies/{id}/toggle-watched"), None) {
        return failure(status);
    }
    let mut state = fake.state.lock().unwrap();
    match state.movies.iter_mut().find(|m| m.id == id) {
        Some(movie) => {
            movie.watched = !movie.watched;
            Json(serde_json::json!({ "watched": movie.watched })).into_response()
        }
        None => not_found(id),
    }
}

async fn sign_in(State(fake): State<FakeBackend>, Form(form): Form<HashMap<String, String>>) -> Response {
    let body = serde_json::to_value(&form).ok();
    fake.record("POST", "/users/sign-in".into(), body);

    let username = form.get("username").map(String::as_str).unwrap_or_default();
    let password = form.get("password").map(String::as_str).unwrap_or_default();
    if username == VALID_USERNAME && password == VALID_PASSWORD {
        Json(serde_json::json!({
            "access_token": ISSUED_TOKEN,
            "token_type": "bearer",
            "username": username,
            "role": "BasicUser",
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "detail": "Invalid username or password" })),
        )
            .into_response()
    }
}

async fn sign_up(State(fake): State<FakeBackend>, Json(body): Json<serde_json::Value>) -> Response {
    fake.record("POST", "/users/signup".into(), Some(body.clone()));

    let username = body["username"].as_str().unwrap_or_default().to_string();
    let mut state = fake.state.lock().unwrap();
    if username == VALID_USERNAME || state.usernames.contains(&username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "detail": "Username already exists" })),
        )
            .into_response();
    }
    state.usernames.push(username);
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "User created successfully" })),
    )
        .into_response()
}

async fn logout(State(fake): State<FakeBackend>, headers: HeaderMap) -> Response {
    fake.record("POST", "/users/logout".into(), None);

    let Some(auth) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "detail": "Not authenticated" })),
        )
            .into_response();
    };
    fake.state.lock().unwrap().logouts.push(auth.to_string());
    Json(serde_json::json!({ "message": "Logged out successfully" })).into_response()
}

/// Build the fake backend router.
pub fn router(fake: FakeBackend) -> Router {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", put(update_movie).delete(delete_movie))
        .route("/movies/{id}/toggle-watched", put(toggle_watched))
        .route("/users/sign-in", axum::routing::post(sign_in))
        .route("/users/signup", axum::routing::post(sign_up))
        .route("/users/logout", axum::routing::post(logout))
        .with_state(fake)
}

/// Serve a fresh fake backend on an ephemeral port and return its handle
/// plus the base URL to point the client at.
pub async fn spawn_backend() -> (FakeBackend, String) {
    let fake = FakeBackend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app = router(fake.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend crashed");
    });
    (fake, format!("http://{addr}"))
}

pub fn movie(id: i64, title: &str, watched: bool) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        director: "Director".to_string(),
        release_year: 2000,
        watched,
    }
}
