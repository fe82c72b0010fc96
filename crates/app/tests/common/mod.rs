//! Shared fakes for the application integration tests.
//!
//! [`FakeBackend`] stands in for the REST backend and records every call;
//! [`RecordingView`] captures everything the controllers push into the view.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use movietrack_app::view::{Dialog, MessageRegion, MovieView};
use movietrack_client::api::{ApiError, SignInResponse, SignUpRequest, SignUpResponse};
use movietrack_client::backend::{MovieBackend, SessionBackend};
use movietrack_core::listing::MovieCard;
use movietrack_core::movie::{Movie, MovieForm, MovieRequest};
use movietrack_core::types::MovieId;

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "tok-123";

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(MovieRequest),
    Update(MovieId, MovieRequest),
    Toggle(MovieId),
    Delete(MovieId),
    SignIn(String),
    SignUp(SignUpRequest),
    SignOut(String),
}

#[derive(Default)]
struct FakeState {
    movies: Vec<Movie>,
    calls: Vec<Call>,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().movies = movies;
        backend
    }

    /// Make every subsequent call answer with a 500.
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn begin(&self, call: Call) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing {
            return Err(ApiError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }
        Ok(state)
    }
}

fn not_found(id: MovieId) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("The movie with ID={id} is not found."),
    }
}

impl MovieBackend for FakeBackend {
    async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let state = self.begin(Call::List)?;
        Ok(state.movies.clone())
    }

    async fn create_movie(&self, request: &MovieRequest) -> Result<Movie, ApiError> {
        let mut state = self.begin(Call::Create(request.clone()))?;
        let id = state.movies.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let movie = Movie {
            id,
            title: request.title.clone(),
            director: request.director.clone(),
            release_year: request.release_year,
            watched: request.watched,
        };
        state.movies.push(movie.clone());
        Ok(movie)
    }

    async fn update_movie(&self, id: MovieId, request: &MovieRequest) -> Result<(), ApiError> {
        let mut state = self.begin(Call::Update(id, request.clone()))?;
        let movie = state
            .movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;
        movie.apply(request);
        Ok(())
    }

    async fn toggle_watched(&self, id: MovieId) -> Result<(), ApiError> {
        let mut state = self.begin(Call::Toggle(id))?;
        let movie = state
            .movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;
        movie.watched = !movie.watched;
        Ok(())
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        let mut state = self.begin(Call::Delete(id))?;
        let before = state.movies.len();
        state.movies.retain(|m| m.id != id);
        if state.movies.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

impl SessionBackend for FakeBackend {
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResponse, ApiError> {
        let _state = self.begin(Call::SignIn(username.to_string()))?;
        if username == USERNAME && password == PASSWORD {
            Ok(SignInResponse {
                access_token: TOKEN.to_string(),
                token_type: "bearer".to_string(),
                username: username.to_string(),
                role: "BasicUser".to_string(),
            })
        } else {
            Err(ApiError::Status {
                status: 401,
                body: "Invalid username or password".to_string(),
            })
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, ApiError> {
        let _state = self.begin(Call::SignUp(request.clone()))?;
        if request.username == USERNAME {
            return Err(ApiError::Status {
                status: 400,
                body: "Username already exists".to_string(),
            });
        }
        Ok(SignUpResponse {
            message: "User created successfully".to_string(),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ApiError> {
        let _state = self.begin(Call::SignOut(access_token.to_string()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Render(Vec<MovieCard>),
    Message(MessageRegion, String),
    Clear(MessageRegion),
    EditForm(MovieId, MovieForm),
    ResetAddForm,
    Close(Dialog),
    Notice(String),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn render_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ViewEvent::Render(_)))
            .count()
    }

    /// Cards of the most recent render.
    pub fn last_render(&self) -> Option<Vec<MovieCard>> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Render(cards) => Some(cards),
            _ => None,
        })
    }

    pub fn rendered_ids(&self) -> Vec<MovieId> {
        self.last_render()
            .unwrap_or_default()
            .iter()
            .map(|c| c.id)
            .collect()
    }

    pub fn messages(&self, region: MessageRegion) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Message(r, text) if r == region => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Notice(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl MovieView for RecordingView {
    fn render_list(&self, cards: &[MovieCard]) {
        self.push(ViewEvent::Render(cards.to_vec()));
    }

    fn show_message(&self, region: MessageRegion, text: &str) {
        self.push(ViewEvent::Message(region, text.to_string()));
    }

    fn clear_message(&self, region: MessageRegion) {
        self.push(ViewEvent::Clear(region));
    }

    fn populate_edit_form(&self, id: MovieId, form: &MovieForm) {
        self.push(ViewEvent::EditForm(id, form.clone()));
    }

    fn reset_add_form(&self) {
        self.push(ViewEvent::ResetAddForm);
    }

    fn close_dialog(&self, dialog: Dialog) {
        self.push(ViewEvent::Close(dialog));
    }

    fn show_notice(&self, text: &str) {
        self.push(ViewEvent::Notice(text.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn movie(id: MovieId, title: &str, watched: bool) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        director: "Director".to_string(),
        release_year: 2000,
        watched,
    }
}
