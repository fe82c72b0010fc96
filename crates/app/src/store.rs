//! In-memory movie state with change subscriptions.
//!
//! [`MovieStore`] holds the cached movie list, the active filter and the
//! movie selected for editing. Every mutation that changes what the list
//! shows notifies the subscribers, which is how the view re-renders.

use movietrack_core::error::CoreError;
use movietrack_core::filter::MovieFilter;
use movietrack_core::movie::{Movie, MovieRequest};
use movietrack_core::types::MovieId;

/// Callback invoked with the full movie list and active filter after a change.
pub type Listener = Box<dyn FnMut(&[Movie], MovieFilter) + Send>;

#[derive(Default)]
pub struct MovieStore {
    movies: Vec<Movie>,
    active_filter: MovieFilter,
    selected: Option<MovieId>,
    listeners: Vec<Listener>,
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Movie], MovieFilter) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn active_filter(&self) -> MovieFilter {
        self.active_filter
    }

    pub fn selected_id(&self) -> Option<MovieId> {
        self.selected
    }

    pub fn find(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    /// Replace the whole list, e.g. after a full fetch.
    pub fn replace_all(&mut self, movies: Vec<Movie>) {
        self.movies = movies;
        self.notify();
    }

    pub fn push(&mut self, movie: Movie) {
        self.movies.push(movie);
        self.notify();
    }

    /// Overwrite the editable fields of movie `id`.
    pub fn patch(&mut self, id: MovieId, request: &MovieRequest) -> Result<(), CoreError> {
        self.find_mut(id)?.apply(request);
        self.notify();
        Ok(())
    }

    /// Flip the watched flag of movie `id` and return its new value.
    pub fn toggle_watched(&mut self, id: MovieId) -> Result<bool, CoreError> {
        let movie = self.find_mut(id)?;
        movie.watched = !movie.watched;
        let watched = movie.watched;
        self.notify();
        Ok(watched)
    }

    /// Remove movie `id`. A removed movie can no longer be the selection.
    pub fn remove(&mut self, id: MovieId) -> Result<Movie, CoreError> {
        let index = self
            .movies
            .iter()
            .position(|m| m.id == id)
            .ok_or(CoreError::NotFound { entity: "Movie", id })?;
        let removed = self.movies.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.notify();
        Ok(removed)
    }

    pub fn set_filter(&mut self, filter: MovieFilter) {
        self.active_filter = filter;
        self.notify();
    }

    /// Make movie `id` the selection, replacing any previous one.
    ///
    /// Selection does not change the list, so subscribers are not notified.
    pub fn select(&mut self, id: MovieId) -> Result<&Movie, CoreError> {
        let movie = self
            .movies
            .iter()
            .find(|m| m.id == id)
            .ok_or(CoreError::NotFound { entity: "Movie", id })?;
        self.selected = Some(id);
        Ok(movie)
    }

    fn find_mut(&mut self, id: MovieId) -> Result<&mut Movie, CoreError> {
        self.movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(CoreError::NotFound { entity: "Movie", id })
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.movies, self.active_filter);
        }
    }
}

impl std::fmt::Debug for MovieStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieStore")
            .field("movies", &self.movies)
            .field("active_filter", &self.active_filter)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
