//! Movie list controller.
//!
//! Every operation validates locally, calls the backend, and on success
//! mutates the [`MovieStore`], whose subscription re-renders the list.
//! Operations never return errors: each one ends in a handled success or
//! failure branch.
//!
//! Failure visibility differs by operation. Create and update failures are
//! written to the form's message region; load, toggle and delete failures
//! are only logged. This split is existing behaviour, kept until there is
//! a product decision to surface the logged ones too.

use std::sync::Arc;

use movietrack_client::backend::MovieBackend;
use movietrack_core::filter::MovieFilter;
use movietrack_core::listing::build_cards;
use movietrack_core::movie::MovieForm;
use movietrack_core::types::MovieId;

use crate::store::MovieStore;
use crate::view::{Dialog, MessageRegion, MovieView};

pub struct MovieController<B, V> {
    backend: B,
    view: Arc<V>,
    store: MovieStore,
}

impl<B, V> MovieController<B, V>
where
    B: MovieBackend,
    V: MovieView + 'static,
{
    /// Create a controller and bind the view's list to the store.
    pub fn new(backend: B, view: Arc<V>) -> Self {
        let mut store = MovieStore::new();
        let list_view = Arc::clone(&view);
        store.subscribe(move |movies, filter| {
            tracing::debug!(count = movies.len(), filter = %filter, "Refreshing movie list");
            list_view.render_list(&build_cards(movies, filter));
        });

        Self {
            backend,
            view,
            store,
        }
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    /// Fetch every movie and replace the cached list.
    ///
    /// On failure the previous list stays in place.
    pub async fn load(&mut self) {
        tracing::info!("Getting movies from API");
        match self.backend.list_movies().await {
            Ok(movies) => {
                tracing::info!(count = movies.len(), "Movies retrieved");
                self.store.replace_all(movies);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error getting movies");
            }
        }
    }

    /// Opening the add form clears its stale message.
    pub fn open_add_form(&self) {
        self.view.clear_message(MessageRegion::Add);
    }

    /// Submit the add form.
    pub async fn create(&mut self, form: &MovieForm) {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.view.show_message(MessageRegion::Add, &e.to_string());
                return;
            }
        };

        tracing::info!(
            title = %request.title,
            director = %request.director,
            release_year = request.release_year,
            watched = request.watched,
            "Adding movie",
        );

        match self.backend.create_movie(&request).await {
            Ok(movie) => {
                tracing::info!(movie_id = movie.id, "Movie added");
                self.store.push(movie);
                self.view.reset_add_form();
                self.view.close_dialog(Dialog::Add);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error adding movie");
                self.view
                    .show_message(MessageRegion::Add, &format!("Error adding movie: {e}"));
            }
        }
    }

    /// Put movie `id` into edit mode and fill the edit form from it.
    pub fn begin_edit(&mut self, id: MovieId) {
        match self.store.select(id) {
            Ok(movie) => {
                tracing::info!(movie_id = id, "Editing movie");
                self.view.populate_edit_form(id, &MovieForm::from(movie));
                self.view.clear_message(MessageRegion::Edit);
            }
            Err(e) => {
                tracing::error!(movie_id = id, error = %e, "Movie not found");
            }
        }
    }

    /// Submit the edit form against the selected movie.
    pub async fn submit_edit(&mut self, form: &MovieForm) {
        match self.store.selected_id() {
            Some(id) => self.update(id, form).await,
            None => tracing::error!("Edit submitted with no movie selected"),
        }
    }

    /// Replace the fields of movie `id`, patching the cached record on
    /// success instead of refetching.
    pub async fn update(&mut self, id: MovieId, form: &MovieForm) {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.view.show_message(MessageRegion::Edit, &e.to_string());
                return;
            }
        };

        tracing::info!(movie_id = id, title = %request.title, "Updating movie");

        match self.backend.update_movie(id, &request).await {
            Ok(()) => {
                if let Err(e) = self.store.patch(id, &request) {
                    tracing::warn!(movie_id = id, error = %e, "Updated movie is not cached");
                }
                self.view.close_dialog(Dialog::Edit);
            }
            Err(e) => {
                tracing::error!(movie_id = id, error = %e, "Error updating movie");
                self.view
                    .show_message(MessageRegion::Edit, &format!("Error updating movie: {e}"));
            }
        }
    }

    /// Flip the watched flag of movie `id`. Failures are logged only.
    pub async fn toggle_watched(&mut self, id: MovieId) {
        tracing::info!(movie_id = id, "Toggling watched status");
        match self.backend.toggle_watched(id).await {
            Ok(()) => match self.store.toggle_watched(id) {
                Ok(watched) => tracing::debug!(movie_id = id, watched, "Watched status toggled"),
                Err(e) => tracing::warn!(movie_id = id, error = %e, "Toggled movie is not cached"),
            },
            Err(e) => {
                tracing::error!(movie_id = id, error = %e, "Error toggling watched status");
            }
        }
    }

    /// Delete movie `id`. Failures are logged only.
    pub async fn remove(&mut self, id: MovieId) {
        tracing::info!(movie_id = id, "Deleting movie");
        match self.backend.delete_movie(id).await {
            Ok(()) => {
                if let Err(e) = self.store.remove(id) {
                    tracing::warn!(movie_id = id, error = %e, "Deleted movie is not cached");
                }
            }
            Err(e) => {
                tracing::error!(movie_id = id, error = %e, "Error deleting movie");
            }
        }
    }

    pub fn set_filter(&mut self, filter: MovieFilter) {
        tracing::info!(filter = %filter, "Filtering movies");
        self.store.set_filter(filter);
    }
}
