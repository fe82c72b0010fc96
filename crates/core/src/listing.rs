//! List rendering model.
//!
//! The list is rebuilt from scratch on every state change: movies are
//! filtered by the active [`MovieFilter`] and sorted by id descending, so
//! the most recently created movie comes first. Id order stands in for
//! creation order; it says nothing else about the movie.

use crate::filter::MovieFilter;
use crate::movie::Movie;
use crate::types::MovieId;

pub const BADGE_WATCHED: &str = "Watched";
pub const BADGE_TO_WATCH: &str = "To Watch";

/// Everything a view needs to draw one movie card and wire its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub release_year: i64,
    pub director: String,
    pub watched: bool,
    /// `Watched` or `To Watch`.
    pub badge_label: &'static str,
    /// `bg-success` or `bg-warning`.
    pub badge_class: &'static str,
    /// `watched` or `unwatched`.
    pub status_class: &'static str,
    /// Icon of the toggle control: `fa-eye-slash` when watched, else `fa-eye`.
    pub toggle_icon: &'static str,
}

impl MovieCard {
    pub fn from_movie(movie: &Movie) -> Self {
        let watched = movie.watched;
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_year: movie.release_year,
            director: movie.director.clone(),
            watched,
            badge_label: if watched { BADGE_WATCHED } else { BADGE_TO_WATCH },
            badge_class: if watched { "bg-success" } else { "bg-warning" },
            status_class: if watched { "watched" } else { "unwatched" },
            toggle_icon: if watched { "fa-eye-slash" } else { "fa-eye" },
        }
    }

    /// Card heading, e.g. `Alien (1979)`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.release_year)
    }
}

/// Movies visible under `filter`, newest id first.
pub fn visible_movies(movies: &[Movie], filter: MovieFilter) -> Vec<&Movie> {
    let mut visible: Vec<&Movie> = movies.iter().filter(|m| filter.matches(m)).collect();
    visible.sort_by(|a, b| b.id.cmp(&a.id));
    visible
}

/// Build the full card list for the current state.
pub fn build_cards(movies: &[Movie], filter: MovieFilter) -> Vec<MovieCard> {
    visible_movies(movies, filter)
        .into_iter()
        .map(MovieCard::from_movie)
        .collect()
}
