//! Movie record, outbound payload, and form validation.

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::types::MovieId;

/// A movie as owned by the backend and cached by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub director: String,
    pub release_year: i64,
    pub watched: bool,
}

impl Movie {
    /// Overwrite every editable field from a validated payload.
    ///
    /// The `id` is never touched.
    pub fn apply(&mut self, request: &MovieRequest) {
        self.title.clone_from(&request.title);
        self.director.clone_from(&request.director);
        self.release_year = request.release_year;
        self.watched = request.watched;
    }
}

/// Body of `POST /movies` and `PUT /movies/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRequest {
    pub title: String,
    pub director: String,
    pub release_year: i64,
    pub watched: bool,
}

/// Raw values read from the add or edit form.
///
/// `watched` is `None` when the form has no watched control at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub director: String,
    pub release_year: String,
    pub watched: Option<bool>,
}

impl MovieForm {
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        release_year: impl Into<String>,
        watched: Option<bool>,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            release_year: release_year.into(),
            watched,
        }
    }

    /// Check the required fields in display order and build the payload.
    ///
    /// Title, director and release year are checked in that order and the
    /// first blank one wins. A field counts as blank only when empty.
    pub fn validate(&self) -> Result<MovieRequest, FormError> {
        if self.title.is_empty() {
            return Err(FormError::BlankTitle);
        }
        if self.director.is_empty() {
            return Err(FormError::BlankDirector);
        }
        if self.release_year.is_empty() {
            return Err(FormError::BlankReleaseYear);
        }

        Ok(MovieRequest {
            title: self.title.clone(),
            director: self.director.clone(),
            release_year: parse_release_year(&self.release_year)?,
            watched: self.watched.unwrap_or(false),
        })
    }
}

impl From<&Movie> for MovieForm {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            director: movie.director.clone(),
            release_year: movie.release_year.to_string(),
            watched: Some(movie.watched),
        }
    }
}

/// Parse the leading integer of a release-year input.
///
/// Leading whitespace and a single sign are accepted and anything after
/// the first non-digit is ignored, so `"1999 (remaster)"` yields `1999`.
/// Input without a leading digit is rejected.
pub fn parse_release_year(raw: &str) -> Result<i64, FormError> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return Err(FormError::InvalidReleaseYear);
    }

    let value: i64 = rest[..end]
        .parse()
        .map_err(|_| FormError::InvalidReleaseYear)?;
    Ok(if negative { -value } else { value })
}
