//! Client-side watched filter. Never sent to the backend.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::movie::Movie;

/// Accepted filter names, in display order.
pub const FILTER_NAMES: &[&str] = &["all", "watched", "unwatched"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovieFilter {
    #[default]
    All,
    Watched,
    Unwatched,
}

impl MovieFilter {
    /// Returns `true` if the movie is visible under this filter.
    pub fn matches(self, movie: &Movie) -> bool {
        match self {
            MovieFilter::All => true,
            MovieFilter::Watched => movie.watched,
            MovieFilter::Unwatched => !movie.watched,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovieFilter::All => "all",
            MovieFilter::Watched => "watched",
            MovieFilter::Unwatched => "unwatched",
        }
    }
}

impl fmt::Display for MovieFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(MovieFilter::All),
            "watched" => Ok(MovieFilter::Watched),
            "unwatched" => Ok(MovieFilter::Unwatched),
            other => Err(CoreError::Validation(format!(
                "Invalid filter '{other}'. Must be one of: {}",
                FILTER_NAMES.join(", ")
            ))),
        }
    }
}
