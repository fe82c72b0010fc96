use crate::types::MovieId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: MovieId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Presence and format failures of a submitted form.
///
/// The `Display` text is exactly what gets written into the form's
/// message region, so changing a message here changes what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Movie title cannot be blank")]
    BlankTitle,

    #[error("Director name cannot be blank")]
    BlankDirector,

    #[error("Release year cannot be blank")]
    BlankReleaseYear,

    #[error("Release year must be a whole number")]
    InvalidReleaseYear,

    #[error("Username cannot be blank")]
    BlankUsername,

    #[error("Password cannot be blank")]
    BlankPassword,

    #[error("Email cannot be blank")]
    BlankEmail,
}
