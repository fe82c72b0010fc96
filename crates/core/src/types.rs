/// Backend-assigned movie identifier. Immutable once assigned.
pub type MovieId = i64;
