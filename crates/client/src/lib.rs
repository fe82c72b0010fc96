//! REST client for the movie tracker backend.
//!
//! [`api::MovieApi`] wraps the `/movies` CRUD endpoints and the
//! `/users` sign-in, sign-up and logout endpoints using [`reqwest`]. The
//! [`backend`] traits are the seam the application controllers are written
//! against, so they can be driven by an in-memory fake in tests.

pub mod api;
pub mod backend;
