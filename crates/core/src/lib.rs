//! Domain types for the movie tracker client.
//!
//! Everything here is free of I/O: the movie model and its outbound
//! payload, form validation, the watched filter, the list rendering model,
//! and the route table with its authentication guard.

pub mod error;
pub mod filter;
pub mod listing;
pub mod movie;
pub mod route;
pub mod types;
