//! Movie tracker client application.
//!
//! Wires the domain types of `movietrack_core` and the REST client of
//! `movietrack_client` into a store, controllers, a guarded router and a
//! terminal shell. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod controller;
pub mod router;
pub mod session;
pub mod shell;
pub mod storage;
pub mod store;
pub mod view;
