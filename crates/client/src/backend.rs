//! Backend traits the controllers are written against.
//!
//! [`MovieApi`] implements both by forwarding to its HTTP methods.

use std::future::Future;

use movietrack_core::movie::{Movie, MovieRequest};
use movietrack_core::types::MovieId;

use crate::api::{ApiError, MovieApi, SignInResponse, SignUpRequest, SignUpResponse};

/// The `/movies` resource as seen by the movie controller.
pub trait MovieBackend: Send + Sync {
    fn list_movies(&self) -> impl Future<Output = Result<Vec<Movie>, ApiError>> + Send;

    fn create_movie(
        &self,
        request: &MovieRequest,
    ) -> impl Future<Output = Result<Movie, ApiError>> + Send;

    fn update_movie(
        &self,
        id: MovieId,
        request: &MovieRequest,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn toggle_watched(&self, id: MovieId) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_movie(&self, id: MovieId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Account endpoints as seen by the session flow.
pub trait SessionBackend: Send + Sync {
    fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<SignInResponse, ApiError>> + Send;

    fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> impl Future<Output = Result<SignUpResponse, ApiError>> + Send;

    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl MovieBackend for MovieApi {
    async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        MovieApi::list_movies(self).await
    }

    async fn create_movie(&self, request: &MovieRequest) -> Result<Movie, ApiError> {
        MovieApi::create_movie(self, request).await
    }

    async fn update_movie(&self, id: MovieId, request: &MovieRequest) -> Result<(), ApiError> {
        MovieApi::update_movie(self, id, request).await
    }

    async fn toggle_watched(&self, id: MovieId) -> Result<(), ApiError> {
        MovieApi::toggle_watched(self, id).await
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        MovieApi::delete_movie(self, id).await
    }
}

impl SessionBackend for MovieApi {
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResponse, ApiError> {
        MovieApi::sign_in(self, username, password).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, ApiError> {
        MovieApi::sign_up(self, request).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ApiError> {
        MovieApi::sign_out(self, access_token).await
    }
}
