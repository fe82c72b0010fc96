//! HTTP client for the movie tracker REST endpoints.
//!
//! Wraps `GET/POST /movies`, `PUT/DELETE /movies/{id}`,
//! `PUT /movies/{id}/toggle-watched` and the `/users` sign-in, sign-up
//! and logout endpoints using [`reqwest`].

use std::time::Duration;

use movietrack_core::movie::{Movie, MovieRequest};
use movietrack_core::types::MovieId;
use serde::{Deserialize, Serialize};

/// HTTP client for a single movie tracker backend.
#[derive(Debug, Clone)]
pub struct MovieApi {
    client: reqwest::Client,
    api_url: String,
}

/// Response of `POST /users/sign-in`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

fn default_role() -> String {
    "BasicUser".to_string()
}

/// Response of `POST /users/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpResponse {
    #[serde(default)]
    pub message: String,
}

/// JSON body of `POST /users/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Form body of `POST /users/sign-in`.
#[derive(Serialize)]
struct SignInForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// Errors from the REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A 2xx response whose body is not the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl MovieApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://127.0.0.1:8000`. A trailing
    ///   slash is dropped.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Create an API client whose requests give up after `timeout`.
    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch the full movie collection (`GET /movies`).
    ///
    /// A `null` body is an empty collection.
    pub async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let response = self.client.get(self.movies_url()).send().await?;
        let movies: Option<Vec<Movie>> = Self::parse_response(response).await?;
        Ok(movies.unwrap_or_default())
    }

    /// Create a movie (`POST /movies`) and return the stored record with
    /// its backend-assigned id.
    pub async fn create_movie(&self, request: &MovieRequest) -> Result<Movie, ApiError> {
        let response = self
            .client
            .post(self.movies_url())
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Replace a movie's fields (`PUT /movies/{id}`). The response body is
    /// ignored.
    pub async fn update_movie(&self, id: MovieId, request: &MovieRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.movie_url(id))
            .json(request)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Flip a movie's watched flag (`PUT /movies/{id}/toggle-watched`).
    pub async fn toggle_watched(&self, id: MovieId) -> Result<(), ApiError> {
        let response = self
            .client
            .put(format!("{}/toggle-watched", self.movie_url(id)))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Delete a movie (`DELETE /movies/{id}`).
    pub async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        let response = self.client.delete(self.movie_url(id)).send().await?;
        Self::check_status(response).await
    }

    /// Exchange credentials for an access token (`POST /users/sign-in`).
    ///
    /// Credentials are sent as an `application/x-www-form-urlencoded` body.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/users/sign-in", self.api_url))
            .form(&SignInForm { username, password })
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Register a new account (`POST /users/signup`, JSON body).
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/users/signup", self.api_url))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// End the session on the backend (`POST /users/logout`) using the
    /// bearer token issued at sign-in.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/users/logout", self.api_url))
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn movies_url(&self) -> String {
        format!("{}/movies", self.api_url)
    }

    fn movie_url(&self, id: MovieId) -> String {
        format!("{}/movies/{}", self.api_url, id)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), body = %body, "Backend rejected request");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
