//! Account flow: sign-up, sign-in and sign-out. The only writer of the
//! credential token.

use std::sync::Arc;

use movietrack_client::api::SignUpRequest;
use movietrack_client::backend::SessionBackend;
use movietrack_core::error::FormError;
use movietrack_core::route::ACCESS_TOKEN_KEY;

use crate::storage::LocalStorage;
use crate::view::{MessageRegion, MovieView};

pub struct SessionController<B, V> {
    backend: B,
    storage: LocalStorage,
    view: Arc<V>,
}

impl<B, V> SessionController<B, V>
where
    B: SessionBackend,
    V: MovieView,
{
    pub fn new(backend: B, storage: LocalStorage, view: Arc<V>) -> Self {
        Self {
            backend,
            storage,
            view,
        }
    }

    /// Register a new account. Does not sign in.
    ///
    /// Returns `true` when the backend accepted the account. The outcome is
    /// written to the login message region either way.
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> bool {
        let blank = if username.is_empty() {
            Some(FormError::BlankUsername)
        } else if email.is_empty() {
            Some(FormError::BlankEmail)
        } else if password.is_empty() {
            Some(FormError::BlankPassword)
        } else {
            None
        };
        if let Some(e) = blank {
            self.view.show_message(MessageRegion::Login, &e.to_string());
            return false;
        }

        let request = SignUpRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.backend.sign_up(&request).await {
            Ok(response) => {
                tracing::info!(username, "Signed up");
                let text = if response.message.is_empty() {
                    "User created successfully".to_string()
                } else {
                    response.message
                };
                self.view.show_message(MessageRegion::Login, &text);
                true
            }
            Err(e) => {
                tracing::error!(username, error = %e, "Failed sign-up attempt");
                self.view
                    .show_message(MessageRegion::Login, &format!("Sign-up failed: {e}"));
                false
            }
        }
    }

    /// Exchange credentials for a token and persist it.
    ///
    /// Returns `true` once the token is stored. Every failure is written to
    /// the login message region and leaves storage untouched.
    pub async fn sign_in(&self, username: &str, password: &str) -> bool {
        if username.is_empty() {
            self.view
                .show_message(MessageRegion::Login, &FormError::BlankUsername.to_string());
            return false;
        }
        if password.is_empty() {
            self.view
                .show_message(MessageRegion::Login, &FormError::BlankPassword.to_string());
            return false;
        }

        let response = match self.backend.sign_in(username, password).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(username, error = %e, "Failed sign-in attempt");
                self.view
                    .show_message(MessageRegion::Login, &format!("Sign-in failed: {e}"));
                return false;
            }
        };

        if let Err(e) = self.storage.set_item(ACCESS_TOKEN_KEY, &response.access_token) {
            tracing::error!(error = %e, "Could not store credential token");
            self.view
                .show_message(MessageRegion::Login, &format!("Sign-in failed: {e}"));
            return false;
        }

        tracing::info!(username = %response.username, role = %response.role, "Signed in");
        self.view.clear_message(MessageRegion::Login);
        true
    }

    /// Tell the backend the session is over, then forget the stored token.
    ///
    /// The token is removed even when the backend call fails.
    pub async fn sign_out(&self) {
        match self.storage.get_item(ACCESS_TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                if let Err(e) = self.backend.sign_out(&token).await {
                    tracing::warn!(error = %e, "Backend logout failed");
                }
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Could not read credential token"),
        }

        match self.storage.remove_item(ACCESS_TOKEN_KEY) {
            Ok(()) => tracing::info!("Signed out"),
            Err(e) => tracing::error!(error = %e, "Could not remove credential token"),
        }
    }
}
