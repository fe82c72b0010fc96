//! Client-side navigation with the authentication guard in front of it.

use movietrack_core::route::{self, GuardDecision, RouteName, ACCESS_TOKEN_KEY};

use crate::storage::LocalStorage;

/// Read-only access to the persisted credential token.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

impl TokenSource for LocalStorage {
    /// An unreadable store counts as signed out.
    fn access_token(&self) -> Option<String> {
        match self.get_item(ACCESS_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read credential token");
                None
            }
        }
    }
}

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Entered(RouteName),
    Redirected { requested: RouteName, to: RouteName },
    NotFound(String),
}

pub struct Router<T> {
    tokens: T,
    current: Option<RouteName>,
}

impl<T: TokenSource> Router<T> {
    pub fn new(tokens: T) -> Self {
        Self {
            tokens,
            current: None,
        }
    }

    /// The route currently shown, `None` before the first navigation.
    pub fn current(&self) -> Option<RouteName> {
        self.current
    }

    /// Navigate to `path`, running the guard before entering.
    ///
    /// Unknown paths leave the current route unchanged.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let Some(target) = route::resolve(path) else {
            tracing::warn!(path, "No route matches path");
            return Navigation::NotFound(path.to_string());
        };

        let decision = if target.requires_auth {
            route::guard(target, self.tokens.access_token().as_deref())
        } else {
            GuardDecision::Proceed
        };

        match decision {
            GuardDecision::Proceed => {
                tracing::debug!(route = %target.name, "Entering route");
                self.current = Some(target.name);
                Navigation::Entered(target.name)
            }
            GuardDecision::Redirect(to) => {
                tracing::info!(requested = %target.name, redirect = %to, "Not signed in, redirecting");
                self.current = Some(to);
                Navigation::Redirected {
                    requested: target.name,
                    to,
                }
            }
        }
    }
}
