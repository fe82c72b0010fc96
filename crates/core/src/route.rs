//! Route table and the authentication guard.
//!
//! The guard is a presence check: a route flagged `requires_auth` is
//! entered when any non-empty token is stored, and redirected to the
//! login route otherwise. The token is never decoded or verified.

use std::fmt;

/// Local storage key holding the credential token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Auth,
    Movies,
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteName::Home => "Home",
            RouteName::Auth => "Auth",
            RouteName::Movies => "Movies",
        };
        f.write_str(name)
    }
}

/// A single entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub name: RouteName,
    pub path: &'static str,
    pub requires_auth: bool,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        name: RouteName::Home,
        path: "/",
        requires_auth: false,
    },
    RouteDef {
        name: RouteName::Auth,
        path: "/login",
        requires_auth: false,
    },
    RouteDef {
        name: RouteName::Movies,
        path: "/movies",
        requires_auth: true,
    },
];

impl RouteName {
    pub fn def(self) -> &'static RouteDef {
        // Every variant has exactly one entry in ROUTES.
        ROUTES
            .iter()
            .find(|r| r.name == self)
            .unwrap_or(&ROUTES[0])
    }

    pub fn path(self) -> &'static str {
        self.def().path
    }
}

/// Look up a route by path.
///
/// Query strings and fragments are ignored, as is a trailing slash on
/// anything other than the root.
pub fn resolve(path: &str) -> Option<&'static RouteDef> {
    let path = path
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    ROUTES.iter().find(|r| r.path == path)
}

/// Outcome of running the guard for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(RouteName),
}

/// Decide whether navigation to `route` may complete.
///
/// An empty token counts as absent.
pub fn guard(route: &RouteDef, token: Option<&str>) -> GuardDecision {
    if !route.requires_auth {
        return GuardDecision::Proceed;
    }
    match token {
        Some(token) if !token.is_empty() => GuardDecision::Proceed,
        _ => GuardDecision::Redirect(RouteName::Auth),
    }
}
