//! Client-side routes for the listing and the per-game player.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static PLAYER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/play/([^/?#]+)/?$").expect("invalid player route regex"));

/// A logical location in the hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// The root listing, `/`.
    Listing,
    /// The player for one game, `/play/{id}`.
    Player {
        /// Catalog id of the game.
        id: String,
    },
}

impl Route {
    /// Player route for `id`.
    pub fn player(id: impl Into<String>) -> Self {
        Route::Player { id: id.into() }
    }

    /// Whether `id` survives a trip through [`Route::path`] and [`Route::parse`].
    pub fn is_routable_id(id: &str) -> bool {
        !id.is_empty() && id.trim() == id && !id.contains(['/', '?', '#'])
    }

    /// Resolve a path. Unknown paths land on the listing.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        if let Some(caps) = PLAYER_RE.captures(path) {
            if let Some(id) = caps.get(1) {
                return Route::player(id.as_str());
            }
        }
        if !matches!(path, "" | "/") {
            debug!(path, "Unmatched path, showing listing");
        }
        Route::Listing
    }

    /// Path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Listing => "/".to_string(),
            Route::Player { id } => format!("/play/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Navigation history. Never empty.
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Listing)
    }
}

impl Router {
    /// Start at `initial`.
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial],
        }
    }

    /// Active route.
    pub fn current(&self) -> &Route {
        // history always holds at least the initial entry
        &self.history[self.history.len() - 1]
    }

    /// Push `route`. Navigating to the active route is a no-op.
    pub fn navigate(&mut self, route: Route) -> bool {
        if self.current() == &route {
            return false;
        }
        debug!(from = %self.current(), to = %route, "Navigate");
        self.history.push(route);
        true
    }

    /// Swap the active route for `route` without growing history.
    pub fn replace(&mut self, route: Route) {
        debug!(from = %self.current(), to = %route, "Replace route");
        if let Some(top) = self.history.last_mut() {
            *top = route;
        }
        self.history.dedup();
    }

    /// Pop one entry; from the bottom entry, fall back to the listing.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            return true;
        }
        if self.current() != &Route::Listing {
            self.history[0] = Route::Listing;
            return true;
        }
        false
    }

    /// Number of history entries.
    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
