//! Tracks which screen of the front end is active.
//!
//! The CLI has no real screens, but routing still decides what the user is
//! told: reaching `/login` from anywhere else means the session is gone.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

pub const HOME_ROUTE: &str = "/";

/// Shared handle; clones navigate the same router.
#[derive(Debug, Clone)]
pub struct Router {
    current: Arc<Mutex<String>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(HOME_ROUTE.to_string())),
        }
    }

    pub fn current(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_at(&self, route: &str) -> bool {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) == route
    }

    /// Switch to `route`. Returns false when it was already active.
    pub fn navigate(&self, route: &str) -> bool {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == route {
            return false;
        }
        debug!(from = %current, to = route, "Navigating");
        *current = route.to_string();
        true
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_home() {
        let router = Router::new();
        assert_eq!(router.current(), HOME_ROUTE);
    }

    #[test]
    fn test_navigate() {
        let router = Router::new();
        assert!(router.navigate("/tickets"));
        assert!(router.navigate("/login"));
        assert!(router.is_at("/login"));
        assert!(!router.is_at("/tickets"));
    }

    #[test]
    fn test_navigate_to_current_route_is_noop() {
        let router = Router::new();
        assert!(router.navigate("/login"));
        assert!(!router.navigate("/login"));
        assert!(router.navigate(HOME_ROUTE));
    }

    #[test]
    fn test_clones_share_state() {
        let router = Router::new();
        let clone = router.clone();
        clone.navigate("/login");
        assert!(router.is_at("/login"));
    }
}
