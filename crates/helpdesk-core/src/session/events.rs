use std::sync::{Arc, PoisonError, RwLock};

/// Route the application should show once the session is gone
pub const LOGIN_ROUTE: &str = "/login";

/// Emitted when the backend rejects a request with 401.
///
/// By the time listeners see this, the session store has been cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpired {
    pub method: String,
    pub url: String,
    pub redirect_to: &'static str,
}

impl SessionExpired {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            redirect_to: LOGIN_ROUTE,
        }
    }
}

type Listener = Arc<dyn Fn(&SessionExpired) + Send + Sync>;

/// Observer registry for session-expired events.
///
/// Clones share the same listener list. Every emitted event reaches every
/// listener; simultaneous 401s are not coalesced.
#[derive(Clone, Default)]
pub struct SessionEvents {
    listeners: Arc<RwLock<Vec<Listener>>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&SessionExpired) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Notify every listener, returning how many were called
    pub fn emit(&self, event: &SessionExpired) -> usize {
        // Snapshot so a listener may subscribe without deadlocking
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
