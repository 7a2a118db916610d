//! Session storage and session lifecycle events.
//!
//! This module provides:
//! - `SessionStore`: a flat key/value store holding the bearer token and
//!   other per-login state, injected into the `ApiClient`
//! - `MemorySessionStore`, `FileSessionStore`, `KeyringSessionStore`:
//!   in-process, JSON file and OS keychain backends
//! - `SessionEvents`: observers notified when the backend rejects the session
//!
//! The token carries no client-side expiry. It lives until logout or until
//! the backend answers 401.

pub mod events;
pub mod file;
pub mod keychain;
pub mod store;

pub use events::{SessionEvents, SessionExpired, LOGIN_ROUTE};
pub use file::FileSessionStore;
pub use keychain::KeyringSessionStore;
pub use store::{MemorySessionStore, SessionState, SessionStore, TOKEN_KEY, USER_KEY};
