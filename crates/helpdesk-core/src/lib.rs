//! Core library for the helpdesk administration client.
//!
//! Everything here talks to the ticketing REST backend through a single
//! [`ApiClient`], which attaches the stored bearer token to every request and
//! tears the session down when the backend answers 401.
//!
//! - [`session`]: pluggable session storage and the session-expired event bus
//! - [`api`]: the authenticated HTTP client and its error type
//! - [`auth`]: login, logout and the current user
//! - [`services`]: typed CRUD services for every backend resource
//! - [`models`]: the JSON data transfer types
//! - [`config`]: configuration file and environment overrides

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

pub use api::{ApiClient, ApiError, ApiRequest};
pub use auth::AuthService;
pub use config::{Config, SessionBackend};
pub use services::Services;
pub use session::{
    FileSessionStore, KeyringSessionStore, MemorySessionStore, SessionEvents, SessionExpired,
    SessionState, SessionStore, LOGIN_ROUTE,
};
