//! Authenticated REST client for the helpdesk backend.
//!
//! Every request built through [`ApiClient`] passes two stages:
//!
//! - outbound: the bearer token is read from the session store and sent as
//!   `Authorization: Bearer <token>` (empty when no token is stored)
//! - inbound: a 401 response clears the session store and emits a
//!   [`SessionExpired`](crate::session::SessionExpired) event before the
//!   error is returned to the caller
//!
//! Errors are never retried or swallowed.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiRequest};
pub use error::ApiError;
