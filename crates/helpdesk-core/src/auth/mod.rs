//! Authentication against the helpdesk backend.
//!
//! `AuthService` performs the login exchange through the shared
//! `ApiClient` and owns the Unauthenticated -> Authenticated transition:
//! the returned token is written to the session store, after which every
//! request carries it.

pub mod service;

pub use service::AuthService;
