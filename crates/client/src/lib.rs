//! Typed HTTP client and state orchestration for the Whitebox
//! learning platform API.
//!
//! The crate splits along the same line as the backend it talks to:
//!
//! * [`http`] and [`endpoints`] wrap the REST surface with [`reqwest`],
//!   one method per backend route, all returning
//!   `Result<T, ApiError>`.
//! * [`session`] tracks the authenticated user and drives the
//!   login/refresh/bootstrap flows against a pluggable
//!   [`token::TokenStore`].
//! * [`pages`] assembles the multi-request read models the UI renders
//!   (course overviews, admin tables, lesson trees) and applies the
//!   post-mutation refetch rules.
//! * [`bell`] runs the background notification poll loop.
//!
//! All domain evaluation (locks, progress math, payload shaping) lives
//! in `whitebox-core`; this crate only moves data and sequences calls.

pub mod bell;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod pages;
pub mod session;
pub mod token;

pub use config::ClientConfig;
pub use error::ApiError;
pub use http::ApiClient;
