//! Request middleware.
//!
//! - [`auth`]: `AuthUser` extractor that validates the bearer token
//! - [`role`]: role-gate middleware for educator/student route groups
//!
//! # Authentication flow
//!
//! 1. Client sends a request with `Authorization: Bearer <token>`
//! 2. The route group's role layer verifies the token and the role; a bad
//!    token short-circuits with 401, a wrong role with 403
//! 3. The handler extracts [`auth::AuthUser`] to read the caller's identity

pub mod auth;
pub mod role;
