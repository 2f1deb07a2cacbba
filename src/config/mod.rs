//! Environment-driven configuration.
//!
//! Each submodule owns one concern and exposes a `from_env()` constructor.
//! Defaults are acceptable only for local development.

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;
