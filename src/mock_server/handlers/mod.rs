//! HTTP request handlers for the mock server.

pub mod anime;
pub mod auth;

pub use anime::*;
