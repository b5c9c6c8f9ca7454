//! API layer - HTTP entry points.

pub mod http;
mod store;
mod templates;
mod tracker;

pub use http::{routes, ApiError, ApiJson};
