//! Virtual DM Engine library.
//!
//! Server side of the combat tracker: the live turn order, the premade
//! template catalog and the remote template store.
//!
//! ## Structure
//!
//! - `use_cases/` - Tracker, template and store operations
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared helpers for handler and use case tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
