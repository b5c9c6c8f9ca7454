//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area. Use cases orchestrate
//! the domain aggregates and the infrastructure ports.

pub mod store;
pub mod templates;
pub mod tracker;

pub use store::StoreUseCases;
pub use templates::TemplateUseCases;
pub use tracker::Tracker;
