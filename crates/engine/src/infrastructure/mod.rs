//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod catalog_files;
pub mod clickhouse;
pub mod clock;
pub mod config;
pub mod memory_store;
pub mod portrait;
pub mod ports;
pub mod template_files;
