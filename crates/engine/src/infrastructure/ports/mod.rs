//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Template storage (ClickHouse or in-memory)
//! - The on-disk template catalog (read and write)
//! - Portrait checks (HTTP, embedded data, static files)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CatalogSource, StoredTemplate, TemplateFileSink, TemplateStore};

#[cfg(test)]
pub use repos::{MockCatalogSource, MockTemplateFileSink, MockTemplateStore};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::PortraitValidator;

#[cfg(test)]
pub use external::MockPortraitValidator;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{CatalogError, SinkError, StoreError};
