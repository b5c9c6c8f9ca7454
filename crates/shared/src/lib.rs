//! Virtual DM Shared - wire types for the engine's HTTP API
//!
//! This crate contains the JSON shapes exchanged with the browser client and
//! the template file format:
//! - DTOs for templates and the tracker view
//! - Request bodies with lenient numeric fields
//! - Response envelopes with `success` / `error`
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde and the domain crate
//! 2. **No business logic** - validation is delegated to the domain
//! 3. **Stable field names** - `totalHP`, `currentHP`, `imageUrl`

pub mod dto;
pub mod requests;
pub mod responses;

pub use dto::{
    HealthBandData, HpChangeData, StoredTemplateData, TemplateData, TokenView, TokensByCategory,
    TrackerView,
};
pub use requests::{
    AdjustHpRequest, CreateTokenRequest, EditTokenRequest, IntegerField, SaveTokenRequest,
    SetHpRequest,
};
pub use responses::{
    ErrorResponse, InitResponse, LoadTokensResponse, SaveResultResponse, SaveTokenResponse,
    SinkOutcome, StatusResponse, StoreTokensResponse, TemplateSources, TrackerResponse,
};
