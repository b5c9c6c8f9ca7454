//! Virtual DM domain: combatants, turn order and premade templates.
//!
//! Pure business logic with no I/O. Random initiative rolls are supplied by
//! the caller.

extern crate self as vdm_domain;

pub mod aggregates;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod events;
pub mod value_objects;

pub use aggregates::{
    Combatant, CombatantEdit, Direction, Indexed, NewCombatant, StepMode, TurnOrder,
};
pub use catalog::{merge_templates, parse_catalog_listing, TemplatesByCategory};
pub use entities::{CombatantTemplate, TemplateCategory, PREMADE_INITIATIVE_RANGE};
pub use error::{DomainError, DomainResult};
pub use events::HpChange;
pub use value_objects::{Faction, HealthBand, HitPoints, PortraitKind, PortraitRef, TokenName};
