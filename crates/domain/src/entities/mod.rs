//! Domain entities - Core business objects

mod template;

pub use template::{CombatantTemplate, TemplateCategory, PREMADE_INITIATIVE_RANGE};
