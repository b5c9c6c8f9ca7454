//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns domain events from mutations
//!
//! # Rustic DDD Principles
//!
//! | Java DDD Pattern | Rustic Equivalent |
//! |------------------|-------------------|
//! | Private fields + getters | Newtypes valid by construction |
//! | Aggregate root guards | Ownership (borrow checker enforces) |
//! | Factory pattern | `::create()` validating an input struct |
//! | Domain Events | Return enums from mutations (`HpChange`) |

pub mod combatant;
pub mod turn_order;

pub use combatant::{Combatant, CombatantEdit, NewCombatant};
pub use turn_order::{Direction, Indexed, StepMode, TurnOrder};
