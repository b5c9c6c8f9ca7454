//! Domain events - outcomes returned from aggregate mutations

mod combatant_events;

pub use combatant_events::HpChange;
