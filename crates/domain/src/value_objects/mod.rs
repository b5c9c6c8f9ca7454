//! Value objects - Immutable objects defined by their attributes

mod faction;
mod hit_points;
mod names;
mod portrait;

pub use faction::Faction;
pub use hit_points::{HealthBand, HitPoints};
pub use names::TokenName;
pub use portrait::{PortraitKind, PortraitRef};
