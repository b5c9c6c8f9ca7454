//! Combatant domain events

/// Outcome of changing a combatant's current HP.
///
/// Lets a presentation layer choose a cue (damage vs heal) without diffing
/// state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpChange {
    /// HP did not move
    Unchanged { hp: u32 },
    /// HP dropped but stayed above zero
    Damaged { amount: u32, remaining_hp: u32 },
    /// HP dropped to zero
    Downed { amount: u32 },
    /// HP rose from a positive value
    Healed { amount: u32, new_hp: u32 },
    /// HP rose from zero
    Revived { new_hp: u32 },
}

impl HpChange {
    /// Classify a transition from `old` to `new` current HP.
    pub fn between(old: u32, new: u32) -> Self {
        match new.cmp(&old) {
            std::cmp::Ordering::Equal => Self::Unchanged { hp: new },
            std::cmp::Ordering::Less if new == 0 => Self::Downed { amount: old },
            std::cmp::Ordering::Less => Self::Damaged {
                amount: old - new,
                remaining_hp: new,
            },
            std::cmp::Ordering::Greater if old == 0 => Self::Revived { new_hp: new },
            std::cmp::Ordering::Greater => Self::Healed {
                amount: new - old,
                new_hp: new,
            },
        }
    }

    pub fn is_damage(&self) -> bool {
        matches!(self, Self::Damaged { .. } | Self::Downed { .. })
    }

    pub fn is_heal(&self) -> bool {
        matches!(self, Self::Healed { .. } | Self::Revived { .. })
    }

    /// HP after the change.
    pub fn new_hp(&self) -> u32 {
        match *self {
            Self::Unchanged { hp } => hp,
            Self::Damaged { remaining_hp, .. } => remaining_hp,
            Self::Downed { .. } => 0,
            Self::Healed { new_hp, .. } | Self::Revived { new_hp } => new_hp,
        }
    }
}
