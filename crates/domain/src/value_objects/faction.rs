//! Ally/enemy classification
//!
//! Replaces the raw `ally: bool` flag of the template files with an enum.
//! The wire form stays a boolean (see `Faction::from_ally_flag`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side a combatant fights on.
///
/// # Examples
///
/// ```
/// use vdm_domain::value_objects::Faction;
///
/// let side = Faction::from_ally_flag(false);
/// assert_eq!(side, Faction::Enemy);
/// assert_eq!(side.toggled(), Faction::Ally);
/// assert!(side.toggled().is_ally());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    #[default]
    Ally,
    Enemy,
}

impl Faction {
    /// `true` maps to `Ally`, `false` to `Enemy`.
    #[inline]
    pub fn from_ally_flag(ally: bool) -> Self {
        if ally {
            Self::Ally
        } else {
            Self::Enemy
        }
    }

    #[inline]
    pub fn is_ally(self) -> bool {
        matches!(self, Self::Ally)
    }

    #[inline]
    pub fn is_enemy(self) -> bool {
        matches!(self, Self::Enemy)
    }

    /// The opposite side.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ally => write!(f, "ally"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

impl From<bool> for Faction {
    fn from(ally: bool) -> Self {
        Self::from_ally_flag(ally)
    }
}
