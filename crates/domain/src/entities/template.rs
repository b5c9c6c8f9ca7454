//! Premade combatant templates
//!
//! A template is what the load dialog offers and what "save to custom"
//! persists: everything about a combatant except its live state (current HP,
//! initiative).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Faction, PortraitRef, TokenName};

/// Initiative for a combatant instantiated from a template is rolled in this range.
pub const PREMADE_INITIATIVE_RANGE: RangeInclusive<i32> = 1..=20;

/// A stored combatant definition.
///
/// # Invariants
///
/// - `name` is non-empty and trimmed (enforced by `TokenName`)
/// - `total_hp > 0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatantTemplate {
    name: TokenName,
    total_hp: u32,
    faction: Faction,
    portrait: Option<PortraitRef>,
}

impl CombatantTemplate {
    /// Validate and build a template.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is blank or `total_hp`
    /// is not a positive number that fits the store's `UInt32` column.
    pub fn new(
        name: impl Into<String>,
        total_hp: i64,
        faction: Faction,
        portrait: Option<PortraitRef>,
    ) -> Result<Self, DomainError> {
        let name = TokenName::new(name)?;
        if total_hp <= 0 {
            return Err(DomainError::validation("Total HP must be a positive number"));
        }
        let total_hp = u32::try_from(total_hp)
            .map_err(|_| DomainError::validation("Total HP is too large"))?;
        Ok(Self {
            name,
            total_hp,
            faction,
            portrait,
        })
    }

    /// Build from already-validated parts.
    pub(crate) fn from_parts(
        name: TokenName,
        total_hp: u32,
        faction: Faction,
        portrait: Option<PortraitRef>,
    ) -> Self {
        Self {
            name,
            total_hp,
            faction,
            portrait,
        }
    }

    #[inline]
    pub fn name(&self) -> &TokenName {
        &self.name
    }

    #[inline]
    pub fn total_hp(&self) -> u32 {
        self.total_hp
    }

    #[inline]
    pub fn faction(&self) -> Faction {
        self.faction
    }

    #[inline]
    pub fn is_ally(&self) -> bool {
        self.faction.is_ally()
    }

    #[inline]
    pub fn portrait(&self) -> Option<&PortraitRef> {
        self.portrait.as_ref()
    }

    /// Replace the portrait (used after validation drops a broken one).
    pub fn with_portrait(mut self, portrait: Option<PortraitRef>) -> Self {
        self.portrait = portrait;
        self
    }
}

/// Catalog category a template belongs to. Maps to a directory on disk and to
/// the `category` column of the remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    /// Shipped premade monsters and characters
    Default,
    /// User-created templates
    #[default]
    Custom,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 2] = [TemplateCategory::Default, TemplateCategory::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Custom => "custom",
        }
    }

    /// Lenient mapping for stored rows: anything that is not `default` is
    /// grouped under `custom`.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("default") {
            Self::Default
        } else {
            Self::Custom
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::parse(format!(
                "Unknown template category: {}",
                other
            ))),
        }
    }
}
