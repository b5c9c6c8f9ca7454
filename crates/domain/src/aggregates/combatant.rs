//! Combatant aggregate - a token in the turn order
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: all state is reached through accessors
//! - **Newtypes**: `TokenName`, `HitPoints`, `PortraitRef` are valid by construction
//! - **Enum over bool**: `Faction` replaces the `ally` flag
//! - **Domain events**: HP mutations return `HpChange`

use crate::entities::CombatantTemplate;
use crate::error::DomainError;
use crate::events::HpChange;
use crate::value_objects::{Faction, HitPoints, PortraitRef, TokenName};

/// Input for creating a combatant by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCombatant {
    pub name: String,
    pub total_hp: i64,
    pub initiative: i64,
    pub faction: Faction,
    pub portrait: Option<PortraitRef>,
}

/// Input for the full edit form. Every field is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatantEdit {
    pub name: String,
    pub current_hp: i64,
    pub total_hp: i64,
    pub initiative: i64,
    pub faction: Faction,
    pub portrait: Option<PortraitRef>,
}

/// A participant in the encounter.
///
/// # Invariants
///
/// - `name` is non-empty and trimmed
/// - total HP is positive, current HP is never negative
/// - current HP may exceed total HP
///
/// # Example
///
/// ```
/// use vdm_domain::aggregates::{Combatant, NewCombatant};
/// use vdm_domain::value_objects::Faction;
///
/// let goblin = Combatant::create(NewCombatant {
///     name: "Goblin".into(),
///     total_hp: 25,
///     initiative: 15,
///     faction: Faction::Enemy,
///     portrait: None,
/// })
/// .unwrap();
///
/// assert_eq!(goblin.current_hp(), 25);
/// assert!(!goblin.is_dead());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    name: TokenName,
    hit_points: HitPoints,
    initiative: i32,
    faction: Faction,
    portrait: Option<PortraitRef>,
}

impl Combatant {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Build from pre-validated parts.
    pub fn new(name: TokenName, hit_points: HitPoints, initiative: i32, faction: Faction) -> Self {
        Self {
            name,
            hit_points,
            initiative,
            faction,
            portrait: None,
        }
    }

    /// Validate user input and create a combatant at full health.
    ///
    /// Nothing is created if any field is invalid.
    pub fn create(input: NewCombatant) -> Result<Self, DomainError> {
        let name = TokenName::new(input.name)?;
        let hit_points = HitPoints::full(input.total_hp)?;
        let initiative = validate_initiative(input.initiative)?;
        Ok(Self::new(name, hit_points, initiative, input.faction).with_portrait(input.portrait))
    }

    /// Instantiate a premade template with the given initiative roll.
    ///
    /// The portrait is copied from the template as-is; callers that validate
    /// portraits should pass a template whose portrait was already checked.
    pub fn from_template(template: &CombatantTemplate, initiative: i32) -> Self {
        let hit_points = HitPoints::from_total(template.total_hp());
        Self::new(template.name().clone(), hit_points, initiative, template.faction())
            .with_portrait(template.portrait().cloned())
    }

    pub fn with_portrait(mut self, portrait: Option<PortraitRef>) -> Self {
        self.portrait = portrait;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &TokenName {
        &self.name
    }

    #[inline]
    pub fn hit_points(&self) -> &HitPoints {
        &self.hit_points
    }

    #[inline]
    pub fn current_hp(&self) -> u32 {
        self.hit_points.current()
    }

    #[inline]
    pub fn total_hp(&self) -> u32 {
        self.hit_points.total()
    }

    #[inline]
    pub fn initiative(&self) -> i32 {
        self.initiative
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
    pub fn is_enemy(&self) -> bool {
        self.faction.is_enemy()
    }

    #[inline]
    pub fn portrait(&self) -> Option<&PortraitRef> {
        self.portrait.as_ref()
    }

    /// Current HP at zero. Dead allies still take turns.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hit_points.is_down()
    }

    /// Dead enemies drop out of turn cycling and the roster.
    #[inline]
    pub fn is_dead_enemy(&self) -> bool {
        self.is_enemy() && self.is_dead()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replace every field from the edit form.
    ///
    /// All fields are validated before anything is written, so a rejected
    /// edit leaves the combatant untouched.
    pub fn apply_edit(&mut self, edit: CombatantEdit) -> Result<(), DomainError> {
        let name = TokenName::new(edit.name)?;
        let hit_points = HitPoints::new(edit.current_hp, edit.total_hp)?;
        let initiative = validate_initiative(edit.initiative)?;

        self.name = name;
        self.hit_points = hit_points;
        self.initiative = initiative;
        self.faction = edit.faction;
        self.portrait = edit.portrait;
        Ok(())
    }

    /// Set current HP to `max(0, value)`.
    pub fn set_hp(&mut self, value: i64) -> Result<HpChange, DomainError> {
        self.hit_points.set_current(value)
    }

    /// Apply a signed HP delta, clamped at zero.
    pub fn adjust_hp(&mut self, delta: i64) -> Result<HpChange, DomainError> {
        self.hit_points.adjust(delta)
    }

    /// Switch sides and return the new faction.
    pub fn toggle_faction(&mut self) -> Faction {
        self.faction = self.faction.toggled();
        self.faction
    }

    /// Read-only projection used by "save to custom".
    pub fn to_template(&self) -> CombatantTemplate {
        CombatantTemplate::from_parts(
            self.name.clone(),
            self.hit_points.total(),
            self.faction,
            self.portrait.clone(),
        )
    }
}

fn validate_initiative(initiative: i64) -> Result<i32, DomainError> {
    i32::try_from(initiative).map_err(|_| DomainError::validation("Initiative must be a valid number"))
}
