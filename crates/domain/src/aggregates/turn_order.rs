//! Turn order aggregate - the encounter's combatant list and selection cursor
//!
//! State is `(combatants, cursor)` only. There is no round counter.
//!
//! # Invariants
//!
//! - Combatants are sorted by descending initiative after every mutation;
//!   ties keep their previous relative order.
//! - `cursor < len()` whenever the list is non-empty, and `0` when it is empty.
//! - After a mutation the cursor follows the previously current combatant,
//!   matched by name (first match wins). If it is gone the cursor is clamped.

use crate::aggregates::combatant::{Combatant, CombatantEdit};
use crate::error::DomainError;
use crate::events::HpChange;
use crate::value_objects::{Faction, TokenName};

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Which slots a navigation step may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    /// Enemies at 0 HP are passed over. Dead allies still take turns.
    #[default]
    SkipDeadEnemies,
    /// Plain circular stepping.
    Plain,
}

/// A combatant paired with its index in the full turn order.
#[derive(Debug, Clone, Copy)]
pub struct Indexed<'a> {
    pub index: usize,
    pub combatant: &'a Combatant,
}

/// The encounter: ordered combatants plus whose turn it is.
///
/// # Example
///
/// ```
/// use vdm_domain::aggregates::{Combatant, NewCombatant, TurnOrder};
/// use vdm_domain::value_objects::Faction;
///
/// let mut order = TurnOrder::new();
/// for (name, hp, init, faction) in [("Goblin", 25, 15, Faction::Enemy), ("Hero", 100, 20, Faction::Ally)] {
///     let combatant = Combatant::create(NewCombatant {
///         name: name.into(),
///         total_hp: hp,
///         initiative: init,
///         faction,
///         portrait: None,
///     })
///     .unwrap();
///     order.add(combatant);
/// }
///
/// assert_eq!(order.get(0).unwrap().name().as_str(), "Hero");
/// // The cursor stayed on the Goblin when the Hero was inserted ahead of it.
/// assert_eq!(order.current().unwrap().name().as_str(), "Goblin");
/// assert_eq!(order.next_turn(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOrder {
    combatants: Vec<Combatant>,
    cursor: usize,
}

impl TurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    #[inline]
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Combatant> {
        self.combatants.get(index)
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The combatant whose turn it is, if any.
    pub fn current(&self) -> Option<&Combatant> {
        self.combatants.get(self.cursor)
    }

    /// Index of the first combatant with this name.
    pub fn position_of(&self, name: &TokenName) -> Option<usize> {
        self.combatants.iter().position(|c| c.name() == name)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a combatant in initiative order and return its index.
    ///
    /// A newcomer goes after any existing combatants with the same initiative.
    pub fn add(&mut self, combatant: Combatant) -> usize {
        let tracked = self.current_name();
        let index = self
            .combatants
            .partition_point(|c| c.initiative() >= combatant.initiative());
        self.combatants.insert(index, combatant);
        self.reassociate(tracked);
        index
    }

    /// Apply the full edit form to the combatant at `index`.
    ///
    /// A rejected edit changes nothing. If the edited combatant was current,
    /// the cursor follows it under its new name.
    pub fn update(&mut self, index: usize, edit: CombatantEdit) -> Result<(), DomainError> {
        let was_current = index == self.cursor;
        let mut tracked = self.current_name();
        let combatant = self.combatant_mut(index)?;
        combatant.apply_edit(edit)?;
        if was_current {
            tracked = Some(combatant.name().clone());
        }
        self.resort();
        self.reassociate(tracked);
        Ok(())
    }

    /// Set absolute HP on the combatant at `index`.
    pub fn set_hp(&mut self, index: usize, value: i64) -> Result<HpChange, DomainError> {
        let tracked = self.current_name();
        let change = self.combatant_mut(index)?.set_hp(value)?;
        self.resort();
        self.reassociate(tracked);
        Ok(change)
    }

    /// Apply a signed HP delta to the combatant at `index`.
    pub fn adjust_hp(&mut self, index: usize, delta: i64) -> Result<HpChange, DomainError> {
        let tracked = self.current_name();
        let change = self.combatant_mut(index)?.adjust_hp(delta)?;
        self.resort();
        self.reassociate(tracked);
        Ok(change)
    }

    /// Flip the combatant at `index` between ally and enemy.
    pub fn toggle_faction(&mut self, index: usize) -> Result<Faction, DomainError> {
        Ok(self.combatant_mut(index)?.toggle_faction())
    }

    /// Remove and return the combatant at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Combatant, DomainError> {
        if index >= self.combatants.len() {
            return Err(not_found(index));
        }
        let tracked = self.current_name();
        let removed = self.combatants.remove(index);
        self.reassociate(tracked);
        Ok(removed)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move the cursor one step and return its new position.
    ///
    /// With [`StepMode::SkipDeadEnemies`] at most `len()` slots are tried; if
    /// every other slot holds a dead enemy the cursor stays where it is.
    pub fn advance(&mut self, direction: Direction, mode: StepMode) -> usize {
        let len = self.combatants.len();
        if len == 0 {
            self.cursor = 0;
            return 0;
        }

        for step in 1..=len {
            let candidate = match direction {
                Direction::Next => (self.cursor + step) % len,
                Direction::Previous => (self.cursor + len - step % len) % len,
            };
            let skip = mode == StepMode::SkipDeadEnemies && self.combatants[candidate].is_dead_enemy();
            if !skip {
                self.cursor = candidate;
                break;
            }
        }
        self.cursor
    }

    /// Next living turn (dead enemies skipped).
    pub fn next_turn(&mut self) -> usize {
        self.advance(Direction::Next, StepMode::SkipDeadEnemies)
    }

    /// Previous living turn (dead enemies skipped).
    pub fn previous_turn(&mut self) -> usize {
        self.advance(Direction::Previous, StepMode::SkipDeadEnemies)
    }

    /// Jump straight to `index`, ignoring the skip rule.
    pub fn select(&mut self, index: usize) -> Result<&Combatant, DomainError> {
        if index >= self.combatants.len() {
            return Err(not_found(index));
        }
        self.cursor = index;
        Ok(&self.combatants[index])
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Cycling view: turn order without dead enemies, keeping full-list indices.
    pub fn roster(&self) -> Vec<Indexed<'_>> {
        self.indexed()
            .filter(|entry| !entry.combatant.is_dead_enemy())
            .collect()
    }

    /// Every ally in turn order, dead or alive.
    pub fn allies(&self) -> Vec<Indexed<'_>> {
        self.indexed().filter(|entry| entry.combatant.is_ally()).collect()
    }

    /// Every enemy in turn order, dead or alive.
    pub fn enemies(&self) -> Vec<Indexed<'_>> {
        self.indexed().filter(|entry| entry.combatant.is_enemy()).collect()
    }

    fn indexed(&self) -> impl Iterator<Item = Indexed<'_>> {
        self.combatants
            .iter()
            .enumerate()
            .map(|(index, combatant)| Indexed { index, combatant })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn combatant_mut(&mut self, index: usize) -> Result<&mut Combatant, DomainError> {
        self.combatants.get_mut(index).ok_or_else(|| not_found(index))
    }

    fn current_name(&self) -> Option<TokenName> {
        self.current().map(|c| c.name().clone())
    }

    /// Stable sort, descending initiative.
    fn resort(&mut self) {
        self.combatants
            .sort_by(|a, b| b.initiative().cmp(&a.initiative()));
    }

    fn reassociate(&mut self, tracked: Option<TokenName>) {
        if let Some(index) = tracked.as_ref().and_then(|name| self.position_of(name)) {
            self.cursor = index;
            return;
        }
        self.cursor = self.cursor.min(self.combatants.len().saturating_sub(1));
    }
}

fn not_found(index: usize) -> DomainError {
    DomainError::not_found("Combatant", index.to_string())
}
