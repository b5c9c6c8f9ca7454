//! Tracker use cases.
//!
//! The server owns a single turn order. Every operation takes the lock for a
//! short critical section and hands back a snapshot for the response. Portrait
//! checks for premade combatants happen before the lock is taken, so the
//! tracker stays usable while they are pending.

mod error;

use std::sync::Arc;
use tokio::sync::RwLock;

use vdm_domain::{
    Combatant, CombatantEdit, CombatantTemplate, HpChange, NewCombatant, TurnOrder,
    PREMADE_INITIATIVE_RANGE,
};

use crate::infrastructure::ports::{PortraitValidator, RandomPort};

pub use error::TrackerError;

/// Result of an HP mutation: the new state plus what kind of change it was.
#[derive(Debug, Clone)]
pub struct HpUpdate {
    pub order: TurnOrder,
    pub change: HpChange,
}

/// The live combat tracker.
pub struct Tracker {
    state: RwLock<TurnOrder>,
    portraits: Arc<dyn PortraitValidator>,
    random: Arc<dyn RandomPort>,
}

impl Tracker {
    pub fn new(portraits: Arc<dyn PortraitValidator>, random: Arc<dyn RandomPort>) -> Self {
        Self {
            state: RwLock::new(TurnOrder::new()),
            portraits,
            random,
        }
    }

    /// Current state.
    pub async fn snapshot(&self) -> TurnOrder {
        self.state.read().await.clone()
    }

    /// Add a combatant entered by hand.
    pub async fn add(&self, input: NewCombatant) -> Result<TurnOrder, TrackerError> {
        let combatant = Combatant::create(input)?;
        let mut order = self.state.write().await;
        let index = order.add(combatant);
        tracing::debug!(index, "Added combatant");
        Ok(order.clone())
    }

    /// Instantiate a premade template with a rolled initiative and full HP.
    ///
    /// A portrait that fails to load is dropped; the combatant is still added.
    pub async fn add_premade(&self, template: CombatantTemplate) -> TurnOrder {
        let initiative = self
            .random
            .gen_range(*PREMADE_INITIATIVE_RANGE.start(), *PREMADE_INITIATIVE_RANGE.end());

        let portrait = match template.portrait() {
            Some(portrait) if self.portraits.is_loadable(portrait).await => Some(portrait.clone()),
            Some(_) => {
                tracing::info!(name = %template.name(), "Dropping portrait that failed to load");
                None
            }
            None => None,
        };

        let combatant = Combatant::from_template(&template, initiative).with_portrait(portrait);
        let mut order = self.state.write().await;
        let index = order.add(combatant);
        tracing::debug!(index, initiative, name = %template.name(), "Added premade combatant");
        order.clone()
    }

    /// Replace every field of a combatant. Nothing changes if validation fails.
    pub async fn update(&self, index: usize, edit: CombatantEdit) -> Result<TurnOrder, TrackerError> {
        let mut order = self.state.write().await;
        order.update(index, edit)?;
        tracing::debug!(index, "Updated combatant");
        Ok(order.clone())
    }

    /// Set current HP to an absolute value, clamped at zero.
    pub async fn set_hp(&self, index: usize, value: i64) -> Result<HpUpdate, TrackerError> {
        let mut order = self.state.write().await;
        let change = order.set_hp(index, value)?;
        tracing::debug!(index, ?change, "Set combatant HP");
        Ok(HpUpdate {
            order: order.clone(),
            change,
        })
    }

    /// Apply damage (negative) or healing (positive), clamped at zero.
    pub async fn adjust_hp(&self, index: usize, delta: i64) -> Result<HpUpdate, TrackerError> {
        let mut order = self.state.write().await;
        let change = order.adjust_hp(index, delta)?;
        tracing::debug!(index, delta, ?change, "Adjusted combatant HP");
        Ok(HpUpdate {
            order: order.clone(),
            change,
        })
    }

    pub async fn toggle_faction(&self, index: usize) -> Result<TurnOrder, TrackerError> {
        let mut order = self.state.write().await;
        let faction = order.toggle_faction(index)?;
        tracing::debug!(index, %faction, "Toggled combatant faction");
        Ok(order.clone())
    }

    pub async fn remove(&self, index: usize) -> Result<TurnOrder, TrackerError> {
        let mut order = self.state.write().await;
        let removed = order.remove(index)?;
        tracing::info!(index, name = %removed.name(), "Removed combatant");
        Ok(order.clone())
    }

    /// Advance to the next living combatant.
    pub async fn next(&self) -> TurnOrder {
        let mut order = self.state.write().await;
        order.next_turn();
        order.clone()
    }

    /// Step back to the previous living combatant.
    pub async fn previous(&self) -> TurnOrder {
        let mut order = self.state.write().await;
        order.previous_turn();
        order.clone()
    }

    /// Jump straight to a combatant, dead or alive.
    pub async fn select(&self, index: usize) -> Result<TurnOrder, TrackerError> {
        let mut order = self.state.write().await;
        order.select(index)?;
        Ok(order.clone())
    }

    /// Read-only projection of a combatant for persistence.
    pub async fn template_of(&self, index: usize) -> Result<CombatantTemplate, TrackerError> {
        let order = self.state.read().await;
        order
            .get(index)
            .map(Combatant::to_template)
            .ok_or_else(|| vdm_domain::DomainError::not_found("Combatant", index.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::{MockPortraitValidator, MockRandomPort};
    use vdm_domain::{Faction, PortraitRef};

    fn new_combatant(name: &str, total_hp: i64, initiative: i64, faction: Faction) -> NewCombatant {
        NewCombatant {
            name: name.to_string(),
            total_hp,
            initiative,
            faction,
            portrait: None,
        }
    }

    fn tracker() -> Tracker {
        Tracker::new(Arc::new(MockPortraitValidator::new()), Arc::new(FixedRandom(10)))
    }

    fn names(order: &TurnOrder) -> Vec<&str> {
        order.combatants().iter().map(|c| c.name().as_str()).collect()
    }

    #[tokio::test]
    async fn when_combatants_added_then_sorted_by_initiative() {
        let tracker = tracker();
        tracker
            .add(new_combatant("Goblin", 25, 15, Faction::Enemy))
            .await
            .expect("valid goblin");
        let order = tracker
            .add(new_combatant("Hero", 100, 20, Faction::Ally))
            .await
            .expect("valid hero");

        assert_eq!(names(&order), ["Hero", "Goblin"]);
        assert_eq!(order.get(0).map(Combatant::current_hp), Some(100));
    }

    #[tokio::test]
    async fn when_input_invalid_then_nothing_added() {
        let tracker = tracker();
        let result = tracker.add(new_combatant("   ", 10, 1, Faction::Ally)).await;
        assert!(matches!(result, Err(TrackerError::Domain(_))));
        assert!(tracker.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn when_premade_added_then_initiative_is_rolled_in_range() {
        let mut random = MockRandomPort::new();
        random
            .expect_gen_range()
            .withf(|min, max| *min == 1 && *max == 20)
            .times(1)
            .returning(|_, _| 17);
        let tracker = Tracker::new(Arc::new(MockPortraitValidator::new()), Arc::new(random));

        let template = CombatantTemplate::new("Orc Berserker", 25, Faction::Enemy, None)
            .expect("valid template");
        let order = tracker.add_premade(template).await;

        let orc = order.get(0).expect("orc added");
        assert_eq!(orc.initiative(), 17);
        assert_eq!(orc.current_hp(), 25);
        assert_eq!(orc.total_hp(), 25);
    }

    #[tokio::test]
    async fn when_premade_portrait_fails_then_it_is_dropped() {
        let mut portraits = MockPortraitValidator::new();
        portraits.expect_is_loadable().times(1).returning(|_| false);
        let tracker = Tracker::new(Arc::new(portraits), Arc::new(FixedRandom(5)));

        let template = CombatantTemplate::new(
            "Goblin Warrior",
            15,
            Faction::Enemy,
            PortraitRef::parse("https://example.invalid/goblin.png"),
        )
        .expect("valid template");
        let order = tracker.add_premade(template).await;

        assert_eq!(order.len(), 1);
        assert!(order.get(0).and_then(Combatant::portrait).is_none());
    }

    #[tokio::test]
    async fn when_premade_portrait_loads_then_it_is_kept() {
        let mut portraits = MockPortraitValidator::new();
        portraits.expect_is_loadable().times(1).returning(|_| true);
        let tracker = Tracker::new(Arc::new(portraits), Arc::new(FixedRandom(5)));

        let template = CombatantTemplate::new(
            "Elven Ranger",
            20,
            Faction::Ally,
            PortraitRef::parse("/tokens/default/img/elf.png"),
        )
        .expect("valid template");
        let order = tracker.add_premade(template).await;

        let portrait = order.get(0).and_then(Combatant::portrait).expect("portrait kept");
        assert_eq!(portrait.as_str(), "/tokens/default/img/elf.png");
    }

    #[tokio::test]
    async fn when_hp_adjusted_then_change_is_reported() {
        let tracker = tracker();
        tracker
            .add(new_combatant("Goblin", 25, 15, Faction::Enemy))
            .await
            .expect("valid goblin");

        let update = tracker.adjust_hp(0, -30).await.expect("goblin exists");
        assert_eq!(update.change, HpChange::Downed { amount: 25 });
        assert_eq!(update.order.get(0).map(Combatant::current_hp), Some(0));

        let update = tracker.set_hp(0, 75).await.expect("goblin exists");
        assert_eq!(update.change, HpChange::Revived { new_hp: 75 });
        assert_eq!(update.order.get(0).map(Combatant::total_hp), Some(25));
    }

    #[tokio::test]
    async fn when_dead_enemy_follows_hero_then_next_stays_on_hero() {
        let tracker = tracker();
        tracker
            .add(new_combatant("Hero", 100, 20, Faction::Ally))
            .await
            .expect("valid hero");
        tracker
            .add(new_combatant("Goblin", 25, 15, Faction::Enemy))
            .await
            .expect("valid goblin");
        tracker.set_hp(1, 0).await.expect("goblin exists");
        tracker.select(0).await.expect("hero exists");

        let order = tracker.next().await;
        assert_eq!(order.cursor(), 0);
        let order = tracker.previous().await;
        assert_eq!(order.cursor(), 0);
    }

    #[tokio::test]
    async fn when_index_out_of_range_then_not_found() {
        let tracker = tracker();
        let err = tracker.remove(3).await.expect_err("empty tracker");
        assert!(err.is_not_found());
        assert!(tracker.select(0).await.expect_err("empty").is_not_found());
        assert!(tracker.template_of(0).await.expect_err("empty").is_not_found());
    }

    #[tokio::test]
    async fn when_faction_toggled_then_views_follow() {
        let tracker = tracker();
        tracker
            .add(new_combatant("Bandit", 11, 8, Faction::Enemy))
            .await
            .expect("valid bandit");

        let order = tracker.toggle_faction(0).await.expect("bandit exists");
        assert_eq!(order.allies().len(), 1);
        assert!(order.enemies().is_empty());
    }

    #[tokio::test]
    async fn when_template_requested_then_live_state_is_left_out() {
        let tracker = tracker();
        tracker
            .add(new_combatant("Cleric", 18, 12, Faction::Ally))
            .await
            .expect("valid cleric");
        tracker.adjust_hp(0, -5).await.expect("cleric exists");

        let template = tracker.template_of(0).await.expect("cleric exists");
        assert_eq!(template.name().as_str(), "Cleric");
        assert_eq!(template.total_hp(), 18);
        assert_eq!(template.faction(), Faction::Ally);
    }

    #[tokio::test]
    async fn when_edit_invalid_then_combatant_unchanged() {
        let tracker = tracker();
        tracker
            .add(new_combatant("Cleric", 18, 12, Faction::Ally))
            .await
            .expect("valid cleric");

        let edit = CombatantEdit {
            name: "Cleric".to_string(),
            current_hp: -1,
            total_hp: 18,
            initiative: 12,
            faction: Faction::Ally,
            portrait: None,
        };
        assert!(tracker.update(0, edit).await.is_err());
        assert_eq!(tracker.snapshot().await.get(0).map(Combatant::current_hp), Some(18));
    }
}
