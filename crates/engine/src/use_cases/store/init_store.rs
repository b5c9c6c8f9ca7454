//! Create the template table and seed it with sample templates.

use std::sync::Arc;

use vdm_domain::{CombatantTemplate, Faction, PortraitRef, TemplateCategory};

use crate::infrastructure::ports::{StoreError, StoredTemplate, TemplateStore};

/// Sample rows written by [`InitStore`]: name, total HP, faction, portrait, category.
const SEEDS: [(&str, i64, Faction, Option<&str>, TemplateCategory); 5] = [
    (
        "Goblin Warrior",
        15,
        Faction::Enemy,
        Some("/tokens/default/img/goblin.png"),
        TemplateCategory::Default,
    ),
    (
        "Orc Berserker",
        25,
        Faction::Enemy,
        Some("/tokens/default/img/orc.png"),
        TemplateCategory::Default,
    ),
    (
        "Elven Ranger",
        20,
        Faction::Ally,
        Some("/tokens/default/img/elf.png"),
        TemplateCategory::Default,
    ),
    ("Custom Dragon", 100, Faction::Enemy, None, TemplateCategory::Custom),
    ("Healing Cleric", 18, Faction::Ally, None, TemplateCategory::Custom),
];

/// The sample templates as store rows.
pub fn seed_templates() -> Result<Vec<StoredTemplate>, StoreError> {
    SEEDS
        .iter()
        .map(|&(name, total_hp, faction, portrait, category)| {
            let template =
                CombatantTemplate::new(name, total_hp, faction, portrait.and_then(PortraitRef::parse))
                    .map_err(|e| StoreError::serialization(e.message()))?;
            Ok(StoredTemplate::new(template, category))
        })
        .collect()
}

pub struct InitStore {
    store: Arc<dyn TemplateStore>,
}

impl InitStore {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Returns the number of sample templates added. Running it twice adds
    /// the samples twice; the table has no uniqueness.
    pub async fn execute(&self) -> Result<usize, StoreError> {
        self.store.ensure_table().await?;
        let added = self.store.insert(seed_templates()?).await?;
        tracing::info!(added, "Template store initialized with sample templates");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockTemplateStore;

    #[test]
    fn seeds_cover_both_categories() {
        let seeds = seed_templates().expect("seeds are valid");
        assert_eq!(seeds.len(), 5);
        let defaults = seeds
            .iter()
            .filter(|row| row.category == TemplateCategory::Default)
            .count();
        assert_eq!(defaults, 3);
        assert_eq!(seeds[3].template.name().as_str(), "Custom Dragon");
        assert_eq!(seeds[3].template.total_hp(), 100);
        assert!(seeds[3].template.portrait().is_none());
    }

    #[tokio::test]
    async fn when_table_created_then_seeds_inserted() {
        let mut store = MockTemplateStore::new();
        store.expect_ensure_table().times(1).returning(|| Ok(()));
        store
            .expect_insert()
            .withf(|rows| rows.len() == 5)
            .times(1)
            .returning(|rows| Ok(rows.len()));

        let added = InitStore::new(Arc::new(store)).execute().await.expect("init succeeds");
        assert_eq!(added, 5);
    }

    #[tokio::test]
    async fn when_table_creation_fails_then_nothing_inserted() {
        let mut store = MockTemplateStore::new();
        store
            .expect_ensure_table()
            .returning(|| Err(StoreError::unavailable("connection refused")));
        store.expect_insert().never();

        let result = InitStore::new(Arc::new(store)).execute().await;
        assert!(result.is_err());
    }
}
