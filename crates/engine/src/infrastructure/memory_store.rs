//! In-process template store, used when no ClickHouse URL is configured.
//!
//! Same contract as the remote table: append-only, no uniqueness, rows listed
//! by category then name. Contents are lost on restart.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{ClockPort, StoreError, StoredTemplate, TemplateStore};

pub struct InMemoryTemplateStore {
    rows: RwLock<Vec<StoredTemplate>>,
    table_created: RwLock<bool>,
    clock: Arc<dyn ClockPort>,
}

impl InMemoryTemplateStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            table_created: RwLock::new(false),
            clock,
        }
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn is_available(&self) -> bool {
        *self.table_created.read().await
    }

    async fn ensure_table(&self) -> Result<(), StoreError> {
        *self.table_created.write().await = true;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredTemplate>, StoreError> {
        if !self.is_available().await {
            return Err(StoreError::query("list_templates", "Table tokens does not exist"));
        }
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.template.name().as_str().cmp(b.template.name().as_str()))
        });
        Ok(rows)
    }

    async fn insert(&self, rows: Vec<StoredTemplate>) -> Result<usize, StoreError> {
        if !self.is_available().await {
            return Err(StoreError::query("insert_templates", "Table tokens does not exist"));
        }
        let now = self.clock.now();
        let count = rows.len();
        let mut stored = self.rows.write().await;
        stored.extend(rows.into_iter().map(|mut row| {
            row.created_at.get_or_insert(now);
            row
        }));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use vdm_domain::{CombatantTemplate, Faction, TemplateCategory};

    fn store() -> InMemoryTemplateStore {
        InMemoryTemplateStore::new(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )))
    }

    fn row(name: &str, category: TemplateCategory) -> StoredTemplate {
        StoredTemplate::new(
            CombatantTemplate::new(name, 10, Faction::Enemy, None).unwrap(),
            category,
        )
    }

    #[tokio::test]
    async fn unavailable_until_table_exists() {
        let store = store();
        assert!(store.ping().await.is_ok());
        assert!(!store.is_available().await);
        assert!(store.list().await.is_err());
        assert!(store.insert(vec![row("Orc", TemplateCategory::Custom)]).await.is_err());

        store.ensure_table().await.unwrap();
        assert!(store.is_available().await);
    }

    #[tokio::test]
    async fn lists_by_category_then_name_with_duplicates() {
        let store = store();
        store.ensure_table().await.unwrap();
        store
            .insert(vec![
                row("Orc", TemplateCategory::Default),
                row("Dragon", TemplateCategory::Custom),
                row("Goblin", TemplateCategory::Default),
                row("Dragon", TemplateCategory::Custom),
            ])
            .await
            .unwrap();

        let rows = store.list().await.unwrap();
        let listed: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.category.as_str(), r.template.name().as_str()))
            .collect();
        assert_eq!(
            listed,
            [("custom", "Dragon"), ("custom", "Dragon"), ("default", "Goblin"), ("default", "Orc")]
        );
        assert!(rows.iter().all(|r| r.created_at.is_some()));
    }
}
