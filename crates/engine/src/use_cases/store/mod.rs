//! Remote template store use cases.
//!
//! The store is optional. Each operation reports failure rather than
//! propagating it into tracker state.

mod error;
mod init_store;
mod list_stored;
mod save_to_store;

use std::sync::Arc;

use crate::infrastructure::ports::{StoreError, TemplateStore};

pub use error::{ListStoredError, SaveToStoreError};
pub use init_store::{seed_templates, InitStore};
pub use list_stored::ListStored;
pub use save_to_store::SaveToStore;

/// Container for store use cases.
pub struct StoreUseCases {
    pub test_connection: Arc<TestConnection>,
    pub init: Arc<InitStore>,
    pub list: Arc<ListStored>,
    pub save: Arc<SaveToStore>,
}

impl StoreUseCases {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self {
            test_connection: Arc::new(TestConnection::new(store.clone())),
            init: Arc::new(InitStore::new(store.clone())),
            list: Arc::new(ListStored::new(store.clone())),
            save: Arc::new(SaveToStore::new(store)),
        }
    }
}

/// Connectivity check.
pub struct TestConnection {
    store: Arc<dyn TemplateStore>,
}

impl TestConnection {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<(), StoreError> {
        self.store.ping().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Template store connection test failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockTemplateStore;

    #[tokio::test]
    async fn when_store_answers_then_connection_ok() {
        let mut store = MockTemplateStore::new();
        store.expect_ping().times(1).returning(|| Ok(()));

        let use_case = TestConnection::new(Arc::new(store));
        assert!(use_case.execute().await.is_ok());
    }

    #[tokio::test]
    async fn when_store_unreachable_then_error_returned() {
        let mut store = MockTemplateStore::new();
        store
            .expect_ping()
            .returning(|| Err(StoreError::unavailable("connection refused")));

        let use_case = TestConnection::new(Arc::new(store));
        let err = use_case.execute().await.expect_err("store is down");
        assert!(err.is_unavailable());
    }
}
