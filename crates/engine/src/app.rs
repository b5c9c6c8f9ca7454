//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    catalog_files::FileCatalogSource,
    clickhouse::ClickHouseTemplateStore,
    clock::{SystemClock, SystemRandom},
    config::EngineConfig,
    memory_store::InMemoryTemplateStore,
    portrait::HttpPortraitValidator,
    ports::{
        CatalogSource, ClockPort, PortraitValidator, RandomPort, TemplateFileSink, TemplateStore,
    },
    template_files::FileTemplateSink,
};
use crate::use_cases::{StoreUseCases, TemplateUseCases, Tracker};

/// Main application state.
///
/// Holds all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub tracker: Arc<Tracker>,
    pub templates: TemplateUseCases,
    pub store: StoreUseCases,
}

/// Every port the application depends on.
pub struct Ports {
    pub store: Arc<dyn TemplateStore>,
    pub catalog: Arc<dyn CatalogSource>,
    pub sink: Arc<dyn TemplateFileSink>,
    pub portraits: Arc<dyn PortraitValidator>,
    pub random: Arc<dyn RandomPort>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(ports: Ports) -> Self {
        let store = StoreUseCases::new(ports.store);
        let templates = TemplateUseCases::new(
            ports.catalog,
            ports.sink,
            store.list.clone(),
            store.save.clone(),
        );
        let tracker = Arc::new(Tracker::new(ports.portraits, ports.random));

        Self {
            use_cases: UseCases {
                tracker,
                templates,
                store,
            },
        }
    }

    /// Build the production adapters described by the configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        let store: Arc<dyn TemplateStore> = match &config.clickhouse {
            Some(clickhouse) => {
                tracing::info!(url = %clickhouse.url, "Using ClickHouse template store");
                Arc::new(ClickHouseTemplateStore::new(clickhouse.clone(), clock))
            }
            None => {
                tracing::info!("CLICKHOUSE_URL not set, keeping templates in memory");
                Arc::new(InMemoryTemplateStore::new(clock))
            }
        };

        Self::new(Ports {
            store,
            catalog: Arc::new(FileCatalogSource::new(&config.tokens_dir)),
            sink: Arc::new(FileTemplateSink::new(&config.tokens_dir)),
            portraits: Arc::new(HttpPortraitValidator::new(
                &config.static_root,
                config.portrait_timeout,
            )),
            random: Arc::new(SystemRandom::new()),
        })
    }
}
