//! ClickHouse template store over the HTTP interface
//!
//! Queries are POSTed as the request body; rows travel as `JSONEachRow`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use vdm_domain::{CombatantTemplate, Faction, PortraitRef, TemplateCategory};

use crate::infrastructure::config::ClickHouseConfig;
use crate::infrastructure::ports::{ClockPort, StoreError, StoredTemplate, TemplateStore};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS tokens (
    id UUID DEFAULT generateUUIDv4(),
    name String,
    totalHP UInt32,
    ally Bool,
    imageUrl Nullable(String),
    category String DEFAULT 'custom',
    created_at DateTime DEFAULT now()
) ENGINE = MergeTree()
ORDER BY (category, name)";

const SELECT_TEMPLATES: &str =
    "SELECT name, totalHP, ally, imageUrl, category FROM tokens ORDER BY category, name FORMAT JSONEachRow";

const TABLE_EXISTS: &str =
    "SELECT 1 FROM system.tables WHERE name = 'tokens' AND database = currentDatabase() FORMAT JSONEachRow";

const INSERT_TEMPLATES: &str =
    "INSERT INTO tokens (name, totalHP, ally, imageUrl, category, created_at) FORMAT JSONEachRow";

/// One `tokens` row as ClickHouse emits and accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TemplateRow {
    name: String,
    #[serde(rename = "totalHP")]
    total_hp: u32,
    ally: bool,
    #[serde(rename = "imageUrl", default)]
    image_url: Option<String>,
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
}

impl TemplateRow {
    fn from_stored(row: &StoredTemplate, now: DateTime<Utc>) -> Self {
        let template = &row.template;
        let created_at = row.created_at.unwrap_or(now);
        Self {
            name: template.name().to_string(),
            total_hp: template.total_hp(),
            ally: template.is_ally(),
            image_url: template.portrait().map(|p| p.to_string()),
            category: row.category.as_str().to_string(),
            created_at: Some(created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    fn into_stored(self) -> Result<StoredTemplate, StoreError> {
        let template = CombatantTemplate::new(
            self.name,
            i64::from(self.total_hp),
            Faction::from_ally_flag(self.ally),
            self.image_url.and_then(PortraitRef::parse),
        )
        .map_err(|e| StoreError::serialization(e.message()))?;
        Ok(StoredTemplate::new(
            template,
            TemplateCategory::from_label(&self.category),
        ))
    }
}

/// Client for the ClickHouse HTTP interface.
#[derive(Clone)]
pub struct ClickHouseTemplateStore {
    client: Client,
    base_url: String,
    config: ClickHouseConfig,
    clock: Arc<dyn ClockPort>,
}

impl ClickHouseTemplateStore {
    pub fn new(config: ClickHouseConfig, clock: Arc<dyn ClockPort>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            config,
            clock,
        }
    }

    /// Run one statement and return the response body.
    async fn execute(&self, operation: &'static str, body: String) -> Result<String, StoreError> {
        let response = self
            .client
            .post(format!("{}/", self.base_url))
            .header("X-ClickHouse-User", &self.config.user)
            .header("X-ClickHouse-Key", &self.config.password)
            .header("X-ClickHouse-Database", &self.config.database)
            .body(body)
            .send()
            .await
            .map_err(StoreError::unavailable)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::query(operation, e))?;

        if !status.is_success() {
            return Err(StoreError::query(operation, text.trim()));
        }
        Ok(text)
    }
}

#[async_trait]
impl TemplateStore for ClickHouseTemplateStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.execute("ping", "SELECT 1".to_string()).await.map(|_| ())
    }

    async fn is_available(&self) -> bool {
        if let Err(e) = self.ping().await {
            tracing::warn!(error = %e, "ClickHouse connection failed");
            return false;
        }
        match self.execute("table_exists", TABLE_EXISTS.to_string()).await {
            Ok(body) => !body.trim().is_empty(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not check for tokens table");
                false
            }
        }
    }

    async fn ensure_table(&self) -> Result<(), StoreError> {
        self.execute("ensure_table", CREATE_TABLE.to_string())
            .await
            .map(|_| ())?;
        tracing::info!("ClickHouse tokens table ready");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredTemplate>, StoreError> {
        let body = self.execute("list_templates", SELECT_TEMPLATES.to_string()).await?;
        parse_rows(&body)
    }

    async fn insert(&self, rows: Vec<StoredTemplate>) -> Result<usize, StoreError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let body = insert_body(&rows, self.clock.now())?;
        self.execute("insert_templates", body).await?;
        tracing::debug!(count = rows.len(), "Inserted templates into ClickHouse");
        Ok(rows.len())
    }
}

/// Decode a `JSONEachRow` body. Rows that fail domain validation are skipped.
fn parse_rows(body: &str) -> Result<Vec<StoredTemplate>, StoreError> {
    let mut stored = Vec::new();
    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let row: TemplateRow =
            serde_json::from_str(line).map_err(StoreError::serialization)?;
        match row.into_stored() {
            Ok(row) => stored.push(row),
            Err(e) => tracing::warn!(error = %e, "Skipping invalid stored template"),
        }
    }
    Ok(stored)
}

fn insert_body(rows: &[StoredTemplate], now: DateTime<Utc>) -> Result<String, StoreError> {
    let mut body = String::from(INSERT_TEMPLATES);
    for row in rows {
        let json = serde_json::to_string(&TemplateRow::from_stored(row, now))
            .map_err(StoreError::serialization)?;
        body.push('\n');
        body.push_str(&json);
    }
    body.push('\n');
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use axum::{routing::post, Router};
    use chrono::TimeZone;
    use std::sync::Mutex;

    fn goblin_row() -> StoredTemplate {
        let template = CombatantTemplate::new(
            "Goblin Warrior",
            15,
            Faction::Enemy,
            PortraitRef::parse("/tokens/default/img/goblin.png"),
        )
        .unwrap();
        StoredTemplate::new(template, TemplateCategory::Default)
    }

    #[test]
    fn rows_decode_and_unknown_category_is_custom() {
        let body = concat!(
            r#"{"name":"Goblin Warrior","totalHP":15,"ally":false,"imageUrl":"/tokens/default/img/goblin.png","category":"default"}"#,
            "\n",
            r#"{"name":"Lich","totalHP":80,"ally":false,"imageUrl":null,"category":"homebrew"}"#,
            "\n"
        );
        let rows = parse_rows(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, TemplateCategory::Default);
        assert_eq!(rows[0].template.portrait().unwrap().as_str(), "/tokens/default/img/goblin.png");
        assert_eq!(rows[1].category, TemplateCategory::Custom);
        assert!(rows[1].template.portrait().is_none());
    }

    #[test]
    fn invalid_rows_are_skipped() {
        let body = r#"{"name":"Ghost","totalHP":0,"ally":false,"imageUrl":null,"category":"custom"}"#;
        assert!(parse_rows(body).unwrap().is_empty());
        assert!(parse_rows("not json").is_err());
    }

    #[test]
    fn insert_body_is_json_each_row() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap();
        let body = insert_body(&[goblin_row()], now).unwrap();
        let mut lines = body.lines();
        assert_eq!(lines.next(), Some(INSERT_TEMPLATES));
        let row: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(row["name"], "Goblin Warrior");
        assert_eq!(row["totalHP"], 15);
        assert_eq!(row["ally"], false);
        assert_eq!(row["category"], "default");
        assert_eq!(row["created_at"], "2024-03-09 18:30:00");
        assert_eq!(lines.next(), None);
    }

    /// Minimal stand-in for the ClickHouse HTTP interface.
    async fn fake_clickhouse(responses: Vec<(u16, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(Mutex::new(responses));
        let seen_for_handler = seen.clone();
        let app = Router::new().route(
            "/",
            post(move |body: String| {
                let seen = seen_for_handler.clone();
                let queue = queue.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    let (status, text) = queue.lock().unwrap().remove(0);
                    (axum::http::StatusCode::from_u16(status).unwrap(), text)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), seen)
    }

    fn store(url: String) -> ClickHouseTemplateStore {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        ClickHouseTemplateStore::new(
            ClickHouseConfig {
                url,
                user: "default".into(),
                password: String::new(),
                database: "default".into(),
            },
            clock,
        )
    }

    #[tokio::test]
    async fn available_when_table_exists() {
        let (url, seen) = fake_clickhouse(vec![(200, "1\n"), (200, "{\"1\":1}\n")]).await;
        assert!(store(url).is_available().await);
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], "SELECT 1");
        assert!(seen[1].contains("system.tables"));
    }

    #[tokio::test]
    async fn unavailable_when_table_missing() {
        let (url, _) = fake_clickhouse(vec![(200, "1\n"), (200, "")]).await;
        assert!(!store(url).is_available().await);
    }

    #[tokio::test]
    async fn server_error_is_a_query_error() {
        let (url, _) = fake_clickhouse(vec![(500, "Code: 60. DB::Exception: Table default.tokens does not exist")]).await;
        let err = store(url).list().await.unwrap_err();
        assert!(matches!(err, StoreError::Query { operation: "list_templates", .. }));
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let err = store("http://127.0.0.1:9".into()).ping().await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn insert_posts_rows() {
        let (url, seen) = fake_clickhouse(vec![(200, "")]).await;
        let written = store(url).insert(vec![goblin_row()]).await.unwrap();
        assert_eq!(written, 1);
        let seen = seen.lock().unwrap();
        assert!(seen[0].starts_with(INSERT_TEMPLATES));
        assert!(seen[0].contains("\"created_at\":\"2024-01-01 00:00:00\""));
    }
}
