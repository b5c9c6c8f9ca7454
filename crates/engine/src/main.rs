//! Virtual DM Engine - Main entry point.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vdm_engine::{
    api,
    infrastructure::config::{CorsOrigins, EngineConfig},
    App,
};

/// Checked in order; the first file to set a variable wins.
const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_files(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../.."));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vdm_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Virtual DM Engine");

    let config = EngineConfig::from_env();
    tracing::info!(
        tokens_dir = %config.tokens_dir.display(),
        static_root = %config.static_root.display(),
        portrait_timeout_secs = config.portrait_timeout.as_secs(),
        clickhouse = config.clickhouse.is_some(),
        "Configuration loaded"
    );

    let app = Arc::new(App::from_config(&config));

    let mut router = api::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(origins) = &config.cors {
        tracing::info!(?origins, "CORS enabled");
        router = router.layer(cors_layer(origins));
    }

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}

/// The browser client sends JSON bodies, so preflights must allow `Content-Type`.
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => AllowOrigin::list(
            list.iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        ),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}

fn load_env_files(dir: &Path) {
    for path in DOTENV_FILES.iter().map(|name| dir.join(name)) {
        match dotenvy::from_path(&path) {
            Ok(()) => {}
            Err(e) if e.not_found() => {}
            // Logging is not up yet.
            Err(e) => eprintln!("Ignoring {}: {e}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_builds_for_any_and_lists() {
        let _ = cors_layer(&CorsOrigins::Any);
        let _ = cors_layer(&CorsOrigins::List(vec![
            "http://localhost:5173".to_string(),
            "not a header\n".to_string(),
        ]));
    }

    #[test]
    fn env_files_fill_unset_variables() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(".env.local"),
            "VDM_MAIN_TEST_LOCAL=local\nVDM_MAIN_TEST_SHARED=local\n",
        )
        .expect("write .env.local");
        std::fs::write(dir.path().join(".env"), "VDM_MAIN_TEST_SHARED=base\n").expect("write .env");

        load_env_files(dir.path());

        assert_eq!(std::env::var("VDM_MAIN_TEST_LOCAL").as_deref(), Ok("local"));
        assert_eq!(std::env::var("VDM_MAIN_TEST_SHARED").as_deref(), Ok("local"));
    }
}
