pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use practice_core::Catalog;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::catalog::load_catalog;
use crate::services::llm::LlmClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub catalog: Arc<Catalog>,
    /// `None` when no model is configured; AI fallback and the tutor are then off.
    pub llm: Option<Arc<LlmClient>>,
    pub config: Arc<Config>,
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Learner routes
        .route("/api/learner/status", get(routes::learner::status))
        // Practice routes
        .route("/api/practice/next", get(routes::practice::next))
        .route("/api/practice/check", post(routes::practice::check))
        .route("/api/practice/reset", post(routes::practice::reset))
        // Progress routes
        .route("/api/progress", get(routes::progress::get_all))
        .route("/api/progress/:lesson_id", get(routes::progress::get_lesson))
        // Tutor routes
        .route("/api/tutor/ask", post(routes::tutor::ask))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/learner/register", post(routes::learner::register))
        .route("/api/lessons", get(routes::lessons::list))
        .route("/api/lessons/:lesson_id", get(routes::lessons::get))
        .route("/api/lessons/:lesson_id/questions", get(routes::lessons::questions));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let catalog = load_catalog(config.question_bank_dir.as_deref())?;
    tracing::info!("Loaded {} lessons", catalog.lessons().len());

    let llm = match &config.llm {
        Some(llm_config) => {
            let client = LlmClient::new(llm_config)?;
            tracing::info!("AI questions and tutor enabled (model {})", client.model());
            Some(Arc::new(client))
        }
        None => {
            tracing::info!("No LLM configured; exhausted banks will cycle");
            None
        }
    };

    let addr = config.bind_addr();
    let state = AppState {
        db: Arc::new(db),
        catalog: Arc::new(catalog),
        llm,
        config: Arc::new(config),
    };

    let app = router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
