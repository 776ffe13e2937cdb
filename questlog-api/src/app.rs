/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use questlog_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = questlog_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session cookie signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── GET  /                          # Landing payload (public)
/// ├── GET  /index                     # Main view (optional session)
/// ├── GET  /health                    # Health check (public)
/// ├── POST /register                  # Create account (public)
/// ├── POST /login                     # Establish session (public)
/// ├── GET  /logout                    # Drop session (public)
/// ├── GET  /ranking                   # Leaderboard (optional session)
/// └── session-guarded:
///     ├── POST /add                         # Create task
///     ├── GET  /concluir/:task_id           # Complete task
///     ├── GET  /amizade/enviar/:recipient_id    # Send friend request
///     ├── GET  /amizade/aceitar/:friendship_id  # Accept friend request
///     ├── GET  /amizade/recusar/:friendship_id  # Decline friend request
///     └── GET+POST /config-musica           # Music preferences
/// ```
///
/// Route paths are kept verbatim from the original deployment, Portuguese
/// segments included — the presentation layer links them by URL.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Session guard (guarded group only)
pub fn build_router(state: AppState) -> Router {
    // Import route handlers
    use crate::routes;

    // Public surface: landing, health, account flows, and the two views
    // that adapt to an optional session instead of requiring one
    let public_routes = Router::new()
        .route("/", get(routes::pages::landing))
        .route("/index", get(routes::pages::index))
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", get(routes::auth::logout))
        .route("/ranking", get(routes::ranking::ranking));

    // Session-guarded surface: every mutation tied to the logged-in user
    let guarded_routes = Router::new()
        .route("/add", post(routes::tasks::add_task))
        .route("/concluir/:task_id", get(routes::tasks::complete_task))
        .route(
            "/amizade/enviar/:recipient_id",
            get(routes::friendships::send_request),
        )
        .route(
            "/amizade/aceitar/:friendship_id",
            get(routes::friendships::accept_request),
        )
        .route(
            "/amizade/recusar/:friendship_id",
            get(routes::friendships::decline_request),
        )
        .route(
            "/config-musica",
            get(routes::music::show_music_prefs).post(routes::music::update_music_prefs),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::session::session_guard,
        ));

    // Combine all routes with middleware stack
    Router::new()
        .merge(public_routes)
        .merge(guarded_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
