/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations included)
/// - Router construction with a fixed session secret
/// - Test user creation and session cookie minting
/// - Request builders and response readers
///
/// Tests run against the database named by `DATABASE_URL`. When that
/// variable is not exported, [`TestContext::new`] returns `None` so each
/// test can skip instead of failing — the suite stays green on machines
/// without PostgreSQL.

use axum::body::Body;
use axum::http::{header, Request};
use questlog_api::app::{build_router, AppState};
use questlog_api::config::{ApiConfig, Config, DatabaseConfig, SessionConfig};
use questlog_shared::auth::session::{create_token, Claims, SESSION_COOKIE};
use questlog_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Session secret shared by every test context
pub const TEST_SESSION_SECRET: &str = "questlog-test-secret-0123456789abcdef";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with a migrated database and a router
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn new() -> Option<Self> {
        let db_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("Skipping integration test: DATABASE_URL not set");
                return None;
            }
        };

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: db_url.clone(),
                max_connections: 5,
            },
            session: SessionConfig {
                secret: TEST_SESSION_SECRET.to_string(),
            },
        };

        let db = PgPool::connect(&db_url)
            .await
            .expect("failed to connect to test database");

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../questlog-shared/migrations")
            .run(&db)
            .await
            .expect("failed to run migrations");

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Some(TestContext { db, app, config })
    }

    /// Creates a user row directly, bypassing the register flow
    ///
    /// The stored password hash is a placeholder, so tests that exercise
    /// login must go through `POST /register` instead. Emails get a UUID
    /// suffix to stay unique across test runs.
    pub async fn create_user(&self, name: &str) -> User {
        User::create(
            &self.db,
            CreateUser {
                name: name.to_string(),
                email: format!("{}-{}@example.com", name, Uuid::new_v4()),
                password_hash: "placeholder-hash".to_string(),
            },
        )
        .await
        .expect("failed to create test user")
    }

    /// Mints the Cookie header value for a logged-in user
    pub fn session_cookie(&self, user_id: Uuid) -> String {
        let token = create_token(&Claims::new(user_id), &self.config.session.secret)
            .expect("failed to create session token");
        format!("{}={}", SESSION_COOKIE, token)
    }
}

/// Builds a GET request
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Builds a GET request carrying a session cookie
pub fn get_with_session(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Builds a form POST request
pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a form POST request carrying a session cookie
pub fn post_form_with_session(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Reads a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Reads a response body as text
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Extracts the Location header of a redirect response
pub fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Extracts the `name=value` pair from a Set-Cookie response header
pub fn set_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}
