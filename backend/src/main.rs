use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use axum::http::HeaderValue;
use tower_http::cors::CorsLayer;
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use std::sync::Arc;

mod handlers {
    pub mod signup_handlers;
}
mod models {
    pub mod signup_models;
}
mod repositories {
    pub mod signup_repository;
}
mod utils {
    pub mod mailer;
}
mod schema;

use repositories::signup_repository::SignupRepository;
use utils::mailer::{DisabledNotifier, Mailer, Notifier};

use handlers::signup_handlers;

type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    signup_repository: Arc<SignupRepository>,
    notifier: Arc<dyn Notifier>,
}

pub fn validate_env() {
    let _ = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");
    let _ = std::env::var("FRONTEND_URL") // allowed CORS origin
        .expect("FRONTEND_URL must be set");
    // RESEND_API_KEY, RESEND_FROM_EMAIL and ADMIN_EMAIL are optional;
    // without them signups persist but no emails go out
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_origin(
            frontend_url
                .parse::<HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    validate_env();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // Set up database connection pool
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let frontend_url = std::env::var("FRONTEND_URL").expect("FRONTEND_URL must be set");
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool");

    let conn = &mut pool.get().expect("Failed to get DB connection");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    let notifier: Arc<dyn Notifier> = match Mailer::from_env() {
        Some(mailer) => Arc::new(mailer),
        None => {
            tracing::warn!("RESEND_API_KEY not set, transactional email disabled");
            Arc::new(DisabledNotifier)
        }
    };

    let state = Arc::new(AppState {
        signup_repository: Arc::new(SignupRepository::new(pool.clone())),
        notifier,
    });

    // Create router with CORS
    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/waitlist", post(signup_handlers::join_waitlist))
        .route("/api/pilot", post(signup_handlers::apply_for_pilot))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(cors_layer(&frontend_url))
        .with_state(state);

    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:3001").await.unwrap();
    axum::serve(listener, app.into_make_service()).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn cors_only_allows_the_configured_frontend_origin() {
        let app = Router::new()
            .route("/api/health", get(health_check))
            .layer(cors_layer("http://localhost:8080"));

        let preflight = |origin: &'static str| {
            Request::builder()
                .method("OPTIONS")
                .uri("/api/health")
                .header("origin", origin)
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(preflight("http://localhost:8080")).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:8080")
        );

        let response = app.oneshot(preflight("http://evil.example")).await.unwrap();
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
