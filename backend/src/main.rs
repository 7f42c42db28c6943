use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

mod calendar;
mod clients;
mod config;
pub mod error;
mod handlers;

use clients::{HttpMeetingSource, HttpNoteSource, HttpTaskSource, Sources};
use handlers::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let config = config::AppConfig::from_env();

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    let sources = Sources {
        tasks: Arc::new(HttpTaskSource::new(
            http.clone(),
            config.task_service_url.clone(),
        )),
        notes: Arc::new(HttpNoteSource::new(
            http.clone(),
            config.note_service_url.clone(),
        )),
        meetings: Arc::new(HttpMeetingSource::new(
            http,
            config.meeting_service_url.clone(),
        )),
    };
    let state = AppState::new(sources);

    let app = Router::new()
        .route("/health", get(health_check))
        // Calendar event routes
        .route("/api/calendar/events", get(handlers::list_events))
        .route("/api/calendar/events", post(handlers::create_meeting))
        .route("/api/calendar/events/today", get(handlers::todays_events))
        .route("/api/calendar/events/week", get(handlers::this_weeks_events))
        .route("/api/calendar/events/:id", put(handlers::update_meeting))
        .route("/api/calendar/events/:id", delete(handlers::delete_meeting))
        // Dashboard overview
        .route("/api/overview", get(handlers::overview))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer()),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Build CORS layer based on environment configuration.
///
/// If CORS_ALLOWED_ORIGINS is set, only those origins are allowed.
/// If not set, defaults to permissive CORS (for development only).
fn build_cors_layer() -> CorsLayer {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS").ok();

    match allowed_origins {
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                tracing::warn!(
                    "CORS_ALLOWED_ORIGINS is set but empty, using permissive CORS (not recommended for production)"
                );
                CorsLayer::permissive()
            } else {
                tracing::info!("CORS configured for origins: {:?}", origins);
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::DELETE,
                        Method::OPTIONS,
                    ])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                    .allow_credentials(true)
            }
        }
        None => {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS not set, using permissive CORS (not recommended for production)"
            );
            CorsLayer::permissive()
        }
    }
}
