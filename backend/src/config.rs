//! Environment-driven configuration for the backend server.

use std::time::Duration;

/// Runtime configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the API server binds to.
    pub port: u16,
    /// Base URL of the task service.
    pub task_service_url: String,
    /// Base URL of the note service.
    pub note_service_url: String,
    /// Base URL of the meeting service.
    pub meeting_service_url: String,
    /// Per-request timeout for source calls.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables, with local-development
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let task_service_url = std::env::var("TASK_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:4001".to_string());
        let note_service_url = std::env::var("NOTE_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:4002".to_string());
        let meeting_service_url = std::env::var("MEETING_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:4003".to_string());

        let request_timeout_secs = std::env::var("SOURCE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Self {
            port,
            task_service_url,
            note_service_url,
            meeting_service_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }
}
