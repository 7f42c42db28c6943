//! Clients for the three record services backing the calendar.
//!
//! Each service is independently owned; the engine consumes them through
//! `async` traits so tests can substitute instrumented doubles. The task and
//! note services are read-only from this backend's perspective; only the
//! meeting service accepts writes.

mod http;

pub use http::{HttpMeetingSource, HttpNoteSource, HttpTaskSource};

use std::sync::Arc;

use async_trait::async_trait;
use shared::{MeetingRecord, MeetingWrite, NoteRecord, TaskRecord};
use thiserror::Error;

/// Error talking to a backing service.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// The service's own error variant, verbatim.
    #[error("{0}")]
    Rejected(String),
}

/// Read side of the task service.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// The user's complete task collection; no server-side date filtering.
    async fn list_user_tasks(&self) -> Result<Vec<TaskRecord>, SourceError>;
}

/// Read side of the note service.
#[async_trait]
pub trait NoteSource: Send + Sync {
    async fn list_user_notes(&self) -> Result<Vec<NoteRecord>, SourceError>;
}

/// The meeting service is the only source the dashboard writes to.
#[async_trait]
pub trait MeetingSource: Send + Sync {
    async fn list_user_meetings(&self) -> Result<Vec<MeetingRecord>, SourceError>;

    async fn create_meeting(&self, write: MeetingWrite) -> Result<MeetingRecord, SourceError>;

    async fn update_meeting(&self, id: u64, write: MeetingWrite) -> Result<(), SourceError>;

    async fn delete_meeting(&self, id: u64) -> Result<(), SourceError>;
}

/// Handles to the three backing services.
#[derive(Clone)]
pub struct Sources {
    pub tasks: Arc<dyn TaskSource>,
    pub notes: Arc<dyn NoteSource>,
    pub meetings: Arc<dyn MeetingSource>,
}
