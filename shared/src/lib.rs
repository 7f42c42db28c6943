//! Shared types for the lifeboard workspace.
//!
//! Everything the backend and its clients exchange lives here: the unified
//! calendar `Event`, the wire records owned by the three backing services
//! (tasks, notes, meetings), and the request/response types for the HTTP API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nanoseconds since the Unix epoch, as the backing services speak them.
pub type Nanos = i64;

/// Convert source nanoseconds to a millisecond-precision UTC instant.
///
/// Floor division, also for pre-epoch values. Sub-millisecond precision is
/// dropped and cannot be recovered.
pub fn ns_to_instant(ns: Nanos) -> DateTime<Utc> {
    let ms = ns.div_euclid(1_000_000);
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Convert a millisecond-precision instant back to source nanoseconds.
pub fn instant_to_ns(instant: DateTime<Utc>) -> Nanos {
    instant.timestamp_millis() * 1_000_000
}

/// Where a calendar event comes from.
///
/// The category is the single source of truth for the id prefix, the title
/// prefix, mutability, and the display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Task,
    Note,
    Meeting,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Task => "task",
            EventCategory::Note => "note",
            EventCategory::Meeting => "meeting",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "task" => Some(EventCategory::Task),
            "note" => Some(EventCategory::Note),
            "meeting" => Some(EventCategory::Meeting),
            _ => None,
        }
    }

    /// Only meetings can be created, updated, or deleted through the
    /// dashboard. Tasks and notes are read-only projections.
    pub fn is_mutable(&self) -> bool {
        matches!(self, EventCategory::Meeting)
    }

    /// Background color the calendar surface paints events of this category.
    pub fn color(&self) -> &'static str {
        match self {
            EventCategory::Task => "#F6AD55",
            EventCategory::Note => "#68D391",
            EventCategory::Meeting => "#63B3ED",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Globally unique event id, shaped as `"{category}-{source_id}"`.
///
/// The prefix disambiguates identical numeric ids across the three sources
/// and survives refetches as long as the underlying record does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

/// Why an event id string could not be mapped back to a source record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventIdError {
    #[error("event id '{0}' has no category prefix")]
    MissingPrefix(String),
    #[error("event id has unknown category '{0}'")]
    UnknownCategory(String),
    #[error("event id '{0}' has a non-numeric source id")]
    BadSourceId(String),
}

impl EventId {
    pub fn new(category: EventCategory, source_id: u64) -> Self {
        EventId(format!("{}-{}", category.as_str(), source_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the id back into its category and numeric source id.
    pub fn parse(&self) -> Result<(EventCategory, u64), EventIdError> {
        let (prefix, rest) = self
            .0
            .split_once('-')
            .ok_or_else(|| EventIdError::MissingPrefix(self.0.clone()))?;
        let category = EventCategory::parse(prefix)
            .ok_or_else(|| EventIdError::UnknownCategory(prefix.to_string()))?;
        let source_id = rest
            .parse()
            .map_err(|_| EventIdError::BadSourceId(self.0.clone()))?;
        Ok((category, source_id))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        EventId(s)
    }
}

/// The unified calendar entity served by the API.
///
/// Events are ephemeral: every fetch cycle produces a fresh collection and
/// the durable copies stay in the backing services. `start <= end` is not
/// guaranteed by source data and must be tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub category: EventCategory,
    pub description: Option<String>,
}

// ============================================================================
// Wire records owned by the backing services (camelCase JSON)
// ============================================================================

/// Workflow state of a task, as the task service encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

/// Task record as the task service returns it.
///
/// The calendar projection only reads id/title/description and the two
/// timestamps; `status` and `updated_at` are part of the service contract
/// and are carried so the decode stays faithful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Nanos>,
    pub created_at: Nanos,
    pub updated_at: Nanos,
}

/// Note record as the note service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub created_at: Nanos,
    pub updated_at: Nanos,
}

/// Meeting record as the meeting service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub start_time: Nanos,
    pub end_time: Nanos,
    pub is_all_day: bool,
}

/// Write payload for the meeting service, in its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingWrite {
    pub title: String,
    pub description: String,
    pub start_time: Nanos,
    pub end_time: Nanos,
    pub is_all_day: bool,
}

// ============================================================================
// Normalization: one mapping per source kind, pure and total
// ============================================================================

impl From<TaskRecord> for Event {
    fn from(task: TaskRecord) -> Self {
        let start = ns_to_instant(task.created_at);
        // Without a due date the span collapses to the creation instant.
        let end = task.due_date.map(ns_to_instant).unwrap_or(start);
        Event {
            id: EventId::new(EventCategory::Task, task.id),
            title: format!("Task: {}", task.title),
            start,
            end,
            all_day: true,
            category: EventCategory::Task,
            description: Some(task.description),
        }
    }
}

impl From<NoteRecord> for Event {
    fn from(note: NoteRecord) -> Self {
        let created = ns_to_instant(note.created_at);
        Event {
            id: EventId::new(EventCategory::Note, note.id),
            title: format!("Note: {}", note.title),
            start: created,
            end: created,
            all_day: true,
            category: EventCategory::Note,
            description: Some(note.content),
        }
    }
}

impl From<MeetingRecord> for Event {
    fn from(meeting: MeetingRecord) -> Self {
        Event {
            id: EventId::new(EventCategory::Meeting, meeting.id),
            title: meeting.title,
            start: ns_to_instant(meeting.start_time),
            end: ns_to_instant(meeting.end_time),
            all_day: meeting.is_all_day,
            category: EventCategory::Meeting,
            description: Some(meeting.description),
        }
    }
}

// ============================================================================
// API request/response types
// ============================================================================

/// Fields of a meeting the user can edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
}

impl MeetingDraft {
    /// Convert to the meeting service's wire shape. Instants go back to
    /// nanoseconds; the precision lost on the way in stays lost.
    pub fn to_write(&self) -> MeetingWrite {
        MeetingWrite {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            start_time: instant_to_ns(self.start),
            end_time: instant_to_ns(self.end),
            is_all_day: self.all_day,
        }
    }
}

/// Response to a meeting creation: the new event's id plus the refreshed
/// view for the active window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetingResponse {
    pub id: EventId,
    pub events: Vec<Event>,
}

/// Dashboard overview counts, one per backing source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub task_count: usize,
    pub note_count: usize,
    pub meeting_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> TaskRecord {
        TaskRecord {
            id: 7,
            title: "Pay rent".to_string(),
            description: "Transfer before the 1st".to_string(),
            status: TaskStatus::Todo,
            due_date: Some(1_717_200_000_000_000_000),
            created_at: 1_717_000_000_000_000_000,
            updated_at: 1_717_000_000_000_000_000,
        }
    }

    #[test]
    fn test_ns_to_instant_floors_sub_millisecond() {
        assert_eq!(ns_to_instant(1_999_999).timestamp_millis(), 1);
        assert_eq!(ns_to_instant(2_000_000).timestamp_millis(), 2);
        assert_eq!(ns_to_instant(2_500_000).timestamp_millis(), 2);
    }

    #[test]
    fn test_ns_to_instant_floors_pre_epoch() {
        assert_eq!(ns_to_instant(-1).timestamp_millis(), -1);
        assert_eq!(ns_to_instant(-1_000_000).timestamp_millis(), -1);
        assert_eq!(ns_to_instant(-1_000_001).timestamp_millis(), -2);
    }

    #[test]
    fn test_instant_round_trip_at_millisecond_precision() {
        let instant = ns_to_instant(1_717_000_000_123_000_000);
        assert_eq!(instant_to_ns(instant), 1_717_000_000_123_000_000);
    }

    #[test]
    fn test_event_id_round_trip() {
        let id = EventId::new(EventCategory::Meeting, 42);
        assert_eq!(id.as_str(), "meeting-42");
        assert_eq!(id.parse(), Ok((EventCategory::Meeting, 42)));
    }

    #[test]
    fn test_event_id_rejects_missing_prefix() {
        let id = EventId::from("42".to_string());
        assert_eq!(id.parse(), Err(EventIdError::MissingPrefix("42".to_string())));
    }

    #[test]
    fn test_event_id_rejects_unknown_category() {
        let id = EventId::from("rocket-5".to_string());
        assert_eq!(
            id.parse(),
            Err(EventIdError::UnknownCategory("rocket".to_string()))
        );
    }

    #[test]
    fn test_event_id_rejects_non_numeric_source_id() {
        let id = EventId::from("meeting-abc".to_string());
        assert_eq!(
            id.parse(),
            Err(EventIdError::BadSourceId("meeting-abc".to_string()))
        );
    }

    #[test]
    fn test_task_normalization_with_due_date() {
        let event = Event::from(sample_task());
        assert_eq!(event.id.as_str(), "task-7");
        assert_eq!(event.title, "Task: Pay rent");
        assert_eq!(event.start, ns_to_instant(1_717_000_000_000_000_000));
        assert_eq!(event.end, ns_to_instant(1_717_200_000_000_000_000));
        assert!(event.all_day);
        assert_eq!(event.category, EventCategory::Task);
        assert_eq!(event.description.as_deref(), Some("Transfer before the 1st"));
    }

    #[test]
    fn test_task_normalization_without_due_date_collapses_span() {
        let task = TaskRecord {
            due_date: None,
            ..sample_task()
        };
        let event = Event::from(task);
        assert_eq!(event.start, event.end);
    }

    #[test]
    fn test_note_normalization() {
        let note = NoteRecord {
            id: 3,
            title: "Groceries".to_string(),
            content: "milk, eggs".to_string(),
            created_at: 1_717_000_000_000_000_000,
            updated_at: 1_717_000_000_000_000_000,
        };
        let event = Event::from(note);
        assert_eq!(event.id.as_str(), "note-3");
        assert_eq!(event.title, "Note: Groceries");
        assert_eq!(event.start, event.end);
        assert!(event.all_day);
        assert_eq!(event.description.as_deref(), Some("milk, eggs"));
    }

    #[test]
    fn test_meeting_normalization_keeps_title_unprefixed() {
        let meeting = MeetingRecord {
            id: 12,
            title: "Standup".to_string(),
            description: String::new(),
            start_time: 1_717_000_000_000_000_000,
            end_time: 1_717_000_900_000_000_000,
            is_all_day: false,
        };
        let event = Event::from(meeting);
        assert_eq!(event.id.as_str(), "meeting-12");
        assert_eq!(event.title, "Standup");
        assert!(!event.all_day);
        assert_eq!(event.category, EventCategory::Meeting);
    }

    #[test]
    fn test_task_record_decodes_camel_case_wire_json() {
        let json = r#"{
            "id": 1,
            "title": "t",
            "description": "d",
            "status": "inProgress",
            "createdAt": 123,
            "updatedAt": 456,
            "dueDate": 789
        }"#;
        let task: TaskRecord = serde_json::from_str(json).expect("should decode task");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.due_date, Some(789));
    }

    #[test]
    fn test_task_record_due_date_defaults_to_none() {
        let json = r#"{
            "id": 1,
            "title": "t",
            "description": "d",
            "status": "todo",
            "createdAt": 123,
            "updatedAt": 456
        }"#;
        let task: TaskRecord = serde_json::from_str(json).expect("should decode task");
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_meeting_draft_to_write_converts_instants_to_ns() {
        let draft = MeetingDraft {
            title: "Standup".to_string(),
            description: None,
            start: ns_to_instant(9_000_000_000),
            end: ns_to_instant(9_900_000_000),
            all_day: false,
        };
        let write = draft.to_write();
        assert_eq!(write.start_time, 9_000_000_000);
        assert_eq!(write.end_time, 9_900_000_000);
        assert_eq!(write.description, "");
    }

    #[test]
    fn test_category_mutability_and_colors() {
        assert!(EventCategory::Meeting.is_mutable());
        assert!(!EventCategory::Task.is_mutable());
        assert!(!EventCategory::Note.is_mutable());
        assert_eq!(EventCategory::Task.color(), "#F6AD55");
        assert_eq!(EventCategory::Note.color(), "#68D391");
        assert_eq!(EventCategory::Meeting.color(), "#63B3ED");
    }
}
