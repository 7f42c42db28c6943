//! Instrumented in-memory doubles for the three source services.
//!
//! Call counters let tests assert that locally-rejected mutations produce
//! zero network traffic.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use shared::{
    instant_to_ns, MeetingRecord, MeetingWrite, Nanos, NoteRecord, TaskRecord, TaskStatus,
};

use super::{resolve_window, Granularity, TimeWindow};
use crate::clients::{MeetingSource, NoteSource, SourceError, Sources, TaskSource};

pub(crate) fn ns(instant: DateTime<Utc>) -> Nanos {
    instant_to_ns(instant)
}

/// Whole-day window for a calendar date.
pub(crate) fn day_window(year: i32, month: u32, day: u32) -> TimeWindow {
    let reference = Utc
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid test date");
    resolve_window(reference, Granularity::Day)
}

pub(crate) fn task_record(id: u64, title: &str, created_at: Nanos, due_date: Option<Nanos>) -> TaskRecord {
    TaskRecord {
        id,
        title: title.to_string(),
        description: String::new(),
        status: TaskStatus::Todo,
        due_date,
        created_at,
        updated_at: created_at,
    }
}

pub(crate) fn note_record(id: u64, title: &str, created_at: Nanos) -> NoteRecord {
    NoteRecord {
        id,
        title: title.to_string(),
        content: String::new(),
        created_at,
        updated_at: created_at,
    }
}

pub(crate) fn meeting_record(id: u64, title: &str, start_time: Nanos, end_time: Nanos) -> MeetingRecord {
    MeetingRecord {
        id,
        title: title.to_string(),
        description: String::new(),
        start_time,
        end_time,
        is_all_day: false,
    }
}

pub(crate) fn sources(
    tasks: Arc<FakeTaskSource>,
    notes: Arc<FakeNoteSource>,
    meetings: Arc<FakeMeetingSource>,
) -> Sources {
    Sources {
        tasks,
        notes,
        meetings,
    }
}

pub(crate) struct FakeTaskSource {
    records: Vec<TaskRecord>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeTaskSource {
    pub(crate) fn new(records: Vec<TaskRecord>) -> Self {
        Self {
            records,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            records: vec![],
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskSource for FakeTaskSource {
    async fn list_user_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SourceError::Rejected("task service down".to_string()));
        }
        Ok(self.records.clone())
    }
}

pub(crate) struct FakeNoteSource {
    records: Vec<NoteRecord>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeNoteSource {
    pub(crate) fn new(records: Vec<NoteRecord>) -> Self {
        Self {
            records,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            records: vec![],
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl NoteSource for FakeNoteSource {
    async fn list_user_notes(&self) -> Result<Vec<NoteRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SourceError::Rejected("note service down".to_string()));
        }
        Ok(self.records.clone())
    }
}

/// Meeting double with a mutable in-memory store.
pub(crate) struct FakeMeetingSource {
    store: Mutex<Vec<MeetingRecord>>,
    next_id: AtomicU64,
    reject_writes: Option<String>,
    read_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl FakeMeetingSource {
    pub(crate) fn with_records(records: Vec<MeetingRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            store: Mutex::new(records),
            next_id: AtomicU64::new(next_id),
            reject_writes: None,
            read_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    /// Every write comes back as the service's error variant.
    pub(crate) fn rejecting(message: &str) -> Self {
        let mut fake = Self::with_records(vec![]);
        fake.reject_writes = Some(message.to_string());
        fake
    }

    pub(crate) fn read_call_count(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn write_call_count(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn check_writes(&self) -> Result<(), SourceError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        match &self.reject_writes {
            Some(message) => Err(SourceError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MeetingSource for FakeMeetingSource {
    async fn list_user_meetings(&self) -> Result<Vec<MeetingRecord>, SourceError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.store.lock().expect("store lock").clone())
    }

    async fn create_meeting(&self, write: MeetingWrite) -> Result<MeetingRecord, SourceError> {
        self.check_writes()?;
        let record = MeetingRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: write.title,
            description: write.description,
            start_time: write.start_time,
            end_time: write.end_time,
            is_all_day: write.is_all_day,
        };
        self.store.lock().expect("store lock").push(record.clone());
        Ok(record)
    }

    async fn update_meeting(&self, id: u64, write: MeetingWrite) -> Result<(), SourceError> {
        self.check_writes()?;
        let mut store = self.store.lock().expect("store lock");
        match store.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.title = write.title;
                record.description = write.description;
                record.start_time = write.start_time;
                record.end_time = write.end_time;
                record.is_all_day = write.is_all_day;
                Ok(())
            }
            None => Err(SourceError::Rejected("Event not found".to_string())),
        }
    }

    async fn delete_meeting(&self, id: u64) -> Result<(), SourceError> {
        self.check_writes()?;
        let mut store = self.store.lock().expect("store lock");
        let before = store.len();
        store.retain(|r| r.id != id);
        if store.len() == before {
            return Err(SourceError::Rejected("Event not found".to_string()));
        }
        Ok(())
    }
}
