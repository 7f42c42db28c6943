//! Multi-source event aggregation.

use shared::{Event, MeetingRecord, NoteRecord, TaskRecord};

use super::{CalendarError, TimeWindow};
use crate::clients::Sources;

/// Record counts per source, for the dashboard overview panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCounts {
    pub tasks: usize,
    pub notes: usize,
    pub meetings: usize,
}

/// Fetches the three record streams and folds them into a single windowed
/// event collection.
#[derive(Clone)]
pub struct Aggregator {
    sources: Sources,
}

impl Aggregator {
    pub fn new(sources: Sources) -> Self {
        Self { sources }
    }

    /// Issue the three reads concurrently with no ordering between them.
    /// If any read fails the whole fetch fails — no partial set, no
    /// internal retry.
    async fn fetch_all(
        &self,
    ) -> Result<(Vec<TaskRecord>, Vec<NoteRecord>, Vec<MeetingRecord>), CalendarError> {
        tokio::try_join!(
            async {
                self.sources
                    .tasks
                    .list_user_tasks()
                    .await
                    .map_err(|e| CalendarError::source_fetch("task", e))
            },
            async {
                self.sources
                    .notes
                    .list_user_notes()
                    .await
                    .map_err(|e| CalendarError::source_fetch("note", e))
            },
            async {
                self.sources
                    .meetings
                    .list_user_meetings()
                    .await
                    .map_err(|e| CalendarError::source_fetch("meeting", e))
            },
        )
    }

    /// Fetch, normalize, and filter to the visible window.
    ///
    /// The sources return complete user collections with no server-side
    /// date filtering, so the window filter is applied here.
    pub async fn list_events(&self, window: &TimeWindow) -> Result<Vec<Event>, CalendarError> {
        let (tasks, notes, meetings) = self.fetch_all().await?;

        tracing::debug!(
            tasks = tasks.len(),
            notes = notes.len(),
            meetings = meetings.len(),
            "fetched source records"
        );

        let mut events: Vec<Event> =
            Vec::with_capacity(tasks.len() + notes.len() + meetings.len());
        events.extend(tasks.into_iter().map(Event::from));
        events.extend(notes.into_iter().map(Event::from));
        events.extend(meetings.into_iter().map(Event::from));

        events.retain(|event| window.admits(event.start, event.end));
        Ok(events)
    }

    /// Concurrent record counts across the three sources.
    pub async fn source_counts(&self) -> Result<SourceCounts, CalendarError> {
        let (tasks, notes, meetings) = self.fetch_all().await?;

        Ok(SourceCounts {
            tasks: tasks.len(),
            notes: notes.len(),
            meetings: meetings.len(),
        })
    }
}
