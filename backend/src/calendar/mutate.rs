//! Meeting mutations routed to the backing store.

use std::sync::Arc;

use shared::{Event, EventCategory, EventId, MeetingDraft};

use super::{Aggregator, CalendarError, TimeWindow};
use crate::clients::{MeetingSource, SourceError, Sources};

/// Routes create/update/delete requests to the meeting store and refreshes
/// the aggregate view once the store has accepted the change.
///
/// Tasks and notes have no mutation endpoint: anything that is not a
/// well-formed meeting reference is rejected before any network traffic.
/// Nothing is applied optimistically, so a failed write leaves no state to
/// roll back.
#[derive(Clone)]
pub struct MutationCoordinator {
    meetings: Arc<dyn MeetingSource>,
    aggregator: Aggregator,
}

impl MutationCoordinator {
    pub fn new(sources: Sources) -> Self {
        Self {
            meetings: sources.meetings.clone(),
            aggregator: Aggregator::new(sources),
        }
    }

    /// Create a meeting at the backing store, then re-run the aggregation
    /// for the active window. Returns the new event's id and the refreshed
    /// view.
    pub async fn create_meeting(
        &self,
        draft: MeetingDraft,
        window: &TimeWindow,
    ) -> Result<(EventId, Vec<Event>), CalendarError> {
        let record = self
            .meetings
            .create_meeting(draft.to_write())
            .await
            .map_err(write_error)?;
        let id = EventId::new(EventCategory::Meeting, record.id);
        tracing::info!(%id, "meeting created");

        let events = self.aggregator.list_events(window).await?;
        Ok((id, events))
    }

    /// Update the meeting behind `id`, then re-run the aggregation for the
    /// active window.
    pub async fn update_meeting(
        &self,
        id: &EventId,
        draft: MeetingDraft,
        window: &TimeWindow,
    ) -> Result<Vec<Event>, CalendarError> {
        let source_id = parse_meeting_id(id)?;
        self.meetings
            .update_meeting(source_id, draft.to_write())
            .await
            .map_err(write_error)?;
        tracing::info!(%id, "meeting updated");

        self.aggregator.list_events(window).await
    }

    /// Delete the meeting behind `id`, then re-run the aggregation for the
    /// active window.
    pub async fn delete_meeting(
        &self,
        id: &EventId,
        window: &TimeWindow,
    ) -> Result<Vec<Event>, CalendarError> {
        let source_id = parse_meeting_id(id)?;
        self.meetings
            .delete_meeting(source_id)
            .await
            .map_err(write_error)?;
        tracing::info!(%id, "meeting deleted");

        self.aggregator.list_events(window).await
    }
}

/// Map an event id to its numeric meeting id, rejecting read-only
/// categories and malformed ids before any network call.
fn parse_meeting_id(id: &EventId) -> Result<u64, CalendarError> {
    match id.parse() {
        Ok((EventCategory::Meeting, source_id)) => Ok(source_id),
        Ok((category, _)) => Err(CalendarError::UnsupportedOperation { category }),
        Err(e) => Err(CalendarError::InvalidReference(e.to_string())),
    }
}

fn write_error(err: SourceError) -> CalendarError {
    match err {
        SourceError::Rejected(message) => CalendarError::RemoteWrite(message),
        other => CalendarError::RemoteWrite(other.to_string()),
    }
}
