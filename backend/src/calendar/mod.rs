//! The calendar aggregation and event-lifecycle engine.
//!
//! Merges the three independently-owned record streams (tasks, notes,
//! meetings) into one time-ordered view: resolve the visible window, fetch
//! concurrently, normalize, filter by overlap, and route mutations to the
//! single writable store. There is no local event store; every cycle
//! produces a fresh collection.

mod aggregate;
mod mutate;
mod search;
mod window;

pub use aggregate::{Aggregator, SourceCounts};
pub use mutate::MutationCoordinator;
pub use search::filter_events;
pub use window::{resolve_window, Granularity, TimeWindow};

use shared::EventCategory;
use thiserror::Error;

/// Errors produced by the aggregation and mutation engine.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// One of the three reads failed; the aggregation fails as a whole and
    /// no partial event set is produced. Retry policy belongs to the caller.
    #[error("failed to fetch {source_name} records: {message}")]
    SourceFetch {
        source_name: &'static str,
        message: String,
    },

    /// A mutation referenced an id that cannot be parsed back to a source
    /// record. Rejected before any network call.
    #[error("invalid event reference: {0}")]
    InvalidReference(String),

    /// A mutation was requested on a read-only category. Rejected before
    /// any network call.
    #[error("{category} events are read-only")]
    UnsupportedOperation { category: EventCategory },

    /// The meeting store refused a write; its message is passed through
    /// verbatim. Nothing was applied locally, so there is nothing to roll
    /// back.
    #[error("meeting store rejected the write: {0}")]
    RemoteWrite(String),
}

impl CalendarError {
    fn source_fetch(source: &'static str, err: crate::clients::SourceError) -> Self {
        CalendarError::SourceFetch {
            source_name: source,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;
