//! HTTP handlers for the calendar engine and the dashboard overview.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{CreateMeetingResponse, Event, EventId, MeetingDraft, OverviewResponse};

use crate::calendar::{
    filter_events, resolve_window, Aggregator, Granularity, MutationCoordinator, TimeWindow,
};
use crate::clients::Sources;
use crate::error::ApiResult;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
    pub coordinator: MutationCoordinator,
}

impl AppState {
    pub fn new(sources: Sources) -> Self {
        Self {
            aggregator: Aggregator::new(sources.clone()),
            coordinator: MutationCoordinator::new(sources),
        }
    }
}

/// Query parameters selecting the visible window, plus an optional search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsQuery {
    /// Reference instant; defaults to now.
    pub date: Option<DateTime<Utc>>,
    /// View granularity; defaults to month.
    pub view: Option<Granularity>,
    /// Case-insensitive title/description filter.
    pub q: Option<String>,
}

impl EventsQuery {
    fn window(&self) -> TimeWindow {
        let reference = self.date.unwrap_or_else(Utc::now);
        resolve_window(reference, self.view.unwrap_or_default())
    }
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Json<Vec<Event>>> {
    let events = state.aggregator.list_events(&query.window()).await?;
    let events = match query.q.as_deref() {
        Some(q) => filter_events(events, q),
        None => events,
    };
    Ok(Json(events))
}

pub async fn todays_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    let window = resolve_window(Utc::now(), Granularity::Day);
    Ok(Json(state.aggregator.list_events(&window).await?))
}

pub async fn this_weeks_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    let window = resolve_window(Utc::now(), Granularity::Week);
    Ok(Json(state.aggregator.list_events(&window).await?))
}

pub async fn create_meeting(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
    Json(draft): Json<MeetingDraft>,
) -> ApiResult<(StatusCode, Json<CreateMeetingResponse>)> {
    let (id, events) = state
        .coordinator
        .create_meeting(draft, &query.window())
        .await?;
    Ok((StatusCode::CREATED, Json(CreateMeetingResponse { id, events })))
}

pub async fn update_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EventsQuery>,
    Json(draft): Json<MeetingDraft>,
) -> ApiResult<Json<Vec<Event>>> {
    let events = state
        .coordinator
        .update_meeting(&EventId::from(id), draft, &query.window())
        .await?;
    Ok(Json(events))
}

pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Json<Vec<Event>>> {
    let events = state
        .coordinator
        .delete_meeting(&EventId::from(id), &query.window())
        .await?;
    Ok(Json(events))
}

pub async fn overview(State(state): State<AppState>) -> ApiResult<Json<OverviewResponse>> {
    let counts = state.aggregator.source_counts().await?;
    Ok(Json(OverviewResponse {
        task_count: counts.tasks,
        note_count: counts.notes,
        meeting_count: counts.meetings,
    }))
}
