//! reqwest-backed implementations of the source traits.

use async_trait::async_trait;
use serde::Deserialize;
use shared::{MeetingRecord, MeetingWrite, NoteRecord, TaskRecord};

use super::{MeetingSource, NoteSource, SourceError, TaskSource};

/// Two-variant write outcome as the meeting service encodes it:
/// `{"ok": ...}` on success, `{"err": "message"}` on rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum WriteOutcome<T> {
    Ok(T),
    Err(String),
}

impl<T> WriteOutcome<T> {
    fn into_result(self) -> Result<T, SourceError> {
        match self {
            WriteOutcome::Ok(value) => Ok(value),
            WriteOutcome::Err(message) => Err(SourceError::Rejected(message)),
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SourceError> {
    if !response.status().is_success() {
        return Err(SourceError::UnexpectedStatus(response.status()));
    }
    Ok(response.json().await?)
}

/// Task service over HTTP.
pub struct HttpTaskSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskSource {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl TaskSource for HttpTaskSource {
    async fn list_user_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
        let response = self
            .client
            .get(format!("{}/tasks", self.base_url))
            .send()
            .await?;
        decode(response).await
    }
}

/// Note service over HTTP.
pub struct HttpNoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNoteSource {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl NoteSource for HttpNoteSource {
    async fn list_user_notes(&self) -> Result<Vec<NoteRecord>, SourceError> {
        let response = self
            .client
            .get(format!("{}/notes", self.base_url))
            .send()
            .await?;
        decode(response).await
    }
}

/// Meeting service over HTTP, read and write.
pub struct HttpMeetingSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMeetingSource {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl MeetingSource for HttpMeetingSource {
    async fn list_user_meetings(&self) -> Result<Vec<MeetingRecord>, SourceError> {
        let response = self
            .client
            .get(format!("{}/meetings", self.base_url))
            .send()
            .await?;
        decode(response).await
    }

    async fn create_meeting(&self, write: MeetingWrite) -> Result<MeetingRecord, SourceError> {
        let response = self
            .client
            .post(format!("{}/meetings", self.base_url))
            .json(&write)
            .send()
            .await?;
        let outcome: WriteOutcome<MeetingRecord> = decode(response).await?;
        outcome.into_result()
    }

    async fn update_meeting(&self, id: u64, write: MeetingWrite) -> Result<(), SourceError> {
        let response = self
            .client
            .put(format!("{}/meetings/{}", self.base_url, id))
            .json(&write)
            .send()
            .await?;
        let outcome: WriteOutcome<()> = decode(response).await?;
        outcome.into_result()
    }

    async fn delete_meeting(&self, id: u64) -> Result<(), SourceError> {
        let response = self
            .client
            .delete(format!("{}/meetings/{}", self.base_url, id))
            .send()
            .await?;
        let outcome: WriteOutcome<()> = decode(response).await?;
        outcome.into_result()
    }
}
