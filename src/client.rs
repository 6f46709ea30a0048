//! HTTP client for the event-management REST API.
//!
//! Every operation shares one decode path: non-2xx responses go through the
//! message-extraction chain in [`crate::error`], transport failures map to
//! the fixed network message, and nothing is retried or cached here.

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::controller::PageSource;
use crate::error::{self, ClientError};
use crate::models::{Attendee, Event, NewAttendee, NewEvent, Page};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the given API origin, e.g.
    /// `http://localhost:8000/api`.
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /events`. Validates the payload before any network call.
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, ClientError> {
        event.validate()?;
        let url = format!("{}/events", self.base_url);
        debug!(%url, name = %event.name, "creating event");
        let response = self
            .http
            .post(&url)
            .json(event)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    /// `GET /events?offset=&limit=`.
    pub async fn list_events(&self, offset: u64, limit: u64) -> Result<Page<Event>, ClientError> {
        let url = format!("{}/events", self.base_url);
        debug!(%url, offset, limit, "listing events");
        let response = self
            .http
            .get(&url)
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    /// `GET /events/{id}`.
    pub async fn get_event(&self, event_id: i64) -> Result<Event, ClientError> {
        let url = format!("{}/events/{}", self.base_url, event_id);
        debug!(%url, "fetching event");
        let response = self.http.get(&url).send().await.map_err(transport_error)?;
        decode(response).await
    }

    /// `GET /events/{id}/attendees?offset=&limit=`.
    pub async fn list_attendees(
        &self,
        event_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Attendee>, ClientError> {
        let url = format!("{}/events/{}/attendees", self.base_url, event_id);
        debug!(%url, offset, limit, "listing attendees");
        let response = self
            .http
            .get(&url)
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    /// `POST /events/{id}/register`. Validates the payload before any
    /// network call.
    pub async fn register_attendee(
        &self,
        event_id: i64,
        attendee: &NewAttendee,
    ) -> Result<Attendee, ClientError> {
        attendee.validate()?;
        let url = format!("{}/events/{}/register", self.base_url, event_id);
        debug!(%url, email = %attendee.email, "registering attendee");
        let response = self
            .http
            .post(&url)
            .json(attendee)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    warn!(error = %err, "transport failure");
    ClientError::network()
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(error::request_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|err| ClientError::MalformedResponse {
        details: err.to_string(),
    })
}

/// The event collection as a page source; events have no resource identity.
pub struct EventPages {
    client: ApiClient,
}

impl EventPages {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource<()> for EventPages {
    type Item = Event;

    async fn fetch_page(
        &self,
        _resource: &(),
        offset: u64,
        limit: u64,
    ) -> Result<Page<Event>, ClientError> {
        self.client.list_events(offset, limit).await
    }
}

/// One event's attendee collection as a page source, keyed by event id.
pub struct AttendeePages {
    client: ApiClient,
}

impl AttendeePages {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource<i64> for AttendeePages {
    type Item = Attendee;

    async fn fetch_page(
        &self,
        event_id: &i64,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Attendee>, ClientError> {
        self.client.list_attendees(*event_id, offset, limit).await
    }
}
