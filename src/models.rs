//! Data model for events, attendees, and the paginated response envelope,
//! mirroring the backend schemas.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

/// An event as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: u32,
    /// Number of registered attendees; absent on older backend versions.
    #[serde(default)]
    pub attendee_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Lifecycle of an event relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Ended,
}

/// How close an event is to capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityStatus {
    Available,
    AlmostFull,
    Full,
}

impl Event {
    pub fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        if now < self.start_time {
            EventStatus::Upcoming
        } else if now <= self.end_time {
            EventStatus::Ongoing
        } else {
            EventStatus::Ended
        }
    }

    /// Capacity bucket: full at 95% of capacity, almost full at 70%.
    pub fn capacity_status(&self) -> CapacityStatus {
        if self.max_capacity == 0 {
            return CapacityStatus::Full;
        }
        let percentage = f64::from(self.attendee_count) / f64::from(self.max_capacity) * 100.0;
        if percentage >= 95.0 {
            CapacityStatus::Full
        } else if percentage >= 70.0 {
            CapacityStatus::AlmostFull
        } else {
            CapacityStatus::Available
        }
    }
}

/// An attendee registration as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub event_id: i64,
}

/// Payload for `POST /events`.
#[derive(Debug, Clone, Serialize)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: u32,
}

impl NewEvent {
    /// Pre-flight validation; mirrors the backend's own rules so obviously
    /// broken submissions never leave the client.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() || self.location.trim().is_empty() {
            return Err(ClientError::validation("Name and location cannot be empty"));
        }
        if self.start_time >= self.end_time {
            return Err(ClientError::validation("End time must be after start time"));
        }
        if self.max_capacity == 0 {
            return Err(ClientError::validation(
                "Max capacity must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Payload for `POST /events/{id}/register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAttendee {
    pub name: String,
    pub email: String,
}

impl NewAttendee {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::validation("Name cannot be empty"));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ClientError::validation("Invalid email address"));
        }
        Ok(())
    }
}

/// Paginated response envelope shared by all list endpoints.
///
/// Invariants maintained by the server: `items.len() <= limit`,
/// `has_next == (offset + items.len() < total)`, `has_prev == (offset > 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
