//! Events Catalogue
//!
//! Community events shown on the public site and managed through the admin
//! dashboard. Admin payloads are validated with field-level messages
//! ([`validation`]), stored records are shaped for display by
//! [`normalizers`], and the public listing splits around the current time
//! into upcoming and past.

pub mod normalizers;
pub mod validation;

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// Event publication lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Published,
    Limited,
    Closed,
    Cancelled,
    Archived,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Limited => "limited",
            EventStatus::Closed => "closed",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(EventStatus::Draft),
            "published" => Some(EventStatus::Published),
            "limited" => Some(EventStatus::Limited),
            "closed" => Some(EventStatus::Closed),
            "cancelled" => Some(EventStatus::Cancelled),
            "archived" => Some(EventStatus::Archived),
            _ => None,
        }
    }

    /// Whether events in this status appear on the public site.
    pub fn is_public(self) -> bool {
        matches!(self, EventStatus::Published | EventStatus::Limited)
    }
}

/// How attendees join the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    InPerson,
    Virtual,
    Hybrid,
}

impl EventFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in_person" => Some(EventFormat::InPerson),
            "virtual" => Some(EventFormat::Virtual),
            "hybrid" => Some(EventFormat::Hybrid),
            _ => None,
        }
    }
}

/// One catalogue event, persisted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub type_label: Option<String>,
    pub format: EventFormat,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub venue_city: Option<String>,
    pub venue_state: Option<String>,
    pub venue_country: Option<String>,
    pub registration_url: Option<String>,
    pub recap_url: Option<String>,
    pub expected_attendees: Option<i64>,
    pub actual_attendees: Option<i64>,
    pub impact_summary: Option<String>,
    pub status: EventStatus,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// IANA timezone label the event was scheduled in. Stored for clients
    /// that localize; timestamps themselves are UTC.
    pub timezone: String,
    pub hero_media_url: Option<String>,
    pub display_order: Option<i64>,
    pub is_featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub speakers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partition publicly visible events around `now`.
///
/// Upcoming events have not ended yet and sort soonest-first; past events
/// sort most-recent-first. Draft, closed, cancelled and archived events
/// never appear.
pub fn split_public(events: Vec<Event>, now: DateTime<Utc>) -> (Vec<Event>, Vec<Event>) {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for event in events {
        if !event.status.is_public() {
            continue;
        }
        if event.end_at >= now {
            upcoming.push(event);
        } else {
            past.push(event);
        }
    }

    upcoming.sort_by_key(|e| e.start_at);
    past.sort_by(|a, b| b.end_at.cmp(&a.end_at));

    (upcoming, past)
}

/// File-backed event store, same re-read-per-operation discipline as the
/// certificate store.
pub struct EventStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl EventStore {
    /// Open a store at `path`, creating the parent directory and an empty
    /// data file when missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        if !path.exists() {
            fs::write(&path, "[]")?;
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    fn read_all(&self) -> Result<Vec<Event>, StoreError> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, events: &[Event]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(events)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Event>, StoreError> {
        self.read_all()
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read_all()?.len())
    }

    pub fn create(&self, event: Event) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut events = self.read_all()?;
        if events.iter().any(|e| e.id == event.id) {
            return Err(StoreError::Duplicate(event.id.to_string()));
        }

        events.push(event);
        self.write_all(&events)
    }

    /// Replace the stored event carrying the same id, keeping its original
    /// creation stamp. `Ok(false)` when no such event exists.
    pub fn update(&self, event: Event) -> Result<bool, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut events = self.read_all()?;
        let Some(slot) = events.iter_mut().find(|e| e.id == event.id) else {
            return Ok(false);
        };

        let created_at = slot.created_at;
        *slot = Event { created_at, ..event };

        self.write_all(&events)?;
        Ok(true)
    }

    /// `Ok(false)` when no event with `id` exists.
    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut events = self.read_all()?;
        let before = events.len();
        events.retain(|e| e.id != id);

        if events.len() == before {
            return Ok(false);
        }

        self.write_all(&events)?;
        Ok(true)
    }
}
