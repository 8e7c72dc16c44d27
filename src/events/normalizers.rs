//! Display normalization for the public events page.
//!
//! Stored events are shaped into the records the site renders, with the
//! fallback chains the page expects: summary before description, actual
//! before expected attendance, recap before registration link. Dates are
//! rendered in UTC; the stored timezone label rides along on the event for
//! clients that localize.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Event;

/// Upcoming event as rendered on the public events page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEventView {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub location: String,
    pub attendees: i64,
    pub description: String,
    pub speakers: Vec<String>,
    pub status: String,
    pub registration_url: String,
}

/// Past event as rendered on the public events page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PastEventView {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub attendees: i64,
    pub impact: String,
    pub description: String,
    pub learn_url: String,
}

/// Capitalize each word, splitting on whitespace and underscores.
pub fn title_case(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Long-form date, e.g. `February 20, 2026`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Clock-time range, e.g. `6:00 PM – 9:00 PM`.
pub fn format_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{} – {}", format_time(start), format_time(end))
}

fn format_time(at: DateTime<Utc>) -> String {
    at.format("%-I:%M %p").to_string()
}

/// `City, Country` with missing parts elided.
pub fn resolve_location(event: &Event) -> String {
    [event.venue_city.as_deref(), event.venue_country.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn normalize_upcoming(event: &Event) -> UpcomingEventView {
    UpcomingEventView {
        id: event.id.to_string(),
        title: event.title.clone(),
        date: format_date(event.start_at),
        time: format_time_range(event.start_at, event.end_at),
        type_label: event
            .type_label
            .clone()
            .unwrap_or_else(|| "Community".to_string()),
        location: resolve_location(event),
        attendees: event.expected_attendees.unwrap_or(0),
        description: event
            .summary
            .clone()
            .or_else(|| event.description.clone())
            .unwrap_or_default(),
        speakers: event
            .speakers
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect(),
        status: display_status(event),
        registration_url: event
            .registration_url
            .clone()
            .unwrap_or_else(|| "#".to_string()),
    }
}

pub fn normalize_past(event: &Event) -> PastEventView {
    PastEventView {
        id: event.id.to_string(),
        title: event.title.clone(),
        date: format_date(event.start_at),
        type_label: event
            .type_label
            .clone()
            .unwrap_or_else(|| "Community".to_string()),
        attendees: event
            .actual_attendees
            .or(event.expected_attendees)
            .unwrap_or(0),
        impact: event.impact_summary.clone().unwrap_or_default(),
        description: event
            .summary
            .clone()
            .or_else(|| event.description.clone())
            .unwrap_or_default(),
        learn_url: event
            .recap_url
            .clone()
            .or_else(|| event.registration_url.clone())
            .unwrap_or_else(|| "#".to_string()),
    }
}

fn display_status(event: &Event) -> String {
    let label = title_case(event.status.as_str());
    if label.is_empty() {
        "Published".to_string()
    } else {
        label
    }
}
