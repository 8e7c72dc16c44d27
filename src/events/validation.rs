//! Event payload validation.
//!
//! The admin dashboard submits loosely typed form data; every check here
//! records a field-level message instead of failing fast, so the caller
//! gets the full picture in one response.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use super::{Event, EventFormat, EventStatus};
use crate::error::ValidationErrors;

const MAX_TEXT_LEN: usize = 255;
const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Raw event payload as submitted by the admin dashboard.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub type_label: Option<String>,
    pub format: Option<String>,
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
    pub status: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub timezone: Option<String>,
    pub hero_media_url: Option<String>,
    pub display_order: Option<i64>,
    pub is_featured: Option<bool>,
    pub published_at: Option<String>,
    pub speakers: Option<Vec<String>>,
}

/// Validate `payload` into a typed [`Event`] with the given id.
///
/// `created_at` is stamped from `now`; updates through
/// [`EventStore::update`](super::EventStore::update) keep the stored
/// creation time regardless.
pub fn validate_event(
    payload: EventPayload,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<Event, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let slug = validate_slug(payload.slug.as_deref(), &mut errors);
    let title = required_text("title", "Title", payload.title.as_deref(), &mut errors);

    let format = parse_format(payload.format.as_deref(), &mut errors);
    let status = parse_status(payload.status.as_deref(), &mut errors);

    let start_at = required_datetime("start_at", "Start date", payload.start_at.as_deref(), &mut errors);
    let end_at = required_datetime("end_at", "End date", payload.end_at.as_deref(), &mut errors);
    if let (Some(start), Some(end)) = (start_at, end_at) {
        if end < start {
            errors.add("end_at", "End date must be after the start date");
        }
    }

    let registration_url = optional_url(
        "registration_url",
        "Registration URL",
        payload.registration_url,
        &mut errors,
    );
    let recap_url = optional_url("recap_url", "Recap URL", payload.recap_url, &mut errors);
    let hero_media_url = optional_url(
        "hero_media_url",
        "Hero media URL",
        payload.hero_media_url,
        &mut errors,
    );

    let expected_attendees = optional_nonnegative(
        "expected_attendees",
        "Expected attendees",
        payload.expected_attendees,
        &mut errors,
    );
    let actual_attendees = optional_nonnegative(
        "actual_attendees",
        "Actual attendees",
        payload.actual_attendees,
        &mut errors,
    );
    let display_order = optional_nonnegative(
        "display_order",
        "Display order",
        payload.display_order,
        &mut errors,
    );

    let published_at = optional_datetime(
        "published_at",
        "Published date",
        payload.published_at.as_deref(),
        &mut errors,
    );

    let timezone = trim_to_none(payload.timezone).unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

    let speakers: Vec<String> = payload
        .speakers
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    let (Some(slug), Some(title), Some(start_at), Some(end_at)) = (slug, title, start_at, end_at)
    else {
        return Err(errors);
    };

    Ok(Event {
        id,
        slug,
        title,
        subtitle: trim_to_none(payload.subtitle),
        summary: trim_to_none(payload.summary),
        description: trim_to_none(payload.description),
        type_label: trim_to_none(payload.type_label),
        format,
        venue_name: trim_to_none(payload.venue_name),
        venue_address: trim_to_none(payload.venue_address),
        venue_city: trim_to_none(payload.venue_city),
        venue_state: trim_to_none(payload.venue_state),
        venue_country: trim_to_none(payload.venue_country),
        registration_url,
        recap_url,
        expected_attendees,
        actual_attendees,
        impact_summary: trim_to_none(payload.impact_summary),
        status,
        start_at,
        end_at,
        timezone,
        hero_media_url,
        display_order,
        is_featured: payload.is_featured.unwrap_or(false),
        published_at,
        speakers,
        created_at: now,
    })
}

fn trim_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn required_text(
    field: &str,
    label: &str,
    value: Option<&str>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let trimmed = value.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        errors.add(field, format!("{label} is required"));
        return None;
    }
    if trimmed.len() > MAX_TEXT_LEN {
        errors.add(field, format!("{label} must be {MAX_TEXT_LEN} characters or fewer"));
        return None;
    }
    Some(trimmed.to_string())
}

fn validate_slug(value: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    let slug = required_text("slug", "Slug", value, errors)?;
    let normalized = slug.to_lowercase();

    // hyphen-separated runs of lowercase alphanumerics, no leading,
    // trailing or doubled hyphens
    let well_formed = normalized.split('-').all(|part| {
        !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    });
    if !well_formed {
        errors.add(
            "slug",
            "Slug can only contain lowercase letters, numbers, and hyphens",
        );
        return None;
    }

    Some(normalized)
}

fn optional_url(
    field: &str,
    label: &str,
    value: Option<String>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let value = trim_to_none(value)?;
    if Url::parse(&value).is_err() {
        errors.add(field, format!("{label} must be a valid URL"));
        return None;
    }
    Some(value)
}

fn optional_nonnegative(
    field: &str,
    label: &str,
    value: Option<i64>,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match value {
        Some(v) if v < 0 => {
            errors.add(field, format!("{label} cannot be negative"));
            None
        }
        other => other,
    }
}

/// Accepts RFC 3339 as well as the offset-less shapes produced by
/// `datetime-local` form inputs; offset-less values are taken as UTC.
fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

fn required_datetime(
    field: &str,
    label: &str,
    value: Option<&str>,
    errors: &mut ValidationErrors,
) -> Option<DateTime<Utc>> {
    let trimmed = value.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        errors.add(field, format!("{label} is required"));
        return None;
    }
    match parse_datetime(trimmed) {
        Some(dt) => Some(dt),
        None => {
            errors.add(field, format!("{label} must be a valid date"));
            None
        }
    }
}

fn optional_datetime(
    field: &str,
    label: &str,
    value: Option<&str>,
    errors: &mut ValidationErrors,
) -> Option<DateTime<Utc>> {
    let trimmed = value.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return None;
    }
    match parse_datetime(trimmed) {
        Some(dt) => Some(dt),
        None => {
            errors.add(field, format!("{label} must be a valid date"));
            None
        }
    }
}

fn parse_status(value: Option<&str>, errors: &mut ValidationErrors) -> EventStatus {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => EventStatus::Draft,
        Some(raw) => EventStatus::parse(raw).unwrap_or_else(|| {
            errors.add(
                "status",
                "Status must be one of draft, published, limited, closed, cancelled, archived",
            );
            EventStatus::Draft
        }),
    }
}

fn parse_format(value: Option<&str>, errors: &mut ValidationErrors) -> EventFormat {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => EventFormat::InPerson,
        Some(raw) => EventFormat::parse(raw).unwrap_or_else(|| {
            errors.add("format", "Format must be one of in_person, virtual, hybrid");
            EventFormat::InPerson
        }),
    }
}
