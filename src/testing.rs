//! Shared fixtures for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::certificate::Certificate;
use crate::events::{Event, EventFormat, EventStatus};

pub fn sample_certificate(id: &str) -> Certificate {
    sample_certificate_at(id, Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap())
}

pub fn sample_certificate_at(id: &str, created_at: DateTime<Utc>) -> Certificate {
    Certificate {
        id: id.to_string(),
        candidate_name: "Jane Doe".to_string(),
        designation: "Campus Ambassador".to_string(),
        domain: "Marketing".to_string(),
        tenure_start: "2025-10-01".to_string(),
        tenure_end: "2026-01-01".to_string(),
        issued_at: "2026-01-10".to_string(),
        created_by: "hi.ambixous@gmail.com".to_string(),
        created_at,
    }
}

pub fn sample_event(slug: &str) -> Event {
    let start = Utc.with_ymd_and_hms(2026, 2, 20, 13, 0, 0).unwrap();
    Event {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: "Founders Meetup".to_string(),
        subtitle: None,
        summary: Some("An evening with early-stage founders.".to_string()),
        description: None,
        type_label: Some("Meetup".to_string()),
        format: EventFormat::InPerson,
        venue_name: Some("Innovation Hub".to_string()),
        venue_address: None,
        venue_city: Some("Bengaluru".to_string()),
        venue_state: None,
        venue_country: Some("India".to_string()),
        registration_url: Some("https://example.com/register".to_string()),
        recap_url: None,
        expected_attendees: Some(120),
        actual_attendees: None,
        impact_summary: None,
        status: EventStatus::Published,
        start_at: start,
        end_at: start + chrono::Duration::hours(3),
        timezone: "Asia/Kolkata".to_string(),
        hero_media_url: None,
        display_order: None,
        is_featured: false,
        published_at: Some(start - chrono::Duration::days(14)),
        speakers: vec!["Asha Rao".to_string()],
        created_at: Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap(),
    }
}
