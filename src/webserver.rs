//! HTTP Interface
//!
//! Thin handlers over the stores: authenticate where required, validate,
//! call the store, shape the response. The public verification and events
//! endpoints are unauthenticated; everything that writes (and the admin
//! list/generate-id reads) goes through the bearer-token allow-list.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, Method,
    },
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::auth::require_admin;
use crate::certificate::{CertificateView, NewCertificateRequest};
use crate::configs::AppConfig;
use crate::error::{ApiError, ValidationErrors};
use crate::events::normalizers::{
    normalize_past, normalize_upcoming, PastEventView, UpcomingEventView,
};
use crate::events::validation::{validate_event, EventPayload};
use crate::events::{split_public, EventStore};
use crate::id_allocator;
use crate::mentors::{Mentor, MentorCategory, MentorStore};
use crate::store::{CertificateStore, JsonFileStore};

/// Shared application state handed to every handler.
pub struct AppState {
    pub config: AppConfig,
    pub certificates: Box<dyn CertificateStore>,
    pub events: EventStore,
    pub mentors: MentorStore,
}

impl AppState {
    /// Build state from configuration, opening the file-backed stores.
    pub fn new(config: AppConfig) -> Result<Arc<Self>> {
        let certificates = JsonFileStore::open(config.storage.certificates_file())
            .context("Failed to open certificate store")?;
        let events =
            EventStore::open(config.storage.events_file()).context("Failed to open event store")?;
        let mentors = MentorStore::open(config.storage.mentors_file())
            .context("Failed to open mentor store")?;

        Ok(Arc::new(Self {
            config,
            certificates: Box::new(certificates),
            events,
            mentors,
        }))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/status", get(status_handler))
        .route(
            "/api/certificates",
            get(list_certificates_handler).post(create_certificate_handler),
        )
        .route("/api/certificates/generate-id", get(generate_id_handler))
        .route("/api/certificates/:id", get(get_certificate_handler))
        .route(
            "/api/events",
            get(list_events_handler).post(create_event_handler),
        )
        .route(
            "/api/events/:id",
            put(update_event_handler).delete(delete_event_handler),
        )
        .route("/api/mentors", get(list_mentors_handler))
        .route("/api/contact", post(contact_handler))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until SIGINT/SIGTERM.
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let address = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = router(state);

    let listener = TcpListener::bind(&address)
        .await
        .context(format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    total_certificates: usize,
    total_events: usize,
    total_mentors: usize,
}

async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    Ok(Json(StatusResponse {
        status: "ok",
        total_certificates: state.certificates.list_all()?.len(),
        total_events: state.events.count()?,
        total_mentors: state.mentors.count()?,
    }))
}

#[derive(Serialize)]
struct CertificateListResponse {
    certificates: Vec<CertificateView>,
}

async fn list_certificates_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CertificateListResponse>, ApiError> {
    require_admin(&state.config.admin, &headers)?;

    let certificates = state
        .certificates
        .list_all()?
        .into_iter()
        .map(CertificateView::from)
        .collect();

    Ok(Json(CertificateListResponse { certificates }))
}

#[derive(Serialize)]
struct CertificateResponse {
    certificate: CertificateView,
}

/// Public verification lookup; no authentication.
async fn get_certificate_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CertificateResponse>, ApiError> {
    let certificate = state
        .certificates
        .find_by_id(&id)?
        .ok_or_else(|| ApiError::not_found("Certificate not found"))?;

    Ok(Json(CertificateResponse {
        certificate: certificate.into(),
    }))
}

#[derive(Serialize)]
struct CreateCertificateResponse {
    success: bool,
    certificate: CertificateView,
}

async fn create_certificate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<NewCertificateRequest>,
) -> Result<Json<CreateCertificateResponse>, ApiError> {
    let issuer = require_admin(&state.config.admin, &headers)?;

    let certificate = payload
        .into_certificate(&issuer, Utc::now())
        .map_err(ApiError::Validation)?;
    state.certificates.insert(certificate.clone())?;

    info!(id = %certificate.id, issuer = %issuer, "certificate issued");

    Ok(Json(CreateCertificateResponse {
        success: true,
        certificate: certificate.into(),
    }))
}

#[derive(Serialize)]
struct GenerateIdResponse {
    id: String,
}

/// Runs the allocator; persists nothing. The caller inserts the id via
/// the create endpoint and re-generates if that insert reports a
/// duplicate.
async fn generate_id_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<GenerateIdResponse>, ApiError> {
    require_admin(&state.config.admin, &headers)?;

    let id = id_allocator::allocate(state.certificates.as_ref())?;
    Ok(Json(GenerateIdResponse { id }))
}

#[derive(Serialize)]
struct EventsResponse {
    upcoming: Vec<UpcomingEventView>,
    past: Vec<PastEventView>,
}

async fn list_events_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EventsResponse>, ApiError> {
    let (upcoming, past) = split_public(state.events.list()?, Utc::now());

    Ok(Json(EventsResponse {
        upcoming: upcoming.iter().map(normalize_upcoming).collect(),
        past: past.iter().map(normalize_past).collect(),
    }))
}

#[derive(Serialize)]
struct EventIdResponse {
    success: bool,
    id: Uuid,
}

async fn create_event_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<EventPayload>,
) -> Result<Json<EventIdResponse>, ApiError> {
    require_admin(&state.config.admin, &headers)?;

    let event = validate_event(payload, Uuid::new_v4(), Utc::now())
        .map_err(ApiError::Validation)?;
    let id = event.id;
    state.events.create(event)?;

    info!(%id, "event created");
    Ok(Json(EventIdResponse { success: true, id }))
}

async fn update_event_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<EventPayload>,
) -> Result<Json<EventIdResponse>, ApiError> {
    require_admin(&state.config.admin, &headers)?;

    let event = validate_event(payload, id, Utc::now()).map_err(ApiError::Validation)?;
    if !state.events.update(event)? {
        return Err(ApiError::not_found("Event not found"));
    }

    info!(%id, "event updated");
    Ok(Json(EventIdResponse { success: true, id }))
}

async fn delete_event_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<EventIdResponse>, ApiError> {
    require_admin(&state.config.admin, &headers)?;

    if !state.events.delete(id)? {
        return Err(ApiError::not_found("Event not found"));
    }

    info!(%id, "event deleted");
    Ok(Json(EventIdResponse { success: true, id }))
}

#[derive(Deserialize)]
struct MentorQuery {
    q: Option<String>,
    category: Option<String>,
}

#[derive(Serialize)]
struct MentorsResponse {
    mentors: Vec<Mentor>,
}

async fn list_mentors_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MentorQuery>,
) -> Result<Json<MentorsResponse>, ApiError> {
    let category = match params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        Some(raw) => Some(MentorCategory::parse(raw).ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add("category", "Unknown mentor category");
            ApiError::Validation(errors)
        })?),
        None => None,
    };
    let query = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let mentors = match (query, category) {
        (Some(q), Some(c)) => {
            let mut matched = state.mentors.search(q)?;
            matched.retain(|m| m.category == c);
            matched
        }
        (Some(q), None) => state.mentors.search(q)?,
        (None, Some(c)) => state.mentors.by_category(c)?,
        (None, None) => state.mentors.list()?,
    };

    Ok(Json(MentorsResponse { mentors }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactRequest {
    name: String,
    email: String,
    #[serde(rename = "type")]
    contact_type: String,
    message: String,
}

#[derive(Serialize)]
struct ContactResponse {
    message: &'static str,
}

async fn contact_handler(
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let mut errors = ValidationErrors::new();
    let required = [
        ("name", &payload.name, "Name is required"),
        ("email", &payload.email, "Email is required"),
        ("type", &payload.contact_type, "Type is required"),
        ("message", &payload.message, "Message is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.add(field, message);
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    info!(
        name = %payload.name,
        email = %payload.email,
        contact_type = %payload.contact_type,
        "contact form submission"
    );

    Ok(Json(ContactResponse {
        message: "Form submitted successfully",
    }))
}
