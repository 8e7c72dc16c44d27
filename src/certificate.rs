//! Certificate Model
//!
//! The persisted certificate record, its camelCase HTTP projection, and
//! validation of the create payload. Certificates are append-only: created
//! exactly once, read many times, never mutated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::id_allocator::MONTHS;

/// One issued credential, in its persisted (snake_case) form.
///
/// `created_by` is captured from the authenticated issuer at creation and
/// immutable thereafter. `created_at` is server-assigned and not exposed on
/// the public view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub candidate_name: String,
    pub designation: String,
    pub domain: String,
    #[serde(default)]
    pub tenure_start: String,
    #[serde(default)]
    pub tenure_end: String,
    pub issued_at: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// CamelCase projection returned by the HTTP interface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateView {
    pub id: String,
    pub candidate_name: String,
    pub designation: String,
    pub domain: String,
    pub tenure_start: String,
    pub tenure_end: String,
    pub issued_at: String,
    pub created_by: String,
}

impl From<Certificate> for CertificateView {
    fn from(certificate: Certificate) -> Self {
        Self {
            id: certificate.id,
            candidate_name: certificate.candidate_name,
            designation: certificate.designation,
            domain: certificate.domain,
            tenure_start: certificate.tenure_start,
            tenure_end: certificate.tenure_end,
            issued_at: certificate.issued_at,
            created_by: certificate.created_by,
        }
    }
}

/// Create payload as submitted by the admin dashboard, including the
/// pre-allocated id.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewCertificateRequest {
    pub id: String,
    pub candidate_name: String,
    pub designation: String,
    pub domain: String,
    pub tenure_start: String,
    pub tenure_end: String,
    pub issued_at: String,
}

impl NewCertificateRequest {
    /// Validate the payload and stamp it into a full record.
    ///
    /// `issued_at` falls back to the creation date when absent. Tenure dates
    /// may be empty. Fallback-format ids are accepted here; the store's
    /// duplicate rejection is the uniqueness authority.
    pub fn into_certificate(
        self,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Certificate, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let required = [
            ("id", &self.id, "Certificate ID is required"),
            ("candidateName", &self.candidate_name, "Candidate name is required"),
            ("designation", &self.designation, "Designation is required"),
            ("domain", &self.domain, "Domain is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.add(field, message);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let issued_at = if self.issued_at.trim().is_empty() {
            now.format("%Y-%m-%d").to_string()
        } else {
            self.issued_at.trim().to_string()
        };

        Ok(Certificate {
            id: self.id.trim().to_string(),
            candidate_name: self.candidate_name.trim().to_string(),
            designation: self.designation.trim().to_string(),
            domain: self.domain.trim().to_string(),
            tenure_start: self.tenure_start.trim().to_string(),
            tenure_end: self.tenure_end.trim().to_string(),
            issued_at,
            created_by: created_by.to_string(),
            created_at: now,
        })
    }
}

/// Whether `id` matches the sequential format `AMBX<MON><YY><4 digits>`,
/// e.g. `AMBXJAN260001`. Fallback-allocated ids carry a 6-digit timestamp
/// suffix and intentionally do not match.
pub fn is_valid_certificate_id(id: &str) -> bool {
    let Some(rest) = id.strip_prefix("AMBX") else {
        return false;
    };
    if rest.len() != 9 || !rest.is_ascii() {
        return false;
    }
    let (month, digits) = rest.split_at(3);
    MONTHS.contains(&month) && digits.chars().all(|c| c.is_ascii_digit())
}
