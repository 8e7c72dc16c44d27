//! Ambix Certify - Certificate Issuance and Verification Service
//!
//! Backend for the Ambixous community site: sequential certificate-ID
//! allocation, certificate issuance and public verification, an events
//! catalogue, a mentors directory, and a contact intake endpoint, all
//! served over a JSON HTTP API backed by flat JSON files.
//!
//! # Overview
//!
//! Certificate IDs carry a month-scoped prefix and a four-digit sequence:
//!
//! ```text
//! AMBX FEB 26 0001
//! └──┘ └─┘ └┘ └──┘
//! brand month year sequence
//! ```
//!
//! The allocator proposes candidates against the store's current maximum
//! and the store's duplicate rejection is the final arbiter, so two
//! admins generating at the same time can never both persist the same id.
//!
//! # Quick Start
//!
//! ```bash
//! cargo build --release
//! ./target/release/ambix-certify
//! ```
//!
//! Configuration is read from `config.toml` in the working directory;
//! every field has a default, so an empty file is a valid start.
//!
//! # Module Overview
//!
//! - [`id_allocator`]: candidate generation, retry loop, and the
//!   timestamp fallback for exhausted sequences
//! - [`certificate`]: certificate records, request validation, and the
//!   id format check used by verification clients
//! - [`store`]: the [`store::CertificateStore`] trait with file-backed
//!   and in-memory implementations
//! - [`events`]: event records, admin-side validation, and the public
//!   upcoming/past normalization
//! - [`mentors`]: read-only mentor directory with search and category
//!   filters
//! - [`auth`]: bearer-token resolution against the admin allow-list
//! - [`webserver`]: axum router, handlers, and graceful shutdown
//!
//! # Error Handling
//!
//! Domain code returns typed errors ([`error::StoreError`],
//! [`error::ApiError`], [`error::ValidationErrors`]); startup paths use
//! `anyhow::Result` with context:
//!
//! ```no_run
//! use ambix_certify::configs::AppConfig;
//! use anyhow::Result;
//!
//! fn example() -> Result<()> {
//!     let config = AppConfig::load()?;
//!     println!("serving on {}:{}", config.server.host, config.server.port);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod certificate;
pub mod configs;
pub mod error;
pub mod events;
pub mod id_allocator;
pub mod mentors;
pub mod store;
pub mod webserver;

#[cfg(test)]
pub mod testing;
