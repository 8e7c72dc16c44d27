//! Certificate Store
//!
//! Persistence boundary for certificates. The aggregate of stored records
//! is the only state and it only grows: this service creates and reads
//! certificates, never updates or deletes them.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::certificate::Certificate;
use crate::error::StoreError;

/// Operations the allocator and the read paths need.
///
/// `insert` is the uniqueness authority: implementations must reject a
/// duplicate id atomically, regardless of what `exists_by_id` reported
/// moments earlier. A failed insert leaves the stored set unmodified.
pub trait CertificateStore: Send + Sync {
    fn insert(&self, certificate: Certificate) -> Result<(), StoreError>;

    /// Exact-match lookup. A plain miss is `Ok(None)`, never an error.
    fn find_by_id(&self, id: &str) -> Result<Option<Certificate>, StoreError>;

    fn exists_by_id(&self, id: &str) -> Result<bool, StoreError>;

    /// Lexicographically greatest stored id starting with `prefix`.
    fn last_id_with_prefix(&self, prefix: &str) -> Result<Option<String>, StoreError>;

    /// All certificates, newest first.
    fn list_all(&self) -> Result<Vec<Certificate>, StoreError>;
}
