use std::sync::{Mutex, PoisonError};

use super::CertificateStore;
use crate::certificate::Certificate;
use crate::error::StoreError;

/// In-process certificate store, used by tests.
#[derive(Default)]
pub struct MemoryStore {
    certificates: Mutex<Vec<Certificate>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(&self, f: impl FnOnce(&mut Vec<Certificate>) -> T) -> T {
        let mut records = self
            .certificates
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut records)
    }
}

impl CertificateStore for MemoryStore {
    fn insert(&self, certificate: Certificate) -> Result<(), StoreError> {
        self.with_records(|records| {
            if records.iter().any(|c| c.id == certificate.id) {
                return Err(StoreError::Duplicate(certificate.id));
            }
            records.push(certificate);
            Ok(())
        })
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Certificate>, StoreError> {
        Ok(self.with_records(|records| records.iter().find(|c| c.id == id).cloned()))
    }

    fn exists_by_id(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.with_records(|records| records.iter().any(|c| c.id == id)))
    }

    fn last_id_with_prefix(&self, prefix: &str) -> Result<Option<String>, StoreError> {
        Ok(self.with_records(|records| {
            records
                .iter()
                .filter(|c| c.id.starts_with(prefix))
                .map(|c| c.id.clone())
                .max()
        }))
    }

    fn list_all(&self) -> Result<Vec<Certificate>, StoreError> {
        let mut certificates = self.with_records(|records| records.clone());
        certificates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(certificates)
    }
}
