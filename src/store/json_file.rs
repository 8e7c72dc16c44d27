use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use super::CertificateStore;
use crate::certificate::Certificate;
use crate::error::StoreError;

/// File-backed certificate store.
///
/// Every operation re-reads the data file, so no record state is held in
/// memory between requests. Writers serialize through `write_lock`, which
/// makes the duplicate check inside `insert` authoritative for this
/// process.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
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

    fn read_all(&self) -> Result<Vec<Certificate>, StoreError> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, certificates: &[Certificate]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(certificates)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl CertificateStore for JsonFileStore {
    fn insert(&self, certificate: Certificate) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut certificates = self.read_all()?;
        if certificates.iter().any(|c| c.id == certificate.id) {
            return Err(StoreError::Duplicate(certificate.id));
        }

        certificates.push(certificate);
        self.write_all(&certificates)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Certificate>, StoreError> {
        Ok(self.read_all()?.into_iter().find(|c| c.id == id))
    }

    fn exists_by_id(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.read_all()?.iter().any(|c| c.id == id))
    }

    fn last_id_with_prefix(&self, prefix: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|c| c.id.starts_with(prefix))
            .map(|c| c.id)
            .max())
    }

    fn list_all(&self) -> Result<Vec<Certificate>, StoreError> {
        let mut certificates = self.read_all()?;
        certificates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(certificates)
    }
}
