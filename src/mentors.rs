//! Mentors Directory
//!
//! Read-only listing behind the public mentors page. The data file is
//! seeded out of band; the API only lists, searches, and filters.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// Directory filter categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MentorCategory {
    Founders,
    #[serde(rename = "Growth & Marketing")]
    GrowthAndMarketing,
    Professionals,
}

impl MentorCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Founders" => Some(MentorCategory::Founders),
            "Growth & Marketing" => Some(MentorCategory::GrowthAndMarketing),
            "Professionals" => Some(MentorCategory::Professionals),
            _ => None,
        }
    }
}

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: Uuid,
    pub name: String,
    pub linkedin_url: String,
    pub brand_name: String,
    pub category: MentorCategory,
    pub created_at: DateTime<Utc>,
}

/// File-backed mentor directory.
pub struct MentorStore {
    path: PathBuf,
}

impl MentorStore {
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

        Ok(Self { path })
    }

    fn read_all(&self) -> Result<Vec<Mentor>, StoreError> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn sorted(mut mentors: Vec<Mentor>) -> Vec<Mentor> {
        mentors.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        mentors
    }

    /// All mentors ordered by name.
    pub fn list(&self) -> Result<Vec<Mentor>, StoreError> {
        Ok(Self::sorted(self.read_all()?))
    }

    /// Case-insensitive substring match over name and brand name.
    pub fn search(&self, query: &str) -> Result<Vec<Mentor>, StoreError> {
        let needle = query.to_lowercase();
        let mentors = self
            .read_all()?
            .into_iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.brand_name.to_lowercase().contains(&needle)
            })
            .collect();
        Ok(Self::sorted(mentors))
    }

    pub fn by_category(&self, category: MentorCategory) -> Result<Vec<Mentor>, StoreError> {
        let mentors = self
            .read_all()?
            .into_iter()
            .filter(|m| m.category == category)
            .collect();
        Ok(Self::sorted(mentors))
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn mentor(name: &str, brand: &str, category: MentorCategory) -> Mentor {
        Mentor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            linkedin_url: format!("https://linkedin.com/in/{}", name.to_lowercase()),
            brand_name: brand.to_string(),
            category,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn seeded_store(dir: &TempDir) -> MentorStore {
        let path = dir.path().join("mentors.json");
        let mentors = vec![
            mentor("Zara Khan", "GrowthLab", MentorCategory::GrowthAndMarketing),
            mentor("Arjun Mehta", "Mehta Ventures", MentorCategory::Founders),
            mentor("Priya Nair", "Nair & Co", MentorCategory::Professionals),
        ];
        fs::write(&path, serde_json::to_string_pretty(&mentors).unwrap()).unwrap();
        MentorStore::open(path).unwrap()
    }

    #[test]
    fn test_list_orders_by_name() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);

        let names: Vec<String> = store.list().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Arjun Mehta", "Priya Nair", "Zara Khan"]);
    }

    #[test]
    fn test_search_matches_name_and_brand_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);

        let by_name = store.search("zara").unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Zara Khan");

        let by_brand = store.search("VENTURES").unwrap();
        assert_eq!(by_brand.len(), 1);
        assert_eq!(by_brand[0].brand_name, "Mehta Ventures");

        assert!(store.search("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_category_filter() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);

        let founders = store.by_category(MentorCategory::Founders).unwrap();
        assert_eq!(founders.len(), 1);
        assert_eq!(founders[0].name, "Arjun Mehta");
    }

    #[test]
    fn test_category_labels_round_trip() {
        assert_eq!(
            MentorCategory::parse("Growth & Marketing"),
            Some(MentorCategory::GrowthAndMarketing)
        );
        assert_eq!(MentorCategory::parse("Investors"), None);

        let json = serde_json::to_string(&MentorCategory::GrowthAndMarketing).unwrap();
        assert_eq!(json, "\"Growth & Marketing\"");
    }

    #[test]
    fn test_open_creates_empty_directory_file() {
        let dir = TempDir::new().unwrap();
        let store = MentorStore::open(dir.path().join("mentors.json")).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }
}
