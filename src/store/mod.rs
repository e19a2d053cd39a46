//! Curriculum Store
//!
//! External persistence for assembled curricula and bulk-generated lesson content. Writes
//! are best-effort from the pipeline's point of view: callers log failures and move on.

pub mod persistence;

pub use persistence::SledCurriculumStore;

use crate::curriculum::{Curriculum, ProgressionMap};
use crate::error::StorageError;
use crate::lesson::Section;
use crate::provider::GenerationResult;
use crate::catalog::Level;
use serde::{Deserialize, Serialize};

/// Persisted shape of an assembled curriculum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumRecord {
    pub id: String,
    pub level: Level,
    pub total_pages: u32,
    pub estimated_study_hours: f64,
    pub neuroscientific_features: Vec<String>,
    pub progression_map: ProgressionMap,
    /// The full curriculum, JSON-encoded
    pub full_curriculum_blob: String,
}

impl CurriculumRecord {
    pub fn from_curriculum(curriculum: &Curriculum) -> Result<Self, StorageError> {
        let blob = serde_json::to_string(curriculum)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Self {
            id: curriculum.id.clone(),
            level: curriculum.level,
            total_pages: curriculum.total_pages,
            estimated_study_hours: curriculum.estimated_study_hours,
            neuroscientific_features: Section::ORDER
                .iter()
                .map(|section| section.neurotrigger().to_string())
                .collect(),
            progression_map: curriculum.progression_map.clone(),
            full_curriculum_blob: blob,
        })
    }

    /// Decode the embedded curriculum.
    pub fn curriculum(&self) -> Result<Curriculum, StorageError> {
        serde_json::from_str(&self.full_curriculum_blob)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Curriculum record store interface
pub trait CurriculumStore: Send + Sync {
    fn save_curriculum(&self, record: &CurriculumRecord) -> Result<(), StorageError>;
    fn load_curriculum(&self, id: &str) -> Result<Option<CurriculumRecord>, StorageError>;
}

/// Store for content produced by bulk generation runs, keyed by lesson coordinates.
pub trait GeneratedContentStore: Send + Sync {
    fn save_generated(&self, key: &str, result: &GenerationResult) -> Result<(), StorageError>;
    fn load_generated(&self, key: &str) -> Result<Option<GenerationResult>, StorageError>;
    fn generated_count(&self) -> Result<usize, StorageError>;
}

/// Storage key for one bulk-generated lesson.
pub fn generated_key(level: Level, week: u32, lesson_in_week: u32) -> String {
    format!("{}:w{:02}:l{:02}", level.as_str(), week, lesson_in_week)
}
