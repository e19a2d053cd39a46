//! Persistence layer for curriculum records and generated content

use crate::error::StorageError;
use crate::provider::GenerationResult;
use crate::store::{CurriculumRecord, CurriculumStore, GeneratedContentStore};
use sled::{Db, Tree};
use std::io;
use std::path::Path;

const TREE_CURRICULA: &str = "curricula";
const TREE_GENERATED: &str = "generated_content";

/// Sled-based implementation of the curriculum and generated-content stores
pub struct SledCurriculumStore {
    db: Db,
    curricula: Tree,
    generated: Tree,
}

impl SledCurriculumStore {
    /// Open (or create) a store at the given directory.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(to_storage_io)?;
        Self::from_db(db)
    }

    /// In-memory store that is discarded on drop.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(to_storage_io)?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self, StorageError> {
        let curricula = db.open_tree(TREE_CURRICULA).map_err(to_storage_io)?;
        let generated = db.open_tree(TREE_GENERATED).map_err(to_storage_io)?;
        Ok(Self {
            db,
            curricula,
            generated,
        })
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush().map_err(to_storage_io)?;
        Ok(())
    }
}

impl CurriculumStore for SledCurriculumStore {
    fn save_curriculum(&self, record: &CurriculumRecord) -> Result<(), StorageError> {
        let value = serde_json::to_vec(record).map_err(to_storage_data)?;
        self.curricula
            .insert(record.id.as_bytes(), value)
            .map_err(to_storage_io)?;
        Ok(())
    }

    fn load_curriculum(&self, id: &str) -> Result<Option<CurriculumRecord>, StorageError> {
        let Some(raw) = self.curricula.get(id.as_bytes()).map_err(to_storage_io)? else {
            return Ok(None);
        };
        let record = serde_json::from_slice(&raw).map_err(to_storage_data)?;
        Ok(Some(record))
    }
}

impl GeneratedContentStore for SledCurriculumStore {
    fn save_generated(&self, key: &str, result: &GenerationResult) -> Result<(), StorageError> {
        let value = serde_json::to_vec(result).map_err(to_storage_data)?;
        self.generated
            .insert(key.as_bytes(), value)
            .map_err(to_storage_io)?;
        Ok(())
    }

    fn load_generated(&self, key: &str) -> Result<Option<GenerationResult>, StorageError> {
        let Some(raw) = self.generated.get(key.as_bytes()).map_err(to_storage_io)? else {
            return Ok(None);
        };
        let result = serde_json::from_slice(&raw).map_err(to_storage_data)?;
        Ok(Some(result))
    }

    fn generated_count(&self) -> Result<usize, StorageError> {
        Ok(self.generated.len())
    }
}

fn to_storage_io(err: sled::Error) -> StorageError {
    StorageError::IoError(io::Error::new(io::ErrorKind::Other, err.to_string()))
}

fn to_storage_data(err: serde_json::Error) -> StorageError {
    StorageError::Serialization(err.to_string())
}
