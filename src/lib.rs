//! Curricula: Deterministic Curriculum Synthesis
//!
//! Builds 20-page language lessons, weekly plans and full CEFR-level curricula from a
//! static level catalog, and drives a resilient bulk generation run over the whole
//! catalog against an external content-generation endpoint.

pub mod catalog;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod generation;
pub mod lesson;
pub mod logging;
pub mod pacing;
pub mod progress;
pub mod provider;
pub mod store;
pub mod synthesis;

pub use catalog::{Level, LevelProfile};
pub use curriculum::{Curriculum, CurriculumAssembler, WeekPlan};
pub use error::{ApiError, StorageError};
pub use generation::BulkGenerationOrchestrator;
pub use lesson::LessonDocument;
pub use provider::ResilientContentClient;
