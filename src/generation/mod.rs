pub mod orchestrator;
pub mod plan;
pub mod state;

pub use orchestrator::BulkGenerationOrchestrator;
pub use plan::{bulk_theme_index, validate_coordinates, BulkItem, CatalogWorkList};
pub use state::{CancellationToken, OrchestratorStatus, RunPhase};
