//! Integration tests for curriculum synthesis and bulk generation

mod bulk_orchestrator;
mod config_integration;
mod curriculum_assembly;
mod logging_init;
pub mod test_utils;
