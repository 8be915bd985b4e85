//! Common traits for all UseCases

pub mod usecase_metadata;

// Re-exports
pub use usecase_metadata::UseCaseMetadata;
