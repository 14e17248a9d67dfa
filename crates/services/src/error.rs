//! Shared error types for the services crate.

use thiserror::Error;

use quest_core::CatalogError;

/// Errors emitted by `ProgressionEngine`.
///
/// A wrong command is not an error; it is reported as `CommandOutcome::Mismatch`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressionError {
    #[error(transparent)]
    Lookup(#[from] CatalogError),
}
