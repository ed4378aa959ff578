//! Errors reported by `HashTable` construction and resizing

use thiserror::Error;

/// Failures that a table operation reports to its caller instead of corrupting state.
///
/// Lookups and removals of absent keys are not errors; they are expressed through `Option`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A table was asked to hold zero buckets, which leaves no slot to route keys to.
    #[error("table capacity must be at least one bucket")]
    ZeroCapacity,
}

/// Result alias used by fallible table operations
pub type Result<T> = std::result::Result<T, TableError>;
