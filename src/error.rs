//! Error types for the life engine.

use thiserror::Error;

/// Errors raised while constructing boards or engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// A board needs at least one column and one row, and its cell count
    /// has to fit in memory.
    #[error("invalid board dimensions {width}x{height}: both must be positive and the board must fit in memory")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LifeError>;
