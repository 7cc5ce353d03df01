//! Errors raised by collection operations and cursors.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Error type for collection and cursor operations.
///
/// Every variant is raised before the failing call touches any state, so an `Err` always
/// leaves the collection exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A collection was asked to preallocate zero slots.
    #[error("capacity must be at least 1, got {capacity}")]
    InvalidArgument { capacity: usize },

    /// A positional operation addressed a slot outside the legal range.
    ///
    /// `bound` is the exclusive upper limit that applied to the call: the size for
    /// lookups and removals, the size plus one for insertions.
    #[error("index {index} is out of range for bound {bound}")]
    IndexOutOfRange { index: usize, bound: usize },

    /// The cursor has already produced every element.
    #[error("no more elements to get")]
    NoSuchElement,

    /// The source collection was structurally modified after the cursor was created.
    #[error("collection was modified during iteration (expected generation {expected}, found {found})")]
    ConcurrentStructuralChange { expected: u64, found: u64 },
}
