//! Error type shared by the descriptor builder and the block library.

use crate::model::ContextType;

/// Errors raised by this crate.
///
/// Both variants signal a defect in the caller's input rather than a runtime
/// condition worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockDescError {
    /// A stage argument was not exactly one of `INIT`, `UPDATE` or `OUTPUT`.
    #[error("invalid context type: {0:?}")]
    InvalidArgument(ContextType),
    /// A block with the same id has already been registered.
    #[error("duplicate block id: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, BlockDescError>;
