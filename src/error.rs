//! Error types for versioned collection operations.

use thiserror::Error;

/// Error variants for versioned collection operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An index was provided that is out of the structure's bounds.
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// A value was provided outside the multiset's closed domain.
    #[error("value out of domain: {0}")]
    ValueOutOfDomain(i64),

    /// A rank selection was performed for a rank that does not exist.
    #[error("rank selection out of range")]
    InvalidRank,

    /// A version id was provided that no operation has ever returned.
    #[error("unknown version: {0}")]
    InvalidVersion(usize),

    /// A rollback was requested to a point past the end of the undo log.
    #[error("invalid snapshot token: {0}")]
    InvalidSnapshot(usize),

    /// A byte buffer could not be decoded into a structure.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// An I/O error occurred during serialization or deserialization.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for versioned collection operations.
pub type Result<T> = std::result::Result<T, Error>;
