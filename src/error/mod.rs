//! Error types for samplebuf.
//!
//! Only the fallible additions return these. The core operations (`create`,
//! `reserve`, `squeeze`) treat allocation failure as fatal, and unchecked
//! indexing reports nothing.

use std::collections::TryReserveError;
use std::fmt;

/// Errors returned by the fallible container operations.
#[derive(Debug)]
pub enum ContainerError {
    /// The allocator refused to grow the buffer.
    Allocation {
        /// The element count that was requested.
        requested: usize,
        /// The allocator's error.
        source: TryReserveError,
    },

    /// The requested length exceeds the configured limit.
    TooLarge {
        /// The element count that was requested.
        requested: usize,
        /// The configured maximum.
        max: usize,
    },

    /// A checked access was outside `0..len`.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The container length at the time of access.
        len: usize,
    },

    /// An identifier could not be mapped to a buffer position.
    InvalidIdentifier {
        /// Debug rendering of the identifier.
        value: String,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::Allocation { requested, source } => {
                write!(f, "allocation failed for {} elements: {}", requested, source)
            }
            ContainerError::TooLarge { requested, max } => {
                write!(f, "container too large: {} elements (max {})", requested, max)
            }
            ContainerError::IndexOutOfRange { index, len } => {
                write!(f, "index out of range: {} (len {})", index, len)
            }
            ContainerError::InvalidIdentifier { value } => {
                write!(f, "invalid element identifier: {}", value)
            }
            ContainerError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ContainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContainerError::Allocation { source, .. } => Some(source),
            _ => None,
        }
    }
}
