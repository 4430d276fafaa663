// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for Fibre Micro
//!
//! Every failure is reported as a value. Nothing here aborts at runtime: the
//! core runs inside request handlers that may sit next to interrupt code.

use core::fmt;

/// Result type for Fibre Micro operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for Fibre Micro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A path segment did not name any member of the current registry
    NotFound,

    /// The handle was already invalid before the operation started
    InvalidHandle,

    /// Output text does not fit into the caller's buffer
    BufferTooSmall,

    /// Input text is not a valid value of the leaf type
    ParseError,

    /// Parsed integer does not name a variant of the leaf enum
    InvalidValue,

    /// The bound registry does not accept writes
    ReadOnly,

    /// The bound registry has no text representation (structural node)
    NotConvertible,

    /// Payload type does not match the type expected by the registry
    TypeMismatch,
}

impl Error {
    /// Whether this error is a text conversion failure (format or parse).
    pub const fn is_conversion_failure(&self) -> bool {
        matches!(
            self,
            Error::BufferTooSmall | Error::ParseError | Error::InvalidValue
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "Property not found"),
            Error::InvalidHandle => write!(f, "Invalid handle"),
            Error::BufferTooSmall => write!(f, "Buffer too small"),
            Error::ParseError => write!(f, "Malformed value text"),
            Error::InvalidValue => write!(f, "Value out of range"),
            Error::ReadOnly => write!(f, "Property is read-only"),
            Error::NotConvertible => write!(f, "Property has no text representation"),
            Error::TypeMismatch => write!(f, "Payload does not match registry type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_failures() {
        assert!(Error::BufferTooSmall.is_conversion_failure());
        assert!(Error::ParseError.is_conversion_failure());
        assert!(Error::InvalidValue.is_conversion_failure());
        assert!(!Error::ReadOnly.is_conversion_failure());
        assert!(!Error::NotFound.is_conversion_failure());
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::ReadOnly.to_string(), "Property is read-only");
        assert_eq!(Error::NotFound.to_string(), "Property not found");
    }
}
