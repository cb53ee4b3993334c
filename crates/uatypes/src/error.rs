// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type for lifecycle, array and variant operations.

use crate::descriptor::TypeIndex;
use crate::status::StatusCode;
use thiserror::Error;

/// Errors returned by the type system.
///
/// Each variant maps onto exactly one [`StatusCode`] so callers at the
/// protocol boundary can report it without inspecting the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An allocation could not be satisfied.
    #[error("out of memory")]
    OutOfMemory,
    /// Negative or oversized count, malformed descriptor, bad length.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Bounded formatting overflowed its buffer.
    #[error("encoding error: {0}")]
    Encoding(String),
    /// The operation is not defined for this value (e.g. copying a data source).
    #[error("not supported: {0}")]
    NotSupported(&'static str),
    /// An instance was handed to an operation for a different type.
    #[error("type mismatch: expected type index {expected}, got {got}")]
    TypeMismatch {
        /// Type index the operation was parameterized with.
        expected: TypeIndex,
        /// Type index of the instance actually passed.
        got: TypeIndex,
    },
    /// No descriptor/handler is registered under this index.
    #[error("unknown type index {0}")]
    UnknownType(TypeIndex),
    /// A data source reported a failure status.
    #[error("data source failed with {0}")]
    DataSource(StatusCode),
}

impl Error {
    /// Status code reported for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::OutOfMemory => StatusCode::BAD_OUT_OF_MEMORY,
            Self::InvalidArgument(_) | Self::UnknownType(_) => StatusCode::BAD_INVALID_ARGUMENT,
            Self::Encoding(_) => StatusCode::BAD_ENCODING_ERROR,
            Self::NotSupported(_) => StatusCode::BAD_NOT_SUPPORTED,
            Self::TypeMismatch { .. } => StatusCode::BAD_TYPE_MISMATCH,
            Self::DataSource(code) => *code,
        }
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

impl From<&Error> for StatusCode {
    fn from(err: &Error) -> Self {
        err.status_code()
    }
}

/// Convenient alias for results carrying [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Collapse a result into the status code the protocol layer reports.
#[must_use]
pub fn status_of<T>(result: &Result<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::GOOD,
        Err(err) => err.status_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::OutOfMemory.status_code(), StatusCode::BAD_OUT_OF_MEMORY);
        assert_eq!(
            Error::InvalidArgument("count".into()).status_code(),
            StatusCode::BAD_INVALID_ARGUMENT
        );
        assert_eq!(
            Error::Encoding("overflow".into()).status_code(),
            StatusCode::BAD_ENCODING_ERROR
        );
        assert_eq!(
            Error::NotSupported("copy").status_code(),
            StatusCode::BAD_NOT_SUPPORTED
        );
        assert_eq!(
            Error::DataSource(StatusCode(0x8123_0000)).status_code(),
            StatusCode(0x8123_0000)
        );
    }

    #[test]
    fn test_status_of() {
        assert_eq!(status_of(&Ok::<_, Error>(1)), StatusCode::GOOD);
        assert_eq!(
            status_of(&Err::<(), _>(Error::OutOfMemory)),
            StatusCode::BAD_OUT_OF_MEMORY
        );
    }
}
