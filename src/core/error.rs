// Copyright 2025 Rankval Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for Rankval
//!
//! This module defines all error types used throughout the function engine.

use thiserror::Error;

use super::types::DocId;

/// Result type alias for Rankval operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for function construction and evaluation
///
/// This enum covers all error cases including both sentinel errors
/// and structured errors with context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Configuration errors (detected eagerly, at node construction)
    // =========================================================================
    /// Invalid argument for a function node
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // =========================================================================
    // Accessor errors (detected lazily, at first call)
    // =========================================================================
    /// The evaluator's result kind does not support the invoked accessor
    #[error("not supported: {0}")]
    NotSupported(String),

    // =========================================================================
    // Segment errors
    // =========================================================================
    /// Document id outside the segment's valid range
    #[error("doc {doc} out of bounds, segment has {count} docs")]
    DocOutOfBounds { doc: DocId, count: u32 },

    /// Reading a field value from the segment failed
    #[error("segment read failed for {node} at doc {doc}: {message}")]
    SegmentRead {
        node: String,
        doc: DocId,
        message: String,
    },

    // =========================================================================
    // Other errors
    // =========================================================================
    /// IO error (wrapped)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error for unexpected conditions
    #[error("{message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create a new NotSupported error
    pub fn not_supported(message: impl Into<String>) -> Self {
        Error::NotSupported(message.into())
    }

    /// Create a new DocOutOfBounds error
    pub fn doc_out_of_bounds(doc: DocId, count: u32) -> Self {
        Error::DocOutOfBounds { doc, count }
    }

    /// Create a new SegmentRead error tagged with the offending node's
    /// description and the document id
    pub fn segment_read(node: impl Into<String>, doc: DocId, cause: impl Into<String>) -> Self {
        Error::SegmentRead {
            node: node.into(),
            doc,
            message: cause.into(),
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Error::Io {
            message: message.into(),
        }
    }

    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Check if this is a segment-level read failure
    pub fn is_segment_error(&self) -> bool {
        matches!(
            self,
            Error::DocOutOfBounds { .. } | Error::SegmentRead { .. } | Error::Io { .. }
        )
    }

    /// Check if this is an unsupported-accessor error
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Error::NotSupported(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}
