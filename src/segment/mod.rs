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

//! Segment data-source boundary
//!
//! A segment is one contiguous partition of the document collection. The
//! storage layer that actually holds the index is not part of this crate;
//! it plugs in through the traits here:
//!
//! - [`SegmentReader`] - resolves stored columns for one segment
//! - [`NumericColumn`] - per-document numeric values, with absence
//! - [`MemSegment`] - in-memory reference implementation
//!
//! Leaf function nodes resolve their column once per segment inside
//! [`values`](crate::functions::ValueFunction::values) and then read
//! per-document values through the column handle.

pub mod memory;

use std::sync::Arc;

use crate::core::{DocId, Result};

pub use memory::{MemSegment, MemSegmentBuilder};

/// Read access to one segment of the document collection
///
/// Implementations must be shareable across the worker threads that process
/// segments concurrently; all methods take `&self`.
pub trait SegmentReader: Send + Sync {
    /// Number of documents in this segment
    ///
    /// Valid local document ids are `0..doc_count()`.
    fn doc_count(&self) -> u32;

    /// Resolve a stored numeric column by field name
    ///
    /// Returns `Ok(None)` for a field this segment does not store. Resolution
    /// happens once per segment; per-document reads go through the returned
    /// handle.
    fn numeric_column(&self, field: &str) -> Result<Option<Arc<dyn NumericColumn>>>;
}

/// Per-document numeric values of one stored column
pub trait NumericColumn: Send + Sync {
    /// Value for the given document, `None` when the document has no value
    ///
    /// Fails with [`Error::DocOutOfBounds`](crate::core::Error::DocOutOfBounds)
    /// for ids outside the segment, or with a storage error when the
    /// underlying read fails.
    fn value(&self, doc: DocId) -> Result<Option<f64>>;
}
