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

//! In-memory segment implementation
//!
//! [`MemSegment`] holds columns as plain vectors. It backs the test suites
//! and doctests, and is the model for adapters over real storage.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{NumericColumn, SegmentReader};
use crate::core::{DocId, Error, Result};

/// Builder for [`MemSegment`]
///
/// ```
/// use rankval::segment::MemSegmentBuilder;
///
/// let segment = MemSegmentBuilder::new(3)
///     .numeric("price", vec![Some(9.5), None, Some(20.0)])
///     .build();
/// ```
pub struct MemSegmentBuilder {
    doc_count: u32,
    columns: FxHashMap<String, Arc<dyn NumericColumn>>,
}

impl MemSegmentBuilder {
    /// Start a segment with the given document count
    pub fn new(doc_count: u32) -> Self {
        Self {
            doc_count,
            columns: FxHashMap::default(),
        }
    }

    /// Add a numeric column; `None` entries are documents without a value
    ///
    /// Panics if the number of entries does not match the document count.
    pub fn numeric(mut self, field: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        assert_eq!(
            values.len(),
            self.doc_count as usize,
            "column length must match doc_count"
        );
        self.columns
            .insert(field.into(), Arc::new(MemNumericColumn { values }));
        self
    }

    /// Finish the segment
    pub fn build(self) -> MemSegment {
        MemSegment {
            doc_count: self.doc_count,
            columns: self.columns,
        }
    }
}

/// An immutable in-memory segment
pub struct MemSegment {
    doc_count: u32,
    columns: FxHashMap<String, Arc<dyn NumericColumn>>,
}

impl SegmentReader for MemSegment {
    fn doc_count(&self) -> u32 {
        self.doc_count
    }

    fn numeric_column(&self, field: &str) -> Result<Option<Arc<dyn NumericColumn>>> {
        Ok(self.columns.get(field).cloned())
    }
}

struct MemNumericColumn {
    values: Vec<Option<f64>>,
}

impl NumericColumn for MemNumericColumn {
    fn value(&self, doc: DocId) -> Result<Option<f64>> {
        self.values
            .get(doc as usize)
            .copied()
            .ok_or_else(|| Error::doc_out_of_bounds(doc, self.values.len() as u32))
    }
}
