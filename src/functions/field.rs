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

//! Stored-field reader node

use std::any::Any;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;

use super::{FunctionValues, QueryScope, ValueFunction};
use crate::core::{DocId, Error, Result, Value};
use crate::segment::{NumericColumn, SegmentReader};

// per-kind hash tag
const KIND_TAG: u64 = 0xc2b2_ae35_27d4_eb4f;

// documents without a stored value read as this
const MISSING: f64 = 0.0;

/// Numeric value of a stored field, per document
///
/// The leaf that reads real per-document data. The column handle is resolved
/// once per segment; a field the segment does not store yields an evaluator
/// where every document is absent.
#[derive(Debug, Clone)]
pub struct FieldFunction {
    field: String,
}

impl FieldFunction {
    /// Create a field reader node
    ///
    /// Fails fast with [`Error::InvalidArgument`] for an empty field name,
    /// before any evaluation begins.
    pub fn new(field: impl Into<String>) -> Result<Self> {
        let field = field.into();
        if field.is_empty() {
            return Err(Error::invalid_argument("field name must not be empty"));
        }
        Ok(Self { field })
    }

    /// The field this node reads
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl ValueFunction for FieldFunction {
    fn describe(&self) -> String {
        format!("field({})", self.field)
    }

    fn values(
        &self,
        _scope: &QueryScope,
        segment: &dyn SegmentReader,
    ) -> Result<Box<dyn FunctionValues>> {
        let column = segment.numeric_column(&self.field)?;
        Ok(Box::new(FieldValues {
            column,
            desc: self.describe(),
        }))
    }

    fn eq_node(&self, other: &dyn ValueFunction) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => self.field == other.field,
            None => false,
        }
    }

    fn hash_node(&self) -> u64 {
        let mut h = FxHasher::default();
        h.write_u64(KIND_TAG);
        self.field.hash(&mut h);
        h.finish()
    }

    fn clone_node(&self) -> Arc<dyn ValueFunction> {
        Arc::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct FieldValues {
    column: Option<Arc<dyn NumericColumn>>,
    desc: String,
}

impl FieldValues {
    fn read(&self, doc: DocId) -> Result<Option<f64>> {
        match &self.column {
            Some(column) => column
                .value(doc)
                .map_err(|e| Error::segment_read(&self.desc, doc, e.to_string())),
            None => Ok(None),
        }
    }
}

impl FunctionValues for FieldValues {
    fn float_val(&self, doc: DocId) -> Result<f64> {
        Ok(self.read(doc)?.unwrap_or(MISSING))
    }

    fn exists(&self, doc: DocId) -> Result<bool> {
        Ok(self.read(doc)?.is_some())
    }

    fn value(&self, doc: DocId) -> Result<Value> {
        Ok(match self.read(doc)? {
            Some(v) => Value::Float(v),
            None => Value::Null,
        })
    }

    fn explain(&self, doc: DocId) -> Result<String> {
        Ok(format!("{}={:?}", self.desc, self.float_val(doc)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::MemSegmentBuilder;

    #[test]
    fn test_reads_column_values() {
        let segment = MemSegmentBuilder::new(3)
            .numeric("price", vec![Some(9.5), None, Some(20.0)])
            .build();
        let scope = QueryScope::new();

        let node = FieldFunction::new("price").unwrap();
        let values = node.values(&scope, &segment).unwrap();

        assert_eq!(values.float_val(0).unwrap(), 9.5);
        assert_eq!(values.float_val(2).unwrap(), 20.0);
        assert_eq!(values.explain(0).unwrap(), "field(price)=9.5");
    }

    #[test]
    fn test_absent_doc_reads_as_missing() {
        let segment = MemSegmentBuilder::new(2)
            .numeric("price", vec![Some(1.0), None])
            .build();
        let scope = QueryScope::new();
        let values = FieldFunction::new("price")
            .unwrap()
            .values(&scope, &segment)
            .unwrap();

        assert_eq!(values.float_val(1).unwrap(), 0.0);
        assert!(!values.exists(1).unwrap());
        assert!(values.exists(0).unwrap());
        assert_eq!(values.value(1).unwrap(), Value::Null);
    }

    #[test]
    fn test_unknown_field_is_all_absent() {
        let segment = MemSegmentBuilder::new(2)
            .numeric("price", vec![Some(1.0), Some(2.0)])
            .build();
        let scope = QueryScope::new();
        let values = FieldFunction::new("rating")
            .unwrap()
            .values(&scope, &segment)
            .unwrap();

        assert_eq!(values.float_val(0).unwrap(), 0.0);
        assert!(!values.exists(0).unwrap());
    }

    #[test]
    fn test_read_error_is_tagged() {
        let segment = MemSegmentBuilder::new(1)
            .numeric("price", vec![Some(1.0)])
            .build();
        let scope = QueryScope::new();
        let values = FieldFunction::new("price")
            .unwrap()
            .values(&scope, &segment)
            .unwrap();

        // out-of-bounds id surfaces as a read failure naming the node and doc
        let err = values.float_val(5).unwrap_err();
        match err {
            Error::SegmentRead { node, doc, .. } => {
                assert_eq!(node, "field(price)");
                assert_eq!(doc, 5);
            }
            other => panic!("expected SegmentRead, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_field_name_rejected_eagerly() {
        assert_eq!(
            FieldFunction::new("").unwrap_err(),
            Error::invalid_argument("field name must not be empty")
        );
    }
}
