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

//! Float constant node

use std::any::Any;
use std::hash::Hasher;
use std::sync::Arc;

use rustc_hash::FxHasher;

use super::{FunctionValues, QueryScope, ValueFunction};
use crate::core::{DocId, Result};
use crate::segment::SegmentReader;

// per-kind hash tag
const KIND_TAG: u64 = 0x85eb_ca6b_1b87_3593;

/// Constant float value for every document
///
/// The numeric leaf used when a plain number appears in an expression, for
/// example as the mapping target of a [`RangeMapFunction`](super::RangeMapFunction).
#[derive(Debug, Clone)]
pub struct ConstFunction {
    value: f64,
}

impl ConstFunction {
    /// Create a constant node
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// The wrapped constant
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl ValueFunction for ConstFunction {
    fn describe(&self) -> String {
        format!("const({:?})", self.value)
    }

    fn values(
        &self,
        _scope: &QueryScope,
        _segment: &dyn SegmentReader,
    ) -> Result<Box<dyn FunctionValues>> {
        Ok(Box::new(ConstValues {
            value: self.value,
            desc: self.describe(),
        }))
    }

    fn eq_node(&self, other: &dyn ValueFunction) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => self.value.to_bits() == other.value.to_bits(),
            None => false,
        }
    }

    fn hash_node(&self) -> u64 {
        let mut h = FxHasher::default();
        h.write_u64(KIND_TAG);
        h.write_u64(self.value.to_bits());
        h.finish()
    }

    fn clone_node(&self) -> Arc<dyn ValueFunction> {
        Arc::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct ConstValues {
    value: f64,
    desc: String,
}

impl FunctionValues for ConstValues {
    #[inline]
    fn float_val(&self, _doc: DocId) -> Result<f64> {
        Ok(self.value)
    }

    fn explain(&self, _doc: DocId) -> Result<String> {
        Ok(format!("{}={:?}", self.desc, self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::MemSegmentBuilder;

    #[test]
    fn test_same_value_for_every_doc() {
        let segment = MemSegmentBuilder::new(4).build();
        let scope = QueryScope::new();

        let node = ConstFunction::new(2.5);
        let values = node.values(&scope, &segment).unwrap();
        for doc in 0..4 {
            assert_eq!(values.float_val(doc).unwrap(), 2.5);
        }
        assert_eq!(values.int_val(0).unwrap(), 2);
        assert_eq!(values.explain(0).unwrap(), "const(2.5)=2.5");
    }

    #[test]
    fn test_describe() {
        assert_eq!(ConstFunction::new(5.0).describe(), "const(5.0)");
        assert_eq!(ConstFunction::new(-1.5).describe(), "const(-1.5)");
    }

    #[test]
    fn test_bit_pattern_identity() {
        let nan_a = ConstFunction::new(f64::NAN);
        let nan_b = ConstFunction::new(f64::NAN);
        assert!(nan_a.eq_node(&nan_b));
        assert_eq!(nan_a.hash_node(), nan_b.hash_node());

        let pos = ConstFunction::new(0.0);
        let neg = ConstFunction::new(-0.0);
        assert!(!pos.eq_node(&neg));
    }
}
