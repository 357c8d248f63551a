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

//! String literal node

use std::any::Any;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;

use super::{FunctionValues, QueryScope, ValueFunction};
use crate::core::{DocId, Result, Value};
use crate::segment::SegmentReader;

// per-kind hash tag, mixed in so a literal never collides with another kind
// holding equal-looking raw data
const KIND_TAG: u64 = 0x9e37_79b9_7f4a_7c15;

/// Constant string value for every document
///
/// The constant never depends on the segment or the document id. Its byte
/// encoding is part of the node's immutable state (an `Arc<str>` is its own
/// UTF-8 buffer), computed once at construction and shared read-only by every
/// segment's evaluator.
#[derive(Debug, Clone)]
pub struct LiteralFunction {
    text: Arc<str>,
}

impl LiteralFunction {
    /// Create a literal node
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::from(text.into().as_str()),
        }
    }

    /// The wrapped constant
    pub fn value(&self) -> &str {
        &self.text
    }
}

impl ValueFunction for LiteralFunction {
    fn describe(&self) -> String {
        format!("literal({})", self.text)
    }

    fn values(
        &self,
        _scope: &QueryScope,
        _segment: &dyn SegmentReader,
    ) -> Result<Box<dyn FunctionValues>> {
        Ok(Box::new(LiteralValues {
            text: self.text.clone(),
        }))
    }

    fn eq_node(&self, other: &dyn ValueFunction) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => self.text == other.text,
            None => false,
        }
    }

    fn hash_node(&self) -> u64 {
        let mut h = FxHasher::default();
        h.write_u64(KIND_TAG);
        self.text.hash(&mut h);
        h.finish()
    }

    fn clone_node(&self) -> Arc<dyn ValueFunction> {
        Arc::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct LiteralValues {
    text: Arc<str>,
}

impl FunctionValues for LiteralValues {
    fn str_val(&self, _doc: DocId) -> Result<String> {
        Ok(self.text.to_string())
    }

    fn bytes_val(&self, _doc: DocId, out: &mut Vec<u8>) -> Result<bool> {
        out.clear();
        out.extend_from_slice(self.text.as_bytes());
        // a literal always has a value
        Ok(true)
    }

    fn value(&self, _doc: DocId) -> Result<Value> {
        Ok(Value::text_arc(self.text.clone()))
    }

    fn explain(&self, _doc: DocId) -> Result<String> {
        Ok(self.text.to_string())
    }
}
