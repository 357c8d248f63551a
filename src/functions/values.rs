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

//! Per-segment function evaluators
//!
//! A [`FunctionValues`] is produced by
//! [`ValueFunction::values`](crate::functions::ValueFunction::values) for one
//! segment and queried value-by-value. Values are computed lazily per call;
//! nothing is cached across documents unless a node's semantics require it.

use crate::core::{DocId, Error, Result, Value};

/// Typed per-document accessors over one segment
///
/// A node declares one result kind by implementing that kind's accessor; the
/// remaining accessors are either derived from it by the default methods
/// below, or report [`Error::NotSupported`] at the first call. Accessors may
/// be called in any document order, repeatedly, with no required
/// monotonicity.
///
/// An evaluator is valid only for the segment it was built against; document
/// ids must be local ids within that segment. It must not mutate the node
/// that created it.
pub trait FunctionValues {
    /// Numeric value for the document
    ///
    /// Default: unsupported (the evaluator does not produce floats).
    fn float_val(&self, doc: DocId) -> Result<f64> {
        let _ = doc;
        Err(Error::not_supported("float_val"))
    }

    /// Integer value; default truncates [`float_val`](Self::float_val)
    fn int_val(&self, doc: DocId) -> Result<i64> {
        Ok(self.float_val(doc)? as i64)
    }

    /// Boolean value; default is `float_val != 0.0`
    fn bool_val(&self, doc: DocId) -> Result<bool> {
        Ok(self.float_val(doc)? != 0.0)
    }

    /// String value; default renders [`float_val`](Self::float_val)
    fn str_val(&self, doc: DocId) -> Result<String> {
        Ok(format!("{:?}", self.float_val(doc)?))
    }

    /// Copy the raw byte encoding of the value into `out`
    ///
    /// The buffer is cleared first. Returns whether a value was written.
    /// Default: the UTF-8 bytes of [`str_val`](Self::str_val).
    fn bytes_val(&self, doc: DocId, out: &mut Vec<u8>) -> Result<bool> {
        let s = self.str_val(doc)?;
        out.clear();
        out.extend_from_slice(s.as_bytes());
        Ok(true)
    }

    /// Whether the document has a value; default true
    fn exists(&self, doc: DocId) -> Result<bool> {
        let _ = doc;
        Ok(true)
    }

    /// Generic boxed value for collectors; default wraps
    /// [`float_val`](Self::float_val)
    fn value(&self, doc: DocId) -> Result<Value> {
        Ok(Value::Float(self.float_val(doc)?))
    }

    /// Human-readable rendering of the computed value and its inputs
    ///
    /// Reflects the same value the typed accessor returns for `doc`.
    fn explain(&self, doc: DocId) -> Result<String>;
}
