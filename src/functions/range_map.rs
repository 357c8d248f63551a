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

//! Range-mapping combinator

use std::any::Any;
use std::hash::Hasher;
use std::sync::Arc;

use rustc_hash::FxHasher;

use super::{ConstFunction, FunctionValues, QueryScope, ValueFunction};
use crate::core::{DocId, Result};
use crate::segment::SegmentReader;

// per-kind hash tag
const KIND_TAG: u64 = 0x0000_0100_0000_01b3;

/// Maps source values inside an inclusive range onto a target value
///
/// Per document, with `v` the source value: if `min <= v <= max` (both ends
/// inclusive) the result is the target's value; otherwise the default's value
/// when a default is present, or `v` unchanged when it is not. NaN source
/// values never satisfy the range and always fall through. `min > max` never
/// matches any value; the configuration is not rejected, it simply always
/// falls through.
#[derive(Debug, Clone)]
pub struct RangeMapFunction {
    source: Arc<dyn ValueFunction>,
    min: f64,
    max: f64,
    target: Arc<dyn ValueFunction>,
    default: Option<Arc<dyn ValueFunction>>,
}

impl RangeMapFunction {
    /// Create a range mapper with node-valued target and default
    pub fn new(
        source: Arc<dyn ValueFunction>,
        min: f64,
        max: f64,
        target: Arc<dyn ValueFunction>,
        default: Option<Arc<dyn ValueFunction>>,
    ) -> Self {
        Self {
            source,
            min,
            max,
            target,
            default,
        }
    }

    /// Create a range mapper with constant target and default values
    pub fn with_floats(
        source: Arc<dyn ValueFunction>,
        min: f64,
        max: f64,
        target: f64,
        default: Option<f64>,
    ) -> Self {
        Self::new(
            source,
            min,
            max,
            Arc::new(ConstFunction::new(target)),
            default.map(|v| Arc::new(ConstFunction::new(v)) as Arc<dyn ValueFunction>),
        )
    }
}

impl ValueFunction for RangeMapFunction {
    fn describe(&self) -> String {
        format!(
            "map({},{:?},{:?},{})",
            self.source.describe(),
            self.min,
            self.max,
            self.target.describe()
        )
    }

    fn prepare(&self, scope: &QueryScope) -> Result<()> {
        self.source.prepare(scope)?;
        self.target.prepare(scope)?;
        if let Some(default) = &self.default {
            default.prepare(scope)?;
        }
        Ok(())
    }

    fn values(
        &self,
        scope: &QueryScope,
        segment: &dyn SegmentReader,
    ) -> Result<Box<dyn FunctionValues>> {
        let source = self.source.values(scope, segment)?;
        let target = self.target.values(scope, segment)?;
        let default = match &self.default {
            Some(default) => Some(default.values(scope, segment)?),
            None => None,
        };
        Ok(Box::new(RangeMapValues {
            source,
            target,
            default,
            min: self.min,
            max: self.max,
        }))
    }

    fn eq_node(&self, other: &dyn ValueFunction) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => {
                self.min.to_bits() == other.min.to_bits()
                    && self.max.to_bits() == other.max.to_bits()
                    && self.source.eq_node(other.source.as_ref())
                    && self.target.eq_node(other.target.as_ref())
                    && self.default == other.default
            }
            None => false,
        }
    }

    fn hash_node(&self) -> u64 {
        let mut h = FxHasher::default();
        h.write_u64(KIND_TAG);
        h.write_u64(self.source.hash_node());
        h.write_u64(self.min.to_bits());
        h.write_u64(self.max.to_bits());
        h.write_u64(self.target.hash_node());
        if let Some(default) = &self.default {
            h.write_u64(default.hash_node());
        }
        h.finish()
    }

    fn clone_node(&self) -> Arc<dyn ValueFunction> {
        Arc::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct RangeMapValues {
    source: Box<dyn FunctionValues>,
    target: Box<dyn FunctionValues>,
    default: Option<Box<dyn FunctionValues>>,
    min: f64,
    max: f64,
}

impl FunctionValues for RangeMapValues {
    fn float_val(&self, doc: DocId) -> Result<f64> {
        let v = self.source.float_val(doc)?;
        // NaN fails both comparisons and falls through
        if v >= self.min && v <= self.max {
            self.target.float_val(doc)
        } else {
            match &self.default {
                Some(default) => default.float_val(doc),
                None => Ok(v),
            }
        }
    }

    fn explain(&self, doc: DocId) -> Result<String> {
        Ok(format!(
            "map({},min={:?},max={:?},target={})",
            self.source.explain(doc)?,
            self.min,
            self.max,
            self.target.explain(doc)?
        ))
    }
}
