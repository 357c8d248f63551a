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

//! Integration tests for per-query resource preparation
//!
//! Uses an externally defined node kind (the trait is open) whose prepare
//! step registers a counted collection statistic, verifying the
//! compute-exactly-once contract for structurally equal nodes sharing one
//! scope.

use std::any::Any;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rustc_hash::FxHasher;

use rankval::{
    DocId, Error, FunctionValues, MemSegmentBuilder, QueryScope, Result, SegmentReader,
    ValueFunction,
};

const STAT_TAG: u64 = 0x5151_5151_5151_5151;

/// Counting stub: registers a collection-wide statistic during prepare
#[derive(Debug, Clone)]
struct CollectionStatFunction {
    field: String,
    // test instrumentation, not part of the node's identity
    computations: Arc<AtomicUsize>,
}

impl CollectionStatFunction {
    fn new(field: &str, computations: Arc<AtomicUsize>) -> Self {
        Self {
            field: field.to_string(),
            computations,
        }
    }
}

impl ValueFunction for CollectionStatFunction {
    fn describe(&self) -> String {
        format!("stat({})", self.field)
    }

    fn prepare(&self, scope: &QueryScope) -> Result<()> {
        let computations = self.computations.clone();
        scope.get_or_compute::<f64, _>(self, move || {
            computations.fetch_add(1, Ordering::SeqCst);
            Ok(42.0)
        })?;
        Ok(())
    }

    fn values(
        &self,
        scope: &QueryScope,
        _segment: &dyn SegmentReader,
    ) -> Result<Box<dyn FunctionValues>> {
        let stat = scope
            .get::<f64>(self)
            .ok_or_else(|| Error::internal("statistic was not prepared"))?;
        Ok(Box::new(StatValues {
            stat: *stat,
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
        h.write_u64(STAT_TAG);
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

struct StatValues {
    stat: f64,
    desc: String,
}

impl FunctionValues for StatValues {
    fn float_val(&self, _doc: DocId) -> Result<f64> {
        Ok(self.stat)
    }

    fn explain(&self, doc: DocId) -> Result<String> {
        Ok(format!("{}={:?}", self.desc, self.float_val(doc)?))
    }
}

// ============================================================================
// Compute-exactly-once semantics
// ============================================================================

#[test]
fn test_equal_nodes_share_one_computation() {
    let scope = QueryScope::new();
    let computations = Arc::new(AtomicUsize::new(0));

    let a = CollectionStatFunction::new("score", computations.clone());
    let b = CollectionStatFunction::new("score", computations.clone());

    a.prepare(&scope).unwrap();
    b.prepare(&scope).unwrap();
    // preparing the same instance again is idempotent too
    a.prepare(&scope).unwrap();

    assert_eq!(computations.load(Ordering::SeqCst), 1);
    assert_eq!(scope.len(), 1);
}

#[test]
fn test_prepared_data_flows_into_evaluators() {
    let scope = QueryScope::new();
    let node = CollectionStatFunction::new("score", Arc::new(AtomicUsize::new(0)));
    node.prepare(&scope).unwrap();

    let segment = MemSegmentBuilder::new(2).build();
    let values = node.values(&scope, &segment).unwrap();
    assert_eq!(values.float_val(0).unwrap(), 42.0);
    assert_eq!(values.explain(1).unwrap(), "stat(score)=42.0");
}

#[test]
fn test_unprepared_node_fails_at_evaluator_construction() {
    let scope = QueryScope::new();
    let node = CollectionStatFunction::new("score", Arc::new(AtomicUsize::new(0)));

    let segment = MemSegmentBuilder::new(1).build();
    assert!(node.values(&scope, &segment).is_err());
}

#[test]
fn test_distinct_nodes_compute_separately() {
    let scope = QueryScope::new();
    let computations = Arc::new(AtomicUsize::new(0));

    CollectionStatFunction::new("score", computations.clone())
        .prepare(&scope)
        .unwrap();
    CollectionStatFunction::new("rating", computations.clone())
        .prepare(&scope)
        .unwrap();

    assert_eq!(computations.load(Ordering::SeqCst), 2);
    assert_eq!(scope.len(), 2);
}

// ============================================================================
// Concurrent first-time registration
// ============================================================================

#[test]
fn test_concurrent_registration_computes_once() {
    let scope = QueryScope::new();
    let computations = Arc::new(AtomicUsize::new(0));

    std::thread::scope(|threads| {
        for _ in 0..8 {
            let scope = &scope;
            let computations = computations.clone();
            threads.spawn(move || {
                let node = CollectionStatFunction::new("score", computations);
                node.prepare(scope).unwrap();
            });
        }
    });

    assert_eq!(computations.load(Ordering::SeqCst), 1);
    assert_eq!(scope.len(), 1);
}
