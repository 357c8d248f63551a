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

//! # Rankval - Composable per-document value functions
//!
//! Rankval computes a numeric or string value per document in a large indexed
//! collection, for ranking, filtering, or transforming search results. Each
//! function is a node in an immutable expression tree; leaves read stored
//! per-document data, internal nodes combine child values.
//!
//! ## Key properties
//!
//! - **Lazy evaluation** - values are computed per accessor call, on demand,
//!   with no mandated caching
//! - **Per-segment evaluators** - a node builds one evaluator per partition
//!   of the collection; evaluators are cheap and never shared across segments
//! - **Structural identity** - nodes compare and hash structurally (floats by
//!   exact bit pattern), so the query layer can deduplicate and cache plans
//! - **One-shot resource acquisition** - a shared [`QueryScope`] gives every
//!   node get-or-compute-if-absent access to per-query precomputation
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rankval::{
//!     FieldFunction, FunctionValues, MemSegmentBuilder, QueryScope, RangeMapFunction,
//!     ValueFunction,
//! };
//!
//! // one segment of the collection, with a stored numeric field
//! let segment = MemSegmentBuilder::new(3)
//!     .numeric("score", vec![Some(2.0), Some(15.0), None])
//!     .build();
//!
//! // map scores in [0, 10] to 1.0, everything else to -1.0
//! let source: Arc<dyn ValueFunction> = Arc::new(FieldFunction::new("score").unwrap());
//! let func = RangeMapFunction::with_floats(source, 0.0, 10.0, 1.0, Some(-1.0));
//!
//! // prepare once per query, then build one evaluator per segment
//! let scope = QueryScope::new();
//! func.prepare(&scope).unwrap();
//! let values = func.values(&scope, &segment).unwrap();
//!
//! assert_eq!(values.float_val(0).unwrap(), 1.0);
//! assert_eq!(values.float_val(1).unwrap(), -1.0);
//! assert_eq!(values.float_val(2).unwrap(), 1.0); // absent reads as 0.0, in range
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`DocId`], [`Value`], [`Error`])
//! - [`functions`] - Function nodes, evaluators, and the query scope
//! - [`segment`] - The segment data-source boundary

pub mod core;
pub mod functions;
pub mod segment;

// Re-export main types for convenience
pub use core::{DocId, Error, Result, Value};

// Re-export the function system
pub use functions::{
    ConstFunction, FieldFunction, FunctionValues, LiteralFunction, QueryScope, RangeMapFunction,
    ValueFunction,
};

// Re-export segment types
pub use segment::{MemSegment, MemSegmentBuilder, NumericColumn, SegmentReader};
