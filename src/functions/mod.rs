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

//! Value Function System
//!
//! This module provides the function system for Rankval, including:
//!
//! - [`ValueFunction`] - Immutable, composable function nodes
//! - [`FunctionValues`] - Per-segment evaluators with typed accessors
//! - [`QueryScope`] - Shared per-query resource map
//! - Concrete nodes: [`ConstFunction`], [`LiteralFunction`], [`FieldFunction`],
//!   [`RangeMapFunction`]
//!
//! A query is a tree of [`ValueFunction`] nodes. The query layer prepares the
//! tree once ([`prepare`](ValueFunction::prepare)), then for each segment
//! builds an evaluator tree ([`values`](ValueFunction::values)) and pulls
//! per-document values through it. Nodes are immutable and may be shared by
//! several parents; structural equality and hashing let the query layer
//! deduplicate and cache them.

pub mod constant;
pub mod field;
pub mod literal;
pub mod range_map;
pub mod scope;
pub mod values;

use std::any::Any;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::core::Result;
use crate::segment::SegmentReader;

// Re-export main types
pub use constant::ConstFunction;
pub use field::FieldFunction;
pub use literal::LiteralFunction;
pub use range_map::RangeMapFunction;
pub use scope::QueryScope;
pub use values::FunctionValues;

/// Trait for function nodes
///
/// A node is an immutable, side-effect-free description of a per-document
/// computation. Children are held as `Arc<dyn ValueFunction>`; a child may be
/// referenced by several parents, and the tree is acyclic by construction.
///
/// The contract has three phases, driven by the query layer:
///
/// 1. [`prepare`](Self::prepare) - once per query, before any evaluator is
///    built, child-before-parent over the whole tree.
/// 2. [`values`](Self::values) - once per segment, again child-before-parent
///    (a parent builds its children's evaluators first, then wraps them).
/// 3. Accessor calls on the returned [`FunctionValues`], per document.
///
/// Equality and hashing are structural: same concrete kind, equal parameters
/// (floats by exact bit pattern), pairwise-equal children. `PartialEq`, `Eq`
/// and `Hash` are implemented for `dyn ValueFunction` on top of
/// [`eq_node`](Self::eq_node) / [`hash_node`](Self::hash_node), so
/// `Arc<dyn ValueFunction>` works directly as a map key.
pub trait ValueFunction: Send + Sync + Debug {
    /// Deterministic textual form of this node
    ///
    /// Includes the kind name and, recursively, child descriptions and
    /// literal parameters in a fixed order. Stable across calls and across
    /// separately constructed equal nodes.
    fn describe(&self) -> String;

    /// Acquire shared per-query resources
    ///
    /// Called exactly once per node instance per query, before any call to
    /// [`values`](Self::values). Combinators forward to their children first.
    /// A node that registers collection-wide precomputation keys it by itself
    /// in the scope via [`QueryScope::get_or_compute`], which is idempotent:
    /// a resource already registered for an equal node is not recomputed.
    fn prepare(&self, scope: &QueryScope) -> Result<()> {
        let _ = scope;
        Ok(())
    }

    /// Build the evaluator for one segment
    ///
    /// Called once per node instance per segment. The returned evaluator is
    /// valid only for `segment` and must be discarded when the segment's
    /// processing ends. May read data registered during
    /// [`prepare`](Self::prepare).
    fn values(
        &self,
        scope: &QueryScope,
        segment: &dyn SegmentReader,
    ) -> Result<Box<dyn FunctionValues>>;

    /// Structural equality against another node
    ///
    /// True iff `other` is the same concrete kind with structurally equal
    /// parameters. Float parameters compare by exact bit pattern, so NaN
    /// bounds are equal to themselves and -0.0 differs from +0.0.
    fn eq_node(&self, other: &dyn ValueFunction) -> bool;

    /// Structural hash, consistent with [`eq_node`](Self::eq_node)
    ///
    /// Each concrete kind mixes a fixed per-kind tag into the hash so equal
    /// looking payloads from different kinds do not collide.
    fn hash_node(&self) -> u64;

    /// Clone this node into a shared trait object
    fn clone_node(&self) -> Arc<dyn ValueFunction>;

    /// Downcast support for the equality implementations
    fn as_any(&self) -> &dyn Any;
}

impl PartialEq for dyn ValueFunction {
    fn eq(&self, other: &Self) -> bool {
        self.eq_node(other)
    }
}

impl Eq for dyn ValueFunction {}

impl Hash for dyn ValueFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_node());
    }
}
