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

//! Per-query resource scope
//!
//! One [`QueryScope`] lives for the duration of a query and is shared by
//! reference across every segment the query touches. Nodes register
//! collection-wide precomputation here during
//! [`prepare`](crate::functions::ValueFunction::prepare), keyed by themselves
//! (structural equality), and read it back while building evaluators.

use std::any::Any;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxHasher;

use super::ValueFunction;
use crate::core::{Error, Result};

type ResourceMap = DashMap<
    Arc<dyn ValueFunction>,
    Arc<dyn Any + Send + Sync>,
    BuildHasherDefault<FxHasher>,
>;

/// Query-scoped map from function node to prepared data
///
/// Lookup is by structural node equality, so two structurally equal node
/// instances share one resource. Registration has get-or-compute-if-absent
/// semantics and is safe under concurrent first-time registration: the map
/// entry stays locked while the compute closure runs, so exactly one
/// computation wins and every racer observes the stored value.
pub struct QueryScope {
    resources: ResourceMap,
}

impl Default for QueryScope {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self {
            resources: DashMap::with_hasher(BuildHasherDefault::default()),
        }
    }

    /// Get the resource registered for `node`, computing and storing it first
    /// if absent
    ///
    /// The compute closure must not touch this scope again; registration for
    /// children belongs in the children's own
    /// [`prepare`](crate::functions::ValueFunction::prepare), which runs
    /// before the parent's.
    pub fn get_or_compute<T, F>(&self, node: &(dyn ValueFunction + 'static), compute: F) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T>,
    {
        // fast path: already registered by this or an equal node
        if let Some(existing) = self.resources.get(node) {
            return Self::downcast(existing.value().clone(), node);
        }

        let stored = match self.resources.entry(node.clone_node()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let computed: Arc<dyn Any + Send + Sync> = Arc::new(compute()?);
                entry.insert(computed.clone());
                computed
            }
        };
        Self::downcast(stored, node)
    }

    /// Get the resource registered for `node`, if any
    ///
    /// Returns `None` when nothing is registered or the registered resource
    /// has a different type.
    pub fn get<T>(&self, node: &(dyn ValueFunction + 'static)) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let existing = self.resources.get(node)?;
        existing.value().clone().downcast::<T>().ok()
    }

    /// Number of registered resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if no resources are registered
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn downcast<T>(stored: Arc<dyn Any + Send + Sync>, node: &dyn ValueFunction) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        stored.downcast::<T>().map_err(|_| {
            Error::internal(format!(
                "resource type mismatch for {}",
                node.describe()
            ))
        })
    }
}
