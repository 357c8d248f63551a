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

//! Core types and definitions for Rankval
//!
//! This module contains the fundamental types used throughout the engine:
//!
//! - [`DocId`] - Segment-local document identifier
//! - [`Value`] - Runtime values produced by evaluators
//! - [`Error`] - Error types for construction and evaluation

pub mod error;
pub mod types;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use types::DocId;
pub use value::Value;
