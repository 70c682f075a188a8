// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Freight-Heuristics: initial feasible solutions for the transportation problem
//!
//! Constructive heuristics that turn a validated, balanced
//! `freight_model::model::Model<T>` into a feasible `Allocation<T>`: every
//! origin ships exactly its supply and every destination receives exactly its
//! demand. None of them optimizes; they produce the starting point an
//! iterative method (stepping stone, MODI) would improve on.
//!
//! Core flow
//! - Build a `Model<T>` (`Model::from_parts`, `ModelBuilder`, or the loader).
//! - Pick a strategy: a unit struct from `strategy`, or a `strategy::Method`.
//! - Call `allocate` for the allocation, or `solution` to also price it.
//!
//! Guarantees
//! - Deterministic: ties are resolved towards the lowest index.
//! - Pure: the model is never mutated; each call owns its working state.
//! - Strategies are `Send + Sync` and can run concurrently on one model.
//!
//! Module map
//! - `strategy`: the `AllocationHeuristic` trait and the four strategies.
//! - `eval`: total cost and feasibility validation.
//! - `remaining`: per-call remaining supply and demand.

pub mod eval;
pub mod remaining;
pub mod strategy;
