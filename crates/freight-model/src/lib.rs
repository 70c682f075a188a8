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

//! # Freight Model
//!
//! **The Core Domain Model for the Freight Transportation Heuristics.**
//!
//! This crate defines the data structures used to represent a balanced
//! **Transportation Problem**: a set of origins with fixed supply, a set of
//! destinations with fixed demand, and a unit shipping cost for every
//! origin/destination pair. It is the interchange layer between the problem
//! definition (user input) and the allocation heuristics (`freight_heuristics`).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed wrappers (`OriginIndex`, `DestinationIndex`) to prevent row/column mix-ups.
//! * **`model`**: The immutable, validated `Model` and the mutable `ModelBuilder`, plus `ModelError`.
//! * **`allocation`**: The `Allocation` matrix every heuristic fills in.
//! * **`solution`**: An allocation paired with its total cost.
//! * **`loading`**: A loader for delimited tables (demand in the header row, supply in the first column).
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally use an `OriginIndex` to address a destination.
//! 2.  **Memory Layout**: Matrices are stored as flat row-major vectors for cache-friendly row scans.
//! 3.  **Fail-Fast**: Constructors validate shape, sign, finiteness and balance eagerly, so a heuristic never sees an invalid `Model`.

pub mod allocation;
pub mod index;
pub mod loading;
pub mod model;
pub mod solution;
