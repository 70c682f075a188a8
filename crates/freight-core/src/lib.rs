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

//! # Freight Core
//!
//! Foundational building blocks shared by the Freight crates. Nothing in
//! here knows about supplies, demands or costs; it only provides the
//! primitives the model and the heuristics are written against.
//!
//! ## Modules
//!
//! - `num`: The `Quantity` trait that collects the floating-point bounds
//!   used for supplies, demands, costs and allocations, together with
//!   tolerance helpers for comparing accumulated sums.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`) so
//!   origin and destination indices cannot be swapped by accident.
//!
//! Refer to each module for detailed APIs and examples.

pub mod num;
pub mod utils;
