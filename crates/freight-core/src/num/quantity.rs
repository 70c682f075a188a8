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

//! # Quantity Trait
//!
//! Unified numeric bounds for supplies, demands, unit costs and shipped
//! amounts. `Quantity` collects the `num_traits` capabilities the model and
//! the heuristics rely on into a single alias, simplifying generic
//! signatures across the workspace.
//!
//! ## Highlights
//!
//! - Requires `Float + FromPrimitive` for arithmetic, `min`, `abs` and
//!   finiteness checks.
//! - Requires `Sum` so row, column and cost totals can be folded from
//!   iterators.
//! - `Send + Sync` so a model can be shared across solver threads.
//! - `approx_eq` compares accumulated sums with a relative tolerance.
//!
//! Note: `f64` is the type used throughout the tests and the CLI; `f32`
//! works but accumulates rounding error much faster on large instances.

use num_traits::{Float, FromPrimitive};
use std::iter::Sum;

/// The relative tolerance used when none is configured explicitly.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// A trait alias for the real-valued quantities handled by the heuristics.
///
/// Implemented automatically for every type satisfying the bounds, which in
/// practice means `f32` and `f64`.
pub trait Quantity:
    Float
    + FromPrimitive
    + Sum
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Returns `DEFAULT_TOLERANCE` converted into `Self`.
    ///
    /// Falls back to `Self::epsilon()` if the conversion is not representable.
    #[inline]
    fn default_tolerance() -> Self {
        Self::from_f64(DEFAULT_TOLERANCE).unwrap_or_else(Self::epsilon)
    }
}

impl<T> Quantity for T where
    T: Float
        + FromPrimitive
        + Sum
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + 'static
{
}

/// Returns `true` if `a` and `b` agree up to a relative `tolerance`.
///
/// The comparison is `|a - b| <= tolerance * max(1, |a|, |b|)`, so small
/// magnitudes are compared absolutely and large ones relatively.
///
/// # Examples
///
/// ```rust
/// # use freight_core::num::quantity::approx_eq;
///
/// assert!(approx_eq(0.1 + 0.2, 0.3, 1e-9));
/// assert!(!approx_eq(10.0, 6.0, 1e-9));
/// ```
#[inline]
pub fn approx_eq<T>(a: T, b: T, tolerance: T) -> bool
where
    T: Quantity,
{
    let scale = T::one().max(a.abs()).max(b.abs());
    (a - b).abs() <= tolerance * scale
}
