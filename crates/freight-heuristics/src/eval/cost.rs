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

use freight_core::num::quantity::Quantity;
use freight_model::{allocation::Allocation, model::Model};

/// Returns `sum(A[i][j] * C[i][j])` over all routes, summed in row-major order.
///
/// # Panics
///
/// Panics if `allocation` does not have the shape of `model`.
///
/// # Examples
///
/// ```rust
/// # use freight_heuristics::eval::cost::total_cost;
/// # use freight_model::{allocation::Allocation, model::Model};
///
/// let model = Model::from_parts(
///     &[vec![2.0, 3.0], vec![4.0, 1.0]],
///     &[20.0, 30.0],
///     &[10.0, 40.0],
/// )
/// .unwrap();
/// let allocation = Allocation::from_rows(&[vec![10.0, 10.0], vec![0.0, 30.0]]);
/// assert_eq!(total_cost(&model, &allocation), 80.0);
/// ```
pub fn total_cost<T>(model: &Model<T>, allocation: &Allocation<T>) -> T
where
    T: Quantity,
{
    assert!(
        allocation.num_origins() == model.num_origins()
            && allocation.num_destinations() == model.num_destinations(),
        "called `total_cost` with an allocation of shape {}x{} for a model of shape {}x{}",
        allocation.num_origins(),
        allocation.num_destinations(),
        model.num_origins(),
        model.num_destinations()
    );

    allocation
        .cells()
        .iter()
        .zip(model.costs())
        .map(|(&quantity, &cost)| quantity * cost)
        .sum()
}
