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

use crate::{remaining::Remaining, strategy::AllocationHeuristic};
use freight_core::num::quantity::Quantity;
use freight_model::{
    allocation::Allocation,
    index::{DestinationIndex, OriginIndex},
    model::Model,
};

pub(crate) const NAME: &str = "Northwest Corner Rule";

/// Fills the table from the top-left corner, ignoring costs.
///
/// A single cursor `(i, j)` starts at `(0, 0)`. Each step ships as much as
/// possible on the current route and then moves down when the origin is
/// exhausted, right when the destination is exhausted, or diagonally when
/// both run out at once. The result is a staircase with at most
/// `m + n - 1` occupied routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NorthwestCorner;

impl<T> AllocationHeuristic<T> for NorthwestCorner
where
    T: Quantity,
{
    fn name(&self) -> &str {
        NAME
    }

    fn allocate(&self, model: &Model<T>) -> Allocation<T> {
        let m = model.num_origins();
        let n = model.num_destinations();
        let mut remaining = Remaining::new(model);
        let mut allocation = Allocation::zeros(m, n);

        let (mut i, mut j) = (0, 0);
        while i < m && j < n {
            let origin_index = OriginIndex::new(i);
            let destination_index = DestinationIndex::new(j);
            remaining.ship(origin_index, destination_index, &mut allocation);

            if !remaining.has_supply(origin_index) {
                i += 1;
            }
            if !remaining.has_demand(destination_index) {
                j += 1;
            }
        }

        log::debug!("{}: stopped at cursor ({}, {})", NAME, i, j);
        allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::cost::total_cost;

    #[test]
    fn test_two_by_two_staircase() {
        let model =
            Model::from_parts(&[vec![2.0, 3.0], vec![4.0, 1.0]], &[20.0, 30.0], &[10.0, 40.0])
                .unwrap();
        let allocation = NorthwestCorner.allocate(&model);

        assert_eq!(allocation.cells(), &[10.0, 10.0, 0.0, 30.0]);
        assert_eq!(total_cost(&model, &allocation), 80.0);
    }

    #[test]
    fn test_single_origin_splits_demand() {
        let allocation = NorthwestCorner
            .solve(&[vec![1.0, 1.0]], &[5.0], &[2.0, 3.0])
            .unwrap();
        assert_eq!(allocation.cells(), &[2.0, 3.0]);
    }

    #[test]
    fn test_simultaneous_exhaustion_moves_diagonally() {
        // S[0] == D[0]: both sides run out on the first step.
        let model = Model::from_parts(
            &[vec![1.0, 1.0], vec![1.0, 1.0]],
            &[5.0, 7.0],
            &[5.0, 7.0],
        )
        .unwrap();
        let allocation = NorthwestCorner.allocate(&model);
        assert_eq!(allocation.cells(), &[5.0, 0.0, 0.0, 7.0]);
        assert_eq!(allocation.num_occupied(), 2);
    }

    #[test]
    fn test_ignores_costs() {
        let supply = [15.0, 25.0, 10.0];
        let demand = [5.0, 15.0, 15.0, 15.0];
        let cheap = vec![vec![1.0; 4]; 3];
        let dear = vec![
            vec![90.0, 1.0, 50.0, 7.0],
            vec![3.0, 88.0, 2.0, 60.0],
            vec![40.0, 5.0, 99.0, 1.0],
        ];
        let a = NorthwestCorner.solve(&cheap, &supply, &demand).unwrap();
        let b = NorthwestCorner.solve(&dear, &supply, &demand).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.cells(),
            &[5.0, 10.0, 0.0, 0.0, 0.0, 5.0, 15.0, 5.0, 0.0, 0.0, 0.0, 10.0]
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(
            AllocationHeuristic::<f64>::name(&NorthwestCorner),
            "Northwest Corner Rule"
        );
    }
}
