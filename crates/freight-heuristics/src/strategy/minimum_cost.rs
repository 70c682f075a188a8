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

pub(crate) const NAME: &str = "Minimum Cost Method";

/// Repeatedly fills the globally cheapest open route.
///
/// Every step scans the whole matrix in row-major order and keeps the first
/// strictly smallest cost among routes whose origin has supply and whose
/// destination has demand left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimumCost;

/// Returns the cheapest open route, ties going to the first in row-major order.
fn cheapest_open_route<T>(
    model: &Model<T>,
    remaining: &Remaining<T>,
) -> Option<(OriginIndex, DestinationIndex)>
where
    T: Quantity,
{
    let mut best: Option<(OriginIndex, DestinationIndex, T)> = None;
    for origin_index in OriginIndex::range(model.num_origins()) {
        if !remaining.has_supply(origin_index) {
            continue;
        }
        for (j, &cost) in model.origin_costs(origin_index).iter().enumerate() {
            let destination_index = DestinationIndex::new(j);
            if !remaining.has_demand(destination_index) {
                continue;
            }
            if best.is_none_or(|(_, _, c)| cost < c) {
                best = Some((origin_index, destination_index, cost));
            }
        }
    }
    best.map(|(i, j, _)| (i, j))
}

impl<T> AllocationHeuristic<T> for MinimumCost
where
    T: Quantity,
{
    fn name(&self) -> &str {
        NAME
    }

    fn allocate(&self, model: &Model<T>) -> Allocation<T> {
        let mut remaining = Remaining::new(model);
        let mut allocation = Allocation::zeros(model.num_origins(), model.num_destinations());

        while remaining.is_open() {
            let Some((origin_index, destination_index)) = cheapest_open_route(model, &remaining)
            else {
                // Residue left on one side only.
                log::debug!(
                    "{}: no open route left (supply {}, demand {})",
                    NAME,
                    remaining.total_supply(),
                    remaining.total_demand()
                );
                break;
            };
            remaining.ship(origin_index, destination_index, &mut allocation);
        }

        allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::cost::total_cost;

    #[test]
    fn test_two_by_two_fills_cheapest_first() {
        let model =
            Model::from_parts(&[vec![2.0, 3.0], vec![4.0, 1.0]], &[20.0, 30.0], &[10.0, 40.0])
                .unwrap();
        let allocation = MinimumCost.allocate(&model);

        // (1,1) at cost 1 is filled first, then (0,0) and (0,1).
        assert_eq!(allocation.get(OriginIndex::new(1), DestinationIndex::new(1)), 30.0);
        assert_eq!(allocation.cells(), &[10.0, 10.0, 0.0, 30.0]);
        assert!(total_cost(&model, &allocation) <= 80.0);
    }

    #[test]
    fn test_tie_goes_to_first_cell_in_row_major_order() {
        // All four cells cost the same; the scan must start at (0, 0).
        let model = Model::from_parts(
            &[vec![4.0, 4.0], vec![4.0, 4.0]],
            &[3.0, 5.0],
            &[6.0, 2.0],
        )
        .unwrap();
        let allocation = MinimumCost.allocate(&model);
        assert_eq!(allocation.cells(), &[3.0, 0.0, 3.0, 2.0]);
    }

    #[test]
    fn test_picks_global_minimum_not_row_minimum() {
        let model = Model::from_parts(
            &[vec![2.0, 3.0], vec![1.0, 9.0]],
            &[10.0, 10.0],
            &[10.0, 10.0],
        )
        .unwrap();
        let allocation = MinimumCost.allocate(&model);
        assert_eq!(allocation.cells(), &[0.0, 10.0, 10.0, 0.0]);
        assert_eq!(total_cost(&model, &allocation), 40.0);
    }

    #[test]
    fn test_single_origin() {
        let allocation = MinimumCost
            .solve(&[vec![3.0, 1.0]], &[5.0], &[2.0, 3.0])
            .unwrap();
        assert_eq!(allocation.cells(), &[2.0, 3.0]);
    }
}
