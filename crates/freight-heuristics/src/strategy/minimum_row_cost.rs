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
use freight_model::{allocation::Allocation, index::OriginIndex, model::Model};

pub(crate) const NAME: &str = "Minimum Row Cost Method";

/// Serves origins one at a time, each from its cheapest open destinations.
///
/// Origins are processed in index order and never revisited. While the
/// current origin has supply, it ships to the cheapest destination that
/// still has demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimumRowCost;

impl<T> AllocationHeuristic<T> for MinimumRowCost
where
    T: Quantity,
{
    fn name(&self) -> &str {
        NAME
    }

    fn allocate(&self, model: &Model<T>) -> Allocation<T> {
        let mut remaining = Remaining::new(model);
        let mut allocation = Allocation::zeros(model.num_origins(), model.num_destinations());

        for origin_index in OriginIndex::range(model.num_origins()) {
            while remaining.has_supply(origin_index) {
                let Some(destination_index) = remaining.cheapest_destination(model, origin_index)
                else {
                    log::debug!(
                        "{}: abandoning {} with residue {}",
                        NAME,
                        origin_index,
                        remaining.supply(origin_index)
                    );
                    break;
                };
                remaining.ship(origin_index, destination_index, &mut allocation);
            }
        }

        allocation
    }
}
