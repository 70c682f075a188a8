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

//! Vogel's Approximation Method.
//!
//! Each step prices the cost of *not* using the cheapest route of every open
//! line: the penalty of a row (or column) is the gap between its two smallest
//! costs among routes that are still open. The line with the largest penalty
//! is served first, through its cheapest open route.
//!
//! Penalties are `Option<T>`: `None` marks an exhausted line and ranks below
//! every real penalty, so it can never be selected. A line with a single open
//! route has penalty zero.

use crate::{remaining::Remaining, strategy::AllocationHeuristic};
use freight_core::num::quantity::Quantity;
use freight_model::{
    allocation::Allocation,
    index::{DestinationIndex, OriginIndex},
    model::Model,
};

pub(crate) const NAME: &str = "Vogel's Method";

/// Allocates by largest opportunity-cost penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vogel;

/// Tracks the two smallest values seen so far.
#[derive(Debug, Clone, Copy)]
struct TwoSmallest<T> {
    first: Option<T>,
    second: Option<T>,
}

impl<T> TwoSmallest<T>
where
    T: Quantity,
{
    #[inline]
    fn new() -> Self {
        Self {
            first: None,
            second: None,
        }
    }

    #[inline]
    fn push(&mut self, value: T) {
        match self.first {
            Some(first) if value < first => {
                self.second = self.first;
                self.first = Some(value);
            }
            Some(_) => {
                if self.second.is_none_or(|second| value < second) {
                    self.second = Some(value);
                }
            }
            None => self.first = Some(value),
        }
    }

    /// Second smallest minus smallest; zero with fewer than two values.
    #[inline]
    fn penalty(&self) -> T {
        match (self.first, self.second) {
            (Some(first), Some(second)) => second - first,
            _ => T::zero(),
        }
    }
}

#[inline]
fn row_penalty<T>(
    model: &Model<T>,
    remaining: &Remaining<T>,
    origin_index: OriginIndex,
) -> Option<T>
where
    T: Quantity,
{
    if !remaining.has_supply(origin_index) {
        return None;
    }
    let mut smallest = TwoSmallest::new();
    for (j, &cost) in model.origin_costs(origin_index).iter().enumerate() {
        if remaining.has_demand(DestinationIndex::new(j)) {
            smallest.push(cost);
        }
    }
    Some(smallest.penalty())
}

#[inline]
fn column_penalty<T>(
    model: &Model<T>,
    remaining: &Remaining<T>,
    destination_index: DestinationIndex,
) -> Option<T>
where
    T: Quantity,
{
    if !remaining.has_demand(destination_index) {
        return None;
    }
    let mut smallest = TwoSmallest::new();
    for origin_index in OriginIndex::range(model.num_origins()) {
        if remaining.has_supply(origin_index) {
            smallest.push(model.cost(origin_index, destination_index));
        }
    }
    Some(smallest.penalty())
}

/// Returns the first line with the largest penalty, or `None` if every line is exhausted.
#[inline]
fn first_max<I, T>(penalties: impl Iterator<Item = (I, Option<T>)>) -> Option<(I, T)>
where
    T: Quantity,
{
    let mut best: Option<(I, T)> = None;
    for (index, penalty) in penalties {
        let Some(penalty) = penalty else {
            continue;
        };
        if best.as_ref().is_none_or(|(_, p)| penalty > *p) {
            best = Some((index, penalty));
        }
    }
    best
}

impl<T> AllocationHeuristic<T> for Vogel
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
            let best_row = first_max(
                OriginIndex::range(model.num_origins())
                    .map(|i| (i, row_penalty(model, &remaining, i))),
            );
            let best_column = first_max(
                DestinationIndex::range(model.num_destinations())
                    .map(|j| (j, column_penalty(model, &remaining, j))),
            );

            // Rows win ties against columns.
            let route = match (best_row, best_column) {
                (Some((i, row)), Some((_, column))) if row >= column => remaining
                    .cheapest_destination(model, i)
                    .map(|j| (i, j)),
                (Some((i, _)), None) => remaining.cheapest_destination(model, i).map(|j| (i, j)),
                (_, Some((j, _))) => remaining.cheapest_origin(model, j).map(|i| (i, j)),
                (None, None) => None,
            };

            let Some((origin_index, destination_index)) = route else {
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
    use crate::{eval::cost::total_cost, strategy::northwest::NorthwestCorner};

    fn textbook() -> Model<f64> {
        Model::from_parts(
            &[
                vec![19.0, 30.0, 50.0, 10.0],
                vec![70.0, 30.0, 40.0, 60.0],
                vec![40.0, 8.0, 70.0, 20.0],
            ],
            &[7.0, 9.0, 18.0],
            &[5.0, 8.0, 7.0, 14.0],
        )
        .unwrap()
    }

    #[test]
    fn test_two_smallest_penalty() {
        let mut s = TwoSmallest::<f64>::new();
        assert_eq!(s.penalty(), 0.0);
        s.push(7.0);
        assert_eq!(s.penalty(), 0.0);
        s.push(3.0);
        assert_eq!(s.penalty(), 4.0);
        s.push(5.0);
        assert_eq!(s.penalty(), 2.0);
        s.push(3.0);
        assert_eq!(s.penalty(), 0.0);
    }

    #[test]
    fn test_initial_penalties() {
        let model = textbook();
        let remaining = Remaining::new(&model);
        let rows: Vec<Option<f64>> = OriginIndex::range(3)
            .map(|i| row_penalty(&model, &remaining, i))
            .collect();
        let columns: Vec<Option<f64>> = DestinationIndex::range(4)
            .map(|j| column_penalty(&model, &remaining, j))
            .collect();
        assert_eq!(rows, vec![Some(9.0), Some(10.0), Some(12.0)]);
        assert_eq!(columns, vec![Some(21.0), Some(22.0), Some(10.0), Some(10.0)]);
    }

    #[test]
    fn test_exhausted_lines_have_no_penalty() {
        let model = textbook();
        let mut remaining = Remaining::new(&model);
        let mut allocation = Allocation::zeros(3, 4);
        remaining.ship(OriginIndex::new(0), DestinationIndex::new(0), &mut allocation);
        assert_eq!(column_penalty(&model, &remaining, DestinationIndex::new(0)), None);
        assert!(row_penalty(&model, &remaining, OriginIndex::new(0)).is_some());
    }

    #[test]
    fn test_first_max_prefers_lowest_index_and_skips_none() {
        let penalties = [None, Some(2.0), Some(5.0), Some(5.0)];
        assert_eq!(
            first_max(penalties.iter().copied().enumerate()),
            Some((2, 5.0))
        );
        assert_eq!(first_max(std::iter::empty::<(usize, Option<f64>)>()), None);
        assert_eq!(first_max([(0usize, None::<f64>)].into_iter()), None);
    }

    #[test]
    fn test_textbook_instance() {
        let model = textbook();
        let allocation = Vogel.allocate(&model);
        assert_eq!(
            allocation.cells(),
            &[
                5.0, 0.0, 0.0, 2.0, //
                0.0, 0.0, 7.0, 2.0, //
                0.0, 8.0, 0.0, 10.0,
            ]
        );
        assert_eq!(total_cost(&model, &allocation), 779.0);

        let northwest = NorthwestCorner.allocate(&model);
        assert_eq!(total_cost(&model, &northwest), 1015.0);
    }

    #[test]
    fn test_two_by_two() {
        let allocation = Vogel
            .solve(&[vec![2.0, 3.0], vec![4.0, 1.0]], &[20.0, 30.0], &[10.0, 40.0])
            .unwrap();
        assert_eq!(allocation.cells(), &[10.0, 10.0, 0.0, 30.0]);
    }

    #[test]
    fn test_single_line_instances() {
        let allocation = Vogel.solve(&[vec![1.0, 1.0]], &[5.0], &[2.0, 3.0]).unwrap();
        assert_eq!(allocation.cells(), &[2.0, 3.0]);

        let allocation = Vogel
            .solve(&[vec![4.0], vec![1.0]], &[2.0, 3.0], &[5.0])
            .unwrap();
        assert_eq!(allocation.cells(), &[2.0, 3.0]);
    }
}
