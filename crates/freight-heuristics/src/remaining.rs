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

//! Working copies of supply and demand.
//!
//! Every heuristic call owns one `Remaining`, created from the model at the
//! start of the call and dropped at the end. The model itself is never
//! mutated, so any number of calls can run against the same `Model`
//! concurrently.
//!
//! All quantities stay non-negative: a shipment moves `min(S[i], D[j])`, which
//! leaves the smaller side at exactly zero and the larger side at a
//! non-negative difference.
//!
//! The cheapest-line scans (`cheapest_destination`, `cheapest_origin`) walk
//! indices in ascending order and keep the first strictly smaller cost, so
//! ties are always resolved towards the lowest index.

use freight_core::num::quantity::Quantity;
use freight_model::{
    allocation::Allocation,
    index::{DestinationIndex, OriginIndex},
    model::Model,
};

/// Remaining supply and demand during a single heuristic run.
#[derive(Debug, Clone, PartialEq)]
pub struct Remaining<T> {
    supply: Vec<T>,
    demand: Vec<T>,
}

impl<T> Remaining<T>
where
    T: Quantity,
{
    /// Copies the supply and demand vectors of `model`.
    #[inline]
    pub fn new(model: &Model<T>) -> Self {
        Self {
            supply: model.supplies().to_vec(),
            demand: model.demands().to_vec(),
        }
    }

    #[inline]
    pub fn supplies(&self) -> &[T] {
        &self.supply
    }

    #[inline]
    pub fn demands(&self) -> &[T] {
        &self.demand
    }

    #[inline]
    pub fn supply(&self, origin_index: OriginIndex) -> T {
        self.supply[origin_index.get()]
    }

    #[inline]
    pub fn demand(&self, destination_index: DestinationIndex) -> T {
        self.demand[destination_index.get()]
    }

    /// Returns `true` if the origin still has a positive supply.
    #[inline]
    pub fn has_supply(&self, origin_index: OriginIndex) -> bool {
        self.supply(origin_index) > T::zero()
    }

    /// Returns `true` if the destination still has a positive demand.
    #[inline]
    pub fn has_demand(&self, destination_index: DestinationIndex) -> bool {
        self.demand(destination_index) > T::zero()
    }

    #[inline]
    pub fn total_supply(&self) -> T {
        self.supply.iter().copied().sum()
    }

    #[inline]
    pub fn total_demand(&self) -> T {
        self.demand.iter().copied().sum()
    }

    /// Returns `true` while both the total remaining supply and the total
    /// remaining demand are positive.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.total_supply() > T::zero() && self.total_demand() > T::zero()
    }

    /// Ships `min(S[i], D[j])` on the route `(i, j)`, records it in
    /// `allocation` and decrements both sides. Returns the shipped quantity.
    #[inline]
    pub fn ship(
        &mut self,
        origin_index: OriginIndex,
        destination_index: DestinationIndex,
        allocation: &mut Allocation<T>,
    ) -> T {
        let i = origin_index.get();
        let j = destination_index.get();
        let quantity = self.supply[i].min(self.demand[j]);

        allocation.ship(origin_index, destination_index, quantity);
        self.supply[i] = self.supply[i] - quantity;
        self.demand[j] = self.demand[j] - quantity;

        log::trace!(
            "ship {} from {} to {} (left: supply {}, demand {})",
            quantity,
            origin_index,
            destination_index,
            self.supply[i],
            self.demand[j]
        );

        quantity
    }

    /// Returns the cheapest destination with remaining demand for `origin_index`.
    ///
    /// Ties go to the lowest destination index. Returns `None` if no
    /// destination has demand left.
    pub fn cheapest_destination(
        &self,
        model: &Model<T>,
        origin_index: OriginIndex,
    ) -> Option<DestinationIndex> {
        let mut best: Option<(DestinationIndex, T)> = None;
        for (j, &cost) in model.origin_costs(origin_index).iter().enumerate() {
            let destination_index = DestinationIndex::new(j);
            if !self.has_demand(destination_index) {
                continue;
            }
            if best.is_none_or(|(_, c)| cost < c) {
                best = Some((destination_index, cost));
            }
        }
        best.map(|(j, _)| j)
    }

    /// Returns the cheapest origin with remaining supply for `destination_index`.
    ///
    /// Ties go to the lowest origin index. Returns `None` if no origin has
    /// supply left.
    pub fn cheapest_origin(
        &self,
        model: &Model<T>,
        destination_index: DestinationIndex,
    ) -> Option<OriginIndex> {
        let mut best: Option<(OriginIndex, T)> = None;
        for origin_index in OriginIndex::range(model.num_origins()) {
            if !self.has_supply(origin_index) {
                continue;
            }
            let cost = model.cost(origin_index, destination_index);
            if best.is_none_or(|(_, c)| cost < c) {
                best = Some((origin_index, cost));
            }
        }
        best.map(|(i, _)| i)
    }
}
