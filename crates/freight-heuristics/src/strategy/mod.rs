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

//! Allocation strategies.
//!
//! Every strategy implements `AllocationHeuristic` and differs from the
//! others only in how it picks the next route to fill:
//!
//! - `northwest`: walk a single cursor from the top-left corner.
//! - `minimum_cost`: cheapest open route over the whole matrix.
//! - `minimum_row_cost`: cheapest open route within the current origin.
//! - `vogel`: route chosen by the largest opportunity-cost penalty.
//!
//! Strategies are stateless unit structs. All working state lives in a
//! `Remaining` and an `Allocation` created inside each `allocate` call.
//!
//! Tie-break contract: whenever two candidates are equally good, the one
//! encountered first in ascending index order (row-major for whole-matrix
//! scans) wins. Results are therefore fully deterministic.

pub mod minimum_cost;
pub mod minimum_row_cost;
pub mod northwest;
pub mod vogel;

use crate::eval::cost::total_cost;
use freight_core::num::quantity::Quantity;
use freight_model::{
    allocation::Allocation,
    model::{Model, ModelError},
    solution::Solution,
};

/// A strategy that turns a validated model into a feasible allocation.
pub trait AllocationHeuristic<T>: Send + Sync
where
    T: Quantity,
{
    /// Returns the human-readable name of the heuristic.
    fn name(&self) -> &str;

    /// Computes a feasible allocation for `model`.
    ///
    /// The model is validated and balanced by construction, so this cannot
    /// fail; every row of the result sums to the origin's supply and every
    /// column to the destination's demand, within the model tolerance.
    fn allocate(&self, model: &Model<T>) -> Allocation<T>;

    /// Validates the raw inputs and allocates.
    ///
    /// `costs` has one row per origin (`supply.len()` rows) and one entry per
    /// destination (`demand.len()` columns). Empty, ragged, negative,
    /// non-finite and unbalanced inputs are rejected before any allocation.
    fn solve(
        &self,
        costs: &[Vec<T>],
        supply: &[T],
        demand: &[T],
    ) -> Result<Allocation<T>, ModelError> {
        let model = Model::from_parts(costs, supply, demand)?;
        Ok(self.allocate(&model))
    }

    /// Allocates and prices the result.
    fn solution(&self, model: &Model<T>) -> Solution<T> {
        let allocation = self.allocate(model);
        let objective = total_cost(model, &allocation);
        Solution::new(objective, allocation)
    }
}

impl<T> std::fmt::Debug for dyn AllocationHeuristic<T>
where
    T: Quantity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationHeuristic({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn AllocationHeuristic<T>
where
    T: Quantity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationHeuristic({})", self.name())
    }
}

/// Names the available strategies for configuration and command-line use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    NorthwestCorner,
    MinimumCost,
    MinimumRowCost,
    Vogel,
}

impl Method {
    /// All methods, in report order.
    pub const ALL: [Method; 4] = [
        Method::NorthwestCorner,
        Method::MinimumCost,
        Method::MinimumRowCost,
        Method::Vogel,
    ];

    /// Returns the report label of the method.
    pub const fn label(self) -> &'static str {
        match self {
            Method::NorthwestCorner => northwest::NAME,
            Method::MinimumCost => minimum_cost::NAME,
            Method::MinimumRowCost => minimum_row_cost::NAME,
            Method::Vogel => vogel::NAME,
        }
    }

    /// Instantiates the strategy behind this method.
    pub fn heuristic<T>(self) -> Box<dyn AllocationHeuristic<T>>
    where
        T: Quantity,
    {
        match self {
            Method::NorthwestCorner => Box::new(northwest::NorthwestCorner),
            Method::MinimumCost => Box::new(minimum_cost::MinimumCost),
            Method::MinimumRowCost => Box::new(minimum_row_cost::MinimumRowCost),
            Method::Vogel => Box::new(vogel::Vogel),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a method name cannot be recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethodError {
    pub name: String,
}

impl std::fmt::Display for UnknownMethodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown method '{}' (expected one of: northwest, min-cost, min-row-cost, vogel)",
            self.name
        )
    }
}

impl std::error::Error for UnknownMethodError {}

impl std::str::FromStr for Method {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "northwest" | "northwest-corner" | "nwc" => Ok(Method::NorthwestCorner),
            "min-cost" | "minimum-cost" | "lcm" => Ok(Method::MinimumCost),
            "min-row-cost" | "minimum-row-cost" | "min-row" => Ok(Method::MinimumRowCost),
            "vogel" | "vam" => Ok(Method::Vogel),
            _ => Err(UnknownMethodError {
                name: s.to_string(),
            }),
        }
    }
}
