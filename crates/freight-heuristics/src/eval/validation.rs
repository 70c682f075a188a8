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

//! Feasibility checks for allocations.
//!
//! An allocation is feasible for a model when it has the model's shape,
//! every cell is finite and non-negative, every row sums to the origin's
//! supply and every column sums to the destination's demand. Sums are
//! compared with the model's relative tolerance, the same one used for the
//! balance check when the model was built.
//!
//! The checks run in that order and stop at the first violation, so the
//! reported violation is deterministic for a given input.

use freight_core::num::quantity::{Quantity, approx_eq};
use freight_model::{
    allocation::Allocation,
    index::{DestinationIndex, OriginIndex},
    model::Model,
};

#[inline(always)]
fn as_f64<T: Quantity>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Describes why an allocation is not feasible for a model.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationViolation {
    /// The allocation does not have the model's shape.
    ShapeMismatch {
        expected_origins: usize,
        expected_destinations: usize,
        origins: usize,
        destinations: usize,
    },
    /// A cell is NaN or infinite.
    NonFinite {
        origin: OriginIndex,
        destination: DestinationIndex,
    },
    /// A cell is negative.
    Negative {
        origin: OriginIndex,
        destination: DestinationIndex,
        value: f64,
    },
    /// An origin ships a different total than its supply.
    RowSum {
        origin: OriginIndex,
        expected: f64,
        actual: f64,
    },
    /// A destination receives a different total than its demand.
    ColumnSum {
        destination: DestinationIndex,
        expected: f64,
        actual: f64,
    },
}

impl std::fmt::Display for AllocationViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationViolation::ShapeMismatch {
                expected_origins,
                expected_destinations,
                origins,
                destinations,
            } => write!(
                f,
                "Allocation has shape {}x{}, expected {}x{}",
                origins, destinations, expected_origins, expected_destinations
            ),
            AllocationViolation::NonFinite {
                origin,
                destination,
            } => write!(f, "Non-finite quantity at ({}, {})", origin, destination),
            AllocationViolation::Negative {
                origin,
                destination,
                value,
            } => write!(
                f,
                "Negative quantity {} at ({}, {})",
                value, origin, destination
            ),
            AllocationViolation::RowSum {
                origin,
                expected,
                actual,
            } => write!(
                f,
                "{} ships {} but has supply {}",
                origin, actual, expected
            ),
            AllocationViolation::ColumnSum {
                destination,
                expected,
                actual,
            } => write!(
                f,
                "{} receives {} but has demand {}",
                destination, actual, expected
            ),
        }
    }
}

impl std::error::Error for AllocationViolation {}

/// Checks that `allocation` is a feasible allocation for `model`.
///
/// Returns the first violation found. See the module documentation for the
/// order of the checks.
pub fn validate_allocation<T>(
    model: &Model<T>,
    allocation: &Allocation<T>,
) -> Result<(), AllocationViolation>
where
    T: Quantity,
{
    if allocation.num_origins() != model.num_origins()
        || allocation.num_destinations() != model.num_destinations()
    {
        return Err(AllocationViolation::ShapeMismatch {
            expected_origins: model.num_origins(),
            expected_destinations: model.num_destinations(),
            origins: allocation.num_origins(),
            destinations: allocation.num_destinations(),
        });
    }

    for origin_index in OriginIndex::range(model.num_origins()) {
        for destination_index in DestinationIndex::range(model.num_destinations()) {
            let value = allocation.get(origin_index, destination_index);
            if !value.is_finite() {
                return Err(AllocationViolation::NonFinite {
                    origin: origin_index,
                    destination: destination_index,
                });
            }
            if value < T::zero() {
                return Err(AllocationViolation::Negative {
                    origin: origin_index,
                    destination: destination_index,
                    value: as_f64(value),
                });
            }
        }
    }

    let tolerance = model.tolerance();

    for origin_index in OriginIndex::range(model.num_origins()) {
        let expected = model.supply(origin_index);
        let actual = allocation.row_sum(origin_index);
        if !approx_eq(actual, expected, tolerance) {
            return Err(AllocationViolation::RowSum {
                origin: origin_index,
                expected: as_f64(expected),
                actual: as_f64(actual),
            });
        }
    }

    for destination_index in DestinationIndex::range(model.num_destinations()) {
        let expected = model.demand(destination_index);
        let actual = allocation.column_sum(destination_index);
        if !approx_eq(actual, expected, tolerance) {
            return Err(AllocationViolation::ColumnSum {
                destination: destination_index,
                expected: as_f64(expected),
                actual: as_f64(actual),
            });
        }
    }

    Ok(())
}

/// Returns `true` if `allocation` is feasible for `model`.
#[inline]
pub fn is_feasible<T>(model: &Model<T>, allocation: &Allocation<T>) -> bool
where
    T: Quantity,
{
    validate_allocation(model, allocation).is_ok()
}
