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

use crate::index::{DestinationIndex, OriginIndex};
use freight_core::num::quantity::Quantity;

#[inline(always)]
fn flatten_index(
    num_destinations: usize,
    origin_index: OriginIndex,
    destination_index: DestinationIndex,
) -> usize {
    origin_index.get() * num_destinations + destination_index.get()
}

#[inline(always)]
fn as_f64<T: Quantity>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// The error type for building a `Model`.
///
/// Every variant describes a precondition of the allocation heuristics. They
/// are detected before any allocation happens; a `Model` that exists is
/// always valid and balanced.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The problem has no origins or no destinations.
    Empty {
        num_origins: usize,
        num_destinations: usize,
    },
    /// The cost matrix does not match the supply and demand vectors.
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
    /// A supply, demand or cost entry is NaN or infinite.
    NonFinite { what: &'static str, position: usize },
    /// A supply quantity is negative.
    NegativeSupply { origin: OriginIndex, value: f64 },
    /// A demand quantity is negative.
    NegativeDemand {
        destination: DestinationIndex,
        value: f64,
    },
    /// A unit cost is negative.
    NegativeCost {
        origin: OriginIndex,
        destination: DestinationIndex,
        value: f64,
    },
    /// Summing the supplies or the demands overflows.
    NonFiniteTotal { what: &'static str },
    /// Total supply and total demand differ by more than the tolerance.
    Unbalanced { total_supply: f64, total_demand: f64 },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty {
                num_origins,
                num_destinations,
            } => write!(
                f,
                "Problem must have at least one origin and one destination (got {} x {})",
                num_origins, num_destinations
            ),
            Self::ShapeMismatch {
                expected_rows,
                expected_cols,
                rows,
                cols,
            } => write!(
                f,
                "Cost matrix shape {}x{} does not match supply/demand lengths {}x{}",
                rows, cols, expected_rows, expected_cols
            ),
            Self::NonFinite { what, position } => {
                write!(f, "Non-finite {} value at position {}", what, position)
            }
            Self::NegativeSupply { origin, value } => {
                write!(f, "Negative supply {} at {}", value, origin)
            }
            Self::NegativeDemand { destination, value } => {
                write!(f, "Negative demand {} at {}", value, destination)
            }
            Self::NegativeCost {
                origin,
                destination,
                value,
            } => write!(
                f,
                "Negative cost {} at ({}, {})",
                value, origin, destination
            ),
            Self::NonFiniteTotal { what } => write!(f, "Total {} is not finite", what),
            Self::Unbalanced {
                total_supply,
                total_demand,
            } => write!(
                f,
                "Unbalanced problem: total supply {} does not equal total demand {}",
                total_supply, total_demand
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// The immutable data model of a balanced transportation problem.
///
/// This struct holds all pre-validated, queryable data:
/// - `costs[origin * num_destinations + destination]`: the unit shipping cost.
/// - `supply[origin]`: the quantity available at each origin.
/// - `demand[destination]`: the quantity required at each destination.
/// - `tolerance`: the relative tolerance used for the balance check and for
///   feasibility validation of allocations.
///
/// Construction:
/// - Use `ModelBuilder` and call `ModelBuilder::build`, or
/// - use `Model::from_parts` with a nested cost matrix.
///
/// Both paths reject empty, ragged, negative, non-finite and unbalanced input.
#[derive(Clone, PartialEq)]
pub struct Model<T> {
    costs: Vec<T>,  // len = num_origins * num_destinations
    supply: Vec<T>, // len = num_origins
    demand: Vec<T>, // len = num_destinations
    tolerance: T,
}

impl<T> Model<T>
where
    T: Quantity,
{
    /// Builds a model from a nested cost matrix and the two quantity vectors.
    ///
    /// `costs` must have `supply.len()` rows, each with `demand.len()` entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use freight_model::model::{Model, ModelError};
    ///
    /// let model = Model::from_parts(&[vec![2.0, 3.0], vec![4.0, 1.0]], &[20.0, 30.0], &[10.0, 40.0]).unwrap();
    /// assert_eq!(model.num_origins(), 2);
    ///
    /// let err = Model::from_parts(&[vec![1.0, 1.0], vec![1.0, 1.0]], &[5.0, 5.0], &[3.0, 3.0]).unwrap_err();
    /// assert!(matches!(err, ModelError::Unbalanced { .. }));
    /// ```
    pub fn from_parts(costs: &[Vec<T>], supply: &[T], demand: &[T]) -> Result<Self, ModelError> {
        let num_origins = supply.len();
        let num_destinations = demand.len();

        if num_origins == 0 || num_destinations == 0 {
            return Err(ModelError::Empty {
                num_origins,
                num_destinations,
            });
        }

        let ragged = costs.iter().find(|row| row.len() != num_destinations);
        if costs.len() != num_origins || ragged.is_some() {
            return Err(ModelError::ShapeMismatch {
                expected_rows: num_origins,
                expected_cols: num_destinations,
                rows: costs.len(),
                cols: ragged.map_or(num_destinations, |row| row.len()),
            });
        }

        let mut builder = ModelBuilder::new(num_origins, num_destinations);
        builder.costs = costs.iter().flatten().copied().collect();
        builder.supply = supply.to_vec();
        builder.demand = demand.to_vec();
        builder.build()
    }

    /// Returns the number of origins (rows) in the model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use freight_model::model::ModelBuilder;
    ///
    /// let model = ModelBuilder::<f64>::new(3, 2).build().unwrap();
    /// assert_eq!(model.num_origins(), 3);
    /// ```
    #[inline]
    pub fn num_origins(&self) -> usize {
        self.supply.len()
    }

    /// Returns the number of destinations (columns) in the model.
    #[inline]
    pub fn num_destinations(&self) -> usize {
        self.demand.len()
    }

    /// Returns the relative tolerance used for balance and feasibility checks.
    #[inline]
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Returns the flat, row-major cost matrix.
    #[inline]
    pub fn costs(&self) -> &[T] {
        &self.costs
    }

    /// Returns the supply vector.
    #[inline]
    pub fn supplies(&self) -> &[T] {
        &self.supply
    }

    /// Returns the demand vector.
    #[inline]
    pub fn demands(&self) -> &[T] {
        &self.demand
    }

    /// Returns the sum of all supplies.
    #[inline]
    pub fn total_supply(&self) -> T {
        self.supply.iter().copied().sum()
    }

    /// Returns the sum of all demands.
    #[inline]
    pub fn total_demand(&self) -> T {
        self.demand.iter().copied().sum()
    }

    /// Returns the supply of the specified origin.
    ///
    /// # Panics
    ///
    /// Panics if `origin_index` is not in `0..num_origins()`.
    #[inline]
    pub fn supply(&self, origin_index: OriginIndex) -> T {
        let index = origin_index.get();
        debug_assert!(
            index < self.num_origins(),
            "called `Model::supply` with origin index out of bounds: the len is {} but the index is {}",
            self.num_origins(),
            index
        );

        self.supply[index]
    }

    /// Returns the demand of the specified destination.
    ///
    /// # Panics
    ///
    /// Panics if `destination_index` is not in `0..num_destinations()`.
    #[inline]
    pub fn demand(&self, destination_index: DestinationIndex) -> T {
        let index = destination_index.get();
        debug_assert!(
            index < self.num_destinations(),
            "called `Model::demand` with destination index out of bounds: the len is {} but the index is {}",
            self.num_destinations(),
            index
        );

        self.demand[index]
    }

    /// Returns the unit cost of shipping from `origin_index` to `destination_index`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use freight_model::model::Model;
    /// # use freight_model::index::{OriginIndex, DestinationIndex};
    ///
    /// let model = Model::from_parts(&[vec![2.0, 3.0], vec![4.0, 1.0]], &[20.0, 30.0], &[10.0, 40.0]).unwrap();
    /// assert_eq!(model.cost(OriginIndex::new(1), DestinationIndex::new(0)), 4.0);
    /// ```
    #[inline]
    pub fn cost(&self, origin_index: OriginIndex, destination_index: DestinationIndex) -> T {
        debug_assert!(
            origin_index.get() < self.num_origins(),
            "called `Model::cost` with origin index out of bounds: the len is {} but the index is {}",
            self.num_origins(),
            origin_index.get()
        );
        debug_assert!(
            destination_index.get() < self.num_destinations(),
            "called `Model::cost` with destination index out of bounds: the len is {} but the index is {}",
            self.num_destinations(),
            destination_index.get()
        );

        self.costs[flatten_index(self.num_destinations(), origin_index, destination_index)]
    }

    /// Returns the cost row of the specified origin.
    ///
    /// # Panics
    ///
    /// Panics if `origin_index` is not in `0..num_origins()`.
    #[inline]
    pub fn origin_costs(&self, origin_index: OriginIndex) -> &[T] {
        let start = origin_index.get() * self.num_destinations();
        &self.costs[start..start + self.num_destinations()]
    }
}

impl<T> std::fmt::Debug for Model<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("costs", &self.costs)
            .field("supply", &self.supply)
            .field("demand", &self.demand)
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl<T> std::fmt::Display for Model<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(num_origins: {}, num_destinations: {})",
            self.supply.len(),
            self.demand.len()
        )
    }
}

/// A mutable builder for `Model`.
///
/// # Defaults
///
/// | Field | Default Value | Semantics |
/// | :--- | :--- | :--- |
/// | `supply` | `0` | Origins ship nothing until set. |
/// | `demand` | `0` | Destinations require nothing until set. |
/// | `costs` | `0` | Every route is free until priced. |
/// | `tolerance` | `1e-9` | Relative tolerance for the balance and feasibility checks. |
///
/// A freshly created builder therefore describes a trivially balanced
/// problem (everything zero), which builds successfully.
#[derive(Clone)]
pub struct ModelBuilder<T> {
    num_origins: usize,
    num_destinations: usize,
    costs: Vec<T>,
    supply: Vec<T>,
    demand: Vec<T>,
    tolerance: T,
}

impl<T> ModelBuilder<T>
where
    T: Quantity,
{
    /// Creates a new `ModelBuilder` with all quantities and costs set to zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use freight_model::model::ModelBuilder;
    ///
    /// let builder = ModelBuilder::<f64>::new(3, 5);
    /// assert_eq!(builder.num_origins(), 3);
    /// assert_eq!(builder.num_destinations(), 5);
    /// ```
    pub fn new(num_origins: usize, num_destinations: usize) -> Self {
        Self {
            num_origins,
            num_destinations,
            costs: vec![T::zero(); num_origins * num_destinations],
            supply: vec![T::zero(); num_origins],
            demand: vec![T::zero(); num_destinations],
            tolerance: T::default_tolerance(),
        }
    }

    /// Returns the number of origins.
    #[inline]
    pub fn num_origins(&self) -> usize {
        self.num_origins
    }

    /// Returns the number of destinations.
    #[inline]
    pub fn num_destinations(&self) -> usize {
        self.num_destinations
    }

    /// Sets the supply of an origin.
    ///
    /// # Panics
    ///
    /// Panics if `origin_index` is not in `0..num_origins()`.
    #[inline]
    pub fn set_supply(&mut self, origin_index: OriginIndex, supply: T) -> &mut Self {
        let index = origin_index.get();
        assert!(
            index < self.num_origins,
            "called `ModelBuilder::set_supply` with origin index out of bounds: the len is {} but the index is {}",
            self.num_origins,
            index
        );

        self.supply[index] = supply;
        self
    }

    /// Sets the demand of a destination.
    ///
    /// # Panics
    ///
    /// Panics if `destination_index` is not in `0..num_destinations()`.
    #[inline]
    pub fn set_demand(&mut self, destination_index: DestinationIndex, demand: T) -> &mut Self {
        let index = destination_index.get();
        assert!(
            index < self.num_destinations,
            "called `ModelBuilder::set_demand` with destination index out of bounds: the len is {} but the index is {}",
            self.num_destinations,
            index
        );

        self.demand[index] = demand;
        self
    }

    /// Sets the unit cost of a single route.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn set_cost(
        &mut self,
        origin_index: OriginIndex,
        destination_index: DestinationIndex,
        cost: T,
    ) -> &mut Self {
        assert!(
            origin_index.get() < self.num_origins,
            "called `ModelBuilder::set_cost` with origin index out of bounds: the len is {} but the index is {}",
            self.num_origins,
            origin_index.get()
        );
        assert!(
            destination_index.get() < self.num_destinations,
            "called `ModelBuilder::set_cost` with destination index out of bounds: the len is {} but the index is {}",
            self.num_destinations,
            destination_index.get()
        );

        let flat = flatten_index(self.num_destinations, origin_index, destination_index);
        self.costs[flat] = cost;
        self
    }

    /// Sets the whole cost row of an origin.
    ///
    /// # Panics
    ///
    /// Panics if `origin_index` is out of bounds or `costs.len() != num_destinations()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use freight_model::model::ModelBuilder;
    /// # use freight_model::index::{OriginIndex, DestinationIndex};
    ///
    /// let mut builder = ModelBuilder::<f64>::new(1, 3);
    /// builder.set_origin_costs(OriginIndex::new(0), &[4.0, 2.0, 7.0]);
    /// let model = builder.build().unwrap();
    /// assert_eq!(model.cost(OriginIndex::new(0), DestinationIndex::new(2)), 7.0);
    /// ```
    pub fn set_origin_costs(&mut self, origin_index: OriginIndex, costs: &[T]) -> &mut Self {
        assert!(
            origin_index.get() < self.num_origins,
            "called `ModelBuilder::set_origin_costs` with origin index out of bounds: the len is {} but the index is {}",
            self.num_origins,
            origin_index.get()
        );
        assert_eq!(
            costs.len(),
            self.num_destinations,
            "called `ModelBuilder::set_origin_costs` with a row of length {} but the model has {} destinations",
            costs.len(),
            self.num_destinations
        );

        let start = origin_index.get() * self.num_destinations;
        self.costs[start..start + self.num_destinations].copy_from_slice(costs);
        self
    }

    /// Sets the relative tolerance for the balance check.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is negative or not finite.
    #[inline]
    pub fn with_tolerance(&mut self, tolerance: T) -> &mut Self {
        assert!(
            tolerance.is_finite() && tolerance >= T::zero(),
            "called `ModelBuilder::with_tolerance` with an invalid tolerance: {}",
            tolerance
        );

        self.tolerance = tolerance;
        self
    }

    /// Validates the collected data and builds the immutable `Model`.
    ///
    /// Checks run in this order: emptiness, finiteness, signs (supply, then
    /// demand, then costs), finiteness of the totals, balance. The first
    /// violation is reported.
    ///
    /// The accepted gap between total supply and total demand is
    /// `tolerance * max(1, q)`, where `q` is the smallest positive supply or
    /// demand. Any gap the heuristics leave unshipped then stays within the
    /// tolerance of the line that carries it.
    pub fn build(self) -> Result<Model<T>, ModelError> {
        if self.num_origins == 0 || self.num_destinations == 0 {
            return Err(ModelError::Empty {
                num_origins: self.num_origins,
                num_destinations: self.num_destinations,
            });
        }

        let non_finite = |what: &'static str, values: &[T]| {
            values
                .iter()
                .position(|v| !v.is_finite())
                .map(|position| ModelError::NonFinite { what, position })
        };
        if let Some(err) = non_finite("supply", self.supply.as_slice())
            .or_else(|| non_finite("demand", self.demand.as_slice()))
            .or_else(|| non_finite("cost", self.costs.as_slice()))
        {
            return Err(err);
        }

        if let Some(i) = self.supply.iter().position(|&s| s < T::zero()) {
            return Err(ModelError::NegativeSupply {
                origin: OriginIndex::new(i),
                value: as_f64(self.supply[i]),
            });
        }
        if let Some(j) = self.demand.iter().position(|&d| d < T::zero()) {
            return Err(ModelError::NegativeDemand {
                destination: DestinationIndex::new(j),
                value: as_f64(self.demand[j]),
            });
        }
        if let Some(flat) = self.costs.iter().position(|&c| c < T::zero()) {
            return Err(ModelError::NegativeCost {
                origin: OriginIndex::new(flat / self.num_destinations),
                destination: DestinationIndex::new(flat % self.num_destinations),
                value: as_f64(self.costs[flat]),
            });
        }

        let total_supply: T = self.supply.iter().copied().sum();
        if !total_supply.is_finite() {
            return Err(ModelError::NonFiniteTotal { what: "supply" });
        }
        let total_demand: T = self.demand.iter().copied().sum();
        if !total_demand.is_finite() {
            return Err(ModelError::NonFiniteTotal { what: "demand" });
        }

        // The gap is left as residue on the larger side, so it has to fit the
        // tolerance of the smallest line that can receive it.
        let smallest_line = self
            .supply
            .iter()
            .chain(self.demand.iter())
            .copied()
            .filter(|&q| q > T::zero())
            .reduce(T::min);
        let scale = smallest_line.map_or(T::one(), |q| q.max(T::one()));
        if (total_supply - total_demand).abs() > self.tolerance * scale {
            return Err(ModelError::Unbalanced {
                total_supply: as_f64(total_supply),
                total_demand: as_f64(total_demand),
            });
        }

        Ok(Model {
            costs: self.costs,
            supply: self.supply,
            demand: self.demand,
            tolerance: self.tolerance,
        })
    }
}

impl<T> std::fmt::Debug for ModelBuilder<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBuilder")
            .field("num_origins", &self.num_origins)
            .field("num_destinations", &self.num_destinations)
            .field("costs", &self.costs)
            .field("supply", &self.supply)
            .field("demand", &self.demand)
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl<T> std::fmt::Display for ModelBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ModelBuilder(num_origins: {}, num_destinations: {})",
            self.num_origins, self.num_destinations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn o(i: usize) -> OriginIndex {
        OriginIndex::new(i)
    }
    fn d(j: usize) -> DestinationIndex {
        DestinationIndex::new(j)
    }

    fn classic() -> Model<f64> {
        Model::from_parts(
            &[vec![2.0, 3.0], vec![4.0, 1.0]],
            &[20.0, 30.0],
            &[10.0, 40.0],
        )
        .expect("classic model is valid")
    }

    #[test]
    fn test_flatten_index() {
        assert_eq!(flatten_index(5, o(0), d(0)), 0);
        assert_eq!(flatten_index(5, o(0), d(4)), 4);
        assert_eq!(flatten_index(5, o(3), d(2)), 17);
    }

    #[test]
    fn test_from_parts_accessors() {
        let model = classic();
        assert_eq!(model.num_origins(), 2);
        assert_eq!(model.num_destinations(), 2);
        assert_eq!(model.costs(), &[2.0, 3.0, 4.0, 1.0]);
        assert_eq!(model.supplies(), &[20.0, 30.0]);
        assert_eq!(model.demands(), &[10.0, 40.0]);
        assert_eq!(model.cost(o(0), d(1)), 3.0);
        assert_eq!(model.cost(o(1), d(1)), 1.0);
        assert_eq!(model.supply(o(1)), 30.0);
        assert_eq!(model.demand(d(0)), 10.0);
        assert_eq!(model.origin_costs(o(1)), &[4.0, 1.0]);
        assert_eq!(model.total_supply(), 50.0);
        assert_eq!(model.total_demand(), 50.0);
        assert_eq!(model.tolerance(), 1e-9);
    }

    #[test]
    fn test_builder_matches_from_parts() {
        let mut b = ModelBuilder::<f64>::new(2, 2);
        b.set_supply(o(0), 20.0)
            .set_supply(o(1), 30.0)
            .set_demand(d(0), 10.0)
            .set_demand(d(1), 40.0)
            .set_origin_costs(o(0), &[2.0, 3.0])
            .set_cost(o(1), d(0), 4.0)
            .set_cost(o(1), d(1), 1.0);
        assert_eq!(b.build().unwrap(), classic());
    }

    #[test]
    fn test_builder_defaults_build_zero_problem() {
        let model = ModelBuilder::<f64>::new(2, 3).build().unwrap();
        assert!(model.costs().iter().all(|&c| c == 0.0));
        assert_eq!(model.total_supply(), 0.0);
    }

    #[test]
    fn test_empty_rejected() {
        let err = ModelBuilder::<f64>::new(0, 3).build().unwrap_err();
        assert_eq!(
            err,
            ModelError::Empty {
                num_origins: 0,
                num_destinations: 3
            }
        );

        let err = Model::<f64>::from_parts(&[], &[], &[1.0]).unwrap_err();
        assert!(matches!(err, ModelError::Empty { .. }));
    }

    #[test]
    fn test_shape_mismatch_rows() {
        let err = Model::from_parts(&[vec![1.0, 2.0]], &[1.0, 2.0], &[1.5, 1.5]).unwrap_err();
        assert_eq!(
            err,
            ModelError::ShapeMismatch {
                expected_rows: 2,
                expected_cols: 2,
                rows: 1,
                cols: 2
            }
        );
    }

    #[test]
    fn test_shape_mismatch_ragged_row() {
        let err = Model::from_parts(
            &[vec![1.0, 2.0], vec![1.0, 2.0, 3.0]],
            &[1.0, 2.0],
            &[1.5, 1.5],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::ShapeMismatch {
                expected_rows: 2,
                expected_cols: 2,
                rows: 2,
                cols: 3
            }
        );
    }

    #[test]
    fn test_negative_quantities_rejected() {
        let err = Model::from_parts(&[vec![1.0, 1.0]], &[-1.0], &[-0.5, -0.5]).unwrap_err();
        assert_eq!(
            err,
            ModelError::NegativeSupply {
                origin: o(0),
                value: -1.0
            }
        );

        let err = Model::from_parts(&[vec![1.0, 1.0]], &[1.0], &[2.0, -1.0]).unwrap_err();
        assert_eq!(
            err,
            ModelError::NegativeDemand {
                destination: d(1),
                value: -1.0
            }
        );
    }

    #[test]
    fn test_negative_cost_rejected() {
        let err = Model::from_parts(
            &[vec![1.0, 1.0], vec![1.0, -3.0]],
            &[1.0, 1.0],
            &[1.0, 1.0],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::NegativeCost {
                origin: o(1),
                destination: d(1),
                value: -3.0
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = Model::from_parts(&[vec![f64::NAN]], &[1.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            ModelError::NonFinite {
                what: "cost",
                position: 0
            }
        );

        let err = Model::from_parts(&[vec![1.0]], &[f64::INFINITY], &[1.0]).unwrap_err();
        assert!(matches!(err, ModelError::NonFinite { what: "supply", .. }));
    }

    #[test]
    fn test_unbalanced_rejected() {
        let err = Model::from_parts(
            &[vec![1.0, 1.0], vec![1.0, 1.0]],
            &[5.0, 5.0],
            &[3.0, 3.0],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::Unbalanced {
                total_supply: 10.0,
                total_demand: 6.0
            }
        );
    }

    #[test]
    fn test_balance_tolerates_rounding() {
        let model = Model::from_parts(&[vec![1.0], vec![2.0]], &[0.1, 0.2], &[0.3]);
        assert!(model.is_ok());
    }

    #[test]
    fn test_gap_is_bounded_by_the_smallest_line() {
        // Relative to the totals the gap is tiny, but it is half a permille
        // of the unit supply that would have to absorb it.
        let err = Model::from_parts(&[vec![1.0], vec![1.0]], &[1e6, 1.0], &[1e6 + 1.0 - 5e-4])
            .unwrap_err();
        assert!(matches!(err, ModelError::Unbalanced { .. }));

        let model = Model::from_parts(
            &[vec![1.0], vec![1.0]],
            &[1e6, 1.0],
            &[1e6 + 1.0 - 5e-10],
        );
        assert!(model.is_ok());
    }

    #[test]
    fn test_overflowing_totals_rejected() {
        let err = Model::from_parts(
            &[vec![1.0, 1.0], vec![1.0, 1.0]],
            &[f64::MAX, f64::MAX],
            &[f64::MAX, f64::MAX],
        )
        .unwrap_err();
        assert_eq!(err, ModelError::NonFiniteTotal { what: "supply" });
        assert_eq!(err.to_string(), "Total supply is not finite");

        let err = Model::from_parts(&[vec![1.0, 1.0]], &[1.0], &[f64::MAX, f64::MAX])
            .unwrap_err();
        assert_eq!(err, ModelError::NonFiniteTotal { what: "demand" });
    }

    #[test]
    fn test_custom_tolerance_accepts_small_gap() {
        let mut b = ModelBuilder::<f64>::new(1, 1);
        b.set_supply(o(0), 100.0).set_demand(d(0), 100.5);
        assert!(b.clone().build().is_err());
        b.with_tolerance(0.01);
        assert!(b.build().is_ok());
    }

    #[test]
    #[should_panic(expected = "called `ModelBuilder::set_supply` with origin index out of bounds")]
    fn test_set_supply_out_of_bounds_panics() {
        ModelBuilder::<f64>::new(1, 1).set_supply(o(1), 1.0);
    }

    #[test]
    #[should_panic(expected = "called `ModelBuilder::set_origin_costs` with a row of length 1")]
    fn test_set_origin_costs_wrong_length_panics() {
        ModelBuilder::<f64>::new(1, 2).set_origin_costs(o(0), &[1.0]);
    }

    #[test]
    fn test_error_display() {
        let err = ModelError::Unbalanced {
            total_supply: 10.0,
            total_demand: 6.0,
        };
        assert_eq!(
            err.to_string(),
            "Unbalanced problem: total supply 10 does not equal total demand 6"
        );
        let err = ModelError::NegativeCost {
            origin: o(1),
            destination: d(0),
            value: -2.5,
        };
        assert_eq!(
            err.to_string(),
            "Negative cost -2.5 at (OriginIndex(1), DestinationIndex(0))"
        );
    }

    #[test]
    fn test_display_and_debug() {
        let model = classic();
        assert_eq!(
            format!("{}", model),
            "Model(num_origins: 2, num_destinations: 2)"
        );
        let dbg = format!("{:?}", model);
        assert!(dbg.contains("Model"));
        assert!(dbg.contains("supply"));
        assert!(dbg.contains("tolerance"));
    }
}
