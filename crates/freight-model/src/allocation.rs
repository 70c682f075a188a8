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

/// The quantities shipped on every route of a transportation problem.
///
/// Stored as a flat row-major matrix: `cells[origin * num_destinations + destination]`.
/// Every heuristic call creates a fresh, zero-initialised `Allocation`; nothing
/// is shared between calls.
#[derive(Clone, PartialEq)]
pub struct Allocation<T> {
    num_origins: usize,
    num_destinations: usize,
    cells: Vec<T>,
}

impl<T> Allocation<T>
where
    T: Quantity,
{
    /// Creates an all-zero allocation of the given shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use freight_model::allocation::Allocation;
    ///
    /// let allocation = Allocation::<f64>::zeros(2, 3);
    /// assert_eq!(allocation.cells().len(), 6);
    /// assert_eq!(allocation.num_occupied(), 0);
    /// ```
    pub fn zeros(num_origins: usize, num_destinations: usize) -> Self {
        Self {
            num_origins,
            num_destinations,
            cells: vec![T::zero(); num_origins * num_destinations],
        }
    }

    /// Creates an allocation from nested rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let num_origins = rows.len();
        let num_destinations = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == num_destinations),
            "called `Allocation::from_rows` with rows of inconsistent length"
        );

        Self {
            num_origins,
            num_destinations,
            cells: rows.iter().flatten().copied().collect(),
        }
    }

    #[inline]
    pub fn num_origins(&self) -> usize {
        self.num_origins
    }

    #[inline]
    pub fn num_destinations(&self) -> usize {
        self.num_destinations
    }

    /// Returns the flat, row-major cells.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline(always)]
    fn flat(&self, origin_index: OriginIndex, destination_index: DestinationIndex) -> usize {
        debug_assert!(
            origin_index.get() < self.num_origins,
            "called `Allocation::flat` with origin index out of bounds: the len is {} but the index is {}",
            self.num_origins,
            origin_index.get()
        );
        debug_assert!(
            destination_index.get() < self.num_destinations,
            "called `Allocation::flat` with destination index out of bounds: the len is {} but the index is {}",
            self.num_destinations,
            destination_index.get()
        );

        origin_index.get() * self.num_destinations + destination_index.get()
    }

    /// Returns the quantity shipped on a route.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, origin_index: OriginIndex, destination_index: DestinationIndex) -> T {
        self.cells[self.flat(origin_index, destination_index)]
    }

    /// Adds `quantity` to the amount shipped on a route.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn ship(
        &mut self,
        origin_index: OriginIndex,
        destination_index: DestinationIndex,
        quantity: T,
    ) {
        let flat = self.flat(origin_index, destination_index);
        self.cells[flat] = self.cells[flat] + quantity;
    }

    /// Returns the shipments leaving an origin, one per destination.
    #[inline]
    pub fn row(&self, origin_index: OriginIndex) -> &[T] {
        let start = origin_index.get() * self.num_destinations;
        &self.cells[start..start + self.num_destinations]
    }

    /// Returns the total quantity shipped from an origin.
    #[inline]
    pub fn row_sum(&self, origin_index: OriginIndex) -> T {
        self.row(origin_index).iter().copied().sum()
    }

    /// Returns the total quantity shipped to a destination.
    #[inline]
    pub fn column_sum(&self, destination_index: DestinationIndex) -> T {
        self.cells
            .iter()
            .skip(destination_index.get())
            .step_by(self.num_destinations.max(1))
            .copied()
            .sum()
    }

    /// Returns the number of routes carrying a positive quantity.
    #[inline]
    pub fn num_occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c > T::zero()).count()
    }

    /// Iterates over the routes carrying a positive quantity, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (OriginIndex, DestinationIndex, T)> + '_ {
        let n = self.num_destinations;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > T::zero())
            .map(move |(flat, &c)| {
                (
                    OriginIndex::new(flat / n),
                    DestinationIndex::new(flat % n),
                    c,
                )
            })
    }
}

impl<T> std::fmt::Debug for Allocation<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocation")
            .field("num_origins", &self.num_origins)
            .field("num_destinations", &self.num_destinations)
            .field("cells", &self.cells)
            .finish()
    }
}

/// Renders the allocation as an aligned grid, one origin per line.
impl<T> std::fmt::Display for Allocation<T>
where
    T: Quantity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.num_origins == 0 || self.num_destinations == 0 {
            return writeln!(f, "   (Empty allocation)");
        }

        write!(f, "   {:<10}", "Origin")?;
        for j in 0..self.num_destinations {
            write!(f, " | {:<10}", format!("D{}", j))?;
        }
        writeln!(f)?;

        write!(f, "   {:-<10}", "")?;
        for _ in 0..self.num_destinations {
            write!(f, "-+-{:-<10}", "")?;
        }
        writeln!(f)?;

        for i in 0..self.num_origins {
            write!(f, "   {:<10}", format!("O{}", i))?;
            for value in self.row(OriginIndex::new(i)) {
                write!(f, " | {:<10}", value)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
