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

use crate::allocation::Allocation;
use freight_core::num::quantity::Quantity;

/// An allocation together with its total shipping cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<T> {
    /// The total cost `sum(A[i][j] * C[i][j])` of this allocation.
    objective_value: T,

    /// The quantities shipped on every route.
    allocation: Allocation<T>,
}

impl<T> Solution<T>
where
    T: Quantity,
{
    /// Constructs a new `Solution`.
    pub fn new(objective_value: T, allocation: Allocation<T>) -> Self {
        Self {
            objective_value,
            allocation,
        }
    }

    /// Returns the total cost of this solution.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    /// Returns the underlying allocation.
    #[inline]
    pub fn allocation(&self) -> &Allocation<T> {
        &self.allocation
    }

    /// Consumes the solution and returns the allocation.
    #[inline]
    pub fn into_allocation(self) -> Allocation<T> {
        self.allocation
    }

    /// Returns the number of routes carrying a positive quantity.
    #[inline]
    pub fn num_occupied(&self) -> usize {
        self.allocation.num_occupied()
    }

    /// Returns `true` if fewer than `m + n - 1` routes are occupied.
    ///
    /// A basic feasible solution of an `m x n` problem has `m + n - 1` basic
    /// cells; a degenerate one has some of them at zero. This is reported
    /// only, never repaired.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let m = self.allocation.num_origins();
        let n = self.allocation.num_destinations();
        m + n > 0 && self.num_occupied() < m + n - 1
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: Quantity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Total Cost: {}", self.objective_value)?;
        writeln!(
            f,
            "   Occupied Routes: {}{}",
            self.num_occupied(),
            if self.is_degenerate() {
                " (degenerate)"
            } else {
                ""
            }
        )?;
        writeln!(f)?;
        write!(f, "{}", self.allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staircase() -> Solution<f64> {
        Solution::new(
            80.0,
            Allocation::from_rows(&[vec![10.0, 10.0], vec![0.0, 30.0]]),
        )
    }

    #[test]
    fn test_new_and_accessors() {
        let sol = staircase();
        assert_eq!(sol.objective_value(), 80.0);
        assert_eq!(sol.allocation().num_origins(), 2);
        assert_eq!(sol.num_occupied(), 3);
        assert!(!sol.is_degenerate());
        assert_eq!(sol.into_allocation().cells(), &[10.0, 10.0, 0.0, 30.0]);
    }

    #[test]
    fn test_degenerate_detection() {
        // 2x2 with a single exact-exhaustion step: only 2 occupied routes < 3.
        let sol = Solution::new(
            0.0,
            Allocation::from_rows(&[vec![5.0, 0.0], vec![0.0, 5.0]]),
        );
        assert!(sol.is_degenerate());
    }

    #[test]
    fn test_clone_eq_and_debug() {
        let sol = staircase();
        assert_eq!(sol, sol.clone());
        let dbg = format!("{:?}", sol);
        assert!(dbg.contains("Solution"));
        assert!(dbg.contains("objective_value"));
        assert!(dbg.contains("allocation"));
    }

    #[test]
    fn test_display_formatting_example() {
        let displayed = format!("{}", staircase());

        let mut expected = String::new();
        expected.push_str("Solution Summary\n");
        expected.push_str("   Total Cost: 80\n");
        expected.push_str("   Occupied Routes: 3\n");
        expected.push('\n');
        expected.push_str("   Origin     | D0         | D1        \n");
        expected.push_str("   -----------+------------+-----------\n");
        expected.push_str("   O0         | 10         | 10        \n");
        expected.push_str("   O1         | 0          | 30        \n");

        assert_eq!(displayed, expected);
    }
}
