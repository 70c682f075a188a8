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

use crate::stats::SolverStatistics;
use freight_core::num::quantity::Quantity;
use freight_model::solution::Solution;

/// The result of running a single heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicRun<T> {
    name: String,
    solution: Solution<T>,
    duration: std::time::Duration,
}

impl<T> HeuristicRun<T>
where
    T: Quantity,
{
    #[inline]
    pub fn new(
        name: impl Into<String>,
        solution: Solution<T>,
        duration: std::time::Duration,
    ) -> Self {
        Self {
            name: name.into(),
            solution,
            duration,
        }
    }

    /// Returns the name of the heuristic that produced this run.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        &self.solution
    }

    /// Returns the total cost of the allocation.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.solution.objective_value()
    }

    /// Returns how long the heuristic took, including cost evaluation.
    #[inline]
    pub fn duration(&self) -> std::time::Duration {
        self.duration
    }
}

impl<T> std::fmt::Display for HeuristicRun<T>
where
    T: Quantity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(f, "Allocation:")?;
        write!(f, "{}", self.solution.allocation())?;
        writeln!(f, "Total Cost: {}", self.solution.objective_value())?;
        if self.solution.is_degenerate() {
            let allocation = self.solution.allocation();
            writeln!(
                f,
                "Degenerate: {} occupied routes, {} expected",
                self.solution.num_occupied(),
                allocation.num_origins() + allocation.num_destinations() - 1
            )?;
        }
        Ok(())
    }
}

/// The outcome of a portfolio run: every heuristic's result in configured
/// order, the cheapest of them and the run statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome<T> {
    runs: Vec<HeuristicRun<T>>,
    best_index: usize,
    statistics: SolverStatistics,
}

impl<T> SolverOutcome<T>
where
    T: Quantity,
{
    /// Creates an outcome and selects the cheapest run.
    ///
    /// Ties go to the run that comes first.
    ///
    /// # Panics
    ///
    /// Panics if `runs` is empty.
    pub fn new(runs: Vec<HeuristicRun<T>>, statistics: SolverStatistics) -> Self {
        assert!(
            !runs.is_empty(),
            "called `SolverOutcome::new` with no heuristic runs"
        );

        let mut best_index = 0;
        for (index, run) in runs.iter().enumerate().skip(1) {
            if run.objective_value() < runs[best_index].objective_value() {
                best_index = index;
            }
        }

        Self {
            runs,
            best_index,
            statistics,
        }
    }

    /// Returns all runs in configured order.
    #[inline]
    pub fn runs(&self) -> &[HeuristicRun<T>] {
        &self.runs
    }

    /// Returns the run with the lowest total cost.
    #[inline]
    pub fn best(&self) -> &HeuristicRun<T> {
        &self.runs[self.best_index]
    }

    /// Returns the run of the heuristic with the given name, if any.
    #[inline]
    pub fn run(&self, name: &str) -> Option<&HeuristicRun<T>> {
        self.runs.iter().find(|run| run.name() == name)
    }

    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }
}

/// Renders one block per heuristic, in configured order, then the cheapest.
impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: Quantity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for run in &self.runs {
            writeln!(f)?;
            write!(f, "{}", run)?;
        }
        writeln!(f)?;
        let best = self.best();
        writeln!(
            f,
            "Best: {} (Total Cost: {})",
            best.name(),
            best.objective_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SolverStatisticsBuilder;
    use freight_model::allocation::Allocation;
    use std::time::Duration;

    fn run(name: &str, cost: f64) -> HeuristicRun<f64> {
        HeuristicRun::new(
            name,
            Solution::new(
                cost,
                Allocation::from_rows(&[vec![10.0, 10.0], vec![0.0, 30.0]]),
            ),
            Duration::from_micros(5),
        )
    }

    #[test]
    fn test_best_is_cheapest() {
        let outcome = SolverOutcome::new(
            vec![run("a", 90.0), run("b", 70.0), run("c", 80.0)],
            SolverStatisticsBuilder::new().build(),
        );
        assert_eq!(outcome.best().name(), "b");
        assert_eq!(outcome.runs().len(), 3);
        assert_eq!(outcome.run("c").map(|r| r.objective_value()), Some(80.0));
        assert!(outcome.run("d").is_none());
    }

    #[test]
    fn test_best_tie_goes_to_first() {
        let outcome = SolverOutcome::new(
            vec![run("a", 80.0), run("b", 70.0), run("c", 70.0)],
            SolverStatisticsBuilder::new().build(),
        );
        assert_eq!(outcome.best().name(), "b");
    }

    #[test]
    #[should_panic(expected = "called `SolverOutcome::new` with no heuristic runs")]
    fn test_empty_outcome_panics() {
        let _ = SolverOutcome::<f64>::new(Vec::new(), SolverStatisticsBuilder::new().build());
    }

    #[test]
    fn test_run_display() {
        let mut expected = String::new();
        expected.push_str("Northwest Corner Rule:\n");
        expected.push_str("Allocation:\n");
        expected.push_str("   Origin     | D0         | D1        \n");
        expected.push_str("   -----------+------------+-----------\n");
        expected.push_str("   O0         | 10         | 10        \n");
        expected.push_str("   O1         | 0          | 30        \n");
        expected.push_str("Total Cost: 80\n");

        assert_eq!(format!("{}", run("Northwest Corner Rule", 80.0)), expected);
    }

    #[test]
    fn test_run_display_reports_degeneracy() {
        let degenerate = HeuristicRun::new(
            "x",
            Solution::new(
                0.0,
                Allocation::from_rows(&[vec![5.0, 0.0], vec![0.0, 5.0]]),
            ),
            Duration::ZERO,
        );
        let rendered = format!("{}", degenerate);
        assert!(rendered.ends_with("Degenerate: 2 occupied routes, 3 expected\n"));
    }

    #[test]
    fn test_outcome_display_lists_runs_in_order() {
        let outcome = SolverOutcome::new(
            vec![run("first", 90.0), run("second", 80.0)],
            SolverStatisticsBuilder::new().build(),
        );
        let rendered = format!("{}", outcome);
        let first = rendered.find("first:").unwrap();
        let second = rendered.find("second:").unwrap();
        assert!(first < second);
        assert!(rendered.starts_with("\nfirst:\n"));
        assert!(rendered.ends_with("\nBest: second (Total Cost: 80)\n"));
    }
}
