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

//! # Portfolio Solver
//!
//! Runs several allocation heuristics against the same model and collects
//! their results into a single `SolverOutcome`.
//!
//! ## Highlights
//!
//! - Portfolio execution:
//!   - In parallel mode every heuristic runs in its own thread via
//!     `std::thread::scope`, borrowing the immutable model without locks.
//!   - In sequential mode the heuristics run one after another on the
//!     calling thread.
//! - Outcome construction:
//!   - Runs are reported in configured order regardless of which thread
//!     finished first, so the report is deterministic.
//!   - The best run is the cheapest one; ties go to the first configured.
//! - Builder pattern:
//!   - `SolverBuilder` adds heuristics one by one or by `Method`.
//!
//! ## Usage
//!
//! ```rust
//! use freight_heuristics::strategy::Method;
//! use freight_model::model::Model;
//! use freight_solver::solver::SolverBuilder;
//!
//! let model = Model::from_parts(
//!     &[vec![2.0, 3.0], vec![4.0, 1.0]],
//!     &[20.0, 30.0],
//!     &[10.0, 40.0],
//! )
//! .unwrap();
//!
//! let solver = SolverBuilder::<f64>::new()
//!     .with_methods(&Method::ALL)
//!     .build();
//!
//! let outcome = solver.solve(&model);
//! assert_eq!(outcome.runs().len(), 4);
//! assert_eq!(outcome.best().objective_value(), 80.0);
//! ```

use crate::{
    result::{HeuristicRun, SolverOutcome},
    stats::SolverStatisticsBuilder,
};
use freight_core::num::quantity::Quantity;
use freight_heuristics::{
    eval::validation::validate_allocation,
    strategy::{AllocationHeuristic, Method},
};
use freight_model::model::Model;

pub struct Solver<'a, T> {
    heuristics: Vec<Box<dyn AllocationHeuristic<T> + 'a>>,
    parallel: bool,
}

impl<'a, T> Solver<'a, T>
where
    T: Quantity,
{
    #[inline]
    pub fn add_heuristic<H>(&mut self, heuristic: H)
    where
        H: AllocationHeuristic<T> + 'a,
    {
        self.heuristics.push(Box::new(heuristic));
    }

    #[inline]
    pub fn add_heuristic_boxed(&mut self, heuristic: Box<dyn AllocationHeuristic<T> + 'a>) {
        self.heuristics.push(heuristic);
    }

    #[inline]
    pub fn num_heuristics(&self) -> usize {
        self.heuristics.len()
    }

    /// Returns the names of the configured heuristics, in order.
    pub fn heuristic_names(&self) -> Vec<&str> {
        self.heuristics.iter().map(|h| h.name()).collect()
    }

    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Runs every configured heuristic against `model`.
    ///
    /// # Panics
    ///
    /// Panics if no heuristic has been added. A panic inside a heuristic is
    /// propagated to the caller.
    pub fn solve(&self, model: &Model<T>) -> SolverOutcome<T> {
        assert!(
            !self.heuristics.is_empty(),
            "called `Solver::solve` with no heuristics added"
        );

        let start_time = std::time::Instant::now();
        log::info!(
            "solving {} with {} heuristics ({})",
            model,
            self.heuristics.len(),
            if self.parallel { "parallel" } else { "sequential" }
        );

        let (runs, used_threads) = if self.parallel && self.heuristics.len() > 1 {
            (self.run_parallel(model), self.heuristics.len())
        } else {
            (self.run_sequential(model), 1)
        };

        let statistics = SolverStatisticsBuilder::new()
            .heuristics_run(runs.len())
            .used_threads(used_threads)
            .solve_duration(start_time.elapsed())
            .build();

        let outcome = SolverOutcome::new(runs, statistics);
        log::info!(
            "best heuristic: {} (total cost {})",
            outcome.best().name(),
            outcome.best().objective_value()
        );
        outcome
    }

    fn run_sequential(&self, model: &Model<T>) -> Vec<HeuristicRun<T>> {
        self.heuristics
            .iter()
            .map(|heuristic| run_heuristic(heuristic.as_ref(), model))
            .collect()
    }

    /// Spawns one scoped thread per heuristic and joins them in configured order.
    fn run_parallel(&self, model: &Model<T>) -> Vec<HeuristicRun<T>> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .heuristics
                .iter()
                .map(|heuristic| scope.spawn(move || run_heuristic(heuristic.as_ref(), model)))
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }
}

fn run_heuristic<T>(heuristic: &dyn AllocationHeuristic<T>, model: &Model<T>) -> HeuristicRun<T>
where
    T: Quantity,
{
    let start_time = std::time::Instant::now();
    let solution = heuristic.solution(model);
    let duration = start_time.elapsed();

    if log::log_enabled!(log::Level::Debug) {
        match validate_allocation(model, solution.allocation()) {
            Ok(()) => log::debug!(
                "{}: total cost {}, {} occupied routes{}, {:?}",
                heuristic.name(),
                solution.objective_value(),
                solution.num_occupied(),
                if solution.is_degenerate() {
                    " (degenerate)"
                } else {
                    ""
                },
                duration
            ),
            Err(violation) => log::warn!(
                "{}: allocation is not feasible: {}",
                heuristic.name(),
                violation
            ),
        }
    }

    HeuristicRun::new(heuristic.name(), solution, duration)
}

pub struct SolverBuilder<'a, T> {
    heuristics: Vec<Box<dyn AllocationHeuristic<T> + 'a>>,
    parallel: bool,
}

impl<'a, T> Default for SolverBuilder<'a, T>
where
    T: Quantity,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> SolverBuilder<'a, T>
where
    T: Quantity,
{
    /// Creates an empty, parallel builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            heuristics: Vec::new(),
            parallel: true,
        }
    }

    #[inline]
    pub fn add_heuristic<H>(mut self, heuristic: H) -> Self
    where
        H: AllocationHeuristic<T> + 'a,
    {
        self.heuristics.push(Box::new(heuristic));
        self
    }

    #[inline]
    pub fn add_heuristic_boxed(mut self, heuristic: Box<dyn AllocationHeuristic<T> + 'a>) -> Self {
        self.heuristics.push(heuristic);
        self
    }

    /// Appends the heuristic of every method, in the given order.
    #[inline]
    pub fn with_methods(mut self, methods: &[Method]) -> Self {
        for method in methods {
            self.heuristics.push(method.heuristic());
        }
        self
    }

    /// Chooses between scoped threads (`true`, the default) and running on the calling thread.
    #[inline]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline]
    pub fn build(self) -> Solver<'a, T> {
        Solver {
            heuristics: self.heuristics,
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_heuristics::strategy::{northwest::NorthwestCorner, vogel::Vogel};
    use freight_model::allocation::Allocation;

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

    /// Ships everything from the first origin; only feasible for one origin.
    struct Constant;

    impl AllocationHeuristic<f64> for Constant {
        fn name(&self) -> &str {
            "Constant"
        }

        fn allocate(&self, model: &Model<f64>) -> Allocation<f64> {
            let mut rows = vec![vec![0.0; model.num_destinations()]; model.num_origins()];
            rows[0] = model.demands().to_vec();
            Allocation::from_rows(&rows)
        }
    }

    #[test]
    fn test_builder_defaults() {
        let solver = SolverBuilder::<f64>::default().build();
        assert_eq!(solver.num_heuristics(), 0);
        assert!(solver.is_parallel());
    }

    #[test]
    fn test_with_methods_preserves_order() {
        let solver = SolverBuilder::<f64>::new()
            .with_methods(&[Method::Vogel, Method::NorthwestCorner])
            .add_heuristic(Constant)
            .build();
        assert_eq!(
            solver.heuristic_names(),
            vec!["Vogel's Method", "Northwest Corner Rule", "Constant"]
        );
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let model = textbook();
        let parallel = SolverBuilder::<f64>::new()
            .with_methods(&Method::ALL)
            .with_parallel(true)
            .build()
            .solve(&model);
        let sequential = SolverBuilder::<f64>::new()
            .with_methods(&Method::ALL)
            .with_parallel(false)
            .build()
            .solve(&model);

        assert_eq!(parallel.statistics().used_threads, 4);
        assert_eq!(sequential.statistics().used_threads, 1);
        assert_eq!(parallel.statistics().heuristics_run, 4);

        for (a, b) in parallel.runs().iter().zip(sequential.runs()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.solution(), b.solution());
        }
        assert_eq!(parallel.best().name(), "Vogel's Method");
        assert_eq!(parallel.best().objective_value(), 779.0);
    }

    #[test]
    fn test_runs_keep_configured_order() {
        let model = textbook();
        let outcome = SolverBuilder::<f64>::new()
            .add_heuristic(Vogel)
            .add_heuristic(NorthwestCorner)
            .build()
            .solve(&model);
        let names: Vec<&str> = outcome.runs().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Vogel's Method", "Northwest Corner Rule"]);
        assert_eq!(
            outcome.run("Northwest Corner Rule").map(|r| r.objective_value()),
            Some(1015.0)
        );
    }

    #[test]
    fn test_single_heuristic_runs_on_calling_thread() {
        let model = textbook();
        let mut solver = SolverBuilder::<f64>::new().build();
        solver.add_heuristic_boxed(Method::MinimumCost.heuristic());
        let outcome = solver.solve(&model);
        assert_eq!(outcome.statistics().used_threads, 1);
        assert_eq!(outcome.best().objective_value(), 814.0);
    }

    #[test]
    fn test_custom_heuristic_is_reported_even_if_infeasible() {
        let model = textbook();
        let mut solver = SolverBuilder::<f64>::new().with_parallel(false).build();
        solver.add_heuristic(Constant);
        let outcome = solver.solve(&model);
        assert_eq!(outcome.best().name(), "Constant");
    }

    #[test]
    #[should_panic(expected = "called `Solver::solve` with no heuristics added")]
    fn test_solve_without_heuristics_panics() {
        let model = textbook();
        let _ = SolverBuilder::<f64>::new().build().solve(&model);
    }
}
