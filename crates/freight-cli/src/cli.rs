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

use anyhow::{Context, ensure};
use clap::Parser;
use freight_heuristics::strategy::Method;
use freight_model::{loading::ProblemLoader, model::Model};
use freight_solver::{result::SolverOutcome, solver::SolverBuilder};
use log::LevelFilter;
use std::fmt::Write;
use std::path::PathBuf;

/// Computes initial feasible solutions of a balanced transportation problem.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Delimited table: demands in the first row, supplies in the first column, costs elsewhere.
    #[arg(default_value = "transportation_problem.csv")]
    pub path: PathBuf,

    /// Cell delimiter of the table.
    #[arg(short, long, default_value_t = ';')]
    pub delimiter: char,

    /// Heuristic to run (northwest, min-cost, min-row-cost, vogel); repeat for several. Defaults to all.
    #[arg(short, long = "method", value_name = "METHOD")]
    pub methods: Vec<Method>,

    /// Run the heuristics one after another instead of in parallel.
    #[arg(long)]
    pub sequential: bool,

    /// Relative tolerance for the supply/demand balance check.
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns the log level requested by `-v`, or `None` to defer to `RUST_LOG`.
    pub fn log_level(&self) -> Option<LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }

    /// Returns the selected methods, or all of them if none was given.
    pub fn selected_methods(&self) -> Vec<Method> {
        if self.methods.is_empty() {
            Method::ALL.to_vec()
        } else {
            self.methods.clone()
        }
    }

    pub fn load_model(&self) -> anyhow::Result<Model<f64>> {
        let mut loader = ProblemLoader::<f64>::new().delimiter(self.delimiter);
        if let Some(tolerance) = self.tolerance {
            ensure!(
                tolerance.is_finite() && tolerance >= 0.0,
                "tolerance must be a finite, non-negative number, got {}",
                tolerance
            );
            loader = loader.tolerance(tolerance);
        }

        loader
            .from_path(&self.path)
            .with_context(|| format!("failed to load '{}'", self.path.display()))
    }

    pub fn solve(&self, model: &Model<f64>) -> SolverOutcome<f64> {
        SolverBuilder::new()
            .with_methods(&self.selected_methods())
            .with_parallel(!self.sequential)
            .build()
            .solve(model)
    }

    /// Loads, solves and renders the full report.
    pub fn run(&self) -> anyhow::Result<String> {
        let model = self.load_model()?;
        log::info!("loaded {} from '{}'", model, self.path.display());

        let outcome = self.solve(&model);
        log::info!("{}", outcome.statistics());

        render_report(&outcome)
    }
}

pub fn render_report(outcome: &SolverOutcome<f64>) -> anyhow::Result<String> {
    let mut report = String::new();
    writeln!(report)?;
    writeln!(report, "Initial feasible solutions using different methods:")?;
    writeln!(report, "{}", "-".repeat(50))?;
    write!(report, "{}", outcome)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../data/transportation_problem.csv"
    );

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["freight"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("transportation_problem.csv"));
        assert_eq!(cli.delimiter, ';');
        assert!(cli.methods.is_empty());
        assert!(!cli.sequential);
        assert_eq!(cli.tolerance, None);
        assert_eq!(cli.log_level(), None);
        assert_eq!(cli.selected_methods(), Method::ALL.to_vec());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "freight",
            "problem.txt",
            "--delimiter",
            ",",
            "-m",
            "vogel",
            "--method",
            "nwc",
            "--sequential",
            "--tolerance",
            "1e-6",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.path, PathBuf::from("problem.txt"));
        assert_eq!(cli.delimiter, ',');
        assert_eq!(
            cli.selected_methods(),
            vec![Method::Vogel, Method::NorthwestCorner]
        );
        assert!(cli.sequential);
        assert_eq!(cli.tolerance, Some(1e-6));
        assert_eq!(cli.log_level(), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        assert!(Cli::try_parse_from(["freight", "--method", "simplex"]).is_err());
    }

    #[test]
    fn test_run_sample_file() {
        let cli = Cli::try_parse_from(["freight", SAMPLE]).unwrap();
        let report = cli.run().unwrap();

        assert!(report.starts_with(
            "\nInitial feasible solutions using different methods:\n--------------------------------------------------\n"
        ));
        assert!(report.contains("\nNorthwest Corner Rule:\nAllocation:\n"));
        assert!(report.contains("Total Cost: 1015\n"));
        assert!(report.contains("Total Cost: 814\n"));
        assert!(report.contains("Total Cost: 1110\n"));
        assert!(report.contains("Total Cost: 779\n"));
        assert!(report.ends_with("Best: Vogel's Method (Total Cost: 779)\n"));
    }

    #[test]
    fn test_run_selected_methods_only() {
        let cli =
            Cli::try_parse_from(["freight", SAMPLE, "-m", "min-row", "--sequential"]).unwrap();
        let report = cli.run().unwrap();
        assert!(report.contains("Minimum Row Cost Method:"));
        assert!(!report.contains("Vogel's Method:"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cli = Cli::try_parse_from(["freight", "does/not/exist.csv"]).unwrap();
        let err = cli.run().unwrap_err();
        assert!(err.to_string().contains("failed to load 'does/not/exist.csv'"));
    }

    #[test]
    fn test_negative_tolerance_is_an_error() {
        let cli = Cli::try_parse_from(["freight", SAMPLE, "--tolerance=-1"]).unwrap();
        assert!(cli.load_model().is_err());
    }
}
