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

//! Problem instance loader for delimited transportation tables.
//!
//! This module turns a delimited text table into a validated `Model`. The
//! layout is the one spreadsheets naturally produce for a transportation
//! problem: the first row lists the destination demands, the first column of
//! every following row lists the origin supply, and the remaining cells are
//! the unit costs.
//!
//! ```raw
//! ;10;40        <- cell [0][0] is ignored, then demand of D0, D1, ...
//! 20;2;3        <- supply of O0, then cost O0->D0, O0->D1, ...
//! 30;4;1
//! ```
//!
//! The delimiter defaults to `;` and can be changed. Blank lines and anything
//! after a `#` are ignored and cells are trimmed, so hand-written instances can
//! be aligned and commented. Every row must have the same number of cells as
//! the header row; ragged rows are reported with their line number instead of
//! being padded. The collected data is then passed through `ModelBuilder`, so
//! emptiness, sign, finiteness and balance are validated exactly as for an
//! in-memory model.

use crate::{
    index::{DestinationIndex, OriginIndex},
    model::{Model, ModelBuilder, ModelError},
};
use freight_core::num::quantity::Quantity;
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the problem loading process.
#[derive(Debug)]
pub enum ProblemLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input contained no header row.
    MissingHeader,
    /// A cell could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// A row has a different number of cells than the header row.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The table was read but does not describe a valid, balanced problem.
    Model(ModelError),
}

/// Details about a failed cell parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The cell that failed to parse.
    pub token: String,
    /// The 1-based line number of the cell.
    pub line: usize,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse cell '{}' on line {} as type {}",
            self.token, self.line, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingHeader => write!(f, "Input contains no header row with demands"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "Line {} has {} cells but the header row has {}",
                line, found, expected
            ),
            Self::Model(e) => write!(f, "Invalid problem: {}", e),
        }
    }
}

impl std::error::Error for ProblemLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Model(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for ProblemLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<ModelError> for ProblemLoaderError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

/// A configurable loader for delimited transportation tables.
///
/// # Configuration
/// * `delimiter`: The cell separator, `;` by default.
/// * `tolerance`: The relative tolerance for the balance check; the model
///   default is used if unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProblemLoader<T> {
    delimiter: char,
    tolerance: Option<T>,
}

impl<T> Default for ProblemLoader<T> {
    fn default() -> Self {
        Self {
            delimiter: ';',
            tolerance: None,
        }
    }
}

impl<T> ProblemLoader<T>
where
    T: Quantity + FromStr,
{
    /// Creates a new `ProblemLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cell delimiter.
    #[inline]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the relative tolerance used for the balance check.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is negative or not finite.
    #[inline]
    pub fn tolerance(mut self, tolerance: T) -> Self {
        assert!(
            tolerance.is_finite() && tolerance >= T::zero(),
            "called `ProblemLoader::tolerance` with an invalid tolerance: {}",
            tolerance
        );

        self.tolerance = Some(tolerance);
        self
    }

    /// Loads a problem from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Model<T>, ProblemLoaderError> {
        let mut demand: Option<Vec<T>> = None;
        let mut header_len = 0;
        let mut supply: Vec<T> = Vec::new();
        let mut costs: Vec<Vec<T>> = Vec::new();

        for (line_index, line) in rdr.lines().enumerate() {
            let line = line?;
            let line_number = line_index + 1;

            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line.as_str(),
            };
            if content.trim().is_empty() {
                continue;
            }

            let cells: Vec<&str> = content.split(self.delimiter).map(str::trim).collect();

            match demand {
                None => {
                    // The corner cell carries no data (often empty or a label).
                    header_len = cells.len();
                    demand = Some(
                        cells[1..]
                            .iter()
                            .map(|c| parse_cell(c, line_number))
                            .collect::<Result<_, _>>()?,
                    );
                }
                Some(_) => {
                    if cells.len() != header_len {
                        return Err(ProblemLoaderError::RaggedRow {
                            line: line_number,
                            expected: header_len,
                            found: cells.len(),
                        });
                    }
                    supply.push(parse_cell(cells[0], line_number)?);
                    costs.push(
                        cells[1..]
                            .iter()
                            .map(|c| parse_cell(c, line_number))
                            .collect::<Result<_, _>>()?,
                    );
                }
            }
        }

        let demand = demand.ok_or(ProblemLoaderError::MissingHeader)?;

        let mut builder = ModelBuilder::new(supply.len(), demand.len());
        for (i, (&s, row)) in supply.iter().zip(costs.iter()).enumerate() {
            let origin = OriginIndex::new(i);
            builder.set_supply(origin, s).set_origin_costs(origin, row);
        }
        for (j, &d) in demand.iter().enumerate() {
            builder.set_demand(DestinationIndex::new(j), d);
        }
        if let Some(tolerance) = self.tolerance {
            builder.with_tolerance(tolerance);
        }

        Ok(builder.build()?)
    }

    /// Loads a problem from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Model<T>, ProblemLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a problem from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Model<T>, ProblemLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a problem from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Model<T>, ProblemLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

fn parse_cell<T: FromStr>(cell: &str, line: usize) -> Result<T, ParseTokenError> {
    cell.parse::<T>().map_err(|_| ParseTokenError {
        token: cell.to_string(),
        line,
        type_name: std::any::type_name::<T>(),
    })
}
