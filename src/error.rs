use grid_util::point::Point;
use thiserror::Error;

use crate::observer::ObserverError;

/// Reasons a search run can end without a `true`/`false` answer.
///
/// An exhausted frontier is not an error: it is reported as `Ok(false)` (or `Ok(None)` from
/// [find_path](crate::solver::GridSolver::find_path)).
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("start and end are the same cell {0}")]
    SameEndpoints(Point),
    #[error("cell {point} lies outside the {rows}x{cols} grid")]
    OutOfBounds { point: Point, rows: usize, cols: usize },
    #[error("endpoint {0} is a wall")]
    WallEndpoint(Point),
    #[error("search was cancelled")]
    Cancelled,
    #[error("step observer failed: {0}")]
    Observer(#[source] ObserverError),
    #[error("{0} needs both a start and an end cell")]
    MissingEndpoints(&'static str),
}

impl SearchError {
    /// Errors raised before any node state was touched.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SearchError::SameEndpoints(_)
                | SearchError::OutOfBounds { .. }
                | SearchError::WallEndpoint(_)
                | SearchError::MissingEndpoints(_)
        )
    }
}

/// Errors produced when reading a grid from its text form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("grid text contains no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell character {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
}

/// Returned when an algorithm name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown algorithm {0:?}, expected astar, breadth-first or depth-first")]
pub struct UnknownAlgorithm(pub String);
