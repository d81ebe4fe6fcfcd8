//! # grid_explorer
//!
//! Step-by-step graph search on a grid of cells. A [PathingGrid] holds one [Node] per cell,
//! each with a [NodeState] (empty, wall, start, end, frontier, visited or path) and a cached
//! list of traversable neighbors derived from the grid's [Topology]: 4-connected
//! [square](Topology::Square) or 6-connected [hexagonal](Topology::Hexagonal) cells.
//!
//! Three interchangeable solvers implement [GridSolver]:
//! [A*](solver::astar::AstarSolver) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic,
//! [breadth-first search](solver::breadth_first::BreadthFirstSolver) and
//! [depth-first search](solver::depth_first::DepthFirstSolver). Every state they write is
//! reported to a [StepObserver] so a renderer can animate the exploration, and every run polls
//! a [CancellationToken] once per expanded cell. On success the cells between start and end are
//! marked as path.
//!
//! ```
//! use grid_explorer::{Algorithm, CancellationToken, NoopObserver, PathingGrid};
//! use grid_util::point::Point;
//!
//! let mut grid: PathingGrid = "S..\n.#.\n..E".parse().unwrap();
//! let found = Algorithm::AStar
//!     .search(
//!         &mut grid,
//!         Point::new(0, 0),
//!         Point::new(2, 2),
//!         &mut NoopObserver,
//!         &CancellationToken::new(),
//!     )
//!     .unwrap();
//! assert!(found);
//! assert_eq!(grid.to_string(), "S**\no#*\nooE\n");
//! ```
pub mod board;
pub mod error;
pub mod node;
pub mod observer;
pub mod path;
pub mod pathing_grid;
mod search;
pub mod solver;
pub mod topology;

use fxhash::FxBuildHasher;
use indexmap::IndexSet;

pub use board::Board;
pub use error::{ParseGridError, SearchError, UnknownAlgorithm};
pub use grid_util::point::Point;
pub use node::{Node, NodeState};
pub use observer::{CancellationToken, NoopObserver, ObserverError, StepObserver};
pub use path::Path;
pub use pathing_grid::PathingGrid;
pub use search::SearchRun;
pub use solver::{Algorithm, GridSolver};
pub use topology::Topology;

/// Upper bound on the neighbors of a cell, reached on hexagonal grids.
pub const N_NEIGHBORS: usize = 6;

pub(crate) type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;
