use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use log::{info, warn};

use crate::error::{SearchError, UnknownAlgorithm};
use crate::observer::{CancellationToken, StepObserver};
use crate::path::Path;
use crate::pathing_grid::PathingGrid;
use crate::search::{validate_endpoints, SearchRun};

pub mod astar;
pub mod breadth_first;
pub mod depth_first;

use astar::AstarSolver;
use breadth_first::BreadthFirstSolver;
use depth_first::DepthFirstSolver;

/// A search strategy over a [PathingGrid]. Implementors only provide the exploration loop;
/// endpoint validation, neighbor refresh and logging are shared.
pub trait GridSolver {
    fn name(&self) -> &'static str;

    /// Explores from `run.start` until `run.end` is popped (returning the reconstructed path)
    /// or the frontier is exhausted (returning `None`).
    fn explore<O: StepObserver>(&self, run: &mut SearchRun<'_, O>)
        -> Result<Option<Path>, SearchError>;

    /// Runs a search and returns the ordered path if the end was reached. Stale neighbor lists
    /// are regenerated before the first step.
    fn find_path<O: StepObserver>(
        &self,
        grid: &mut PathingGrid,
        start: Point,
        end: Point,
        observer: &mut O,
        cancel: &CancellationToken,
    ) -> Result<Option<Path>, SearchError> {
        validate_endpoints(grid, start, end)?;
        grid.update();
        info!("{}: searching from {} to {}", self.name(), start, end);
        let mut run = SearchRun::new(grid, observer, cancel, start, end);
        let result = self.explore(&mut run);
        match &result {
            Ok(Some(path)) => info!(
                "{}: reached {} in {} steps",
                self.name(),
                end,
                path.edge_count()
            ),
            Ok(None) => info!("{}: {} is not reachable from {}", self.name(), end, start),
            Err(e) => warn!("{}: search aborted: {}", self.name(), e),
        }
        result
    }

    /// Same as [find_path](Self::find_path), reporting only whether the end was reached. The
    /// path stays visible on the grid as [NodeState::Path](crate::node::NodeState::Path) cells.
    fn search<O: StepObserver>(
        &self,
        grid: &mut PathingGrid,
        start: Point,
        end: Point,
        observer: &mut O,
        cancel: &CancellationToken,
    ) -> Result<bool, SearchError> {
        self.find_path(grid, start, end, observer, cancel)
            .map(|path| path.is_some())
    }
}

/// The solvers a shell can choose between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    AStar,
    BreadthFirst,
    DepthFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::AStar,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
    ];

    /// Dispatches to the matching solver with its default settings.
    pub fn find_path<O: StepObserver>(
        self,
        grid: &mut PathingGrid,
        start: Point,
        end: Point,
        observer: &mut O,
        cancel: &CancellationToken,
    ) -> Result<Option<Path>, SearchError> {
        match self {
            Algorithm::AStar => AstarSolver::new().find_path(grid, start, end, observer, cancel),
            Algorithm::BreadthFirst => {
                BreadthFirstSolver.find_path(grid, start, end, observer, cancel)
            }
            Algorithm::DepthFirst => DepthFirstSolver.find_path(grid, start, end, observer, cancel),
        }
    }
    pub fn search<O: StepObserver>(
        self,
        grid: &mut PathingGrid,
        start: Point,
        end: Point,
        observer: &mut O,
        cancel: &CancellationToken,
    ) -> Result<bool, SearchError> {
        self.find_path(grid, start, end, observer, cancel)
            .map(|path| path.is_some())
    }
    /// Whether the solver always returns a path with the fewest moves on a square grid.
    pub fn is_shortest(self) -> bool {
        !matches!(self, Algorithm::DepthFirst)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Algorithm::AStar => "astar",
            Algorithm::BreadthFirst => "breadth-first",
            Algorithm::DepthFirst => "depth-first",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "astar" | "a*" => Ok(Algorithm::AStar),
            "b" | "bfs" | "breadth-first" => Ok(Algorithm::BreadthFirst),
            "d" | "dfs" | "depth-first" => Ok(Algorithm::DepthFirst),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}
