use grid_util::point::Point;
use log::info;

use crate::error::SearchError;
use crate::node::NodeState;
use crate::observer::{CancellationToken, StepObserver};
use crate::path::Path;
use crate::pathing_grid::PathingGrid;
use crate::solver::Algorithm;
use crate::topology::Topology;

/// The editing session a shell drives from user input: which cell is the start, which is the
/// end, where the walls are, and which algorithm to run next. Works purely on cells; turning
/// pixels or key presses into these calls is left to the shell.
#[derive(Clone, Debug)]
pub struct Board {
    pub grid: PathingGrid,
    start: Option<Point>,
    end: Option<Point>,
}

impl Board {
    pub fn new(rows: usize, cols: usize, topology: Topology) -> Board {
        Board {
            grid: PathingGrid::new(rows, cols, topology),
            start: None,
            end: None,
        }
    }
    /// Adopts an existing grid, taking the first start and end cells found as endpoints.
    pub fn from_grid(grid: PathingGrid) -> Board {
        let start = grid.points_with_state(NodeState::Start).next();
        let end = grid.points_with_state(NodeState::End).next();
        Board { grid, start, end }
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }
    /// Primary action on a cell: the first placement sets the start, the next one on another
    /// cell the end, and every later placement off the endpoints raises a wall. Returns whether
    /// anything changed; out-of-bounds cells are ignored.
    pub fn place(&mut self, point: Point) -> bool {
        if !self.grid.point_in_bounds(point) {
            return false;
        }
        let state = match (self.start, self.end) {
            (None, _) => {
                self.start = Some(point);
                if self.end == Some(point) {
                    self.end = None;
                }
                NodeState::Start
            }
            (Some(start), None) if start != point => {
                self.end = Some(point);
                NodeState::End
            }
            (Some(_), _) if !self.grid.state(point).is_endpoint() => NodeState::Wall,
            _ => return false,
        };
        if self.grid.state(point) == state {
            return false;
        }
        self.grid.set_state(point, state);
        true
    }
    /// Secondary action on a cell: it becomes empty and stops being an endpoint.
    pub fn erase(&mut self, point: Point) -> bool {
        if !self.grid.point_in_bounds(point) {
            return false;
        }
        if self.start == Some(point) {
            self.start = None;
        }
        if self.end == Some(point) {
            self.end = None;
        }
        if self.grid.state(point) == NodeState::Empty {
            return false;
        }
        self.grid.set_state(point, NodeState::Empty);
        true
    }
    /// Removes the marks of the previous run, keeping walls and endpoints.
    pub fn clear_search(&mut self) {
        self.grid.clear_search_marks();
    }
    /// Empties every cell and forgets both endpoints.
    pub fn reset(&mut self) {
        self.grid.reset(&[]);
        self.start = None;
        self.end = None;
    }
    /// Clears the previous run, refreshes neighbors and runs `algorithm` between the current
    /// endpoints.
    pub fn run<O: StepObserver>(
        &mut self,
        algorithm: Algorithm,
        observer: &mut O,
        cancel: &CancellationToken,
    ) -> Result<Option<Path>, SearchError> {
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(SearchError::MissingEndpoints("Board::run")),
        };
        self.grid.clear_search_marks();
        self.grid.update();
        info!("Running {} on {}x{} board", algorithm, self.grid.rows(), self.grid.cols());
        algorithm.find_path(&mut self.grid, start, end, observer, cancel)
    }
}
