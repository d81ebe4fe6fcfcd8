//! Bookkeeping shared by the solvers: the A* frontier ordering, endpoint validation, state
//! marking with observer notification, cancellation polling and path reconstruction.
use fxhash::FxHashMap;
use grid_util::point::Point;
use log::warn;
use smallvec::SmallVec;
use std::cmp::Ordering;

use crate::error::SearchError;
use crate::node::NodeState;
use crate::observer::{CancellationToken, StepObserver};
use crate::path::Path;
use crate::pathing_grid::PathingGrid;
use crate::N_NEIGHBORS;

/// Entry of the A* priority queue. Orders by estimated cost first and insertion sequence
/// second, so the node discovered first wins ties. Reversed for use in a max-heap.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierEntry {
    pub estimated_cost: i32,
    pub sequence: u64,
    pub point: Point,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.sequence == other.sequence
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Rejects endpoint pairs no solver may start from.
pub(crate) fn validate_endpoints(
    grid: &PathingGrid,
    start: Point,
    end: Point,
) -> Result<(), SearchError> {
    for point in [start, end] {
        if !grid.point_in_bounds(point) {
            return Err(SearchError::OutOfBounds {
                point,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
    }
    if start == end {
        return Err(SearchError::SameEndpoints(start));
    }
    for point in [start, end] {
        if grid.state(point) == NodeState::Wall {
            return Err(SearchError::WallEndpoint(point));
        }
    }
    Ok(())
}

/// A single search in progress. Holds the grid exclusively until the solver returns.
pub struct SearchRun<'a, O: StepObserver> {
    grid: &'a mut PathingGrid,
    observer: &'a mut O,
    cancel: &'a CancellationToken,
    pub start: Point,
    pub end: Point,
}

impl<'a, O: StepObserver> SearchRun<'a, O> {
    pub(crate) fn new(
        grid: &'a mut PathingGrid,
        observer: &'a mut O,
        cancel: &'a CancellationToken,
        start: Point,
        end: Point,
    ) -> SearchRun<'a, O> {
        SearchRun {
            grid,
            observer,
            cancel,
            start,
            end,
        }
    }
    /// Copy of the resolved neighbors, so the grid can be marked while iterating.
    pub fn neighbors(&self, point: Point) -> SmallVec<[Point; N_NEIGHBORS]> {
        SmallVec::from_slice(self.grid.neighbors(point))
    }
    /// Polled once per frontier pop.
    pub fn checkpoint(&self) -> Result<(), SearchError> {
        if self.cancel.is_cancelled() {
            warn!("Search from {} to {} cancelled", self.start, self.end);
            return Err(SearchError::Cancelled);
        }
        Ok(())
    }
    /// Writes a search state and notifies the observer. Endpoints are never overwritten and
    /// writing the state a cell already has is not a transition.
    pub fn mark(&mut self, point: Point, state: NodeState) -> Result<(), SearchError> {
        if point == self.start || point == self.end {
            return Ok(());
        }
        self.transition(point, state)
    }
    fn transition(&mut self, point: Point, state: NodeState) -> Result<(), SearchError> {
        if self.grid.state(point) == state {
            return Ok(());
        }
        self.grid.set_state(point, state);
        self.observer.on_step(&*self.grid, point).map_err(|e| {
            warn!("Step observer failed at {}: {}", point, e);
            SearchError::Observer(e)
        })
    }
    /// Walks `came_from` back from the end, marking every cell in between as
    /// [NodeState::Path] (end first), then re-asserts the endpoint states.
    pub fn reconstruct(
        &mut self,
        came_from: &FxHashMap<Point, Point>,
    ) -> Result<Path, SearchError> {
        let mut points = vec![self.end];
        let mut current = self.end;
        while let Some(&previous) = came_from.get(&current) {
            current = previous;
            points.push(current);
            self.mark(current, NodeState::Path)?;
        }
        debug_assert_eq!(current, self.start);
        self.transition(self.end, NodeState::End)?;
        self.transition(self.start, NodeState::Start)?;
        points.reverse();
        Ok(Path::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use crate::topology::Topology;
    use std::collections::BinaryHeap;

    #[test]
    fn frontier_pops_lowest_cost_then_oldest() {
        let mut heap = BinaryHeap::new();
        for (estimated_cost, sequence, x) in [(5, 0, 0), (3, 1, 1), (3, 2, 2), (4, 3, 3)] {
            heap.push(FrontierEntry {
                estimated_cost,
                sequence,
                point: Point::new(x, 0),
            });
        }
        let order = std::iter::from_fn(|| heap.pop().map(|e| e.point.x)).collect::<Vec<_>>();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let grid: PathingGrid = "S#\n..".parse().unwrap();
        let s = Point::new(0, 0);
        assert!(matches!(
            validate_endpoints(&grid, s, s),
            Err(SearchError::SameEndpoints(_))
        ));
        assert!(matches!(
            validate_endpoints(&grid, s, Point::new(2, 0)),
            Err(SearchError::OutOfBounds { .. })
        ));
        assert!(matches!(
            validate_endpoints(&grid, s, Point::new(1, 0)),
            Err(SearchError::WallEndpoint(_))
        ));
        assert!(validate_endpoints(&grid, s, Point::new(1, 1)).is_ok());
    }

    #[test]
    fn reconstruct_marks_intermediate_cells_back_to_front() {
        let mut grid = PathingGrid::new(1, 4, Topology::Square);
        let (start, end) = (Point::new(0, 0), Point::new(3, 0));
        let came_from = (1..4)
            .map(|x| (Point::new(x, 0), Point::new(x - 1, 0)))
            .collect::<FxHashMap<_, _>>();
        let mut seen = Vec::new();
        let mut observer = |_: &PathingGrid, p: Point| -> Result<(), crate::ObserverError> {
            seen.push(p);
            Ok(())
        };
        let cancel = CancellationToken::new();
        let path = SearchRun::new(&mut grid, &mut observer, &cancel, start, end)
            .reconstruct(&came_from)
            .unwrap();
        assert_eq!(path.points().len(), 4);
        assert_eq!(
            seen,
            vec![Point::new(2, 0), Point::new(1, 0), Point::new(3, 0), Point::new(0, 0)]
        );
        assert_eq!(grid.to_string(), "S**E\n");
    }

    #[test]
    fn cancelled_token_stops_checkpoint() {
        let mut grid = PathingGrid::new(1, 2, Topology::Square);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut observer = NoopObserver;
        let run = SearchRun::new(
            &mut grid,
            &mut observer,
            &cancel,
            Point::new(0, 0),
            Point::new(1, 0),
        );
        assert!(matches!(run.checkpoint(), Err(SearchError::Cancelled)));
    }
}
