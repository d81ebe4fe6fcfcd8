use fxhash::{FxHashMap, FxHashSet};
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, trace};
use std::collections::VecDeque;

use crate::error::SearchError;
use crate::node::NodeState;
use crate::observer::StepObserver;
use crate::path::Path;
use crate::search::SearchRun;
use crate::solver::GridSolver;
use crate::FxIndexSet;

/// Breadth-first search over a FIFO queue. Every cell is queued at most once, so the first
/// path found has the fewest moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSolver;

impl GridSolver for BreadthFirstSolver {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn explore<O: StepObserver>(
        &self,
        run: &mut SearchRun<'_, O>,
    ) -> Result<Option<Path>, SearchError> {
        let (start, end) = (run.start, run.end);
        let mut came_from: FxHashMap<Point, Point> = FxHashMap::default();
        let mut visited: FxIndexSet<Point> = FxIndexSet::default();
        // Cells ever marked as frontier, the end included even though its state is kept.
        let mut queued: FxHashSet<Point> = FxHashSet::default();
        let mut to_see = VecDeque::from([start]);

        while let Some(current) = to_see.pop_front() {
            run.checkpoint()?;
            visited.insert(current);
            if current == end {
                debug!("breadth-first: expanded {} cells", visited.len());
                trace!("breadth-first: expansion order {}", visited.iter().join(" "));
                return run.reconstruct(&came_from).map(Some);
            }
            trace!("breadth-first: expanding {}", current);
            for neighbor in run.neighbors(current) {
                if !visited.contains(&neighbor) && queued.insert(neighbor) {
                    to_see.push_back(neighbor);
                    came_from.insert(neighbor, current);
                    run.mark(neighbor, NodeState::Frontier)?;
                }
            }
            if current != start {
                run.mark(current, NodeState::Visited)?;
            }
        }
        debug!("breadth-first: exhausted after {} cells", visited.len());
        trace!("breadth-first: expansion order {}", visited.iter().join(" "));
        Ok(None)
    }
}
