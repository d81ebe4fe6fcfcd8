use fxhash::FxHashMap;
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, trace};

use crate::error::SearchError;
use crate::node::NodeState;
use crate::observer::StepObserver;
use crate::path::Path;
use crate::search::SearchRun;
use crate::solver::GridSolver;
use crate::FxIndexSet;

/// Depth-first search over a LIFO stack.
///
/// A cell that has not been expanded yet may be pushed again by every cell that reaches it, and
/// each push overwrites its predecessor. The path reported is therefore the one through the
/// most recent push before the end is first popped, which is usually not the shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirstSolver;

impl GridSolver for DepthFirstSolver {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn explore<O: StepObserver>(
        &self,
        run: &mut SearchRun<'_, O>,
    ) -> Result<Option<Path>, SearchError> {
        let (start, end) = (run.start, run.end);
        let mut came_from: FxHashMap<Point, Point> = FxHashMap::default();
        let mut visited: FxIndexSet<Point> = FxIndexSet::default();
        let mut to_see = vec![start];

        while let Some(current) = to_see.pop() {
            run.checkpoint()?;
            visited.insert(current);
            if current == end {
                debug!("depth-first: expanded {} cells", visited.len());
                trace!("depth-first: expansion order {}", visited.iter().join(" "));
                return run.reconstruct(&came_from).map(Some);
            }
            trace!("depth-first: expanding {}", current);
            for neighbor in run.neighbors(current) {
                if !visited.contains(&neighbor) {
                    came_from.insert(neighbor, current);
                    to_see.push(neighbor);
                    run.mark(neighbor, NodeState::Frontier)?;
                }
            }
            if current != start {
                run.mark(current, NodeState::Visited)?;
            }
        }
        debug!("depth-first: exhausted after {} cells", visited.len());
        trace!("depth-first: expansion order {}", visited.iter().join(" "));
        Ok(None)
    }
}
