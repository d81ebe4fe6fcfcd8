use fxhash::{FxHashMap, FxHashSet};
use grid_util::point::Point;
use log::trace;
use std::collections::BinaryHeap;

use crate::error::SearchError;
use crate::node::NodeState;
use crate::observer::StepObserver;
use crate::path::Path;
use crate::search::{FrontierEntry, SearchRun};
use crate::solver::GridSolver;
use crate::topology::manhattan_distance;

/// A* with unit edge costs and the Manhattan heuristic.
///
/// Ties in `f = g + h` go to the node discovered first. A node enters the priority queue only
/// when it is not already in it; later improvements update its scores in place.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
    /// Manhattan distance times the heuristic factor.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        (manhattan_distance(*p1, *p2) as f32 * self.heuristic_factor) as i32
    }
}

/// The A* frontier: a priority queue plus the set of points currently in it. A point is pushed
/// only while it is not open, so an improved score does not reorder its existing entry.
#[derive(Debug, Default)]
struct OpenSet {
    heap: BinaryHeap<FrontierEntry>,
    members: FxHashSet<Point>,
    sequence: u64,
}

impl OpenSet {
    /// Returns whether the point was newly opened.
    fn push(&mut self, point: Point, estimated_cost: i32) -> bool {
        if !self.members.insert(point) {
            return false;
        }
        self.sequence += 1;
        self.heap.push(FrontierEntry {
            estimated_cost,
            sequence: self.sequence,
            point,
        });
        true
    }
    fn pop(&mut self) -> Option<Point> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.point);
        Some(entry.point)
    }
    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn explore<O: StepObserver>(
        &self,
        run: &mut SearchRun<'_, O>,
    ) -> Result<Option<Path>, SearchError> {
        let (start, end) = (run.start, run.end);
        // Absent entries stand for infinity.
        let mut g_score: FxHashMap<Point, i32> = FxHashMap::default();
        let mut f_score: FxHashMap<Point, i32> = FxHashMap::default();
        let mut came_from: FxHashMap<Point, Point> = FxHashMap::default();
        g_score.insert(start, 0);
        f_score.insert(start, self.heuristic(&start, &end));

        let mut open = OpenSet::default();
        open.push(start, f_score[&start]);

        while let Some(current) = open.pop() {
            run.checkpoint()?;
            if current == end {
                return run.reconstruct(&came_from).map(Some);
            }
            trace!("astar: expanding {} with {} open", current, open.len());
            let tentative_g = g_score[&current] + 1;
            for neighbor in run.neighbors(current) {
                if tentative_g < g_score.get(&neighbor).copied().unwrap_or(i32::MAX) {
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    f_score.insert(neighbor, tentative_g + self.heuristic(&neighbor, &end));
                    if open.push(neighbor, f_score[&neighbor]) {
                        run.mark(neighbor, NodeState::Frontier)?;
                    }
                }
            }
            if current != start {
                run.mark(current, NodeState::Visited)?;
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{CancellationToken, NoopObserver};
    use crate::pathing_grid::PathingGrid;
    use crate::topology::Topology;
    use crate::ObserverError;
    use itertools::Itertools;

    fn solve(grid: &mut PathingGrid, start: Point, end: Point) -> Option<Path> {
        AstarSolver::new()
            .find_path(grid, start, end, &mut NoopObserver, &CancellationToken::new())
            .unwrap()
    }

    /// Asserts that the optimal 4 step solution is found.
    #[test]
    fn solve_simple_problem() {
        //  ___
        // |S  |
        // | # |
        // |  E|
        //  ___
        let mut grid: PathingGrid = "S..\n.#.\n..E".parse().unwrap();
        let path = solve(&mut grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(path.edge_count(), 4);
        assert!(path.is_contiguous(&grid));
        assert_eq!(grid.points_with_state(NodeState::Path).count(), 3);
    }

    #[test]
    fn test_complex() {
        let mut grid: PathingGrid = "\
            S....#....
            .#........
            ..........
            ..........
            ..........
            #.........
            ..........
            .......E..
            ........#.
            .........."
            .parse()
            .unwrap();
        let path = solve(&mut grid, Point::new(0, 0), Point::new(7, 7)).unwrap();
        assert_eq!(path.edge_count(), 14);
    }

    /// Both routes through the open 2x2 block cost the same; the one through the cell discovered
    /// first (right of the start, per the left-right-up-down neighbor order) is marked.
    #[test]
    fn equal_cost_tie_goes_to_first_discovered() {
        let mut grid: PathingGrid = "S.\n.E".parse().unwrap();
        let path = solve(&mut grid, Point::new(0, 0), Point::new(1, 1)).unwrap();
        assert_eq!(path.intermediate(), &[Point::new(1, 0)]);
        assert_eq!(grid.to_string(), "S*\noE\n");
    }

    #[test]
    fn heuristic_is_manhattan() {
        let solver = AstarSolver::new();
        assert_eq!(solver.heuristic(&Point::new(3, 1), &Point::new(0, 0)), 4);
        let weighted = AstarSolver {
            heuristic_factor: 2.0,
        };
        assert_eq!(weighted.heuristic(&Point::new(3, 1), &Point::new(0, 0)), 8);
    }

    #[test]
    fn start_is_never_marked_visited() {
        let mut grid: PathingGrid = "S.#\n..#\n#.E".parse().unwrap();
        solve(&mut grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(grid.state(Point::new(0, 0)), NodeState::Start);
        assert_eq!(grid.state(Point::new(2, 2)), NodeState::End);
    }

    #[test]
    fn open_set_keeps_one_entry_per_open_point() {
        let mut open = OpenSet::default();
        assert!(open.push(Point::new(1, 0), 5));
        // A better estimate while still open updates nothing in the queue.
        assert!(!open.push(Point::new(1, 0), 3));
        assert!(open.push(Point::new(2, 0), 4));
        assert_eq!(open.len(), 2);
        assert_eq!(open.pop(), Some(Point::new(2, 0)));
        assert_eq!(open.pop(), Some(Point::new(1, 0)));
        assert_eq!(open.pop(), None);
        // Once popped the point may be opened again.
        assert!(open.push(Point::new(1, 0), 3));
    }

    /// On hexagonal cells the Manhattan estimate is inconsistent: scores of open cells get
    /// lowered and expanded cells get reopened. A cell is never announced as frontier twice
    /// without being expanded in between.
    #[test]
    fn open_cells_are_announced_once() {
        let mut grid = PathingGrid::parse(
            "S...#\n.#.#.\n#....\n..###\n....E",
            Topology::Hexagonal,
        )
        .unwrap();
        let mut history: FxHashMap<Point, Vec<NodeState>> = FxHashMap::default();
        let mut observer = |grid: &PathingGrid, p: Point| -> Result<(), ObserverError> {
            history.entry(p).or_default().push(grid.state(p));
            Ok(())
        };
        let path = AstarSolver::new()
            .find_path(
                &mut grid,
                Point::new(0, 0),
                Point::new(4, 4),
                &mut observer,
                &CancellationToken::new(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(path.edge_count(), 6);
        assert!(path.is_contiguous(&grid));
        let reopened = history
            .values()
            .filter(|states| states.iter().filter(|&&s| s == NodeState::Frontier).count() > 1)
            .count();
        assert!(reopened > 0);
        for (point, states) in &history {
            let frontier_runs = states
                .iter()
                .filter(|&&s| s != NodeState::Path)
                .tuple_windows()
                .filter(|(a, b)| **a == NodeState::Frontier && **b == NodeState::Frontier)
                .count();
            assert_eq!(frontier_runs, 0, "{point} opened twice: {states:?}");
        }
    }

    #[test]
    fn weighted_heuristic_still_finds_a_path() {
        let mut grid: PathingGrid = "S....\n.###.\n...#.\n.#...\n.#..E".parse().unwrap();
        let solver = AstarSolver {
            heuristic_factor: 3.0,
        };
        let path = solver
            .find_path(
                &mut grid,
                Point::new(0, 0),
                Point::new(4, 4),
                &mut NoopObserver,
                &CancellationToken::new(),
            )
            .unwrap()
            .unwrap();
        assert!(path.is_contiguous(&grid));
        assert!(path.edge_count() >= 8);
        assert_eq!(
            grid.points_with_state(NodeState::Path).count(),
            path.intermediate().len()
        );
    }
}
