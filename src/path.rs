use grid_util::point::Point;
use itertools::Itertools;

use crate::pathing_grid::PathingGrid;

/// A route found by a solver, ordered from start to end with both endpoints included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub(crate) fn new(points: Vec<Point>) -> Path {
        debug_assert!(points.len() >= 2);
        Path { points }
    }
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn start(&self) -> Point {
        self.points[0]
    }
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }
    /// Number of moves along the path.
    pub fn edge_count(&self) -> usize {
        self.points.len() - 1
    }
    /// The cells between start and end, i.e. those marked as path on the grid.
    pub fn intermediate(&self) -> &[Point] {
        &self.points[1..self.points.len() - 1]
    }
    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }
    /// Checks that every consecutive pair of cells are mutual neighbors on the grid as it is
    /// currently resolved.
    pub fn is_contiguous(&self, grid: &PathingGrid) -> bool {
        self.points.iter().tuple_windows().all(|(a, b)| {
            grid.neighbors(*a).contains(b) && grid.neighbors(*b).contains(a)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;

    #[test]
    fn contiguity_follows_walls() {
        let mut grid: PathingGrid = "...\n...".parse().unwrap();
        let path = Path::new(vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]);
        assert!(path.is_contiguous(&grid));
        assert_eq!(path.edge_count(), 2);
        assert_eq!(path.intermediate(), &[Point::new(1, 0)]);

        grid.set_state(Point::new(1, 0), crate::node::NodeState::Wall);
        grid.update();
        assert!(!path.is_contiguous(&grid));
    }

    #[test]
    fn diagonal_steps_need_hexagonal_topology() {
        let mut grid = PathingGrid::new(2, 2, Topology::Square);
        let path = Path::new(vec![Point::new(0, 0), Point::new(1, 1)]);
        assert!(!path.is_contiguous(&grid));
        grid.set_topology(Topology::Hexagonal);
        grid.update();
        assert!(path.is_contiguous(&grid));
    }
}
