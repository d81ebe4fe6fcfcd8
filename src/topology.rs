use grid_util::point::Point;
use smallvec::SmallVec;

use crate::N_NEIGHBORS;

/// Adjacency rule of a grid.
///
/// ```text
/// Square          Hexagonal
///   o             o o
///   |              \|
/// o-A-o           o-A-o
///   |               |\
///   o               o o
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Left, right, up and down.
    #[default]
    Square,
    /// The square neighbors plus the diagonal cells one row and one column before and after.
    Hexagonal,
}

/// `(d_col, d_row)` in resolution order.
const SQUARE_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const HEXAGONAL_OFFSETS: [(i32, i32); 6] = [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (1, 1)];

impl Topology {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Topology::Square => &SQUARE_OFFSETS,
            Topology::Hexagonal => &HEXAGONAL_OFFSETS,
        }
    }
    /// All in-bounds cells adjacent to `point` on a `rows` x `cols` grid, walls included.
    pub fn adjacent(
        self,
        point: Point,
        rows: usize,
        cols: usize,
    ) -> SmallVec<[Point; N_NEIGHBORS]> {
        self.offsets()
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| p.x >= 0 && p.y >= 0 && (p.x as usize) < cols && (p.y as usize) < rows)
            .collect()
    }
    /// Adjacent cells that can be walked onto, i.e. those for which `blocked` is false.
    pub fn neighbors<F>(
        self,
        point: Point,
        rows: usize,
        cols: usize,
        blocked: F,
    ) -> SmallVec<[Point; N_NEIGHBORS]>
    where
        F: Fn(Point) -> bool,
    {
        let mut neighbors = self.adjacent(point, rows, cols);
        neighbors.retain(|p| !blocked(*p));
        neighbors
    }
    /// Whether `a` and `b` are adjacent under this topology (ignoring walls).
    pub fn is_adjacent(self, a: Point, b: Point) -> bool {
        self.offsets()
            .iter()
            .any(|&(dx, dy)| a.x + dx == b.x && a.y + dy == b.y)
    }
}

/// Manhattan distance, the A* heuristic. Admissible for [Topology::Square] only.
pub fn manhattan_distance(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_corner_and_edge() {
        let corner = Topology::Square.adjacent(Point::new(0, 0), 5, 5);
        assert_eq!(corner.as_slice(), &[Point::new(1, 0), Point::new(0, 1)]);
        let edge = Topology::Square.adjacent(Point::new(0, 2), 5, 5);
        assert_eq!(
            edge.as_slice(),
            &[Point::new(1, 2), Point::new(0, 1), Point::new(0, 3)]
        );
    }

    #[test]
    fn square_order_is_left_right_up_down() {
        let inner = Topology::Square.adjacent(Point::new(2, 2), 5, 5);
        assert_eq!(
            inner.as_slice(),
            &[
                Point::new(1, 2),
                Point::new(3, 2),
                Point::new(2, 1),
                Point::new(2, 3)
            ]
        );
    }

    #[test]
    fn hexagonal_adds_diagonals() {
        let inner = Topology::Hexagonal.adjacent(Point::new(2, 2), 5, 5);
        assert_eq!(inner.len(), 6);
        assert_eq!(inner[4], Point::new(1, 1));
        assert_eq!(inner[5], Point::new(3, 3));
        // No wrap-around into the next row at the right border.
        let border = Topology::Hexagonal.adjacent(Point::new(4, 2), 5, 5);
        assert!(!border.contains(&Point::new(0, 4)));
        assert_eq!(border.len(), 4);
    }

    #[test]
    fn walls_are_filtered() {
        let wall = Point::new(1, 0);
        let neighbors = Topology::Square.neighbors(Point::new(0, 0), 3, 3, |p| p == wall);
        assert_eq!(neighbors.as_slice(), &[Point::new(0, 1)]);
    }

    #[test]
    fn adjacency_is_symmetric() {
        for topology in [Topology::Square, Topology::Hexagonal] {
            for y in 0..4 {
                for x in 0..4 {
                    let p = Point::new(x, y);
                    for n in topology.adjacent(p, 4, 4) {
                        assert!(topology.adjacent(n, 4, 4).contains(&p));
                        assert!(topology.is_adjacent(n, p));
                    }
                }
            }
        }
    }

    #[test]
    fn manhattan() {
        assert_eq!(manhattan_distance(Point::new(3, 1), Point::new(0, 0)), 4);
        assert_eq!(manhattan_distance(Point::new(4, 4), Point::new(4, 4)), 0);
    }
}
