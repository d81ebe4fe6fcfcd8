use grid_util::point::Point;
use smallvec::SmallVec;

use crate::N_NEIGHBORS;

/// Display and search state of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeState {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Path,
    Visited,
    Frontier,
}

impl NodeState {
    /// Character used by the text form of a [PathingGrid](crate::pathing_grid::PathingGrid).
    pub fn symbol(self) -> char {
        match self {
            NodeState::Empty => '.',
            NodeState::Wall => '#',
            NodeState::Start => 'S',
            NodeState::End => 'E',
            NodeState::Path => '*',
            NodeState::Visited => 'o',
            NodeState::Frontier => '+',
        }
    }
    pub fn from_symbol(ch: char) -> Option<NodeState> {
        Some(match ch {
            '.' => NodeState::Empty,
            '#' => NodeState::Wall,
            'S' => NodeState::Start,
            'E' => NodeState::End,
            '*' => NodeState::Path,
            'o' => NodeState::Visited,
            '+' => NodeState::Frontier,
            _ => return None,
        })
    }
    /// States written by a search run, cleared before the next one.
    pub fn is_search_mark(self) -> bool {
        matches!(
            self,
            NodeState::Path | NodeState::Visited | NodeState::Frontier
        )
    }
    pub fn is_endpoint(self) -> bool {
        matches!(self, NodeState::Start | NodeState::End)
    }
}

/// A grid cell. The coordinate is fixed at construction, with `x` the column and `y` the row;
/// equality and hashing go through [Node::point] wherever nodes are used as keys.
#[derive(Clone, Debug)]
pub struct Node {
    point: Point,
    pub state: NodeState,
    pub(crate) neighbors: SmallVec<[Point; N_NEIGHBORS]>,
}

impl Node {
    pub(crate) fn new(row: usize, col: usize) -> Node {
        Node {
            point: Point::new(col as i32, row as i32),
            state: NodeState::Empty,
            neighbors: SmallVec::new(),
        }
    }
    pub fn point(&self) -> Point {
        self.point
    }
    pub fn row(&self) -> usize {
        self.point.y as usize
    }
    pub fn col(&self) -> usize {
        self.point.x as usize
    }
    /// Traversable neighbors as of the last neighbor resolution.
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.point.hash(state);
    }
}
