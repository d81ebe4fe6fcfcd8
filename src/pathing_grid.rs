use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use itertools::Itertools;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::ParseGridError;
use crate::node::{Node, NodeState};
use crate::topology::Topology;
use crate::N_NEIGHBORS;

/// [PathingGrid] owns one [Node] per cell of a `rows` x `cols` rectangle together with its
/// [Topology]. Besides the node states it caches each node's traversable neighbors and a
/// [UnionFind] of connected components; both are flagged dirty when a wall is placed or removed
/// and regenerated by [update](Self::update).
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    topology: Topology,
    nodes: Vec<Node>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    pub neighbors_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(0, 0, Topology::Square)
    }
}

impl PathingGrid {
    /// Builds every node up front, all [NodeState::Empty], with neighbors and components
    /// already resolved.
    pub fn new(rows: usize, cols: usize, topology: Topology) -> PathingGrid {
        let nodes = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Node::new(row, col)))
            .collect();
        let mut grid = PathingGrid {
            rows,
            cols,
            topology,
            nodes,
            components: UnionFind::new(rows * cols),
            components_dirty: true,
            neighbors_dirty: true,
        };
        grid.update();
        grid
    }
    /// Parses the text form (see [NodeState::symbol]) using the given topology.
    pub fn parse(text: &str, topology: Topology) -> Result<PathingGrid, ParseGridError> {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let cols = lines.first().ok_or(ParseGridError::Empty)?.chars().count();
        let mut grid = PathingGrid::new(lines.len(), cols, topology);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ParseGridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let state =
                    NodeState::from_symbol(ch).ok_or(ParseGridError::UnknownCell { ch, row, col })?;
                grid.set_state(Point::new(col as i32, row as i32), state);
            }
        }
        grid.update();
        Ok(grid)
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn topology(&self) -> Topology {
        self.topology
    }
    /// Switching topology invalidates every neighbor list.
    pub fn set_topology(&mut self, topology: Topology) {
        if self.topology != topology {
            self.topology = topology;
            self.neighbors_dirty = true;
            self.components_dirty = true;
        }
    }
    pub fn point_in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }
    /// Flat index `row * cols + col`. The point must be in bounds.
    pub fn get_ix_point(&self, point: &Point) -> usize {
        debug_assert!(self.point_in_bounds(*point));
        point.y as usize * self.cols + point.x as usize
    }
    pub fn node(&self, point: Point) -> Option<&Node> {
        if self.point_in_bounds(point) {
            Some(&self.nodes[self.get_ix_point(&point)])
        } else {
            None
        }
    }
    /// Nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
    /// Panics if the point is out of bounds.
    pub fn state(&self, point: Point) -> NodeState {
        self.nodes[self.get_ix_point(&point)].state
    }
    /// Writes the state of a cell. Placing or removing a wall marks neighbors and components
    /// dirty. Panics if the point is out of bounds.
    pub fn set_state(&mut self, point: Point, state: NodeState) {
        let ix = self.get_ix_point(&point);
        let old = self.nodes[ix].state;
        if old != state && (old == NodeState::Wall || state == NodeState::Wall) {
            self.neighbors_dirty = true;
            self.components_dirty = true;
        }
        self.nodes[ix].state = state;
    }
    /// Cells currently in the given state, row-major.
    pub fn points_with_state(&self, state: NodeState) -> impl Iterator<Item = Point> + '_ {
        self.nodes
            .iter()
            .filter(move |node| node.state == state)
            .map(Node::point)
    }
    /// Resolved neighbors of a cell; empty for out-of-bounds points.
    pub fn neighbors(&self, point: Point) -> &[Point] {
        self.node(point).map(Node::neighbors).unwrap_or(&[])
    }
    /// Computes the traversable neighbors of one cell from the current wall layout, without
    /// storing them.
    pub fn compute_neighbors(&self, point: Point) -> SmallVec<[Point; N_NEIGHBORS]> {
        self.topology.neighbors(point, self.rows, self.cols, |p| {
            self.nodes[self.get_ix_point(&p)].state == NodeState::Wall
        })
    }
    /// Overwrites the neighbor list of every node. Must run after any wall change and before a
    /// search; solvers do this themselves through [update](Self::update).
    pub fn resolve_neighbors(&mut self) {
        debug!(
            "Resolving {:?} neighbors for {}x{} grid",
            self.topology, self.rows, self.cols
        );
        let resolved = self
            .nodes
            .iter()
            .map(|node| self.compute_neighbors(node.point()))
            .collect::<Vec<_>>();
        for (node, neighbors) in self.nodes.iter_mut().zip(resolved) {
            node.neighbors = neighbors;
        }
        self.neighbors_dirty = false;
    }
    /// Regenerates neighbors and components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.neighbors_dirty {
            self.resolve_neighbors();
        }
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure joining every open cell with its resolved
    /// neighbors.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        let mut components = UnionFind::new(self.nodes.len());
        for (ix, node) in self.nodes.iter().enumerate() {
            if node.state == NodeState::Wall {
                continue;
            }
            for neighbor in node.neighbors() {
                components.union(ix, self.get_ix_point(neighbor));
            }
        }
        self.components = components;
        self.components_dirty = false;
    }
    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }
    /// Checks if start and goal are open cells on the same component. Only meaningful after
    /// [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.node(*start), self.node(*goal)) {
            (Some(s), Some(g)) => {
                s.state != NodeState::Wall
                    && g.state != NodeState::Wall
                    && self.get_component(start) == self.get_component(goal)
            }
            _ => false,
        }
    }
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
    /// Sets every cell whose state is not listed in `keep` to [NodeState::Empty].
    pub fn reset(&mut self, keep: &[NodeState]) {
        let points = self
            .nodes
            .iter()
            .filter(|node| !keep.contains(&node.state))
            .map(Node::point)
            .collect::<Vec<_>>();
        for point in points {
            self.set_state(point, NodeState::Empty);
        }
    }
    /// Removes the marks of a previous search while keeping walls and endpoints.
    pub fn clear_search_marks(&mut self) {
        let marked = self
            .nodes
            .iter()
            .filter(|node| node.state.is_search_mark())
            .map(Node::point)
            .collect::<Vec<_>>();
        for point in marked {
            self.set_state(point, NodeState::Empty);
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.nodes.chunks(self.cols.max(1)) {
            writeln!(f, "{}", row.iter().map(|node| node.state.symbol()).join(""))?;
        }
        Ok(())
    }
}

impl FromStr for PathingGrid {
    type Err = ParseGridError;

    /// Parses a [Topology::Square] grid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathingGrid::parse(s, Topology::Square)
    }
}
