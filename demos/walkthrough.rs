use grid_explorer::{
    Algorithm, Board, CancellationToken, NodeState, NoopObserver, ObserverError, PathingGrid,
    Topology,
};
use grid_util::point::Point;

/// Builds a board the way a shell would from clicks, then replays each solver step by step,
/// printing the grid whenever a cell turns visited.
fn main() {
    let mut board = Board::new(5, 7, Topology::Square);
    board.place(Point::new(0, 2));
    board.place(Point::new(6, 2));
    for y in 0..4 {
        board.place(Point::new(3, y));
    }

    let cancel = CancellationToken::new();
    for algorithm in Algorithm::ALL {
        println!("== {algorithm} ==");
        let mut expanded = 0;
        let mut observer = |grid: &PathingGrid, p: Point| -> Result<(), ObserverError> {
            if grid.state(p) == NodeState::Visited {
                expanded += 1;
                if expanded % 6 == 0 {
                    println!("after {expanded} expansions:\n{grid}");
                }
            }
            Ok(())
        };
        match board.run(algorithm, &mut observer, &cancel) {
            Ok(Some(path)) => println!(
                "found a path with {} moves after {expanded} expansions:\n{}",
                path.edge_count(),
                board.grid
            ),
            Ok(None) => println!("no path:\n{}", board.grid),
            Err(e) => println!("search failed: {e}"),
        }
    }

    board.grid.set_topology(Topology::Hexagonal);
    println!("== {} on hexagonal cells ==", Algorithm::AStar);
    if let Ok(Some(path)) = board.run(Algorithm::AStar, &mut NoopObserver, &cancel) {
        println!("{} moves:\n{}", path.edge_count(), board.grid);
    }
}
