use grid_util::point::Point;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::pathing_grid::PathingGrid;

/// Failure reported by a [StepObserver]. Aborts the running search.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Receives a callback after every node state change made by a solver, giving a renderer the
/// chance to redraw. `changed` is the cell whose state was just written; the grid can be read
/// freely but not modified.
pub trait StepObserver {
    fn on_step(&mut self, grid: &PathingGrid, changed: Point) -> Result<(), ObserverError>;
}

impl<F> StepObserver for F
where
    F: FnMut(&PathingGrid, Point) -> Result<(), ObserverError>,
{
    fn on_step(&mut self, grid: &PathingGrid, changed: Point) -> Result<(), ObserverError> {
        self(grid, changed)
    }
}

/// Observer for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _: &PathingGrid, _: Point) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// Shared flag polled by the solvers once per frontier pop. Clones observe the same flag, so a
/// shell can hand one clone to its event handling and another to the search.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
    /// Clears the flag so the token can be reused for the next run.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }
}
