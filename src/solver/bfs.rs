use grid_util::Point;

use crate::{frontier::Ranking, solver::GridSolver};

/// Expands cells in the order they were discovered.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSolver;

impl GridSolver for BreadthFirstSolver {
    fn ranking(&self) -> Ranking {
        Ranking::Discovery
    }

    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
