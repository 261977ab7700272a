use grid_util::Point;

use crate::{frontier::Ranking, solver::GridSolver};

/// Expands the open cell with the smallest accumulated cost.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn ranking(&self) -> Ranking {
        Ranking::Cost
    }

    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
