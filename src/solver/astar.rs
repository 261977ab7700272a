use grid_util::Point;

use crate::{
    frontier::Ranking,
    solver::{offset_manhattan, GridSolver},
};

/// A* ranking open cells by `f = g + h` with the offset Manhattan heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl GridSolver for AstarSolver {
    fn ranking(&self) -> Ranking {
        Ranking::CostPlusHeuristic
    }

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        offset_manhattan(p1, p2)
    }
}
