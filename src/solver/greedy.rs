use grid_util::Point;

use crate::{
    frontier::Ranking,
    solver::{offset_manhattan, GridSolver},
};

/// Greedy best-first search: always expands the open cell that looks closest to the goal,
/// ignoring the distance already travelled. Paths are not necessarily shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySolver;

impl GridSolver for GreedySolver {
    fn ranking(&self) -> Ranking {
        Ranking::Heuristic
    }

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        offset_manhattan(p1, p2)
    }
}
