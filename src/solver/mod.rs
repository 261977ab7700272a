use crate::error::Result;
use crate::frontier::{explore, Ranking, SearchNode};
use crate::grid::Grid;
use crate::path::reconstruct_path;
use crate::{N_SMALLVEC_SIZE, STEP_COST};
use core::fmt;
use core::str::FromStr;
use grid_util::Point;
use log::{debug, info};
use smallvec::SmallVec;
use std::convert::Infallible;

pub mod astar;
pub mod bfs;
pub mod dijkstra;
pub mod greedy;

use astar::AstarSolver;
use bfs::BreadthFirstSolver;
use dijkstra::DijkstraSolver;
use greedy::GreedySolver;

/// A node finalized by a search over a [Grid].
pub type GridNode = SearchNode<Point, i32>;

/// Manhattan distance with the fixed `-1` offset used by the greedy and A* heuristics: the
/// destination cell itself is not counted as a step.
pub fn offset_manhattan(p1: &Point, p2: &Point) -> i32 {
    p1.manhattan_distance(p2) - 1
}

pub trait GridSolver {
    /// How the open set is ordered, and whether open entries are relaxed.
    fn ranking(&self) -> Ranking;

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    fn successors(
        &self,
        grid: &Grid,
        node: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        grid.neighbours(node)
            .into_iter()
            .map(|p| (p, STEP_COST))
            .collect()
    }

    /// Searches from `start` to `goal` and returns the closed set in the order nodes were
    /// finalized, ending with the goal. An empty vector signals that the goal is unreachable.
    fn explore(&self, grid: &Grid, start: Point, goal: Point) -> Result<Vec<GridNode>> {
        grid.validate_endpoints(&start, &goal)?;
        let visited = explore(
            &start,
            self.ranking(),
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        if visited.is_empty() {
            info!("{} is not reachable from {}", goal, start);
        } else {
            debug!(
                "Reached {} from {} after finalizing {} cells",
                goal,
                start,
                visited.len()
            );
        }
        Ok(visited)
    }

    /// The route from `start` to `goal` inclusive, or an empty vector if there is none.
    fn get_path_single_goal(&self, grid: &Grid, start: Point, goal: Point) -> Result<Vec<Point>> {
        self.explore(grid, start, goal)
            .map(|visited| reconstruct_path(&visited))
    }

    /// Every step on a uniform-cost grid costs [STEP_COST].
    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.len().saturating_sub(1) as i32 * STEP_COST
    }
}

/// The four interchangeable search strategies, identified as `breadth`, `dijkstra`, `greedy`
/// and `astar`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    Breadth,
    Dijkstra,
    Greedy,
    #[default]
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Breadth,
        Strategy::Dijkstra,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Breadth => "breadth",
            Strategy::Dijkstra => "dijkstra",
            Strategy::Greedy => "greedy",
            Strategy::AStar => "astar",
        }
    }

    /// Looks up a strategy by identifier. Anything unrecognised selects A*.
    pub fn from_name(name: &str) -> Strategy {
        match name.trim() {
            "breadth" => Strategy::Breadth,
            "dijkstra" => Strategy::Dijkstra,
            "greedy" => Strategy::Greedy,
            _ => Strategy::AStar,
        }
    }

    pub fn explore(&self, grid: &Grid, start: Point, goal: Point) -> Result<Vec<GridNode>> {
        match self {
            Strategy::Breadth => BreadthFirstSolver.explore(grid, start, goal),
            Strategy::Dijkstra => DijkstraSolver.explore(grid, start, goal),
            Strategy::Greedy => GreedySolver.explore(grid, start, goal),
            Strategy::AStar => AstarSolver.explore(grid, start, goal),
        }
    }
}

impl FromStr for Strategy {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Strategy::from_name(s))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
