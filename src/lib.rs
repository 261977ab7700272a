//! # grid_search
//!
//! Search on a 4-connected grid of passable and blocked cells with four interchangeable
//! strategies:
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search),
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! [greedy best-first](https://en.wikipedia.org/wiki/Best-first_search) and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm).
//!
//! Besides the route, every search returns the closed set in the order cells were finalized so
//! the exploration can be replayed step by step. Runs are deterministic: neighbours are always
//! enumerated up, right, down, left and ties in the open set go to the cell discovered first.
pub mod error;
pub mod frontier;
pub mod grid;
pub mod outcome;
pub mod path;
pub mod solver;

pub use error::{Endpoint, GridError, Result, SearchError};
pub use grid::{Cell, Grid, GridConfig};
pub use grid_util::Point;
pub use outcome::{Mark, SearchOutcome, SearchRequest, Step};
pub use solver::{GridNode, GridSolver, Strategy};

use core::fmt;
use log::debug;
use rand::Rng;

/// Cost of one axis-aligned step.
pub const STEP_COST: i32 = 1;
/// Inline capacity for neighbour lists; a cell has at most four.
pub const N_SMALLVEC_SIZE: usize = 4;

/// [Pathfinder] owns the grid of a session and answers [SearchRequest]s against it. Every
/// search allocates its own bookkeeping, so the same pathfinder can be queried repeatedly.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    pub grid: Grid,
}

impl Pathfinder {
    pub fn new(grid: Grid) -> Pathfinder {
        Pathfinder { grid }
    }

    pub fn random<R: Rng>(
        config: &GridConfig,
        rng: &mut R,
    ) -> Result<Pathfinder, GridError> {
        Grid::random(config, rng).map(Pathfinder::new)
    }

    /// Replaces the grid with a freshly generated one.
    pub fn reset<R: Rng>(
        &mut self,
        config: &GridConfig,
        rng: &mut R,
    ) -> Result<(), GridError> {
        self.grid = Grid::random(config, rng)?;
        Ok(())
    }

    /// Runs the requested strategy and reconstructs the route. An unreachable goal is reported
    /// through an empty [SearchOutcome], not an error.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        debug!(
            "Searching from {} to {} with {}",
            request.start, request.goal, request.strategy
        );
        let visited = request
            .strategy
            .explore(&self.grid, request.start, request.goal)?;
        Ok(SearchOutcome::new(*request, visited))
    }

    /// Computes a route from start to goal, empty if the goal cannot be reached.
    pub fn get_path_single_goal(
        &self,
        start: Point,
        goal: Point,
        strategy: Strategy,
    ) -> Result<Vec<Point>> {
        let request = SearchRequest::new(start, goal).with_strategy(strategy);
        self.search(&request).map(|outcome| outcome.path)
    }

    /// Draws the grid with the outcome laid over it: `S` start, `G` goal, `*` route, `o`
    /// explored, `#` blocked and `.` untouched.
    pub fn render(&self, outcome: &SearchOutcome) -> String {
        let width = self.grid.width();
        let mut canvas: Vec<Vec<char>> = self
            .grid
            .to_string()
            .lines()
            .map(|line| line.chars().collect())
            .collect();
        let mut paint = |p: &Point, c: char| {
            if self.grid.in_bounds(p) {
                canvas[p.y as usize][p.x as usize] = c;
            }
        };
        for node in &outcome.visited {
            paint(&node.position, 'o');
        }
        for p in &outcome.path {
            paint(p, '*');
        }
        paint(&outcome.request.start, 'S');
        paint(&outcome.request.goal, 'G');
        let mut out = String::with_capacity((width + 1) * self.grid.height());
        for row in canvas {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Pathfinder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
