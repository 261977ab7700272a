use crate::path::reconstruct_path;
use crate::solver::{GridNode, Strategy};
use grid_util::Point;
use std::time::Duration;

/// Delay between two exploration frames in the reference animation.
pub const EXPLORE_STEP_DELAY: Duration = Duration::from_millis(10);
/// Delay between two route frames in the reference animation.
pub const ROUTE_STEP_DELAY: Duration = Duration::from_millis(20);

/// Shown to the user when the open set runs dry.
pub const UNREACHABLE_NOTICE: &str = "The goal cannot be reached, please choose again.";

/// Everything a single search needs, passed explicitly rather than held as shared state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub start: Point,
    pub goal: Point,
    pub strategy: Strategy,
    /// Whether playback shows the explored cells before the route.
    pub show_exploration: bool,
}

impl SearchRequest {
    /// An A* request that shows exploration.
    pub fn new(start: Point, goal: Point) -> SearchRequest {
        SearchRequest {
            start,
            goal,
            strategy: Strategy::default(),
            show_exploration: true,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> SearchRequest {
        self.strategy = strategy;
        self
    }

    pub fn with_exploration(mut self, show_exploration: bool) -> SearchRequest {
        self.show_exploration = show_exploration;
        self
    }
}

/// The materialized result of one search: the closed set in finalization order and the route
/// reconstructed from it. Both are empty when the goal is unreachable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub request: SearchRequest,
    pub visited: Vec<GridNode>,
    pub path: Vec<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Explored,
    Route,
}

/// One frame of playback: paint `position` with `mark`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub position: Point,
    pub mark: Mark,
}

impl Step {
    pub fn delay(&self) -> Duration {
        match self.mark {
            Mark::Explored => EXPLORE_STEP_DELAY,
            Mark::Route => ROUTE_STEP_DELAY,
        }
    }
}

impl SearchOutcome {
    pub fn new(request: SearchRequest, visited: Vec<GridNode>) -> SearchOutcome {
        let path = reconstruct_path(&visited);
        SearchOutcome {
            request,
            visited,
            path,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.visited.is_empty()
    }

    /// The user-facing message for an unreachable goal.
    pub fn notice(&self) -> Option<&'static str> {
        (!self.is_reachable()).then_some(UNREACHABLE_NOTICE)
    }

    /// Accumulated cost of the goal node, if it was reached.
    pub fn goal_cost(&self) -> Option<i32> {
        self.visited.last().map(|node| node.cost)
    }

    /// The frames to paint, in order. Start and goal keep their own colours, so they never
    /// appear. Explored cells come first, and only when `show_exploration` is set.
    pub fn playback(&self) -> Vec<Step> {
        let SearchRequest {
            start,
            goal,
            show_exploration,
            ..
        } = self.request;
        let is_endpoint = |p: &Point| *p == start || *p == goal;
        let explored = self
            .visited
            .iter()
            .filter(|_| show_exploration)
            .map(|node| node.position)
            .filter(|p| !is_endpoint(p))
            .map(|position| Step {
                position,
                mark: Mark::Explored,
            });
        let route = self
            .path
            .iter()
            .copied()
            .filter(|p| !is_endpoint(p))
            .map(|position| Step {
                position,
                mark: Mark::Route,
            });
        explored.chain(route).collect()
    }
}
