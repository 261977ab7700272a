use crate::frontier::SearchNode;
use fxhash::FxHashMap;
use grid_util::Point;
use itertools::Itertools;
use std::hash::Hash;

/// Walks the predecessor keys back from the last (goal) node of a closed set and returns the
/// route from start to goal inclusive. An empty closed set gives an empty route.
pub fn reconstruct_path<N, C>(visited: &[SearchNode<N, C>]) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let Some(goal) = visited.last() else {
        return Vec::new();
    };
    let by_position: FxHashMap<&N, &SearchNode<N, C>> =
        visited.iter().map(|node| (&node.position, node)).collect();
    let mut path: Vec<N> = std::iter::successors(Some(goal), |node| {
        node.predecessor
            .as_ref()
            .and_then(|p| by_position.get(p).copied())
    })
    .take(visited.len())
    .map(|node| node.position.clone())
    .collect();
    path.reverse();
    path
}

/// Whether every consecutive pair of points is a single axis-aligned step apart.
pub fn is_contiguous(path: &[Point]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| a.manhattan_distance(b) == 1)
}
