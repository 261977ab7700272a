//! This module implements the open/closed set bookkeeping shared by every strategy. It is a
//! variant of [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! which, instead of returning only the path, records every node in the order it was finalized
//! so that the exploration itself can be replayed.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Marks the predecessor slot of the start node.
const NO_PARENT: usize = usize::MAX;

/// A finalized node as seen at the moment it entered the closed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode<N, C> {
    pub position: N,
    /// Accumulated step cost `g` from the start.
    pub cost: C,
    /// Estimated remaining cost `h`; zero for strategies without a heuristic.
    pub heuristic: C,
    /// The value the strategy ranked this node by when it was selected.
    pub total: C,
    pub predecessor: Option<N>,
}

/// How the open set is ordered and whether entries in it may be improved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ranking {
    /// Pure discovery order, giving FIFO behaviour.
    Discovery,
    /// Smallest accumulated cost `g`.
    Cost,
    /// Smallest heuristic `h`.
    Heuristic,
    /// Smallest `f = g + h`.
    CostPlusHeuristic,
}

impl Ranking {
    pub fn rank<C: Zero + Add<Output = C> + Copy>(self, cost: C, heuristic: C) -> C {
        match self {
            Ranking::Discovery => C::zero(),
            Ranking::Cost => cost,
            Ranking::Heuristic => heuristic,
            Ranking::CostPlusHeuristic => cost + heuristic,
        }
    }

    /// Whether a strictly better rank replaces an entry that is still open.
    pub fn relaxes(self) -> bool {
        matches!(self, Ranking::Cost | Ranking::CostPlusHeuristic)
    }
}

struct SmallestRankHolder<K> {
    rank: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestRankHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestRankHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestRankHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestRankHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest rank first, then the node that was discovered first. The arena index is
        // the discovery order and survives relaxation, which keeps runs deterministic.
        match other.rank.cmp(&self.rank) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Record<C> {
    parent: usize,
    cost: C,
    heuristic: C,
    rank: C,
    closed: bool,
}

fn snapshot<N, C>(
    parents: &FxIndexMap<N, Record<C>>,
    node: &N,
    record: &Record<C>,
) -> SearchNode<N, C>
where
    N: Clone,
    C: Copy,
{
    SearchNode {
        position: node.clone(),
        cost: record.cost,
        heuristic: record.heuristic,
        total: record.rank,
        predecessor: parents.get_index(record.parent).map(|(p, _)| p.clone()),
    }
}

/// Runs a best-first search from `start` until `success` holds for a selected node, returning
/// the closed set in finalization order. The last element is the node that satisfied
/// `success`. An empty vector means the open set ran dry first.
pub fn explore<N, C, FN, IN, FH, FS>(
    start: &N,
    ranking: Ranking,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Vec<SearchNode<N, C>>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy + Add<Output = C>,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    let mut parents: FxIndexMap<N, Record<C>> = FxIndexMap::default();
    let mut closed: Vec<SearchNode<N, C>> = Vec::new();

    let h = heuristic(start);
    let rank = ranking.rank(Zero::zero(), h);
    parents.insert(
        start.clone(),
        Record {
            parent: NO_PARENT,
            cost: Zero::zero(),
            heuristic: h,
            rank,
            closed: false,
        },
    );
    to_see.push(SmallestRankHolder { rank, index: 0 });

    while let Some(SmallestRankHolder { rank, index }) = to_see.pop() {
        let (node, cost) = {
            let Some((node, record)) = parents.get_index(index) else {
                continue;
            };
            // A relaxed node leaves its old heap entry behind; only the entry carrying the
            // current rank is live.
            if record.closed || rank != record.rank {
                continue;
            }
            if success(node) {
                closed.push(snapshot(&parents, node, record));
                debug!("Goal finalized after {} nodes", closed.len());
                return closed;
            }
            (node.clone(), record.cost)
        };

        for (successor, move_cost) in successors(&node) {
            let new_cost = cost + move_cost;
            let new_rank;
            let n;
            match parents.entry(successor) {
                Vacant(e) => {
                    let h = heuristic(e.key());
                    new_rank = ranking.rank(new_cost, h);
                    n = e.index();
                    e.insert(Record {
                        parent: index,
                        cost: new_cost,
                        heuristic: h,
                        rank: new_rank,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    if e.get().closed || !ranking.relaxes() {
                        continue;
                    }
                    let h = heuristic(e.key());
                    let candidate = ranking.rank(new_cost, h);
                    if e.get().rank > candidate {
                        new_rank = candidate;
                        n = e.index();
                        e.insert(Record {
                            parent: index,
                            cost: new_cost,
                            heuristic: h,
                            rank: candidate,
                            closed: false,
                        });
                    } else {
                        continue;
                    }
                }
            }
            to_see.push(SmallestRankHolder {
                rank: new_rank,
                index: n,
            });
        }

        if let Some((node, record)) = parents.get_index_mut(index) {
            record.closed = true;
            let record = *record;
            let node = node.clone();
            closed.push(snapshot(&parents, &node, &record));
        }
    }
    debug!(
        "Open set exhausted after closing {} nodes without reaching the goal",
        closed.len()
    );
    Vec::new()
}
