// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use log::trace;

use crate::{Adjacency, RouteError};

#[derive(Debug, Clone)]
struct QueueItem<N> {
    at: N,
    cost: f64,
    seq: usize,
}

impl<N> PartialEq for QueueItem<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for QueueItem<N> {}

impl<N> PartialOrd for QueueItem<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for QueueItem<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs (and, among equal costs, earlier pushes) are considered
        // better ("higher"), and Rust's BinaryHeap is a max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Outcome of a successful [find_predecessors] call: the best known cost
/// of every reached node and the node from which that cost was achieved.
///
/// The maps are not pruned to the found path. Only the path to the searched
/// end node is guaranteed to be a shortest one.
#[derive(Debug, Clone, PartialEq)]
pub struct Predecessors<N: Eq + Hash> {
    came_from: HashMap<N, N>,
    costs: HashMap<N, f64>,
}

impl<N: Eq + Hash + Clone> Predecessors<N> {
    /// Returns the node preceding `node` on its best known path,
    /// or `None` for the start node and unreached nodes.
    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.came_from.get(node)
    }

    /// Returns the best known cost of reaching `node` from the start node.
    pub fn cost(&self, node: &N) -> Option<f64> {
        self.costs.get(node).copied()
    }

    /// Reconstructs the path from the start node to `end`, see [extract_path].
    pub fn path_to(&self, end: &N) -> Option<Vec<N>> {
        extract_path(self, end)
    }
}

/// Walks the predecessor links back from `end` to the start node
/// and returns the nodes in start-to-end order.
///
/// Returns `None` if `end` was never reached by the search.
/// If the search started at `end`, the result is `[end]`.
pub fn extract_path<N: Eq + Hash + Clone>(
    predecessors: &Predecessors<N>,
    end: &N,
) -> Option<Vec<N>> {
    if !predecessors.costs.contains_key(end) {
        return None;
    }

    let mut path = vec![end.clone()];
    let mut last = end;

    while let Some(nd) = predecessors.came_from.get(last) {
        path.push(nd.clone());
        last = nd;
    }

    path.reverse();
    Some(path)
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the cheapest way from `start` to `end`.
///
/// Returns [RouteError::NoRoute] if `end` can't be reached from `start`.
/// Nodes absent from the graph have no neighbors, so they are only reachable
/// from themselves.
pub fn find_predecessors<G: Adjacency>(
    g: &G,
    start: &G::Node,
    end: &G::Node,
) -> Result<Predecessors<G::Node>, RouteError> {
    find_predecessors_limited(g, start, end, usize::MAX)
}

/// Same as [find_predecessors], but fails with [RouteError::StepLimitExceeded]
/// once more than `step_limit` nodes have been expanded.
/// The recommended value is [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_predecessors_limited<G: Adjacency>(
    g: &G,
    start: &G::Node,
    end: &G::Node,
    step_limit: usize,
) -> Result<Predecessors<G::Node>, RouteError> {
    let mut queue: BinaryHeap<QueueItem<G::Node>> = BinaryHeap::default();
    let mut came_from: HashMap<G::Node, G::Node> = HashMap::default();
    let mut known_costs: HashMap<G::Node, f64> = HashMap::default();
    let mut steps: usize = 0;
    let mut seq: usize = 0;

    queue.push(QueueItem {
        at: start.clone(),
        cost: 0.0,
        seq,
    });
    known_costs.insert(start.clone(), 0.0);

    while let Some(item) = queue.pop() {
        // Stale entries are left in the queue when a cheaper way to a node is found
        if item.cost > known_costs.get(&item.at).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        if item.at == *end {
            trace!("reached end at cost {} after {} steps", item.cost, steps);
            return Ok(Predecessors {
                came_from,
                costs: known_costs,
            });
        }

        steps += 1;
        if steps > step_limit {
            trace!("giving up after {} steps", step_limit);
            return Err(RouteError::StepLimitExceeded);
        }

        g.for_each_neighbor(&item.at, |neighbor, weight| {
            let neighbor_cost = item.cost + weight;
            let is_better = known_costs
                .get(neighbor)
                .map_or(true, |&known| neighbor_cost < known);

            if is_better {
                seq += 1;
                known_costs.insert(neighbor.clone(), neighbor_cost);
                came_from.insert(neighbor.clone(), item.at.clone());
                queue.push(QueueItem {
                    at: neighbor.clone(),
                    cost: neighbor_cost,
                    seq,
                });
            }
        });
    }

    trace!("end not reachable, {} nodes expanded", steps);
    Err(RouteError::NoRoute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn triangle() -> HashMap<&'static str, HashMap<&'static str, f64>> {
        HashMap::from([
            ("A", HashMap::from([("B", 1.0), ("C", 4.0)])),
            ("B", HashMap::from([("A", 1.0), ("C", 1.0)])),
            ("C", HashMap::from([("A", 4.0), ("B", 1.0)])),
        ])
    }

    #[test]
    fn queue_pops_cheapest_first() {
        let item = |at: char, cost: f64, seq: usize| QueueItem { at, cost, seq };
        let mut queue = BinaryHeap::from([
            item('a', 3.0, 0),
            item('b', 1.0, 1),
            item('c', 1.0, 2),
            item('d', 0.5, 3),
        ]);

        let order: Vec<char> = std::iter::from_fn(|| queue.pop().map(|i| i.at)).collect();
        assert_eq!(order, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn predecessors_of_triangle() {
        let g = triangle();
        let p = find_predecessors(&g, &"A", &"C").unwrap();

        assert_eq!(p.cost(&"A"), Some(0.0));
        assert_eq!(p.cost(&"C"), Some(2.0));
        assert_eq!(p.predecessor(&"C"), Some(&"B"));
        assert_eq!(p.predecessor(&"B"), Some(&"A"));
        assert_eq!(p.predecessor(&"A"), None);
        assert_eq!(p.path_to(&"C"), Some(vec!["A", "B", "C"]));
    }

    #[test]
    fn start_equal_to_end() {
        let g = triangle();
        let p = find_predecessors(&g, &"B", &"B").unwrap();

        assert_eq!(p.cost(&"B"), Some(0.0));
        assert_eq!(extract_path(&p, &"B"), Some(vec!["B"]));
    }

    #[test]
    fn start_missing_from_graph() {
        let g = triangle();

        assert_eq!(find_predecessors(&g, &"X", &"A"), Err(RouteError::NoRoute));

        let p = find_predecessors(&g, &"X", &"X").unwrap();
        assert_eq!(p.path_to(&"X"), Some(vec!["X"]));
    }

    #[test]
    fn end_missing_from_graph() {
        let g = triangle();
        assert_eq!(find_predecessors(&g, &"A", &"X"), Err(RouteError::NoRoute));
    }

    #[test]
    fn extract_path_of_unreached_node() {
        let g = triangle();
        let p = find_predecessors(&g, &"A", &"A").unwrap();
        assert_eq!(extract_path(&p, &"C"), None);
    }

    #[test]
    fn stale_entries_are_skipped() {
        // 4 is queued directly at 10 first, then via 2 and 3 at 3;
        // the stale entry is popped before 5 and must not relax anything
        let g: HashMap<u32, HashMap<u32, f64>> = HashMap::from([
            (1, HashMap::from([(2, 1.0), (4, 10.0)])),
            (2, HashMap::from([(1, 1.0), (3, 1.0)])),
            (3, HashMap::from([(2, 1.0), (4, 1.0)])),
            (4, HashMap::from([(1, 10.0), (3, 1.0), (5, 20.0)])),
            (5, HashMap::from([(4, 20.0)])),
        ]);

        let p = find_predecessors(&g, &1, &5).unwrap();
        assert_eq!(p.cost(&4), Some(3.0));
        assert_eq!(p.cost(&5), Some(23.0));
        assert_eq!(p.path_to(&5), Some(vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn zero_weight_edges() {
        let g: HashMap<u32, HashMap<u32, f64>> = HashMap::from([
            (1, HashMap::from([(2, 0.0), (3, 0.0)])),
            (2, HashMap::from([(1, 0.0), (3, 0.0)])),
            (3, HashMap::from([(1, 0.0), (2, 0.0)])),
        ]);

        let p = find_predecessors(&g, &1, &3).unwrap();
        assert_eq!(p.cost(&3), Some(0.0));
        assert_eq!(p.predecessor(&1), None);
        assert_eq!(p.path_to(&3).unwrap().first(), Some(&1));
    }

    #[test]
    fn step_limit() {
        let g: HashMap<u32, HashMap<u32, f64>> = (0..100)
            .map(|i| {
                let mut neighbors = HashMap::new();
                if i > 0 {
                    neighbors.insert(i - 1, 1.0);
                }
                if i < 99 {
                    neighbors.insert(i + 1, 1.0);
                }
                (i, neighbors)
            })
            .collect();

        assert_eq!(
            find_predecessors_limited(&g, &0, &99, 50),
            Err(RouteError::StepLimitExceeded),
        );

        let p = find_predecessors_limited(&g, &0, &99, 99).unwrap();
        assert_eq!(p.cost(&99), Some(99.0));
        assert_eq!(p.path_to(&99).map(|p| p.len()), Some(100));

        // Reaching the start node requires no expansions
        assert!(find_predecessors_limited(&g, &7, &7, 0).is_ok());
    }
}
