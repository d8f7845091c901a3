// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Read-only view of a weighted graph, as consumed by the route search.
///
/// Implemented for [Graph] and for plain nested maps
/// (`HashMap<N, HashMap<N, f64>>` and `BTreeMap<N, BTreeMap<N, f64>>`),
/// so callers which already keep their graph in such a map can pass it directly.
///
/// Weights must be finite and non-negative. Nodes without an adjacency entry
/// are treated as having no neighbors.
pub trait Adjacency {
    type Node: Eq + Hash + Clone;

    /// Calls `f` with every neighbor of `node` and the weight of the edge leading to it.
    fn for_each_neighbor<F: FnMut(&Self::Node, f64)>(&self, node: &Self::Node, f: F);

    /// Returns the weight of the edge from one node to another, if such an edge exists.
    fn weight(&self, from: &Self::Node, to: &Self::Node) -> Option<f64>;
}

impl<N, S, T> Adjacency for HashMap<N, HashMap<N, f64, T>, S>
where
    N: Eq + Hash + Clone,
    S: BuildHasher,
    T: BuildHasher,
{
    type Node = N;

    fn for_each_neighbor<F: FnMut(&N, f64)>(&self, node: &N, mut f: F) {
        if let Some(neighbors) = self.get(node) {
            neighbors.iter().for_each(|(to, &weight)| f(to, weight));
        }
    }

    fn weight(&self, from: &N, to: &N) -> Option<f64> {
        self.get(from)
            .and_then(|neighbors| neighbors.get(to))
            .copied()
    }
}

impl<N> Adjacency for BTreeMap<N, BTreeMap<N, f64>>
where
    N: Ord + Hash + Clone,
{
    type Node = N;

    fn for_each_neighbor<F: FnMut(&N, f64)>(&self, node: &N, mut f: F) {
        if let Some(neighbors) = self.get(node) {
            neighbors.iter().for_each(|(to, &weight)| f(to, weight));
        }
    }

    fn weight(&self, from: &N, to: &N) -> Option<f64> {
        self.get(from)
            .and_then(|neighbors| neighbors.get(to))
            .copied()
    }
}

/// Represents an undirected network as a set of nodes
/// and weighted connections between them.
///
/// Every connection is stored in both directions, see [Graph::connect].
/// Iteration order is deterministic (by node id), so repeated searches over
/// the same graph always break cost ties the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<N: Ord>(BTreeMap<N, BTreeMap<N, f64>>);

impl<N: Ord> Default for Graph<N> {
    fn default() -> Self {
        Self(BTreeMap::default())
    }
}

impl<N: Ord + Clone> Graph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all node ids in the graph.
    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.0.keys()
    }

    /// Checks whether a node with the provided id exists.
    pub fn contains(&self, id: &N) -> bool {
        self.0.contains_key(id)
    }

    /// Adds a node without any connections. Existing nodes are left untouched.
    pub fn add_node(&mut self, id: N) {
        self.0.entry(id).or_default();
    }

    /// Deletes a node with a given `id`, together with all of its connections.
    pub fn delete_node(&mut self, id: &N) {
        if let Some(neighbors) = self.0.remove(id) {
            for neighbor in neighbors.keys() {
                if let Some(back) = self.0.get_mut(neighbor) {
                    back.remove(id);
                }
            }
        }
    }

    /// Returns an iterator over all neighbors of a node and the weights of connections to them.
    pub fn get_edges<'a>(&'a self, from: &N) -> impl Iterator<Item = (&'a N, f64)> + 'a {
        self.0
            .get(from)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(to, &weight)| (to, weight)))
    }

    /// Gets the weight of a connection between two nodes.
    /// If such a connection doesn't exist, returns [f64::INFINITY].
    pub fn get_edge(&self, from: &N, to: &N) -> f64 {
        self.0
            .get(from)
            .and_then(|neighbors| neighbors.get(to))
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Creates or updates a connection between two nodes, in both directions.
    /// Missing nodes are created.
    ///
    /// `weight` must be finite and non-negative.
    pub fn connect(&mut self, a: N, b: N, weight: f64) {
        assert!(
            weight.is_finite() && weight >= 0.0,
            "connection weight must be finite and non-negative, got {}",
            weight
        );

        self.0
            .entry(a.clone())
            .or_default()
            .insert(b.clone(), weight);
        self.0.entry(b).or_default().insert(a, weight);
    }

    /// Removes a connection between two nodes, in both directions.
    pub fn disconnect(&mut self, a: &N, b: &N) {
        if let Some(neighbors) = self.0.get_mut(a) {
            neighbors.remove(b);
        }
        if let Some(neighbors) = self.0.get_mut(b) {
            neighbors.remove(a);
        }
    }
}

impl<N: Ord + Clone> From<BTreeMap<N, BTreeMap<N, f64>>> for Graph<N> {
    /// Wraps an existing adjacency map. Missing reverse connections are added,
    /// so the resulting graph is always symmetric.
    fn from(map: BTreeMap<N, BTreeMap<N, f64>>) -> Self {
        let mut g = Self(BTreeMap::default());
        for (from, neighbors) in map {
            g.add_node(from.clone());
            for (to, weight) in neighbors {
                // Keep the first-seen weight of an asymmetric pair
                let weight = match g.0.get(&to).and_then(|back| back.get(&from)) {
                    Some(&existing) => existing,
                    None => weight,
                };
                g.connect(from.clone(), to, weight);
            }
        }
        g
    }
}

impl<N: Ord + Hash + Clone> Adjacency for Graph<N> {
    type Node = N;

    fn for_each_neighbor<F: FnMut(&N, f64)>(&self, node: &N, f: F) {
        self.0.for_each_neighbor(node, f)
    }

    fn weight(&self, from: &N, to: &N) -> Option<f64> {
        self.0.weight(from, to)
    }
}
