// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use log::debug;

use super::shortest::find_predecessors_limited;
use crate::{Adjacency, RouteError};

/// Continuous walk through a graph, from the first to the last waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<N> {
    nodes: Vec<N>,
    cost: f64,
}

impl<N> Route<N> {
    /// Nodes of the route, in travel order. Never empty,
    /// and no two consecutive nodes are the same.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Total weight of all edges along the route.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Consumes the route, returning its nodes.
    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}

/// Finds the cheapest route between two nodes.
///
/// Equivalent to [find_route] with `[start, end]` as waypoints.
pub fn find_shortest_path<G: Adjacency>(
    g: &G,
    start: &G::Node,
    end: &G::Node,
) -> Result<Route<G::Node>, RouteError> {
    find_route(g, [start.clone(), end.clone()])
}

/// Finds the cheapest route visiting all `waypoints` in the provided order.
///
/// Every leg (pair of consecutive waypoints) is searched separately,
/// and the legs are joined at their shared waypoint. If any of the legs
/// is unreachable, the whole call fails with [RouteError::NoRoute].
pub fn find_route<G, I>(g: &G, waypoints: I) -> Result<Route<G::Node>, RouteError>
where
    G: Adjacency,
    I: IntoIterator<Item = G::Node>,
{
    find_route_limited(g, waypoints, usize::MAX)
}

/// Same as [find_route], but every leg search is bounded by `step_limit`
/// node expansions, see [find_predecessors_limited](crate::find_predecessors_limited).
pub fn find_route_limited<G, I>(
    g: &G,
    waypoints: I,
    step_limit: usize,
) -> Result<Route<G::Node>, RouteError>
where
    G: Adjacency,
    I: IntoIterator<Item = G::Node>,
{
    let waypoints: Vec<G::Node> = waypoints.into_iter().collect();
    if waypoints.len() < 2 {
        return Err(RouteError::TooFewWaypoints(waypoints.len()));
    }

    let mut nodes: Vec<G::Node> = Vec::new();
    let mut cost: f64 = 0.0;

    for (leg, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);

        let predecessors = match find_predecessors_limited(g, from, to, step_limit) {
            Ok(p) => p,
            Err(e) => {
                debug!("leg {} of {}: {}", leg + 1, waypoints.len() - 1, e);
                return Err(e);
            }
        };

        let path = predecessors.path_to(to).ok_or(RouteError::NoRoute)?;
        let leg_cost = predecessors.cost(to).ok_or(RouteError::NoRoute)?;

        // Every leg after the first starts where the previous one ended
        let skip = if leg == 0 { 0 } else { 1 };
        nodes.extend(path.into_iter().skip(skip));
        cost += leg_cost;
    }

    debug!(
        "found route through {} waypoints: {} nodes, cost {}",
        waypoints.len(),
        nodes.len(),
        cost
    );
    Ok(Route { nodes, cost })
}

/// Sums the weights of edges between consecutive `nodes`.
///
/// Returns `None` if any two consecutive nodes are not connected.
pub fn path_cost<G: Adjacency>(g: &G, nodes: &[G::Node]) -> Option<f64> {
    nodes
        .windows(2)
        .map(|pair| g.weight(&pair[0], &pair[1]))
        .sum()
}
