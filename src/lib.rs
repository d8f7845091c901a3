// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest paths and multi-waypoint routes over undirected weighted graphs.
//!
//! A graph is anything implementing [Adjacency]: the provided [Graph],
//! or a plain nested map from node id to neighbor id to (finite, non-negative) weight.
//! Routes are found with Dijkstra's algorithm. A route through several waypoints
//! is built leg by leg, and fails as a whole if any leg is unreachable.
//!
//! # Example
//!
//! ```
//! let mut g = waypath::Graph::new();
//! g.connect("A", "B", 1.0);
//! g.connect("B", "C", 1.0);
//! g.connect("A", "C", 4.0);
//!
//! let route = waypath::find_shortest_path(&g, &"A", &"C").expect("A and C are connected");
//! assert_eq!(route.nodes(), ["A", "B", "C"]);
//! assert_eq!(route.cost(), 2.0);
//!
//! let route = waypath::find_route(&g, ["C", "A", "B"]).expect("all waypoints are connected");
//! assert_eq!(route.nodes(), ["C", "B", "A", "B"]);
//!
//! g.add_node("D");
//! assert_eq!(
//!     waypath::find_shortest_path(&g, &"A", &"D"),
//!     Err(waypath::RouteError::NoRoute),
//! );
//! ```

mod graph;
mod itinerary;
mod search;

pub use graph::{Adjacency, Graph};
pub use itinerary::{itinerary, Itinerary, Stage};
pub use search::{
    extract_path, find_predecessors, find_predecessors_limited, find_route, find_route_limited,
    find_shortest_path, path_cost, Predecessors, Route, RouteError, DEFAULT_STEP_LIMIT,
};
