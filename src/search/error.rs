// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Recommended number of allowed node expansions in [find_route_limited](crate::find_route_limited)
/// and [find_predecessors_limited](crate::find_predecessors_limited)
/// before [RouteError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Reasons why a route could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// There is no path between the start and end nodes (of at least one leg).
    ///
    /// Nodes absent from the graph are simply unreachable,
    /// unless a leg starts and ends at the same node.
    #[error("no route")]
    NoRoute,

    /// A route needs at least two waypoints.
    #[error("expected at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),

    /// Route search has exceeded its limit of steps.
    /// Either the nodes are really far apart, or no route exists.
    ///
    /// Concluding that no route exists requires traversing the whole connected
    /// component of the start node. The step limit bounds that work.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}
