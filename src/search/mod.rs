// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod route;
mod shortest;

pub use error::{RouteError, DEFAULT_STEP_LIMIT};
pub use route::{find_route, find_route_limited, find_shortest_path, path_cost, Route};
pub use shortest::{extract_path, find_predecessors, find_predecessors_limited, Predecessors};
