// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Adjacency;

/// Part of a route between two consecutive stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage<N> {
    pub from: N,
    pub to: N,
    pub distance: f64,
}

/// Breakdown of a route into [Stages](Stage) between stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary<N> {
    pub stages: Vec<Stage<N>>,
    pub total: f64,
}

/// Splits a route at stop nodes (as determined by `is_stop`), summing
/// edge weights between every pair of consecutive stops.
///
/// Intermediate nodes are folded into the surrounding stage. Nodes before
/// the first stop and after the last stop are not part of any stage and
/// don't count towards the total.
///
/// Returns `None` if the route uses an edge absent from the graph.
pub fn itinerary<G, F>(g: &G, route: &[G::Node], is_stop: F) -> Option<Itinerary<G::Node>>
where
    G: Adjacency,
    F: Fn(&G::Node) -> bool,
{
    let mut stages = Vec::new();
    let mut stage_start: Option<&G::Node> = None;
    let mut distance = 0.0;

    for pair in route.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let weight = g.weight(from, to)?;

        if stage_start.is_none() && is_stop(from) {
            stage_start = Some(from);
            distance = 0.0;
        }

        if let Some(start) = stage_start {
            distance += weight;

            if is_stop(to) {
                stages.push(Stage {
                    from: start.clone(),
                    to: to.clone(),
                    distance,
                });
                stage_start = Some(to);
                distance = 0.0;
            }
        }
    }

    let total = stages.iter().map(|s| s.distance).sum();
    Some(Itinerary { stages, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_route, Graph};

    // Upper-case nodes are stops.
    //
    //  A ─1─ x ─2─ y ─3─ B ─4─ C ─5─ z
    fn line() -> Graph<&'static str> {
        let mut g = Graph::new();
        g.connect("A", "x", 1.0);
        g.connect("x", "y", 2.0);
        g.connect("y", "B", 3.0);
        g.connect("B", "C", 4.0);
        g.connect("C", "z", 5.0);
        g
    }

    fn is_upper(n: &&str) -> bool {
        n.chars().all(|c| c.is_ascii_uppercase())
    }

    #[test]
    fn stages_between_stops() {
        let g = line();
        let route = find_route(&g, ["A", "C"]).unwrap();
        let it = itinerary(&g, route.nodes(), is_upper).unwrap();

        assert_eq!(
            it.stages,
            vec![
                Stage {
                    from: "A",
                    to: "B",
                    distance: 6.0
                },
                Stage {
                    from: "B",
                    to: "C",
                    distance: 4.0
                },
            ]
        );
        assert_eq!(it.total, 10.0);
        assert_eq!(it.total, route.cost());
    }

    #[test]
    fn nodes_outside_stops_are_ignored() {
        let g = line();
        let it = itinerary(&g, &["x", "y", "B", "C", "z"], is_upper).unwrap();

        assert_eq!(it.stages.len(), 1);
        assert_eq!(it.stages[0].from, "B");
        assert_eq!(it.stages[0].to, "C");
        assert_eq!(it.total, 4.0);
    }

    #[test]
    fn single_node_route() {
        let g = line();
        let it = itinerary(&g, &["A"], is_upper).unwrap();
        assert!(it.stages.is_empty());
        assert_eq!(it.total, 0.0);
    }

    #[test]
    fn missing_edge() {
        let g = line();
        assert_eq!(itinerary(&g, &["A", "C"], is_upper), None);
    }
}
