use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn};
use serde::Deserialize;
use waypath;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] LoadError);

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid weight {weight} between {from:?} and {to:?}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },
}

#[derive(Parser)]
struct Cli {
    /// The path to a graph exported by the route mapper (routes.json)
    graph_file: PathBuf,

    /// Waypoints to visit, in order; node names or node ids
    #[arg(required = true, num_args = 2..)]
    waypoints: Vec<String>,

    /// Multiplier applied to all printed distances
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Unit printed after every distance
    #[arg(long, default_value = "")]
    unit: String,

    /// Maximum number of nodes expanded while searching a single leg
    #[arg(long, default_value_t = waypath::DEFAULT_STEP_LIMIT)]
    step_limit: usize,
}

/// Subset of the route mapper export used for routing.
/// Other keys (like the drawn "circles") are ignored.
#[derive(Debug, Deserialize)]
struct Export {
    vertexes: BTreeMap<String, BTreeMap<String, f64>>,

    #[serde(default)]
    names: BTreeMap<String, String>,
}

struct MappedGraph {
    graph: waypath::Graph<String>,
    names: BTreeMap<String, String>,
}

impl MappedGraph {
    /// Maps a waypoint given by name or by id to a node id.
    fn resolve(&self, waypoint: &str) -> String {
        if let Some((id, _)) = self.names.iter().find(|(_, name)| *name == waypoint) {
            return id.clone();
        }

        if !self.graph.contains(&waypoint.to_string()) {
            warn!("{:?} is neither a known name nor a node id", waypoint);
        }
        waypoint.to_string()
    }

    fn display_name<'a>(&'a self, id: &'a String) -> &'a str {
        self.names.get(id).unwrap_or(id)
    }

    /// Splits a route into stages between named nodes and requested waypoints.
    fn itinerary(
        &self,
        route: &waypath::Route<String>,
        waypoints: &[String],
    ) -> Option<waypath::Itinerary<String>> {
        let is_stop = |id: &String| self.names.contains_key(id) || waypoints.contains(id);
        waypath::itinerary(&self.graph, route.nodes(), is_stop)
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let mapped = load_graph(&cli.graph_file)?;
    info!(
        "loaded {} nodes from {}",
        mapped.graph.len(),
        cli.graph_file.display()
    );

    let waypoints: Vec<String> = cli.waypoints.iter().map(|w| mapped.resolve(w)).collect();
    let route =
        waypath::find_route_limited(&mapped.graph, waypoints.iter().cloned(), cli.step_limit)?;

    let itinerary = mapped
        .itinerary(&route, &waypoints)
        .ok_or("route uses a connection absent from the graph")?;

    write_itinerary(
        &mut io::stdout().lock(),
        &mapped,
        &route,
        &itinerary,
        cli.scale,
        &cli.unit,
    )?;

    Ok(())
}

/// Prints the route, every stage with its distance and the total,
/// with distances multiplied by `scale` and suffixed with `unit`.
fn write_itinerary<W: io::Write>(
    w: &mut W,
    mapped: &MappedGraph,
    route: &waypath::Route<String>,
    itinerary: &waypath::Itinerary<String>,
    scale: f64,
    unit: &str,
) -> io::Result<()> {
    let path: Vec<&str> = route
        .nodes()
        .iter()
        .map(|id| mapped.display_name(id))
        .collect();
    writeln!(w, "route: {}", path.join(" -> "))?;

    for stage in &itinerary.stages {
        writeln!(
            w,
            "{} -> {}: {:.2}{}",
            mapped.display_name(&stage.from),
            mapped.display_name(&stage.to),
            stage.distance * scale,
            unit,
        )?;
    }
    writeln!(w, "total: {:.2}{}", itinerary.total * scale, unit)
}

fn load_graph<P: AsRef<Path>>(path: P) -> Result<MappedGraph, GraphLoadError> {
    File::open(path.as_ref())
        .map_err(LoadError::from)
        .and_then(|f| parse_graph(io::BufReader::new(f)))
        .map_err(|e| GraphLoadError(PathBuf::from(path.as_ref()), e))
}

fn parse_graph<R: io::Read>(reader: R) -> Result<MappedGraph, LoadError> {
    let export: Export = serde_json::from_reader(reader)?;

    for (from, neighbors) in &export.vertexes {
        for (to, &weight) in neighbors {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LoadError::InvalidWeight {
                    from: from.clone(),
                    to: to.clone(),
                    weight,
                });
            }
        }
    }

    Ok(MappedGraph {
        graph: waypath::Graph::from(export.vertexes),
        names: export.names,
    })
}
