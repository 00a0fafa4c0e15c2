//! Per-route lengths and loads of a solution, for reporting next to the plot.
//!
//! Nothing here rejects a solution: loads are reported alongside the vehicle capacity,
//! not checked against it.

use anyhow::{anyhow, Context, Result};
use instances::raw::cvrp::{Problem, Route, Solution};
use instances::raw::metrics::{path_length, Euclidean};
use crate::nodes::Coords;
use crate::routes::route_polyline;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub number: Option<usize>,
    pub customers: usize,
    /// Euclidean length of the closed tour, depot to depot.
    pub length: f64,
    pub load: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionSummary {
    pub instance: String,
    pub capacity: Option<f64>,
    /// What the solution file's `Cost` line claims.
    pub reported_cost: Option<f64>,
    pub routes: Vec<RouteSummary>,
}

impl SolutionSummary {
    pub fn total_length(&self) -> f64 {
        self.routes.iter().map(|r| r.length).sum()
    }

    pub fn total_load(&self) -> f64 {
        self.routes.iter().map(|r| r.load).sum()
    }

    pub fn max_load(&self) -> f64 {
        self.routes.iter().map(|r| r.load).fold(0.0, f64::max)
    }
}

fn summarize_route(route: &Route, coords: &Coords, demand: &[f64]) -> Result<RouteSummary> {
    let tour = route_polyline(route, coords)?;
    let load = route.nodes.iter()
        .map(|&i| demand.get(i).copied().ok_or_else(|| anyhow!("node {} has no demand", i)))
        .sum::<Result<f64>>()?;
    Ok(RouteSummary {
        number: route.number,
        customers: route.nodes.len(),
        length: path_length(Euclidean(), &tour),
        load,
    })
}

pub fn summarize(instance: &str, problem: &Problem, solution: &Solution) -> Result<SolutionSummary> {
    let coords = Coords::from(problem.coords.as_slice());

    let routes = solution.routes.iter()
        .enumerate()
        .map(|(k, route)| {
            summarize_route(route, &coords, &problem.demand)
                .with_context(|| format!("route {} of {}", k + 1, instance))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SolutionSummary {
        instance: instance.to_string(),
        capacity: problem.header.capacity(),
        reported_cost: solution.cost,
        routes,
    })
}
