use std::path::Path;
use anyhow::{anyhow, Context, Result};
use tracing::*;
use instances::{ParseInstance, SolutionFmt, SelectedRouteFmt};
use instances::raw::cvrp::{Route, Solution};
use crate::canvas::{Canvas, Point};
use crate::nodes::Coords;

fn route_label(route: &Route) -> String {
    match route.number {
        Some(n) => format!("#{}", n),
        None => "(unnumbered)".to_string(),
    }
}

/// The closed tour of `route`: depot, each visited node in order, depot again.
pub fn route_polyline(route: &Route, coords: &Coords) -> Result<Vec<Point>> {
    let depot = coords.depot().ok_or_else(|| anyhow!("problem has no nodes, so no depot"))?;
    let mut line = Vec::with_capacity(route.nodes.len() + 2);
    line.push(depot);
    for &i in &route.nodes {
        let p = coords.point(i)
            .ok_or_else(|| anyhow!("node {} out of range (problem has {} nodes)", i, coords.len()))?;
        line.push(p);
    }
    line.push(depot);
    Ok(line)
}

/// Draws each route as a scatter of its tour plus a line through it, one colour per route.
pub fn draw_routes(routes: &[Route], coords: &Coords, canvas: &mut impl Canvas) -> Result<()> {
    let lines = routes.iter()
        .map(|r| route_polyline(r, coords).with_context(|| format!("cannot draw route {}", route_label(r))))
        .collect::<Result<Vec<_>>>()?;

    for line in &lines {
        trace!(?line, "route");
        canvas.scatter(line);
        canvas.plot(line);
    }
    Ok(())
}

/// Draws every route of the solution file at `path`.
pub fn plot_routes(path: impl AsRef<Path>, coords: &Coords, canvas: &mut impl Canvas) -> Result<Solution> {
    let solution = Solution::parse(SolutionFmt(path.as_ref()))?;
    draw_routes(&solution.routes, coords, canvas)?;
    info!(routes = solution.routes.len(), "routes drawn");
    Ok(solution)
}

/// Draws only the `Route #route_num:` line(s) of the solution file at `path`.
pub fn plot_route(path: impl AsRef<Path>, coords: &Coords, canvas: &mut impl Canvas, route_num: usize) -> Result<Solution> {
    let solution = Solution::parse(SelectedRouteFmt(path.as_ref(), route_num))?;
    if solution.routes.is_empty() {
        warn!(route_num, path=?path.as_ref(), "route not found in solution file");
    }
    draw_routes(&solution.routes, coords, canvas)?;
    Ok(solution)
}
