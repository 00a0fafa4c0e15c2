use std::path::Path;
use anyhow::{bail, Result};
use tracing::*;
use instances::{ParseInstance, CvrplibFmt};
use instances::raw::cvrp::Problem;
use crate::canvas::{Canvas, Point};

/// How far below its marker a node label is placed, in plot units.
pub const LABEL_OFFSET: f64 = 3.0;

/// Node coordinates as two parallel sequences; position 0 is the depot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coords {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Coords {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, idx: usize) -> Option<Point> {
        Some((*self.x.get(idx)?, *self.y.get(idx)?))
    }

    pub fn depot(&self) -> Option<Point> {
        self.point(0)
    }
}

impl From<&[Point]> for Coords {
    fn from(points: &[Point]) -> Self {
        let (x, y) = points.iter().copied().unzip();
        Coords { x, y }
    }
}

/// Loads the problem file at `path` and draws its nodes; see [`draw_nodes`].
pub fn plot_nodes(path: impl AsRef<Path>, canvas: &mut impl Canvas) -> Result<Coords> {
    let problem = Problem::parse(CvrplibFmt(path.as_ref()))?;
    draw_nodes(&problem, canvas)
}

/// Scatters every node, then labels node `i` (0-based) with `i + 1` for each entry of the
/// demand list.
pub fn draw_nodes(problem: &Problem, canvas: &mut impl Canvas) -> Result<Coords> {
    let coords = Coords::from(problem.coords.as_slice());
    canvas.scatter(&problem.coords);

    if problem.demand.len() > coords.len() {
        bail!("{} demand entries but only {} node coordinates", problem.demand.len(), coords.len());
    }
    for (i, &(x, y)) in problem.coords.iter().take(problem.demand.len()).enumerate() {
        canvas.annotate(&(i + 1).to_string(), (x, y), (x, y - LABEL_OFFSET));
    }

    debug!(nodes = coords.len(), labelled = problem.demand.len(), "nodes drawn");
    Ok(coords)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Element, Figure};
    use crate::tests::scratch_file;

    fn labels(fig: &Figure) -> Vec<(String, Point, Point)> {
        fig.elements().iter()
            .filter_map(|e| match e {
                Element::Annotation { text, anchor, pos } => Some((text.clone(), *anchor, *pos)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn labels_follow_file_position() -> Result<()> {
        let path = scratch_file("nodes.vrp", "\
NAME : three
NODE_COORD_SECTION
1 0.0 0.0
2 1.0 0.0
3 1.0 1.0
DEMAND_SECTION
1 0
2 4
3 5
DEPOT_SECTION
1
-1
");
        let mut fig = Figure::new();
        let coords = plot_nodes(&path, &mut fig)?;
        assert_eq!(coords.x, vec![0.0, 1.0, 1.0]);
        assert_eq!(coords.y, vec![0.0, 0.0, 1.0]);

        assert_eq!(fig.elements()[0], Element::Scatter {
            points: vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)],
            color: 0,
        });
        assert_eq!(labels(&fig), vec![
            ("1".to_string(), (0.0, 0.0), (0.0, -3.0)),
            ("2".to_string(), (1.0, 0.0), (1.0, -3.0)),
            ("3".to_string(), (1.0, 1.0), (1.0, -2.0)),
        ]);
        Ok(())
    }

    #[test]
    fn only_nodes_with_demand_are_labelled() -> Result<()> {
        let problem = instances::parse_problem("NODE_COORD_SECTION\n1 0 0\n2 5 5\nDEMAND_SECTION\n1 0\n")?;
        let mut fig = Figure::new();
        let coords = draw_nodes(&problem, &mut fig)?;
        assert_eq!(coords.len(), 2);
        assert_eq!(labels(&fig).len(), 1);
        Ok(())
    }

    #[test]
    fn more_demands_than_nodes() -> Result<()> {
        let problem = instances::parse_problem("NODE_COORD_SECTION\n1 0 0\nDEMAND_SECTION\n1 0\n2 3\n")?;
        assert!(draw_nodes(&problem, &mut Figure::new()).is_err());
        Ok(())
    }

    #[test]
    fn missing_problem_file() {
        assert!(plot_nodes("does/not/exist.vrp", &mut Figure::new()).is_err());
    }

    #[test]
    fn coords_accessors() {
        let c = Coords::from(&[(1.0, 2.0), (3.0, 4.0)][..]);
        assert_eq!(c.depot(), Some((1.0, 2.0)));
        assert_eq!(c.point(1), Some((3.0, 4.0)));
        assert_eq!(c.point(2), None);
        assert!(Coords::default().depot().is_none());
    }
}
