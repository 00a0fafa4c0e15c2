use std::path::Path;
use anyhow::Context;
use tracing::*;
use crate::Result;
use crate::raw::cvrp::Problem;
use super::{
  ParseInstance,
  nom_prelude::*,
  common::*,
};

#[derive(Debug, Copy, Clone)]
pub struct CvrplibFmt<P>(pub P);

impl<P: AsRef<Path>> ParseInstance<CvrplibFmt<P>> for Problem {
  fn parse(path: CvrplibFmt<P>) -> Result<Problem> {
    let path = path.0.as_ref();
    let data = std::fs::read_to_string(path)
      .with_context(|| format!("failed to read {:?}", path))?;
    parse_problem(&data).with_context(|| format!("failed to load {:?}", path))
  }
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Section {
  Seek,
  Coords,
  Demand,
  Done,
}

/// Marker lines and the section each one switches to, whatever the current section is.
const MARKERS: [(&str, Section); 3] = [
  ("NODE_COORD_SECTION", Section::Coords),
  ("DEMAND_SECTION", Section::Demand),
  ("DEPOT_SECTION", Section::Done),
];

fn marker(line: &str) -> Option<Section> {
  MARKERS.iter().find(|(m, _)| *m == line).map(|&(_, s)| s)
}

/// Parses the contents of a problem file.
///
/// Lines before `NODE_COORD_SECTION` which are not `KEY : VALUE` header entries are skipped.
/// Inside the coordinate and demand sections every line must be `<index> <x> <y>` and
/// `<index> <demand>` respectively. Everything from `DEPOT_SECTION` on is ignored.
pub fn parse_problem(input: &str) -> Result<Problem> {
  let mut section = Section::Seek;
  let mut problem = Problem::default();

  for (lineno, line) in input.lines().enumerate() {
    let line = line.trim();
    if let Some(next) = marker(line) {
      trace!(?section, ?next, lineno, "section marker");
      section = next;
      if section == Section::Done { break }
      continue;
    }

    match section {
      Section::Seek => {
        match parsers::header_entry::<error::Error<&str>>(line) {
          Ok((_, (key, value))) => problem.header.push(key, value),
          Err(_) => trace!(lineno, line, "skipped"),
        }
      }
      Section::Coords => {
        let (_, x, y) = parse_line(parsers::coord_line, line)
          .with_context(|| format!("bad coordinate on line {}: {:?}", lineno + 1, line))?;
        problem.coords.push((x, y));
      }
      Section::Demand => {
        let (_, q) = parse_line(parsers::demand_line, line)
          .with_context(|| format!("bad demand on line {}: {:?}", lineno + 1, line))?;
        problem.demand.push(q);
      }
      Section::Done => break,
    }
  }

  debug!(nodes = problem.coords.len(), demands = problem.demand.len(), name = ?problem.header.name(), "problem parsed");
  Ok(problem)
}


mod parsers {
  use super::*;

  //  NAME : A-n32-k5
  pub fn header_entry<'a, E>(i: &'a str) -> IResult<&'a str, (&'a str, &'a str), E>
    where
      E: ParseError<&'a str>
  {
    let key = take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_');
    let sep = tuple((space0, char(':'), space0));
    all_consuming(separated_pair(key, sep, rest))(i)
  }

  //  7 4.832 -8.990
  pub fn coord_line(i: &str) -> IResult<&str, (f64, f64, f64), error::VerboseError<&str>> {
    tuple((
      context("node index", double),
      context("x coordinate", preceded(space1, double)),
      context("y coordinate", preceded(space1, double)),
    ))(i)
  }

  //  7 19
  pub fn demand_line(i: &str) -> IResult<&str, (f64, f64), error::VerboseError<&str>> {
    tuple((
      context("node index", double),
      context("demand", preceded(space1, double)),
    ))(i)
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  const SMALL: &str = "\
NAME : tiny
COMMENT : three nodes
TYPE : CVRP
DIMENSION : 3
CAPACITY : 10
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
EOF
";

  #[test]
  fn small_instance() -> Result<()> {
    let p = parse_problem(SMALL)?;
    assert_eq!(p.coords, vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    assert_eq!(p.demand, vec![0.0, 4.0, 5.0]);
    assert_eq!(p.depot(), Some((0.0, 0.0)));
    let entries: Vec<_> = p.header.entries().collect();
    assert_eq!(entries, vec![
      ("NAME", "tiny"),
      ("COMMENT", "three nodes"),
      ("TYPE", "CVRP"),
      ("DIMENSION", "3"),
      ("CAPACITY", "10"),
    ]);
    assert_eq!(p.header.dimension(), Some(3));
    assert_eq!(p.header.capacity(), Some(10.0));
    Ok(())
  }

  #[test]
  fn depot_section_stops_parsing() -> Result<()> {
    let input = "NODE_COORD_SECTION\n1 0 0\nDEMAND_SECTION\n1 0\nDEPOT_SECTION\n2 7\nnot even numbers\n";
    let p = parse_problem(input)?;
    assert_eq!(p.demand, vec![0.0]);
    Ok(())
  }

  #[test]
  fn markers_are_trimmed_and_exact() -> Result<()> {
    let input = "  NODE_COORD_SECTION \r\n 1\t3 4 \r\nDEMAND_SECTION:\n";
    // `DEMAND_SECTION:` is not a marker, so it is read as a (bad) coordinate line
    let err = parse_problem(input).unwrap_err();
    assert!(format!("{:#}", err).contains("line 3"));

    let p = parse_problem("  NODE_COORD_SECTION \r\n 1\t3 4 \r\n")?;
    assert_eq!(p.coords, vec![(3.0, 4.0)]);
    Ok(())
  }

  #[test]
  fn tolerates_junk_before_coordinates() -> Result<()> {
    let input = "# generated\n\nsome free text\nNAME: x\nNODE_COORD_SECTION\n1 -2.5 1e2\n";
    let p = parse_problem(input)?;
    assert_eq!(p.coords, vec![(-2.5, 100.0)]);
    assert_eq!(p.header.name(), Some("x"));
    assert_eq!(p.header.len(), 1);
    Ok(())
  }

  #[test]
  fn wrong_token_count_fails() {
    assert!(parse_problem("NODE_COORD_SECTION\n1 2\n").is_err());
    assert!(parse_problem("NODE_COORD_SECTION\n1 2 3 4\n").is_err());
    assert!(parse_problem("DEMAND_SECTION\n1 2 3\n").is_err());
    assert!(parse_problem("NODE_COORD_SECTION\n1 2 y\n").is_err());
    assert!(parse_problem("NODE_COORD_SECTION\n\n").is_err());
  }

  #[test]
  fn no_sections() -> Result<()> {
    let p = parse_problem("")?;
    assert!(p.coords.is_empty() && p.demand.is_empty() && p.header.is_empty());
    Ok(())
  }

  #[test]
  fn missing_file() {
    let err = Problem::parse(CvrplibFmt("does/not/exist.vrp")).unwrap_err();
    assert!(format!("{}", err).contains("exist.vrp"));
  }

  #[test]
  fn demo_instance() -> Result<()> {
    let p = Problem::parse(CvrplibFmt("../../data/E/E-n8-k2.vrp"))?;
    assert_eq!(p.coords.len(), 8);
    assert_eq!(p.demand.len(), 8);
    assert_eq!(p.header.dimension(), Some(p.coords.len()));
    Ok(())
  }

  proptest! {
    #[test]
    fn coordinates_in_file_order(
      coords in prop::collection::vec((-1000.0..1000.0f64, -1000.0..1000.0f64), 0..40),
      n_demand in 0..40usize,
    ) {
      let mut input = String::from("NAME : generated\nNODE_COORD_SECTION\n");
      for (k, (x, y)) in coords.iter().enumerate() {
        input.push_str(&format!("{} {} {}\n", k + 1, x, y));
      }
      input.push_str("DEMAND_SECTION\n");
      for k in 0..n_demand {
        input.push_str(&format!("{} {}\n", k + 1, k));
      }
      input.push_str("DEPOT_SECTION\n1\n-1\nEOF\n");

      let p = parse_problem(&input).unwrap();
      prop_assert_eq!(p.coords, coords);
      prop_assert_eq!(p.demand.len(), n_demand);
    }
  }
}
