use std::borrow::Cow;
use std::path::Path;
use anyhow::Context;
use tracing::*;
use crate::Result;
use crate::raw::cvrp::{Route, Solution};
use super::{
  ParseInstance,
  nom_prelude::*,
  common::*,
};

/// Every `Route` line of a solution file.
#[derive(Debug, Copy, Clone)]
pub struct SolutionFmt<P>(pub P);

/// Only the `Route #N:` line(s) of a solution file.
#[derive(Debug, Copy, Clone)]
pub struct SelectedRouteFmt<P>(pub P, pub usize);

impl<P: AsRef<Path>> ParseInstance<SolutionFmt<P>> for Solution {
  fn parse(input: SolutionFmt<P>) -> Result<Self> {
    read_and_parse(input.0.as_ref(), RouteFilter::All)
  }
}

impl<P: AsRef<Path>> ParseInstance<SelectedRouteFmt<P>> for Solution {
  fn parse(input: SelectedRouteFmt<P>) -> Result<Self> {
    read_and_parse(input.0.as_ref(), RouteFilter::Numbered(input.1))
  }
}

fn read_and_parse(path: &Path, filter: RouteFilter) -> Result<Solution> {
  let data = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {:?}", path))?;
  parse_solution(&data, filter).with_context(|| format!("failed to load {:?}", path))
}


/// Which lines of a solution file are read as routes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RouteFilter {
  /// Lines starting with `Route`.
  All,
  /// Lines starting with `Route #N:`. The colon keeps `#2:` from matching `#20:`.
  Numbered(usize),
}

impl RouteFilter {
  pub fn prefix(&self) -> Cow<'static, str> {
    match self {
      RouteFilter::All => Cow::Borrowed("Route"),
      RouteFilter::Numbered(n) => Cow::Owned(format!("Route #{}:", n)),
    }
  }
}

/// Parses the contents of a solution file.
///
/// A qualifying line is split on whitespace; the first two tokens (label and number) are
/// dropped and the rest must be node indices. All other lines are skipped, except a
/// `Cost <value>` line which sets [`Solution::cost`].
pub fn parse_solution(input: &str, filter: RouteFilter) -> Result<Solution> {
  let prefix = filter.prefix();
  let mut solution = Solution::default();

  for (lineno, line) in input.lines().enumerate() {
    let line = line.trim();
    if line.starts_with(&*prefix) {
      let route = parse_line(parsers::route, line)
        .with_context(|| format!("bad route on line {}: {:?}", lineno + 1, line))?;
      trace!(lineno, ?route);
      solution.routes.push(route);
    } else {
      let cost: IResult<&str, f64, error::Error<&str>> = all_consuming(parsers::cost)(line);
      match cost {
        Ok((_, c)) => solution.cost = Some(c),
        Err(_) => trace!(lineno, line, "skipped"),
      }
    }
  }

  debug!(routes = solution.routes.len(), cost = ?solution.cost, ?filter, "solution parsed");
  Ok(solution)
}


mod parsers {
  use super::*;

  /// `#12:` -> 12
  fn route_number(label: &str) -> Option<usize> {
    let parsed: IResult<&str, usize, error::Error<&str>> =
      all_consuming(delimited(char('#'), usize_, char(':')))(label);
    parsed.ok().map(|(_, n)| n)
  }

  //  Route #3: 5 12 7
  pub fn route(i: &str) -> IResult<&str, Route, error::VerboseError<&str>> {
    let (i, _) = context("route label", token)(i)?;
    let (i, number) = context("route number", preceded(space1, map(token, route_number)))(i)?;
    let (i, nodes) = many0(preceded(space1, usize_))(i)?;
    let (i, _) = context("node index", eof)(i)?;
    Ok((i, Route { number, nodes }))
  }

  //  Cost 784
  pub fn cost<'a, E>(i: &'a str) -> IResult<&'a str, f64, E>
    where
      E: ParseError<&'a str>
  {
    preceded(pair(tag("Cost"), space1), double)(i)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  const SOL: &str = "\
Route #1: 21 31 19 17 13 7 26
Route #2: 12 1 16 30
Route #3: 27 24
Route #20: 8
Route #21: 9 10
Cost 784
";

  fn route(number: usize, nodes: &[usize]) -> Route {
    Route { number: Some(number), nodes: nodes.to_vec() }
  }

  #[test]
  fn all_routes() -> Result<()> {
    let s = parse_solution(SOL, RouteFilter::All)?;
    assert_eq!(s.routes, vec![
      route(1, &[21, 31, 19, 17, 13, 7, 26]),
      route(2, &[12, 1, 16, 30]),
      route(3, &[27, 24]),
      route(20, &[8]),
      route(21, &[9, 10]),
    ]);
    assert_eq!(s.cost, Some(784.0));
    Ok(())
  }

  #[test]
  fn numbered_route_needs_colon() -> Result<()> {
    let s = parse_solution(SOL, RouteFilter::Numbered(2))?;
    assert_eq!(s.routes, vec![route(2, &[12, 1, 16, 30])]);
    let s = parse_solution(SOL, RouteFilter::Numbered(20))?;
    assert_eq!(s.routes, vec![route(20, &[8])]);
    let s = parse_solution(SOL, RouteFilter::Numbered(4))?;
    assert!(s.routes.is_empty());
    Ok(())
  }

  #[test]
  fn repeated_number_is_drawn_twice() -> Result<()> {
    let s = parse_solution("Route #1: 1\nRoute #1: 2\n", RouteFilter::Numbered(1))?;
    assert_eq!(s.routes.len(), 2);
    Ok(())
  }

  #[test]
  fn unusual_labels() -> Result<()> {
    let s = parse_solution("  Route 7 3 4\nRoute #5:\nroute #1: 3\n", RouteFilter::All)?;
    assert_eq!(s.routes, vec![
      Route { number: None, nodes: vec![3, 4] },
      route(5, &[]),
    ]);
    assert_eq!(s.cost, None);
    Ok(())
  }

  #[test]
  fn malformed_routes_fail() {
    assert!(parse_solution("Route\n", RouteFilter::All).is_err());
    assert!(parse_solution("Route #1: 3 x\n", RouteFilter::All).is_err());
    assert!(parse_solution("Route #1: 3 -1\n", RouteFilter::All).is_err());
    assert!(parse_solution("Route #1: 2.5\n", RouteFilter::All).is_err());
    // the bad line is not selected, so it is never looked at
    assert!(parse_solution("Route #1: 3 x\n", RouteFilter::Numbered(2)).is_ok());
  }

  #[test]
  fn demo_solution() -> Result<()> {
    let s = Solution::parse(SolutionFmt("../../data/E/E-n8-k2.sol"))?;
    assert_eq!(s.routes.len(), 2);
    let s = Solution::parse(SelectedRouteFmt("../../data/E/E-n8-k2.sol", 2))?;
    assert_eq!(s.routes, vec![route(2, &[4, 5, 6, 7])]);
    Ok(())
  }
}
