mod cvrplib;
pub use cvrplib::{CvrplibFmt, parse_problem};

mod solution;
pub use solution::{SolutionFmt, SelectedRouteFmt, parse_solution, RouteFilter};


mod nom_prelude {
  pub use nom::{
    IResult,
    error::{
      self,
      ParseError,
      FromExternalError,
      context,
    },
    sequence::*,
    multi::*,
    combinator::*,
    character::complete::*,
    bytes::complete::{tag, take_till1, take_while1},
    number::complete::double,
    Finish,
  };
  pub use std::str::FromStr;
  pub use std::num::ParseIntError;
}

mod common;

pub trait ParseInstance<Fmt>: Sized {
  fn parse(inputs: Fmt) -> crate::Result<Self>;
}
