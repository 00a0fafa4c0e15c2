use super::nom_prelude::*;

pub fn usize_<'a, E>(input: &'a str) -> IResult<&'a str, usize, E>
  where
    E: ParseError<&'a str> + error::FromExternalError<&'a str, ParseIntError>
{
  map_res(digit1, usize::from_str)(input)
}

/// A run of non-whitespace characters.
pub fn token<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
  where
    E: ParseError<&'a str>
{
  take_till1(|c: char| c.is_whitespace())(input)
}

/// Runs `parser` over a single (trimmed) line, which must be consumed completely.
pub fn parse_line<'a, O, F>(parser: F, line: &'a str) -> crate::Result<O>
  where
    F: nom::Parser<&'a str, O, error::VerboseError<&'a str>>
{
  match all_consuming(parser)(line).finish() {
    Ok((_, output)) => Ok(output),
    Err(e) => Err(
      anyhow::Error::msg(error::convert_error(line, e))
    ),
  }
}
