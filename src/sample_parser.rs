use nom::Finish;

use crate::coords::Point;
use crate::error::{Error, Result};

mod parser {
    use std::str::FromStr;

    use nom::branch::alt;
    use nom::character::complete::{char, digit0, digit1, multispace0, multispace1, one_of};
    use nom::combinator::{all_consuming, map, map_res, opt, recognize};
    use nom::multi::separated_list0;
    use nom::sequence::{delimited, pair, separated_pair, tuple};
    use nom::IResult;

    use crate::coords::Point;

    type Input<'a> = &'a str;

    fn comma_wsp(i: Input) -> IResult<Input, Input> {
        alt((
            recognize(tuple((multispace0, char(','), multispace0))),
            multispace1,
        ))(i)
    }

    fn exponent(i: Input) -> IResult<Input, Input> {
        recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(i)
    }

    fn fractional_constant(i: Input) -> IResult<Input, Input> {
        alt((
            recognize(tuple((digit0, char('.'), digit1))),
            recognize(pair(digit1, char('.'))),
        ))(i)
    }

    fn floating_point_constant(i: Input) -> IResult<Input, Input> {
        alt((
            recognize(pair(fractional_constant, opt(exponent))),
            recognize(pair(digit1, exponent)),
        ))(i)
    }

    pub fn number(i: Input) -> IResult<Input, f64> {
        map_res(
            recognize(pair(opt(one_of("+-")), alt((floating_point_constant, digit1)))),
            f64::from_str,
        )(i)
    }

    pub fn coordinate_pair(i: Input) -> IResult<Input, Point> {
        map(separated_pair(number, comma_wsp, number), |(x, y)| {
            Point::new(x, y)
        })(i)
    }

    pub fn point_list(i: Input) -> IResult<Input, Vec<Point>> {
        all_consuming(delimited(
            multispace0,
            separated_list0(comma_wsp, coordinate_pair),
            multispace0,
        ))(i)
    }
}

/// Parses a list of points written as in the SVG `points` attribute, e.g.
/// `"0,0 0.5,-0.25 1e-1 .3"`. Coordinates may be separated by commas,
/// whitespace or both.
pub fn parse_points(s: &str) -> Result<Vec<Point>> {
    match parser::point_list(s).finish() {
        Ok((_, points)) => Ok(points),
        Err(e) => {
            let context: String = e.input.chars().take(20).collect();
            Err(Error::Parse(format!("unexpected input at \"{}\"", context)))
        }
    }
}

#[test]
fn test_number_parser() {
    assert_eq!(parser::number("1.5"), Ok(("", 1.5)));
    assert_eq!(parser::number("-.25,"), Ok((",", -0.25)));
    assert_eq!(parser::number("+3"), Ok(("", 3.0)));
    assert_eq!(parser::number("2."), Ok(("", 2.0)));
    assert_eq!(parser::number("1.2e-2 "), Ok((" ", 0.012)));
    assert_eq!(parser::number("7E3"), Ok(("", 7000.0)));
    assert!(parser::number("x").is_err());
}

#[test]
fn test_parse_points() {
    assert_eq!(
        parse_points("0,0 3,0\n 3 , 4").unwrap(),
        vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 4.0)]
    );
    assert_eq!(
        parse_points("  -0.5 0.25, 1e-1,.3  ").unwrap(),
        vec![Point::new(-0.5, 0.25), Point::new(0.1, 0.3)]
    );
    assert!(parse_points("").unwrap().is_empty());
}

#[test]
fn test_parse_points_errors() {
    assert!(matches!(parse_points("0,0 1"), Err(Error::Parse(_))));
    assert!(matches!(parse_points("0,0 a,b"), Err(Error::Parse(_))));
}
