use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{space0, space1},
    combinator::{map, opt, rest, value, verify},
    multi::separated_list1,
    sequence::{delimited, pair, terminated},
    IResult,
};

/// One parsed production line: a left-hand side and one right-hand side per
/// `|` alternative, all as raw tokens.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedProduction<'a> {
    pub(crate) lhs: Vec<&'a str>,
    pub(crate) alternatives: Vec<Vec<&'a str>>,
}

pub(crate) fn production(input: &str) -> IResult<&str, ParsedProduction> {
    map(
        delimited(
            space0,
            pair(
                terminated(symbols, delimited(space1, arrow, space1)),
                separated_list1(delimited(space1, pipe, space1), symbols),
            ),
            trailer,
        ),
        |(lhs, alternatives)| ParsedProduction { lhs, alternatives },
    )(input)
}

/// A symbol is any run of non-blank characters that is not one of the
/// structural tokens.
pub(crate) fn symbol(input: &str) -> IResult<&str, &str> {
    verify(
        take_till1(|c: char| c.is_whitespace() || c == '#'),
        |sym| !["->", "→", "|"].contains(&sym),
    )(input)
}

pub(crate) fn symbols(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(space1, symbol)(input)
}

pub(crate) fn arrow(input: &str) -> IResult<&str, ()> {
    value((), alt((tag("->"), tag("→"))))(input)
}

fn pipe(input: &str) -> IResult<&str, ()> {
    value((), tag("|"))(input)
}

/// Trailing space and an optional `#` comment at the end of a line.
pub(crate) fn trailer(input: &str) -> IResult<&str, ()> {
    value((), pair(space0, opt(pair(tag("#"), rest))))(input)
}

/// Lines that hold no production at all: blank or comment-only.
pub(crate) fn blank(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;

    #[test]
    fn parses_a_plain_line() {
        let (_, parsed) = all_consuming(production)("S -> a b c").unwrap();
        assert_eq!(parsed.lhs, vec!["S"]);
        assert_eq!(parsed.alternatives, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn parses_alternatives_and_comments() {
        let (_, parsed) = all_consuming(production)("  E -> E + E | i  # sums").unwrap();
        assert_eq!(parsed.lhs, vec!["E"]);
        assert_eq!(parsed.alternatives, vec![vec!["E", "+", "E"], vec!["i"]]);
    }

    #[test]
    fn parses_a_unicode_arrow() {
        let (_, parsed) = all_consuming(production)("b Q c → b b c c").unwrap();
        assert_eq!(parsed.lhs, vec!["b", "Q", "c"]);
    }

    #[test]
    fn rejects_structural_tokens_as_symbols() {
        let tests = vec!["-> a", "S -> a -> b", "S", "S ->"];
        for test in tests {
            assert!(
                all_consuming(production)(test).is_err(),
                "accepted `{}`",
                test
            );
        }
    }
}
