use nom::{
    character::complete::{space0, space1},
    combinator::map,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::grammar::parser::{arrow, symbol, trailer};

/// One parsed transition line, `<from> <label> -> <to>`, as raw tokens.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedTransition<'a> {
    pub(crate) frm: &'a str,
    pub(crate) label: &'a str,
    pub(crate) to: &'a str,
}

pub(crate) fn transition(input: &str) -> IResult<&str, ParsedTransition> {
    map(
        delimited(
            space0,
            pair(
                terminated(
                    pair(symbol, preceded(space1, symbol)),
                    delimited(space1, arrow, space1),
                ),
                symbol,
            ),
            trailer,
        ),
        |((frm, label), to)| ParsedTransition { frm, label, to },
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;

    #[test]
    fn parses_a_transition_line() {
        let (_, parsed) = all_consuming(transition)(" A a -> B  # consume a").unwrap();
        assert_eq!(
            parsed,
            ParsedTransition {
                frm: "A",
                label: "a",
                to: "B",
            }
        );
    }

    #[test]
    fn rejects_wrong_shapes() {
        let tests = vec!["A -> B", "A a b -> B", "A a B", "A a -> B -> C"];
        for test in tests {
            assert!(
                all_consuming(transition)(test).is_err(),
                "accepted `{}`",
                test
            );
        }
    }
}
