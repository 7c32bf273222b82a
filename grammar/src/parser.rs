use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    character::complete::{multispace0, satisfy},
    combinator::{all_consuming, map, recognize},
    multi::{many1, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::{Production, Symbol};

pub fn terminal(input: &str) -> IResult<&str, Symbol> {
    map(
        alt((
            delimited(tag("\""), take_until("\""), tag("\"")),
            delimited(tag("\'"), take_until("\'"), tag("\'")),
        )),
        |matched: &str| Symbol::Terminal(matched.to_owned()),
    )(input)
}

pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '\''),
    ))(input)
}

fn nonterminal(input: &str) -> IResult<&str, Symbol> {
    let (rem, matched) = identifier(input)?;
    Ok((rem, Symbol::NonTerminal(matched.to_owned())))
}

fn epsilon(input: &str) -> IResult<&str, Symbol> {
    map(tag("ε"), |_| Symbol::Epsilon)(input)
}

pub fn symbol(input: &str) -> IResult<&str, Symbol> {
    preceded(multispace0, alt((epsilon, terminal, nonterminal)))(input)
}

pub fn production(input: &str) -> IResult<&str, Production> {
    map(many1(symbol), Production::new)(input)
}

fn alternatives(input: &str) -> IResult<&str, Vec<Production>> {
    separated_list1(preceded(multispace0, tag("|")), production)(input)
}

pub fn rule(input: &str) -> IResult<&str, (String, Vec<Production>)> {
    let (rem, (lhs, _, productions, _)) = tuple((
        preceded(multispace0, identifier),
        preceded(multispace0, tag("->")),
        alternatives,
        preceded(multispace0, tag(";")),
    ))(input)?;
    Ok((rem, (lhs.to_owned(), productions)))
}

pub fn grammar(input: &str) -> IResult<&str, Vec<(String, Vec<Production>)>> {
    all_consuming(terminated(many1(rule), multispace0))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;

    struct TestCase<T> {
        input: &'static str,
        // None indicates an error of any kind.
        out: Option<IResult<&'static str, T>>,
    }

    fn assert_test_cases<T, F>(f: F, tests: Vec<TestCase<T>>)
    where
        T: Debug + PartialEq,
        F: Fn(&'static str) -> IResult<&'static str, T>,
    {
        for t in tests {
            let res = f(t.input);
            match t.out {
                Some(out) => assert_eq!(res, out, "input: {:?}", t.input),
                None => assert!(res.is_err(), "expected error: {:?}", res),
            }
        }
    }

    fn t(name: &str) -> Symbol {
        Symbol::terminal(name)
    }

    fn n(name: &str) -> Symbol {
        Symbol::nonterminal(name)
    }

    #[test]
    fn parse_terminal() {
        let tests = vec![
            TestCase {
                input: "\"Term\"",
                out: Some(Ok(("", t("Term")))),
            },
            TestCase {
                input: "'+' rest",
                out: Some(Ok((" rest", t("+")))),
            },
            TestCase {
                input: "'+\" rest",
                out: None,
            },
        ];

        assert_test_cases(terminal, tests);
    }

    #[test]
    fn parse_symbol() {
        let tests = vec![
            TestCase {
                input: "  R'",
                out: Some(Ok(("", n("R'")))),
            },
            TestCase {
                input: "V1 V2",
                out: Some(Ok((" V2", n("V1")))),
            },
            TestCase {
                input: "ε |",
                out: Some(Ok((" |", Symbol::Epsilon))),
            },
            TestCase {
                input: "1abc",
                out: None,
            },
        ];

        assert_test_cases(symbol, tests);
    }

    #[test]
    fn parse_production() {
        let tests = vec![
            TestCase {
                input: "\"NewLine\" V | ε",
                out: Some(Ok((
                    " | ε",
                    Production::new(vec![t("NewLine"), n("V")]),
                ))),
            },
            TestCase {
                input: "ε ;",
                out: Some(Ok((" ;", Production::epsilon()))),
            },
            TestCase {
                input: ";",
                out: None,
            },
        ];

        assert_test_cases(production, tests);
    }

    #[test]
    fn parse_rule() {
        let tests = vec![
            TestCase {
                input: "N -> \"NTerm\" N | ε ;",
                out: Some(Ok((
                    "",
                    (
                        "N".to_owned(),
                        vec![
                            Production::new(vec![t("NTerm"), n("N")]),
                            Production::epsilon(),
                        ],
                    ),
                ))),
            },
            TestCase {
                input: "A -> B ; C -> D ;",
                out: Some(Ok((
                    " C -> D ;",
                    ("A".to_owned(), vec![Production::new(vec![n("B")])]),
                ))),
            },
            TestCase {
                input: "A -> B",
                out: None,
            },
            TestCase {
                input: "A = B ;",
                out: None,
            },
        ];

        assert_test_cases(rule, tests);
    }

    #[test]
    fn parse_grammar() {
        let (_, rules) = grammar("\n  S -> A ;\n  A -> 'a' | ε ;\n").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].0, "S");
        assert_eq!(rules[1].1.len(), 2);

        assert!(grammar("S -> A ; junk").is_err());
    }
}
