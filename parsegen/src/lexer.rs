//! Lexer for the grammar description language.
//!
//! Scanning tries a fixed, ordered list of patterns at the current position
//! and takes the first one that matches. Input matching no pattern becomes a
//! one-character `Error` token and scanning carries on.
//!
//! Newlines only matter between the alternatives of a rule body, so the raw
//! token sequence is filtered once it is complete: a newline survives only
//! inside a `$RULE` and only if another token of the same rule follows it.

use log::debug;
use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::satisfy,
    combinator::recognize,
    error::ErrorKind,
    sequence::{pair, preceded},
    IResult,
};

use crate::position::{Cursor, Position};
use crate::span::Span;
use crate::tokens::{Token, TokenKind, TokenSource};

type Pattern = fn(&str) -> IResult<&str, &str>;

/// Patterns in the order they are tried.
const PATTERNS: [(TokenKind, Pattern); 9] = [
    (TokenKind::AxiomKeyword, axiom_keyword),
    (TokenKind::NTermKeyword, nterm_keyword),
    (TokenKind::TermKeyword, term_keyword),
    (TokenKind::RuleKeyword, rule_keyword),
    (TokenKind::EpsKeyword, eps_keyword),
    (TokenKind::NTerm, nterm_name),
    (TokenKind::Term, term_name),
    (TokenKind::Equal, equal),
    (TokenKind::NewLine, newline),
];

fn axiom_keyword(input: &str) -> IResult<&str, &str> {
    tag("$AXIOM")(input)
}

fn nterm_keyword(input: &str) -> IResult<&str, &str> {
    tag("$NTERM")(input)
}

fn term_keyword(input: &str) -> IResult<&str, &str> {
    tag("$TERM")(input)
}

fn rule_keyword(input: &str) -> IResult<&str, &str> {
    tag("$RULE")(input)
}

fn eps_keyword(input: &str) -> IResult<&str, &str> {
    tag("$EPS")(input)
}

/// An uppercase letter followed by anything up to a space or newline.
fn nterm_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_uppercase()),
        take_while(|c: char| c != ' ' && c != '\n'),
    ))(input)
}

/// A double quoted run of characters other than spaces, newlines and
/// uppercase letters.
fn term_name(input: &str) -> IResult<&str, &str> {
    let quoted: IResult<&str, &str> = preceded(
        tag("\""),
        take_while1(|c: char| c != ' ' && c != '\n' && !c.is_ascii_uppercase()),
    )(input);
    let (_, run) = quoted?;

    // The run may contain quotes itself; the name closes at the last one, with
    // at least one character before it.
    match run.rfind('"') {
        Some(close) if close > 0 => {
            let (matched, rest) = input.split_at(close + 2);
            Ok((rest, matched))
        }
        _ => Err(nom::Err::Error(nom::error::Error {
            input,
            code: ErrorKind::Char,
        })),
    }
}

fn equal(input: &str) -> IResult<&str, &str> {
    tag("=")(input)
}

fn newline(input: &str) -> IResult<&str, &str> {
    tag("\n")(input)
}

/// Scan `source` into its raw, unfiltered tokens. Spaces and tabs separate
/// tokens and are never part of one. No end of input token is included.
pub fn scan(source: &str) -> Vec<Token<'_>> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    loop {
        cursor.skip_while(|c| c == ' ' || c == '\t');
        if cursor.is_at_end() {
            break;
        }
        tokens.push(next_raw(&mut cursor));
    }
    tokens
}

fn next_raw<'a>(cursor: &mut Cursor<'a>) -> Token<'a> {
    let start = cursor.position();
    let rest = cursor.rest();
    for (kind, pattern) in PATTERNS.iter() {
        if let Ok((_, matched)) = pattern(rest) {
            let text = cursor.advance(matched.len());
            return Token::new(*kind, text, Span::new(start, cursor.position()));
        }
    }

    let len = rest.chars().next().map_or(0, |c| c.len_utf8());
    let text = cursor.advance(len);
    Token::new(TokenKind::Error, text, Span::new(start, cursor.position()))
}

/// Drop every newline that does not separate two alternatives of a rule
/// body.
pub fn filter(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut in_rule = false;
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        match token.kind {
            TokenKind::RuleKeyword => in_rule = true,
            TokenKind::AxiomKeyword | TokenKind::NTermKeyword | TokenKind::TermKeyword => {
                in_rule = false
            }
            _ => (),
        }

        if token.kind == TokenKind::NewLine {
            let ends_rule = match iter.peek() {
                Some(next) => next.kind == TokenKind::RuleKeyword,
                None => true,
            };
            if !in_rule || ends_rule {
                continue;
            }
        }
        kept.push(token);
    }
    kept
}

/// Filtered tokens of one source text, handed out in order.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    tokens: Vec<Token<'a>>,
    next: usize,
    end: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let raw = scan(source);
        let scanned = raw.len();
        let tokens = filter(raw);
        debug!(
            "scanned {} tokens, kept {} after filtering newlines",
            scanned,
            tokens.len()
        );
        Lexer {
            tokens,
            next: 0,
            end: Position::end_of(source),
        }
    }
}

impl<'a> TokenSource for Lexer<'a> {
    type Token = Token<'a>;

    fn has_next(&self) -> bool {
        self.next < self.tokens.len()
    }

    fn next_token(&mut self) -> Token<'a> {
        match self.tokens.get(self.next) {
            Some(token) => {
                self.next += 1;
                *token
            }
            None => Token::new(TokenKind::EndOfInput, "", Span::point(self.end)),
        }
    }
}
