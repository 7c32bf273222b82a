//! A lexer for sentences of an arbitrary grammar: input is split on
//! whitespace and every word names a terminal.

use grammar::Symbol;
use log::debug;
use std::collections::BTreeSet;

use crate::position::{Cursor, Position};
use crate::span::Span;
use crate::tokens::{Lexeme, TokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// A word naming a terminal of the alphabet.
    Terminal,
    /// A word outside the alphabet.
    Unknown,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub kind: WordKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Lexeme for Word<'a> {
    fn symbol(&self) -> Symbol {
        match self.kind {
            WordKind::EndOfInput => Symbol::EndOfInput,
            WordKind::Terminal | WordKind::Unknown => Symbol::terminal(self.text),
        }
    }

    fn text(&self) -> &str {
        self.text
    }

    fn span(&self) -> Span {
        self.span
    }

    fn is_error(&self) -> bool {
        self.kind == WordKind::Unknown
    }
}

#[derive(Debug, Clone)]
pub struct Words<'a> {
    words: Vec<Word<'a>>,
    next: usize,
    end: Position,
}

impl<'a> Words<'a> {
    /// Split `source` into words, checking each against `alphabet`.
    pub fn new(source: &'a str, alphabet: &BTreeSet<Symbol>) -> Self {
        let mut cursor = Cursor::new(source);
        let mut words = Vec::new();
        loop {
            cursor.skip_while(char::is_whitespace);
            if cursor.is_at_end() {
                break;
            }

            let start = cursor.position();
            let rest = cursor.rest();
            let len = rest.find(char::is_whitespace).unwrap_or_else(|| rest.len());
            let text = cursor.advance(len);
            let kind = if alphabet.contains(&Symbol::terminal(text)) {
                WordKind::Terminal
            } else {
                WordKind::Unknown
            };
            words.push(Word {
                kind,
                text,
                span: Span::new(start, cursor.position()),
            });
        }
        debug!("split input into {} words", words.len());

        Words {
            words,
            next: 0,
            end: cursor.position(),
        }
    }
}

impl<'a> TokenSource for Words<'a> {
    type Token = Word<'a>;

    fn has_next(&self) -> bool {
        self.next < self.words.len()
    }

    fn next_token(&mut self) -> Word<'a> {
        match self.words.get(self.next) {
            Some(word) => {
                self.next += 1;
                *word
            }
            None => Word {
                kind: WordKind::EndOfInput,
                text: "",
                span: Span::point(self.end),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet(names: &[&str]) -> BTreeSet<Symbol> {
        names.iter().map(|name| Symbol::terminal(name)).collect()
    }

    #[test]
    fn words_are_checked_against_alphabet() {
        let mut words = Words::new("  id +\n\tid * x ", &alphabet(&["id", "+", "*"]));
        let mut got = Vec::new();
        while words.has_next() {
            let word = words.next_token();
            got.push((word.text, word.kind));
        }
        assert_eq!(
            got,
            vec![
                ("id", WordKind::Terminal),
                ("+", WordKind::Terminal),
                ("id", WordKind::Terminal),
                ("*", WordKind::Terminal),
                ("x", WordKind::Unknown),
            ]
        );

        let end = words.next_token();
        assert_eq!(end.symbol(), Symbol::EndOfInput);
        assert_eq!(end.span.start.to_string(), "2:9");
    }

    #[test]
    fn word_symbols_and_spans() {
        let mut words = Words::new("a\nb", &alphabet(&["a"]));
        let a = words.next_token();
        let b = words.next_token();
        assert_eq!(a.symbol(), Symbol::terminal("a"));
        assert!(!a.is_error());
        assert!(b.is_error());
        assert_eq!(b.span.to_string(), "2:1-2:2");
    }
}
