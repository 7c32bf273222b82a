use std::fmt::{self, Display};

use grammar::Symbol;

use crate::span::Span;

/// Token kinds of the grammar description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    AxiomKeyword,
    NTermKeyword,
    TermKeyword,
    RuleKeyword,
    EpsKeyword,
    /// A quoted terminal name.
    Term,
    /// A non-terminal name.
    NTerm,
    Equal,
    NewLine,
    EndOfInput,
    Error,
}

impl TokenKind {
    /// The name of the terminal symbol this kind of token matches.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::AxiomKeyword => "AxiomKeyword",
            TokenKind::NTermKeyword => "NTermKeyword",
            TokenKind::TermKeyword => "TermKeyword",
            TokenKind::RuleKeyword => "RuleKeyword",
            TokenKind::EpsKeyword => "EpsKeyword",
            TokenKind::Term => "Term",
            TokenKind::NTerm => "NTerm",
            TokenKind::Equal => "Equal",
            TokenKind::NewLine => "NewLine",
            TokenKind::EndOfInput => "EndOfInput",
            TokenKind::Error => "Error",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "AxiomKeyword" => TokenKind::AxiomKeyword,
            "NTermKeyword" => TokenKind::NTermKeyword,
            "TermKeyword" => TokenKind::TermKeyword,
            "RuleKeyword" => TokenKind::RuleKeyword,
            "EpsKeyword" => TokenKind::EpsKeyword,
            "Term" => TokenKind::Term,
            "NTerm" => TokenKind::NTerm,
            "Equal" => TokenKind::Equal,
            "NewLine" => TokenKind::NewLine,
            "EndOfInput" => TokenKind::EndOfInput,
            "Error" => TokenKind::Error,
            _ => return None,
        };
        Some(kind)
    }

    /// The grammar symbol for this kind. All kinds but end of input map to
    /// the terminal of the same name.
    pub fn symbol(self) -> Symbol {
        match self {
            TokenKind::EndOfInput => Symbol::EndOfInput,
            kind => Symbol::terminal(kind.name()),
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Anything the engine can consume as lookahead.
pub trait Lexeme {
    fn symbol(&self) -> Symbol;
    fn text(&self) -> &str;
    fn span(&self) -> Span;
    /// Unrecognized input. The engine fails on the first one it sees.
    fn is_error(&self) -> bool;
}

/// A sequence of lexemes, yielding end of input forever once exhausted.
pub trait TokenSource {
    type Token: Lexeme;

    fn has_next(&self) -> bool;
    fn next_token(&mut self) -> Self::Token;
}

/// A token of the grammar description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Token { kind, text, span }
    }
}

impl<'a> Lexeme for Token<'a> {
    fn symbol(&self) -> Symbol {
        self.kind.symbol()
    }

    fn text(&self) -> &str {
        self.text
    }

    fn span(&self) -> Span {
        self.span
    }

    fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl<'a> Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.span, self.text.escape_debug())
    }
}
