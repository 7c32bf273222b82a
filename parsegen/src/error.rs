use std::error;
use std::fmt::{self, Display};

use grammar::Symbol;

use crate::span::Span;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input the lexer could not make sense of.
    Lex { text: String, span: Span },
    /// The lookahead fits neither the terminal on top of the stack nor any
    /// table entry of the non-terminal on top of the stack.
    UnexpectedToken {
        expected: Vec<Symbol>,
        found: Symbol,
        text: String,
        span: Span,
    },
    /// The input read so far already forms a complete sentence, but more
    /// input follows.
    TrailingInput {
        found: Symbol,
        text: String,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match *self {
            ParseError::Lex { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::TrailingInput { span, .. } => span,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::Lex { ref text, span } => write!(
                f,
                "{}: unrecognized input `{}`",
                span.start,
                text.escape_debug()
            ),
            ParseError::UnexpectedToken {
                ref expected,
                ref found,
                ref text,
                span,
            } => {
                write!(f, "{}: unexpected ", span.start)?;
                write_found(f, found, text)?;
                match expected.as_slice() {
                    [] => Ok(()),
                    [one] => write!(f, ", expected {}", one),
                    many => {
                        write!(f, ", expected one of ")?;
                        for (i, symbol) in many.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{}", symbol)?;
                        }
                        Ok(())
                    }
                }
            }
            ParseError::TrailingInput {
                ref found,
                ref text,
                span,
            } => {
                write!(f, "{}: trailing input after a complete sentence: ", span.start)?;
                write_found(f, found, text)
            }
        }
    }
}

fn write_found(f: &mut fmt::Formatter, found: &Symbol, text: &str) -> fmt::Result {
    match found {
        Symbol::EndOfInput => write!(f, "end of input"),
        symbol => write!(f, "{} `{}`", symbol, text.escape_debug()),
    }
}

impl error::Error for ParseError {}
