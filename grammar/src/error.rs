use std::error;
use std::fmt::{self, Display};

use crate::{Production, Symbol};

#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// Rule notation could not be parsed.
    Syntax(String),
    /// The axiom has no productions.
    UndefinedAxiom(String),
    /// A production refers to a non-terminal without productions.
    UndefinedNonTerminal { name: String, referenced_by: String },
    /// End of input may only appear in lookahead position.
    MisplacedEndOfInput(String),
    /// Two different productions claim the same table cell; the grammar is
    /// not LL(1).
    TableConflict {
        nonterminal: String,
        lookahead: Symbol,
        first: Production,
        second: Production,
    },
    /// A grammar description uses a symbol it never declared.
    UndeclaredSymbol(Symbol),
    /// A grammar description declares a symbol twice.
    DuplicateDeclaration(Symbol),
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GrammarError::Syntax(ref s) => write!(f, "failed to parse rules: {}", s),
            GrammarError::UndefinedAxiom(ref name) => {
                write!(f, "axiom {} has no productions", name)
            }
            GrammarError::UndefinedNonTerminal {
                ref name,
                ref referenced_by,
            } => write!(
                f,
                "non-terminal {} is used by {} but has no productions",
                name, referenced_by
            ),
            GrammarError::MisplacedEndOfInput(ref lhs) => {
                write!(f, "production of {} contains end of input", lhs)
            }
            GrammarError::TableConflict {
                ref nonterminal,
                ref lookahead,
                ref first,
                ref second,
            } => write!(
                f,
                "grammar is not LL(1): {} on {} selects both `{}` and `{}`",
                nonterminal, lookahead, first, second
            ),
            GrammarError::UndeclaredSymbol(ref symbol) => {
                write!(f, "symbol {} is used but not declared", symbol)
            }
            GrammarError::DuplicateDeclaration(ref symbol) => {
                write!(f, "symbol {} is declared more than once", symbol)
            }
        }
    }
}

impl error::Error for GrammarError {}

impl From<nom::Err<nom::error::Error<&str>>> for GrammarError {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> GrammarError {
        GrammarError::Syntax(format!("{:?}", err))
    }
}
