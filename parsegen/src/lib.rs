use grammar::{FirstSets, FollowSets, Grammar, Table};
use log::debug;

pub mod describe;
mod error;
pub mod lexer;
pub mod meta;
mod position;
mod span;
mod state;
mod tokens;
mod tree;
mod words;

pub use error::{ParseError, Result};
pub use lexer::Lexer;
pub use position::Position;
pub use span::Span;
pub use state::State;
pub use tokens::{Lexeme, Token, TokenKind, TokenSource};
pub use tree::{Dfs, Node};
pub use words::{Word, WordKind, Words};

/// A predictive parser for one grammar. FIRST, FOLLOW and the parsing table
/// are computed once, after which the parser is read-only and can be shared
/// between parses.
#[derive(Debug, Clone)]
pub struct Parser {
    grammar: Grammar,
    first: FirstSets,
    follow: FollowSets,
    table: Table,
}

impl Parser {
    /// Analyse `grammar`, failing if it is not LL(1).
    pub fn new(grammar: Grammar) -> grammar::Result<Self> {
        let first = FirstSets::compute(&grammar);
        let follow = FollowSets::compute(&grammar, &first);
        let table = Table::build(&grammar, &first, &follow)?;
        debug!("built parser for axiom {}", grammar.axiom());
        Ok(Parser {
            grammar,
            first,
            follow,
            table,
        })
    }

    /// The parser for grammar description files.
    pub fn meta() -> grammar::Result<Self> {
        Parser::new(meta::grammar()?)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn first(&self) -> &FirstSets {
        &self.first
    }

    pub fn follow(&self) -> &FollowSets {
        &self.follow
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Parse everything `source` yields into a tree rooted at the axiom.
    pub fn parse<S: TokenSource>(&self, mut source: S) -> Result<Node> {
        State::new(&self.grammar, &self.table, &self.first).run(&mut source)
    }

    /// Parse whitespace separated words, each naming a terminal.
    pub fn parse_words(&self, input: &str) -> Result<Node> {
        self.parse(Words::new(input, &self.grammar.terminals()))
    }
}
