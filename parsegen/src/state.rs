use grammar::{FirstSets, Grammar, Production, Symbol, Table};
use log::trace;

use crate::error::{ParseError, Result};
use crate::span::Span;
use crate::tokens::{Lexeme, TokenSource};
use crate::tree::Node;

/// Arena index of the synthetic node owning the axiom's subtree.
const ROOT: usize = 0;

/// A node whose children may still be arriving. Children are attached in
/// order, so a count is enough to reassemble them.
#[derive(Debug)]
enum Pending {
    Interior {
        name: String,
        production: Production,
        children: usize,
    },
    Leaf {
        name: String,
        text: String,
        span: Span,
    },
}

/// A symbol still to be matched, and the arena index of the node that will
/// own what it matches.
#[derive(Debug)]
struct Entry {
    symbol: Symbol,
    owner: usize,
}

/// Parser state: the predictive stack and the nodes built so far.
#[derive(Debug)]
pub struct State<'g> {
    grammar: &'g Grammar,
    table: &'g Table,
    first: &'g FirstSets,
    stack: Vec<Entry>,
    arena: Vec<Pending>,
}

impl<'g> State<'g> {
    pub fn new(grammar: &'g Grammar, table: &'g Table, first: &'g FirstSets) -> Self {
        let axiom = Symbol::nonterminal(grammar.axiom());
        State {
            grammar,
            table,
            first,
            stack: vec![
                Entry {
                    symbol: Symbol::EndOfInput,
                    owner: ROOT,
                },
                Entry {
                    symbol: axiom.clone(),
                    owner: ROOT,
                },
            ],
            arena: vec![Pending::Interior {
                name: String::new(),
                production: Production::new(vec![axiom]),
                children: 0,
            }],
        }
    }

    /// Drive the stack over `source` until the end of input sentinel is
    /// reached, failing on the first token that does not fit.
    pub fn run<S: TokenSource>(mut self, source: &mut S) -> Result<Node> {
        let table = self.table;
        let mut lookahead = source.next_token();

        loop {
            if lookahead.is_error() {
                return Err(self.reject(&lookahead, source.has_next()));
            }

            let entry = match self.stack.pop() {
                Some(entry) => entry,
                None => break,
            };
            let found = lookahead.symbol();

            match entry.symbol {
                Symbol::EndOfInput => {
                    if found != Symbol::EndOfInput {
                        return Err(ParseError::TrailingInput {
                            found,
                            text: lookahead.text().to_owned(),
                            span: lookahead.span(),
                        });
                    }
                    break;
                }
                Symbol::Terminal(ref name) => {
                    if entry.symbol != found {
                        self.stack.push(entry);
                        return Err(self.reject(&lookahead, source.has_next()));
                    }
                    trace!("match {} `{}`", found, lookahead.text().escape_debug());
                    self.arena.push(Pending::Leaf {
                        name: name.clone(),
                        text: lookahead.text().to_owned(),
                        span: lookahead.span(),
                    });
                    self.attach(entry.owner);
                    lookahead = source.next_token();
                }
                Symbol::NonTerminal(ref name) => {
                    let production = match table.get(name, &found) {
                        Some(production) => production,
                        None => {
                            self.stack.push(entry);
                            return Err(self.reject(&lookahead, source.has_next()));
                        }
                    };
                    trace!("expand {} -> {} on {}", name, production, found);
                    let node = self.arena.len();
                    self.arena.push(Pending::Interior {
                        name: name.clone(),
                        production: production.clone(),
                        children: 0,
                    });
                    self.attach(entry.owner);

                    let symbols = production.symbols().iter().rev();
                    for symbol in symbols.filter(|s| **s != Symbol::Epsilon) {
                        self.stack.push(Entry {
                            symbol: symbol.clone(),
                            owner: node,
                        });
                    }
                }
                Symbol::Epsilon => (),
            }
        }

        let axiom = Symbol::nonterminal(self.grammar.axiom());
        match self.into_tree() {
            Some(tree) => Ok(tree),
            None => Err(ParseError::UnexpectedToken {
                expected: vec![axiom],
                found: lookahead.symbol(),
                text: lookahead.text().to_owned(),
                span: lookahead.span(),
            }),
        }
    }

    /// Count one more child for `owner`. Children arrive left to right.
    fn attach(&mut self, owner: usize) {
        if let Some(Pending::Interior { children, .. }) = self.arena.get_mut(owner) {
            *children += 1;
        }
    }

    /// Whether everything left on the stack can derive the empty string, in
    /// which case the input consumed so far is a complete sentence.
    fn complete(&self) -> bool {
        self.stack.iter().all(|entry| match entry.symbol {
            Symbol::NonTerminal(ref name) => self.first.nullable(name),
            Symbol::Terminal(_) => false,
            Symbol::Epsilon | Symbol::EndOfInput => true,
        })
    }

    /// Build the error for a lookahead that cannot be consumed with the
    /// current stack. `more` tells whether the source holds tokens past the
    /// lookahead.
    ///
    /// Unrecognized input only counts as trailing when it is the last thing
    /// in the source; anywhere else it is a lexical error.
    fn reject<L: Lexeme>(&self, lookahead: &L, more: bool) -> ParseError {
        let found = lookahead.symbol();
        let text = lookahead.text().to_owned();
        let span = lookahead.span();

        if lookahead.is_error() {
            if !more && self.complete() {
                return ParseError::TrailingInput { found, text, span };
            }
            return ParseError::Lex { text, span };
        }
        if found != Symbol::EndOfInput && self.complete() {
            return ParseError::TrailingInput { found, text, span };
        }

        let expected = match self.stack.last() {
            Some(Entry {
                symbol: Symbol::NonTerminal(name),
                ..
            }) => self.table.lookaheads(name),
            Some(entry) => vec![entry.symbol.clone()],
            None => Vec::new(),
        };
        ParseError::UnexpectedToken {
            expected,
            found,
            text,
            span,
        }
    }

    /// Assemble the arena into an owned tree and return the subtree of the
    /// axiom.
    ///
    /// Nodes were created in pre-order, so walking the arena backwards sees
    /// every subtree before its parent. Finished subtrees wait on a stack,
    /// the leftmost child on top.
    fn into_tree(self) -> Option<Node> {
        let mut done: Vec<Node> = Vec::new();
        for pending in self.arena.into_iter().rev() {
            let node = match pending {
                Pending::Leaf { name, text, span } => Node::Leaf { name, text, span },
                Pending::Interior {
                    name,
                    production,
                    children,
                } => {
                    let at = done.len().saturating_sub(children);
                    let mut taken = done.split_off(at);
                    taken.reverse();
                    Node::Interior {
                        name,
                        production,
                        children: taken,
                    }
                }
            };
            done.push(node);
        }

        match done.pop()? {
            Node::Interior { mut children, .. } => children.pop(),
            Node::Leaf { .. } => None,
        }
    }
}
