//! Recover the grammar written in a description file from its syntax tree.

use std::collections::BTreeSet;

use grammar::{Grammar, GrammarError, Production, Rules, Symbol};
use log::debug;

use crate::tokens::TokenKind;
use crate::tree::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Start,
    Axiom,
    NonTerminals,
    Terminals,
    RuleHead,
    RuleBody,
}

#[derive(Debug)]
struct Builder {
    section: Section,
    axiom: Option<String>,
    nonterminals: BTreeSet<String>,
    terminals: BTreeSet<String>,
    rules: Rules,
    lhs: Option<String>,
    alternative: Vec<Symbol>,
}

impl Builder {
    fn new() -> Self {
        Builder {
            section: Section::Start,
            axiom: None,
            nonterminals: BTreeSet::new(),
            terminals: BTreeSet::new(),
            rules: Rules::new(),
            lhs: None,
            alternative: Vec::new(),
        }
    }

    fn leaf(&mut self, kind: TokenKind, text: &str) -> grammar::Result<()> {
        match (kind, self.section) {
            (TokenKind::AxiomKeyword, _) => self.section = Section::Axiom,
            (TokenKind::NTermKeyword, _) => self.section = Section::NonTerminals,
            (TokenKind::TermKeyword, _) => self.section = Section::Terminals,
            (TokenKind::RuleKeyword, _) => {
                self.close_rule();
                self.section = Section::RuleHead;
            }
            (TokenKind::Equal, Section::RuleHead) => self.section = Section::RuleBody,
            (TokenKind::NewLine, Section::RuleBody) => self.close_alternative(),
            (TokenKind::EpsKeyword, Section::RuleBody) => self.alternative.push(Symbol::Epsilon),

            (TokenKind::NTerm, Section::Axiom) => self.axiom = Some(text.to_owned()),
            (TokenKind::NTerm, Section::NonTerminals) => {
                if !self.nonterminals.insert(text.to_owned()) {
                    return Err(GrammarError::DuplicateDeclaration(Symbol::nonterminal(
                        text,
                    )));
                }
            }
            (TokenKind::NTerm, Section::RuleHead) => {
                self.nonterminal(text)?;
                self.lhs = Some(text.to_owned());
            }
            (TokenKind::NTerm, Section::RuleBody) => {
                let symbol = self.nonterminal(text)?;
                self.alternative.push(symbol);
            }

            (TokenKind::Term, Section::Terminals) => {
                let name = unquote(text);
                if !self.terminals.insert(name.to_owned()) {
                    return Err(GrammarError::DuplicateDeclaration(Symbol::terminal(name)));
                }
            }
            (TokenKind::Term, Section::RuleBody) => {
                let name = unquote(text);
                if !self.terminals.contains(name) {
                    return Err(GrammarError::UndeclaredSymbol(Symbol::terminal(name)));
                }
                self.alternative.push(Symbol::terminal(name));
            }

            (kind, section) => {
                return Err(GrammarError::Syntax(format!(
                    "unexpected {} `{}` in {:?} section",
                    kind,
                    text.escape_debug(),
                    section
                )))
            }
        }
        Ok(())
    }

    fn nonterminal(&self, name: &str) -> grammar::Result<Symbol> {
        let symbol = Symbol::nonterminal(name);
        if self.nonterminals.contains(name) {
            Ok(symbol)
        } else {
            Err(GrammarError::UndeclaredSymbol(symbol))
        }
    }

    fn close_alternative(&mut self) {
        let symbols = std::mem::take(&mut self.alternative);
        if let Some(lhs) = &self.lhs {
            self.rules.add(lhs, Production::new(symbols));
        }
    }

    fn close_rule(&mut self) {
        if self.section == Section::RuleBody {
            self.close_alternative();
        }
        self.lhs = None;
    }

    fn finish(mut self) -> grammar::Result<Grammar> {
        self.close_rule();
        let axiom = match self.axiom {
            Some(axiom) => axiom,
            None => return Err(GrammarError::Syntax("no axiom declared".to_owned())),
        };
        if !self.nonterminals.contains(&axiom) {
            return Err(GrammarError::UndeclaredSymbol(Symbol::nonterminal(&axiom)));
        }
        debug!(
            "described grammar has {} non-terminals, {} terminals, {} rules",
            self.nonterminals.len(),
            self.terminals.len(),
            self.rules.len()
        );
        Grammar::new(&axiom, self.rules)
    }
}

/// Terminal names are written between double quotes.
fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
}

/// Extract the grammar described by `tree`, a tree produced by the
/// description grammar.
pub fn grammar_of(tree: &Node) -> grammar::Result<Grammar> {
    let mut builder = Builder::new();
    for leaf in tree.leaves() {
        let kind = TokenKind::from_name(leaf.name()).ok_or_else(|| {
            GrammarError::Syntax(format!("`{}` is not a description token", leaf.name()))
        })?;
        builder.leaf(kind, leaf.text().unwrap_or_default())?;
    }
    builder.finish()
}
