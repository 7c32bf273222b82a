//! FIRST and FOLLOW sets, computed as least fixpoints.
//!
//! Both computations start from empty sets and only ever add symbols, so they
//! terminate once a full pass over the rules adds nothing. Every set is a
//! subset of the terminal alphabet plus epsilon (FIRST) or end of input
//! (FOLLOW).

use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};

use crate::{Grammar, Symbol};

/// FIRST sets keyed by non-terminal name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FirstSets(BTreeMap<String, BTreeSet<Symbol>>);

impl FirstSets {
    pub fn compute(grammar: &Grammar) -> Self {
        let mut sets = FirstSets(empty_sets(grammar));
        let mut passes = 1;
        while sets.refine(grammar) {
            passes += 1;
        }
        debug!("FIRST sets converged after {} passes", passes);
        sets
    }

    /// Run one pass over every production, returning whether any set grew.
    pub fn refine(&mut self, grammar: &Grammar) -> bool {
        let mut changed = false;
        for (lhs, productions) in grammar.rules().iter() {
            for production in productions {
                let found = self.first_of(production.symbols());
                let set = self.0.entry(lhs.clone()).or_default();
                for symbol in found {
                    changed |= set.insert(symbol);
                }
            }
        }
        changed
    }

    /// FIRST of an arbitrary symbol sequence under the current sets. Contains
    /// epsilon iff every symbol of the sequence can derive the empty string.
    pub fn first_of(&self, sequence: &[Symbol]) -> BTreeSet<Symbol> {
        let mut result = BTreeSet::new();
        for symbol in sequence {
            match symbol {
                Symbol::Epsilon => continue,
                Symbol::Terminal(_) | Symbol::EndOfInput => {
                    result.insert(symbol.clone());
                    return result;
                }
                Symbol::NonTerminal(name) => {
                    let first = match self.0.get(name) {
                        Some(first) => first,
                        None => return result,
                    };
                    result.extend(first.iter().filter(|s| **s != Symbol::Epsilon).cloned());
                    if !first.contains(&Symbol::Epsilon) {
                        return result;
                    }
                }
            }
        }
        result.insert(Symbol::Epsilon);
        result
    }

    pub fn get(&self, nonterminal: &str) -> Option<&BTreeSet<Symbol>> {
        self.0.get(nonterminal)
    }

    /// Whether the non-terminal derives the empty string.
    pub fn nullable(&self, nonterminal: &str) -> bool {
        self.0
            .get(nonterminal)
            .map_or(false, |set| set.contains(&Symbol::Epsilon))
    }
}

impl Display for FirstSets {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_sets(f, "FIRST", &self.0)
    }
}

/// FOLLOW sets keyed by non-terminal name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FollowSets(BTreeMap<String, BTreeSet<Symbol>>);

impl FollowSets {
    pub fn compute(grammar: &Grammar, first: &FirstSets) -> Self {
        let mut sets = FollowSets(empty_sets(grammar));
        sets.0
            .entry(grammar.axiom().to_owned())
            .or_default()
            .insert(Symbol::EndOfInput);
        let mut passes = 1;
        while sets.refine(grammar, first) {
            passes += 1;
        }
        debug!("FOLLOW sets converged after {} passes", passes);
        sets
    }

    /// Run one pass over every production, returning whether any set grew.
    ///
    /// For `A -> α B β`, FOLLOW(B) gains FIRST(β) without epsilon, and all of
    /// FOLLOW(A) when β can vanish.
    pub fn refine(&mut self, grammar: &Grammar, first: &FirstSets) -> bool {
        let mut changed = false;
        for (lhs, productions) in grammar.rules().iter() {
            for production in productions {
                let symbols = production.symbols();
                for (i, symbol) in symbols.iter().enumerate() {
                    let name = match symbol {
                        Symbol::NonTerminal(name) => name,
                        _ => continue,
                    };

                    let rest = first.first_of(&symbols[i + 1..]);
                    let mut found: Vec<Symbol> = rest
                        .iter()
                        .filter(|s| **s != Symbol::Epsilon)
                        .cloned()
                        .collect();
                    if rest.contains(&Symbol::Epsilon) {
                        if let Some(follow) = self.0.get(lhs) {
                            found.extend(follow.iter().cloned());
                        }
                    }

                    let set = self.0.entry(name.clone()).or_default();
                    for symbol in found {
                        changed |= set.insert(symbol);
                    }
                }
            }
        }
        changed
    }

    pub fn get(&self, nonterminal: &str) -> Option<&BTreeSet<Symbol>> {
        self.0.get(nonterminal)
    }
}

impl Display for FollowSets {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_sets(f, "FOLLOW", &self.0)
    }
}

fn empty_sets(grammar: &Grammar) -> BTreeMap<String, BTreeSet<Symbol>> {
    grammar
        .rules()
        .nonterminals()
        .map(|name| (name.to_owned(), BTreeSet::new()))
        .collect()
}

fn write_sets(
    f: &mut fmt::Formatter,
    title: &str,
    sets: &BTreeMap<String, BTreeSet<Symbol>>,
) -> fmt::Result {
    for (name, set) in sets {
        write!(f, "{}({}) = {{", title, name)?;
        for (i, symbol) in set.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}", symbol)?;
        }
        writeln!(f, " }}")?;
    }
    Ok(())
}
