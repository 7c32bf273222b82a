use log::debug;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

use crate::sets::{FirstSets, FollowSets};
use crate::{Grammar, GrammarError, Production, Result, Symbol};

/// Predictive parsing table mapping a non-terminal and a lookahead (terminal
/// or end of input) to the production to expand. Missing cells are syntax
/// errors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    cells: BTreeMap<String, BTreeMap<Symbol, Production>>,
}

impl Table {
    pub fn build(grammar: &Grammar, first: &FirstSets, follow: &FollowSets) -> Result<Self> {
        let mut table = Table::default();
        for (lhs, productions) in grammar.rules().iter() {
            for production in productions {
                let starts = first.first_of(production.symbols());
                for lookahead in starts.iter().filter(|s| **s != Symbol::Epsilon) {
                    table.assign(lhs, lookahead, production)?;
                }
                if starts.contains(&Symbol::Epsilon) {
                    for lookahead in follow.get(lhs).into_iter().flatten() {
                        table.assign(lhs, lookahead, production)?;
                    }
                }
            }
        }
        debug!(
            "built parsing table with {} cells for {} non-terminals",
            table.cells.values().map(|row| row.len()).sum::<usize>(),
            table.cells.len()
        );
        Ok(table)
    }

    fn assign(&mut self, lhs: &str, lookahead: &Symbol, production: &Production) -> Result<()> {
        let row = self.cells.entry(lhs.to_owned()).or_default();
        if let Some(existing) = row.get(lookahead) {
            if existing != production {
                return Err(GrammarError::TableConflict {
                    nonterminal: lhs.to_owned(),
                    lookahead: lookahead.clone(),
                    first: existing.clone(),
                    second: production.clone(),
                });
            }
            return Ok(());
        }
        row.insert(lookahead.clone(), production.clone());
        Ok(())
    }

    /// The production to expand `nonterminal` with on `lookahead`, if any.
    pub fn get(&self, nonterminal: &str, lookahead: &Symbol) -> Option<&Production> {
        self.cells.get(nonterminal)?.get(lookahead)
    }

    /// Every lookahead with an entry for `nonterminal`.
    pub fn lookaheads(&self, nonterminal: &str) -> Vec<Symbol> {
        self.cells
            .get(nonterminal)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (lhs, row) in &self.cells {
            for (lookahead, production) in row {
                writeln!(f, "{}, {} => {}", lhs, lookahead, production)?;
            }
        }
        Ok(())
    }
}
